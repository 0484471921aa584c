//! Logging setup for the command line.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Parse log level from config string
pub fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "off" => LevelFilter::OFF,
        "error" => LevelFilter::ERROR,
        "warn" => LevelFilter::WARN,
        "info" => LevelFilter::INFO,
        "debug" => LevelFilter::DEBUG,
        "trace" => LevelFilter::TRACE,
        _ => LevelFilter::INFO,
    }
}

/// Install the global subscriber, writing to stderr so command output on
/// stdout stays clean. `RUST_LOG` overrides the configured level.
///
/// Safe to call more than once; later calls are ignored.
pub fn init(level: &str) {
    let env_filter = EnvFilter::builder()
        .with_default_directive(parse_log_level(level).into())
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
