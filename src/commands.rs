pub mod import;
pub mod init;
pub mod query;
pub mod serve;
pub mod view;

use std::path::Path;

use flexcat::config::Config;

/// Load the config and start logging at its level.
fn load_config(config_file: Option<&Path>) -> Result<Config, anyhow::Error> {
    let config = Config::load_from_arg(config_file)?;
    flexcat::logging::init(&config.logging.level);
    Ok(config)
}
