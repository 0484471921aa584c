//! Configuration loading and types for flexcat.
//!
//! This module handles all aspects of configuration:
//! - Type definitions for config structures (`types`)
//! - Loading configs from files and the environment (`load`)

mod load;
mod types;

use std::path::PathBuf;

pub use load::{DEFAULT_CONFIG_FILE, MAX_PAGING_LIMIT};
pub use types::{CategoryConfig, Config, LoggingConfig, ViewConfig};

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to deserialize config: {0}")]
    Deserialize(#[from] config::ConfigError),

    #[error("failed to get current working directory: {0}")]
    CwdFailure(std::io::Error),

    #[error("config path is not valid UTF-8: {}", .0.display())]
    EncodePath(PathBuf),

    #[error("{0}")]
    Validation(String),
}
