//! Configuration loading from files and the environment.
//!
//! Values come from the YAML file, then `FLEXCAT__*` environment variables
//! (`FLEXCAT__CATEGORY__PAGING_LIMIT=50`). Relative paths in the file are
//! resolved against the file's directory.

use std::path::Path;

use super::{Config, ConfigError};

pub const DEFAULT_CONFIG_FILE: &str = "flexcat.yaml";

const ENV_PREFIX: &str = "FLEXCAT";

/// Largest accepted `category.paging_limit`.
pub const MAX_PAGING_LIMIT: usize = 5000;

impl Config {
    /// Load the config from the command line argument, defaulting to `flexcat.yaml`
    pub fn load_from_arg(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let config_file = config_file.unwrap_or(Path::new(DEFAULT_CONFIG_FILE));
        let config_file = if config_file.is_relative() {
            std::env::current_dir()
                .map_err(ConfigError::CwdFailure)?
                .join(config_file)
        } else {
            config_file.to_path_buf()
        };

        Self::load_from_file(&config_file)
    }

    /// Load the config from a file path, layered with the environment
    pub(crate) fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let path_str = path
            .as_os_str()
            .to_str()
            .ok_or_else(|| ConfigError::EncodePath(path.to_path_buf()))?;

        let mut config = config::Config::builder()
            .add_source(config::File::new(path_str, config::FileFormat::Yaml))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Config>()?;

        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        config.validate()?;

        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    fn resolve_paths(&mut self, base: &Path) {
        if self.database.is_relative() {
            self.database = base.join(&self.database);
        }
        if let Some(templates) = &self.templates
            && templates.is_relative()
        {
            self.templates = Some(base.join(templates));
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_PAGING_LIMIT).contains(&self.category.paging_limit) {
            return Err(ConfigError::Validation(format!(
                "invalid config: 'category.paging_limit' must be between 1 and {MAX_PAGING_LIMIT}"
            )));
        }
        if self.content_namespaces.is_empty() {
            return Err(ConfigError::Validation(
                "invalid config: 'content_namespaces' must list at least one namespace"
                    .to_string(),
            ));
        }
        Ok(())
    }
}
