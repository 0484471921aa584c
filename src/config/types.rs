//! Configuration type definitions.
//!
//! These types are pure data; loading lives in `load`.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Site configuration (`flexcat.yaml`).
///
/// ```yaml
/// database: flexcat.sqlite
/// site_name: Muppet Wiki
/// category:
///   paging_limit: 200
///   magic_gallery: true
/// messages:
///   unanswered_category: Unanswered questions
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// SQLite database file
    #[serde(default = "default_database")]
    pub database: PathBuf,

    /// Directory of template overrides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub templates: Option<PathBuf>,

    /// Shown in page titles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,

    #[serde(default)]
    pub category: CategoryConfig,

    #[serde(default)]
    pub view: ViewConfig,

    /// Namespace ids counted as content
    #[serde(default = "default_content_namespaces")]
    pub content_namespaces: Vec<i64>,

    /// Interface message overrides, by key
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub messages: HashMap<String, String>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            templates: None,
            site_name: None,
            category: CategoryConfig::default(),
            view: ViewConfig::default(),
            content_namespaces: default_content_namespaces(),
            messages: HashMap::new(),
            logging: LoggingConfig::default(),
        }
    }
}

fn default_database() -> PathBuf {
    PathBuf::from("flexcat.sqlite")
}

fn default_content_namespaces() -> Vec<i64> {
    vec![0]
}

/// Category listing settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryConfig {
    /// Members shown per page (default: 200)
    #[serde(default = "default_paging_limit")]
    pub paging_limit: usize,

    /// List files as a gallery rather than as pages (default: true)
    #[serde(default = "default_magic_gallery")]
    pub magic_gallery: bool,
}

impl Default for CategoryConfig {
    fn default() -> Self {
        Self {
            paging_limit: default_paging_limit(),
            magic_gallery: default_magic_gallery(),
        }
    }
}

fn default_paging_limit() -> usize {
    200
}

fn default_magic_gallery() -> bool {
    true
}

/// Page view settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Diff views show only the diff unless the request says otherwise
    #[serde(default)]
    pub diff_only: bool,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default level; `RUST_LOG` overrides it
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
