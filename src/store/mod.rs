//! Page and category link storage.
//!
//! Two tables mirror the classic wiki layout:
//! - `page`: one row per page (namespace, key, Markdown text)
//! - `categorylinks`: one row per (page, category) membership, with the
//!   sort key used for alphabetical listing and the time the link was made

mod import;
mod sqlite;

pub use import::{CategoryRef, ImportFile, ImportPage, ImportSummary};
pub use sqlite::WikiStore;

/// Errors from the storage layer.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("storage lock poisoned")]
    Poisoned,

    #[error("invalid title: {0}")]
    InvalidTitle(String),

    #[error("failed to read import file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse import file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("{0}")]
    Backend(String),
}

impl StoreError {
    /// Create an error for a backend that is not SQLite.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
