//! YAML page import.
//!
//! ```yaml
//! pages:
//!   - title: "Who is Kermit?"
//!     text: "Kermit is a **frog**."
//!     categories:
//!       - Muppet Wiki
//!       - name: Unanswered questions
//!         sortkey: Kermit
//!         timestamp: 1262304000
//! ```

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use super::{Result, StoreError, WikiStore};
use crate::category::{Namespace, Title};

/// The contents of an import file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportFile {
    #[serde(default)]
    pub pages: Vec<ImportPage>,
}

/// One page to create or replace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportPage {
    pub title: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub categories: Vec<CategoryRef>,
}

/// A category link, either a bare name or a name with link details.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryRef {
    Name(String),
    Detailed {
        name: String,
        /// Defaults to the page's display title
        #[serde(default)]
        sortkey: Option<String>,
        /// Unix seconds; defaults to the import time
        #[serde(default)]
        timestamp: Option<i64>,
    },
}

impl CategoryRef {
    pub fn name(&self) -> &str {
        match self {
            CategoryRef::Name(name) | CategoryRef::Detailed { name, .. } => name,
        }
    }

    fn sortkey(&self) -> Option<&str> {
        match self {
            CategoryRef::Name(_) => None,
            CategoryRef::Detailed { sortkey, .. } => sortkey.as_deref(),
        }
    }

    fn timestamp(&self) -> Option<i64> {
        match self {
            CategoryRef::Name(_) => None,
            CategoryRef::Detailed { timestamp, .. } => *timestamp,
        }
    }
}

/// What an import wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub pages: usize,
    pub links: usize,
}

impl WikiStore {
    /// Read and import a YAML file.
    pub fn import_file(&self, path: &Path) -> Result<ImportSummary> {
        let content = std::fs::read_to_string(path)?;
        let file: ImportFile = serde_yaml::from_str(&content)?;
        self.import(&file)
    }

    /// Import pages and their category links.
    ///
    /// Titles are validated before anything is written, so a bad title
    /// leaves the store untouched.
    pub fn import(&self, file: &ImportFile) -> Result<ImportSummary> {
        let now = unix_now();

        let mut resolved = Vec::with_capacity(file.pages.len());
        for page in &file.pages {
            let title = Title::new_from_text(&page.title, Namespace::Main)
                .ok_or_else(|| StoreError::InvalidTitle(page.title.clone()))?;
            let mut links = Vec::with_capacity(page.categories.len());
            for category in &page.categories {
                let cat_title = Title::new_from_text(category.name(), Namespace::Category)
                    .filter(|t| t.namespace() == Namespace::Category)
                    .ok_or_else(|| StoreError::InvalidTitle(category.name().to_string()))?;
                let sort_key = category
                    .sortkey()
                    .map(str::to_string)
                    .unwrap_or_else(|| title.text());
                links.push((cat_title, sort_key, category.timestamp().unwrap_or(now)));
            }
            resolved.push((title, page.text.as_str(), links));
        }

        let mut summary = ImportSummary::default();
        for (title, text, links) in resolved {
            let page_id = self.save_page(&title, text)?;
            summary.pages += 1;
            for (category, sort_key, timestamp) in links {
                self.add_category_link(page_id, &category, &sort_key, timestamp)?;
                summary.links += 1;
            }
            tracing::debug!(%title, "imported page");
        }

        tracing::info!(pages = summary.pages, links = summary.links, "import complete");
        Ok(summary)
    }
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::{MembershipQuery, PagingWindow};

    const SAMPLE: &str = r#"
pages:
  - title: "Who is Kermit?"
    text: "A frog."
    categories:
      - Muppet Wiki
      - name: Unanswered questions
        timestamp: 5
  - title: "Category:Frogs"
    categories:
      - name: Muppet Wiki
        sortkey: Amphibians
"#;

    #[test]
    fn test_import_sample() {
        let store = WikiStore::in_memory().unwrap();
        let file: ImportFile = serde_yaml::from_str(SAMPLE).unwrap();

        let summary = store.import(&file).unwrap();
        assert_eq!(summary, ImportSummary { pages: 2, links: 3 });

        let kermit = Title::new_from_text("Who is Kermit?", Namespace::Main).unwrap();
        assert_eq!(store.page_text(&kermit).unwrap().as_deref(), Some("A frog."));

        let muppets = Title::new_from_text("Muppet Wiki", Namespace::Category).unwrap();
        let rows = store.fetch(&muppets, &PagingWindow::default(), 10).unwrap();
        let keys: Vec<_> = rows.iter().map(|e| e.sort_key.as_str()).collect();
        assert_eq!(keys, vec!["Amphibians", "Who is Kermit?"]);
        assert_eq!(rows[0].title.namespace(), Namespace::Category);
    }

    #[test]
    fn test_bad_title_writes_nothing() {
        let store = WikiStore::in_memory().unwrap();
        let file: ImportFile = serde_yaml::from_str(
            r#"
pages:
  - title: Kermit
  - title: "Bad|Title"
"#,
        )
        .unwrap();

        let err = store.import(&file).unwrap_err();
        assert!(matches!(err, StoreError::InvalidTitle(t) if t == "Bad|Title"));

        let kermit = Title::new_from_text("Kermit", Namespace::Main).unwrap();
        assert_eq!(store.page_text(&kermit).unwrap(), None);
    }

    #[test]
    fn test_import_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pages.yaml");
        std::fs::write(&path, SAMPLE).unwrap();

        let store = WikiStore::in_memory().unwrap();
        assert_eq!(store.import_file(&path).unwrap().pages, 2);
    }

    #[test]
    fn test_missing_file() {
        let store = WikiStore::in_memory().unwrap();
        let err = store.import_file(Path::new("/no/such/pages.yaml")).unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
    }
}
