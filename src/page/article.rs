//! The plain article body shown above (or instead of) the category listing.

use crate::category::Title;
use crate::render::render_markdown;
use crate::store::{StoreError, WikiStore};

/// Renders the ordinary content of a page.
pub trait ArticleRenderer: Send + Sync {
    /// Markup of the page's own content.
    fn render_article(&self, title: &Title) -> Result<String, StoreError>;

    /// Markup placed before the article on category pages.
    fn open_category(&self, _title: &Title) -> Result<String, StoreError> {
        Ok(String::new())
    }
}

/// Renders stored Markdown page text.
pub struct MarkdownArticles<'a> {
    store: &'a WikiStore,
}

impl<'a> MarkdownArticles<'a> {
    pub fn new(store: &'a WikiStore) -> Self {
        Self { store }
    }
}

impl ArticleRenderer for MarkdownArticles<'_> {
    fn render_article(&self, title: &Title) -> Result<String, StoreError> {
        match self.store.page_text(title)? {
            Some(text) => Ok(render_markdown(&text)),
            None => {
                tracing::debug!(%title, "page has no stored text");
                Ok(String::new())
            }
        }
    }
}
