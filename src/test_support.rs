//! Hand-written collaborators for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::category::{
    MemberEntry, MembershipQuery, Namespace, PagingWindow, SectionedViewer, TemplateSections,
    Title,
};
use crate::hooks::HookRegistry;
use crate::messages::Messages;
use crate::page::{ArticleRenderer, CategoryPage, ViewContext, ViewRequest, ViewSettings};
use crate::render::Renderer;
use crate::store::StoreError;

/// In-memory membership with call accounting.
#[derive(Default)]
pub struct MockMembership {
    members: HashMap<String, Vec<MemberEntry>>,
    fail: bool,
    calls: AtomicUsize,
    last_limit: Mutex<Option<usize>>,
}

impl MockMembership {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_limit(&self) -> Option<usize> {
        *self.last_limit.lock().unwrap()
    }
}

impl MembershipQuery for MockMembership {
    fn fetch(
        &self,
        category: &Title,
        window: &PagingWindow,
        limit: usize,
    ) -> Result<Vec<MemberEntry>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_limit.lock().unwrap() = Some(limit);
        if self.fail {
            return Err(StoreError::backend("membership backend unavailable"));
        }

        let mut rows = self
            .members
            .get(category.db_key())
            .cloned()
            .unwrap_or_default();
        rows.sort_by(|a, b| a.sort_key.cmp(&b.sort_key));

        let rows: Vec<MemberEntry> = match (&window.from, &window.until) {
            (Some(from), _) => rows.into_iter().filter(|e| &e.sort_key >= from).collect(),
            (None, Some(until)) => rows
                .into_iter()
                .rev()
                .filter(|e| &e.sort_key < until)
                .collect(),
            (None, None) => rows,
        };
        Ok(rows.into_iter().take(limit).collect())
    }
}

/// Articles keyed by prefixed title, returned verbatim.
#[derive(Default)]
pub struct MockArticles {
    articles: HashMap<String, String>,
    open_markup: String,
    fail: bool,
}

impl ArticleRenderer for MockArticles {
    fn render_article(&self, title: &Title) -> Result<String, StoreError> {
        if self.fail {
            return Err(StoreError::backend("article backend unavailable"));
        }
        Ok(self
            .articles
            .get(&title.prefixed_text())
            .cloned()
            .unwrap_or_default())
    }

    fn open_category(&self, _title: &Title) -> Result<String, StoreError> {
        Ok(self.open_markup.clone())
    }
}

/// Owns every collaborator a view borrows.
pub struct Fixture {
    pub hooks: HookRegistry,
    pub membership: MockMembership,
    pub articles: MockArticles,
    pub sections: TemplateSections,
    pub messages: Messages,
    pub settings: ViewSettings,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            hooks: HookRegistry::new(),
            membership: MockMembership::default(),
            articles: MockArticles::default(),
            sections: TemplateSections::new(Renderer::new().unwrap()),
            messages: Messages::default(),
            settings: ViewSettings::default(),
        }
    }

    /// Add members (by display title) to a category.
    pub fn with_pages(mut self, category: &str, members: &[&str]) -> Self {
        let category = Title::new_from_text(category, Namespace::Category).unwrap();
        let entries = self
            .membership
            .members
            .entry(category.db_key().to_string())
            .or_default();
        for member in members {
            let title = Title::new_from_text(member, Namespace::Main).unwrap();
            let sort_key = title.text();
            entries.push(MemberEntry::new(title, sort_key));
        }
        self
    }

    pub fn with_article(mut self, title: &str, html: &str) -> Self {
        self.articles
            .articles
            .insert(title.to_string(), html.to_string());
        self
    }

    pub fn with_open_markup(mut self, html: &str) -> Self {
        self.articles.open_markup = html.to_string();
        self
    }

    pub fn failing_membership(mut self) -> Self {
        self.membership.fail = true;
        self
    }

    pub fn failing_articles(mut self) -> Self {
        self.articles.fail = true;
        self
    }

    pub fn ctx(&self) -> ViewContext<'_> {
        ViewContext {
            hooks: &self.hooks,
            membership: &self.membership,
            articles: &self.articles,
            sections: &self.sections,
            messages: &self.messages,
            settings: &self.settings,
        }
    }

    pub fn viewer(&self, category: &str) -> SectionedViewer<'_> {
        let title = Title::new_from_text(category, Namespace::Category).unwrap();
        SectionedViewer::new(self.ctx(), title, PagingWindow::default())
    }

    pub fn page(&self, title: &str, request: ViewRequest) -> CategoryPage<'_> {
        let title = Title::new_from_text(title, Namespace::Main).unwrap();
        CategoryPage::new(self.ctx(), title, request)
    }
}
