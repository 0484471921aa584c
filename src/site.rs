//! A wiki assembled from configuration: the entry point used by the
//! command line and the HTTP server.

use serde_json::Value;

use crate::api::{ApiError, ApiRequest, CategoriesOnAnswers};
use crate::category::{Namespace, TemplateSections, Title};
use crate::config::Config;
use crate::hooks::HookRegistry;
use crate::messages::Messages;
use crate::page::{
    CategoryPage, MarkdownArticles, OutputPage, ViewContext, ViewError, ViewOutcome, ViewRequest,
    ViewSettings,
};
use crate::render::{PageContext, RenderError, Renderer};
use crate::store::{StoreError, WikiStore};

#[derive(thiserror::Error, Debug)]
pub enum WikiError {
    #[error("invalid title: {0}")]
    InvalidTitle(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    View(#[from] ViewError),
}

/// A full HTML document for one page.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub title: Title,
    pub outcome: ViewOutcome,
    pub html: String,
}

/// Storage, extensions and presentation for one site.
pub struct Wiki {
    store: WikiStore,
    hooks: HookRegistry,
    sections: TemplateSections,
    messages: Messages,
    settings: ViewSettings,
    content_namespaces: Vec<i64>,
    site_name: Option<String>,
}

impl Wiki {
    /// Open the configured database and templates.
    pub fn open(config: &Config, hooks: HookRegistry) -> Result<Self, WikiError> {
        let store = WikiStore::open(&config.database)?;
        Self::with_store(config, store, hooks)
    }

    /// Build around an existing store.
    pub fn with_store(
        config: &Config,
        store: WikiStore,
        hooks: HookRegistry,
    ) -> Result<Self, WikiError> {
        let renderer = match &config.templates {
            Some(path) => Renderer::with_overrides(path)?,
            None => Renderer::new()?,
        };

        Ok(Self {
            store,
            hooks,
            sections: TemplateSections::new(renderer),
            messages: Messages::with_overrides(config.messages.clone()),
            settings: ViewSettings::from(config),
            content_namespaces: config.content_namespaces.clone(),
            site_name: config.site_name.clone(),
        })
    }

    pub fn store(&self) -> &WikiStore {
        &self.store
    }

    /// Render a page by its display title.
    pub fn view(&self, title: &str, request: ViewRequest) -> Result<RenderedPage, WikiError> {
        let title = Title::new_from_text(title, Namespace::Main)
            .ok_or_else(|| WikiError::InvalidTitle(title.to_string()))?;

        let articles = MarkdownArticles::new(&self.store);
        let ctx = ViewContext {
            hooks: &self.hooks,
            membership: &self.store,
            articles: &articles,
            sections: &self.sections,
            messages: &self.messages,
            settings: &self.settings,
        };

        let mut page = CategoryPage::new(ctx, title.clone(), request);
        let mut out = OutputPage::new();
        let outcome = page.view(&mut out)?;

        let html = self.sections.renderer().render_page(&PageContext {
            title: title.prefixed_text(),
            site_name: self.site_name.clone(),
            body: out.into_html(),
        })?;

        tracing::info!(%title, ?outcome, "rendered page");
        Ok(RenderedPage {
            title,
            outcome,
            html,
        })
    }

    /// Answer an API query request with its JSON body.
    pub fn api(&self, request: &ApiRequest) -> Result<Value, ApiError> {
        request.check_module()?;
        CategoriesOnAnswers::new(&self.store, &self.messages, &self.content_namespaces)
            .run(&request.params)
    }
}
