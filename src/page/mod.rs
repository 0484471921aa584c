//! The category page view.
//!
//! A view runs in this order:
//! 1. Diff views with diff-only set render the article alone and stop.
//! 2. `FlexibleCategoryPageView` fires; STOP ends the view.
//! 3. The sectioned viewer is created for the requested paging window.
//! 4. Category namespace only: `openShowCategory` fires, then the default
//!    pre-body markup is added unless stopped.
//! 5. The article body is added.
//! 6. Category namespace only: `closeShowCategory` fires, then the composed
//!    category body is added unless stopped.
//!
//! Section content is changed through the viewer's section points. The
//! order of sections is changed here, by a close callback that adds the
//! sections it wants and returns STOP.

mod article;
mod context;
mod error;
mod output;
mod request;

pub use article::{ArticleRenderer, MarkdownArticles};
pub use context::{ViewContext, ViewSettings};
pub use error::ViewError;
pub use output::OutputPage;
pub use request::ViewRequest;

use crate::category::{Namespace, SectionedViewer, Title};
use crate::hooks::PagePoint;

/// How a view ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewOutcome {
    /// Plain diff view; no category markup.
    Diff,
    /// A page-view callback took over the whole view.
    Replaced,
    /// Normal flow ran to completion.
    Rendered,
}

/// One view of a page that may be a category.
pub struct CategoryPage<'a> {
    ctx: ViewContext<'a>,
    title: Title,
    request: ViewRequest,
    viewer: Option<SectionedViewer<'a>>,
}

impl<'a> CategoryPage<'a> {
    pub fn new(ctx: ViewContext<'a>, title: Title, request: ViewRequest) -> Self {
        Self {
            ctx,
            title,
            request,
            viewer: None,
        }
    }

    pub fn title(&self) -> &Title {
        &self.title
    }

    pub fn request(&self) -> &ViewRequest {
        &self.request
    }

    pub fn is_category(&self) -> bool {
        self.title.namespace() == Namespace::Category
    }

    /// The viewer for this page, created on first use.
    pub fn viewer(&mut self) -> &SectionedViewer<'a> {
        let ctx = self.ctx;
        let title = &self.title;
        let window = self.request.paging_window();
        self.viewer
            .get_or_insert_with(|| SectionedViewer::new(ctx, title.clone(), window))
    }

    /// The viewer, if one has been created.
    pub fn existing_viewer(&self) -> Option<&SectionedViewer<'a>> {
        self.viewer.as_ref()
    }

    /// Render the page into `out`.
    pub fn view(&mut self, out: &mut OutputPage) -> Result<ViewOutcome, ViewError> {
        if self.request.is_diff() && self.request.diff_only(self.ctx.settings.diff_only) {
            tracing::debug!(title = %self.title, "diff-only view, category sections skipped");
            self.add_article(out)?;
            return Ok(ViewOutcome::Diff);
        }

        let hooks = self.ctx.hooks;
        if hooks.run_page(PagePoint::View, self, out)?.is_stop() {
            return Ok(ViewOutcome::Replaced);
        }

        self.viewer();

        let is_category = self.is_category();
        if is_category {
            self.open_show_category(out)?;
        }

        self.add_article(out)?;

        if is_category {
            self.close_show_category(out)?;
        }

        Ok(ViewOutcome::Rendered)
    }

    fn add_article(&self, out: &mut OutputPage) -> Result<(), ViewError> {
        let html = self
            .ctx
            .articles
            .render_article(&self.title)
            .map_err(ViewError::Article)?;
        out.add_html(&html);
        Ok(())
    }

    fn open_show_category(&mut self, out: &mut OutputPage) -> Result<(), ViewError> {
        let hooks = self.ctx.hooks;
        if hooks.run_page(PagePoint::Open, self, out)?.is_stop() {
            return Ok(());
        }

        let html = self
            .ctx
            .articles
            .open_category(&self.title)
            .map_err(ViewError::Article)?;
        out.add_html(&html);
        Ok(())
    }

    fn close_show_category(&mut self, out: &mut OutputPage) -> Result<(), ViewError> {
        let hooks = self.ctx.hooks;
        if hooks.run_page(PagePoint::Close, self, out)?.is_stop() {
            return Ok(());
        }

        let body = self.viewer().compose_full()?;
        out.add_html(&body);
        Ok(())
    }
}
