//! Extension points for category page rendering.
//!
//! Plugins attach callbacks to named points. Each callback inspects or
//! mutates its context and returns [`HookOutcome::Continue`] or
//! [`HookOutcome::Stop`]. Callbacks run in registration order; the first
//! STOP ends dispatch and suppresses the default work guarded by the point.
//!
//! The registry is composed once at startup and then only read:
//!
//! ```ignore
//! let mut hooks = HookRegistry::new();
//! hooks.on_section(Section::Pages, |viewer, out| {
//!     out.push_str("<p>Featured pages first</p>");
//!     Ok(HookOutcome::Continue)
//! });
//! let hooks = Arc::new(hooks);
//! ```

mod point;

use std::collections::HashMap;

pub use point::{ExtensionPoint, PagePoint, UnknownPointError};

use crate::category::{CategoryMembership, Section, SectionedViewer};
use crate::page::{CategoryPage, OutputPage, ViewError};

/// What a callback asks the dispatcher to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookOutcome {
    /// Run the remaining callbacks, then the default behavior.
    Continue,
    /// Skip the remaining callbacks and the default behavior.
    Stop,
}

impl HookOutcome {
    pub fn is_stop(self) -> bool {
        self == HookOutcome::Stop
    }
}

/// Failure raised by a callback. It aborts the view.
#[derive(thiserror::Error, Debug)]
#[error("{message}")]
pub struct HookError {
    message: String,
}

impl HookError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub type HookResult = Result<HookOutcome, HookError>;

type PageHook = Box<dyn Fn(&mut CategoryPage<'_>, &mut OutputPage) -> HookResult + Send + Sync>;
type InitHook = Box<dyn Fn(&SectionedViewer<'_>) -> HookResult + Send + Sync>;
type QueryHook =
    Box<dyn Fn(&SectionedViewer<'_>, &mut CategoryMembership) -> HookResult + Send + Sync>;
type SectionHook = Box<dyn Fn(&SectionedViewer<'_>, &mut String) -> HookResult + Send + Sync>;

/// Callbacks registered per extension point.
#[derive(Default)]
pub struct HookRegistry {
    page: HashMap<PagePoint, Vec<PageHook>>,
    init: Vec<InitHook>,
    query: Vec<QueryHook>,
    sections: HashMap<Section, Vec<SectionHook>>,
}

impl HookRegistry {
    /// Create a registry with no callbacks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a page-level callback.
    pub fn on_page<F>(&mut self, point: PagePoint, hook: F) -> &mut Self
    where
        F: Fn(&mut CategoryPage<'_>, &mut OutputPage) -> HookResult + Send + Sync + 'static,
    {
        self.page.entry(point).or_default().push(Box::new(hook));
        self
    }

    /// Register a callback run before membership initialization.
    pub fn on_init<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(&SectionedViewer<'_>) -> HookResult + Send + Sync + 'static,
    {
        self.init.push(Box::new(hook));
        self
    }

    /// Register a callback run before the membership query.
    ///
    /// The callback may add entries to the membership under construction;
    /// returning STOP replaces the default query entirely.
    pub fn on_query<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(&SectionedViewer<'_>, &mut CategoryMembership) -> HookResult + Send + Sync + 'static,
    {
        self.query.push(Box::new(hook));
        self
    }

    /// Register a callback for one body section.
    ///
    /// Anything appended to the accumulator precedes the default rendering.
    pub fn on_section<F>(&mut self, section: Section, hook: F) -> &mut Self
    where
        F: Fn(&SectionedViewer<'_>, &mut String) -> HookResult + Send + Sync + 'static,
    {
        self.sections.entry(section).or_default().push(Box::new(hook));
        self
    }

    /// Number of callbacks registered under a point.
    pub fn count(&self, point: ExtensionPoint) -> usize {
        match point {
            ExtensionPoint::Page(p) => self.page.get(&p).map_or(0, Vec::len),
            ExtensionPoint::ViewerInit => self.init.len(),
            ExtensionPoint::DoCategoryQuery => self.query.len(),
            ExtensionPoint::Section(s) => self.sections.get(&s).map_or(0, Vec::len),
        }
    }

    pub(crate) fn run_page(
        &self,
        point: PagePoint,
        page: &mut CategoryPage<'_>,
        out: &mut OutputPage,
    ) -> Result<HookOutcome, ViewError> {
        let hooks = self.page.get(&point).map(Vec::as_slice).unwrap_or_default();
        fan_out(point.into(), hooks, |hook| hook(&mut *page, &mut *out))
    }

    pub(crate) fn run_init(&self, viewer: &SectionedViewer<'_>) -> Result<HookOutcome, ViewError> {
        fan_out(ExtensionPoint::ViewerInit, &self.init, |hook| hook(viewer))
    }

    pub(crate) fn run_query(
        &self,
        viewer: &SectionedViewer<'_>,
        membership: &mut CategoryMembership,
    ) -> Result<HookOutcome, ViewError> {
        fan_out(ExtensionPoint::DoCategoryQuery, &self.query, |hook| {
            hook(viewer, &mut *membership)
        })
    }

    pub(crate) fn run_section(
        &self,
        section: Section,
        viewer: &SectionedViewer<'_>,
        out: &mut String,
    ) -> Result<HookOutcome, ViewError> {
        let hooks = self.sections.get(&section).map(Vec::as_slice).unwrap_or_default();
        fan_out(section.into(), hooks, |hook| hook(viewer, &mut *out))
    }
}

/// Call each hook in order until one stops or fails.
fn fan_out<H: ?Sized>(
    point: ExtensionPoint,
    hooks: &[Box<H>],
    mut call: impl FnMut(&H) -> HookResult,
) -> Result<HookOutcome, ViewError> {
    for (index, hook) in hooks.iter().enumerate() {
        let outcome = call(&**hook).map_err(|source| ViewError::Hook { point, source })?;
        if outcome.is_stop() {
            tracing::debug!(%point, callback = index, "extension point stopped default behavior");
            return Ok(HookOutcome::Stop);
        }
    }
    Ok(HookOutcome::Continue)
}
