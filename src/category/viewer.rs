//! Lazily initialised, section-by-section category body.

use std::cell::OnceCell;

use crate::category::membership::{CategoryMembership, PagingWindow};
use crate::category::sections::{Section, SectionView};
use crate::category::title::Title;
use crate::page::{ViewContext, ViewError};

/// Renders the body of one category page.
///
/// Membership is fetched at most once, on first use of any accessor.
/// Each section accessor fires its own extension point with an empty
/// accumulator; callbacks may append markup and either let the default
/// rendering follow (CONTINUE) or suppress it (STOP).
pub struct SectionedViewer<'a> {
    ctx: ViewContext<'a>,
    title: Title,
    window: PagingWindow,
    show_gallery: bool,
    /// Set exactly once; doubles as the initialisation flag.
    membership: OnceCell<CategoryMembership>,
}

impl<'a> SectionedViewer<'a> {
    pub fn new(ctx: ViewContext<'a>, title: Title, window: PagingWindow) -> Self {
        Self {
            show_gallery: ctx.settings.magic_gallery,
            ctx,
            title,
            window,
            membership: OnceCell::new(),
        }
    }

    pub fn title(&self) -> &Title {
        &self.title
    }

    pub fn window(&self) -> &PagingWindow {
        &self.window
    }

    pub fn show_gallery(&self) -> bool {
        self.show_gallery
    }

    /// Maximum number of members shown per page.
    pub fn limit(&self) -> usize {
        self.ctx.settings.paging_limit
    }

    pub fn is_initialized(&self) -> bool {
        self.membership.get().is_some()
    }

    /// The fetched membership, or `None` before initialisation.
    pub fn membership(&self) -> Option<&CategoryMembership> {
        self.membership.get()
    }

    /// Fetch membership unless already done.
    ///
    /// Returns `false` when an init callback stopped initialisation; the
    /// next call tries again.
    pub fn ensure_initialized(&self) -> Result<bool, ViewError> {
        if self.is_initialized() {
            return Ok(true);
        }

        let hooks = self.ctx.hooks;
        if hooks.run_init(self)?.is_stop() {
            tracing::debug!(category = %self.title, "initialisation skipped by extension");
            return Ok(false);
        }

        let mut membership = CategoryMembership::default();
        self.do_category_query(&mut membership)?;
        membership.finalise(&self.window);

        if membership.is_empty() {
            tracing::debug!(category = %self.title, "category has no members in this window");
        } else {
            tracing::debug!(
                category = %self.title,
                subcategories = membership.subcategories.len(),
                pages = membership.pages.len(),
                media = membership.media.len(),
                "category membership loaded"
            );
        }

        // A callback that re-entered initialisation already filled the cell
        let _ = self.membership.set(membership);
        Ok(true)
    }

    fn do_category_query(&self, membership: &mut CategoryMembership) -> Result<(), ViewError> {
        let hooks = self.ctx.hooks;
        if hooks.run_query(self, membership)?.is_stop() {
            return Ok(());
        }

        let limit = self.limit();
        // One extra row tells us whether a next page exists
        let rows = self
            .ctx
            .membership
            .fetch(&self.title, &self.window, limit.saturating_add(1))?;
        membership.absorb(rows, limit, self.show_gallery);
        Ok(())
    }

    pub fn top(&self) -> Result<String, ViewError> {
        self.section(Section::Top)
    }

    pub fn subcategories(&self) -> Result<String, ViewError> {
        self.section(Section::Subcategories)
    }

    pub fn pages(&self) -> Result<String, ViewError> {
        self.section(Section::Pages)
    }

    pub fn media(&self) -> Result<String, ViewError> {
        self.section(Section::Media)
    }

    pub fn other(&self) -> Result<String, ViewError> {
        self.section(Section::Other)
    }

    pub fn bottom(&self) -> Result<String, ViewError> {
        self.section(Section::Bottom)
    }

    /// Render one section: callbacks first, then the default unless stopped.
    pub fn section(&self, section: Section) -> Result<String, ViewError> {
        self.ensure_initialized()?;

        let mut out = String::new();
        let hooks = self.ctx.hooks;
        if hooks.run_section(section, self, &mut out)?.is_stop() {
            return Ok(out);
        }

        let empty = CategoryMembership::default();
        let view = SectionView {
            title: &self.title,
            window: &self.window,
            membership: self.membership.get().unwrap_or(&empty),
            show_gallery: self.show_gallery,
            limit: self.limit(),
            messages: self.ctx.messages,
        };
        out.push_str(&self.ctx.sections.render(section, &view)?);
        Ok(out)
    }

    /// All six sections in their fixed order, or the empty-category message
    /// when none of them produced anything.
    pub fn compose_full(&self) -> Result<String, ViewError> {
        self.ensure_initialized()?;

        let mut html = String::new();
        for section in Section::ORDER {
            html.push_str(&self.section(section)?);
        }

        if html.is_empty() {
            html = self.ctx.messages.text("category-empty", &[]);
        }
        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::{Namespace, PagingLinks};
    use crate::hooks::{HookError, HookOutcome};
    use crate::test_support::Fixture;

    fn shown(membership: &CategoryMembership) -> Vec<String> {
        membership
            .subcategories
            .iter()
            .chain(&membership.pages)
            .chain(&membership.media)
            .map(|e| e.sort_key.clone())
            .collect()
    }

    #[test]
    fn test_query_runs_once() {
        let fixture = Fixture::new().with_pages("Muppets", &["Kermit", "Gonzo"]);
        let viewer = fixture.viewer("Muppets");

        assert!(!viewer.is_initialized());
        for _ in 0..3 {
            assert!(viewer.ensure_initialized().unwrap());
        }
        viewer.pages().unwrap();
        viewer.compose_full().unwrap();

        assert_eq!(fixture.membership.calls(), 1);
        assert_eq!(viewer.membership().unwrap().pages.len(), 2);
    }

    #[test]
    fn test_any_accessor_initialises() {
        let fixture = Fixture::new().with_pages("Muppets", &["Kermit"]);
        let viewer = fixture.viewer("Muppets");

        viewer.bottom().unwrap();
        assert!(viewer.is_initialized());
        assert_eq!(fixture.membership.calls(), 1);
    }

    #[test]
    fn test_fetch_requests_one_extra_row() {
        let mut fixture = Fixture::new().with_pages("Muppets", &["Animal", "Beaker", "Gonzo"]);
        fixture.settings.paging_limit = 2;
        let viewer = fixture.viewer("Muppets");

        viewer.ensure_initialized().unwrap();
        let membership = viewer.membership().unwrap();
        assert_eq!(fixture.membership.last_limit(), Some(3));
        assert_eq!(membership.pages.len(), 2);
        assert_eq!(membership.next_cursor.as_deref(), Some("Gonzo"));
    }

    #[test]
    fn test_compose_matches_sections_in_order() {
        let mut fixture = Fixture::new()
            .with_pages("Muppets", &["Kermit", "Category:Frogs", "File:Kermit.png"]);
        for section in Section::ORDER {
            fixture.hooks.on_section(section, move |_, out| {
                out.push_str(&format!("[{section:?}]"));
                Ok(HookOutcome::Continue)
            });
        }
        let viewer = fixture.viewer("Muppets");

        let expected = [
            viewer.top().unwrap(),
            viewer.subcategories().unwrap(),
            viewer.pages().unwrap(),
            viewer.media().unwrap(),
            viewer.other().unwrap(),
            viewer.bottom().unwrap(),
        ]
        .concat();
        assert_eq!(viewer.compose_full().unwrap(), expected);

        let positions: Vec<usize> = Section::ORDER
            .iter()
            .map(|s| expected.find(&format!("[{s:?}]")).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_stop_suppresses_default_section() {
        let mut fixture = Fixture::new().with_pages("Muppets", &["Kermit"]);
        fixture.hooks.on_section(Section::Pages, |_, out| {
            out.push_str("<p>replaced</p>");
            Ok(HookOutcome::Stop)
        });
        let viewer = fixture.viewer("Muppets");

        assert_eq!(viewer.pages().unwrap(), "<p>replaced</p>");
    }

    #[test]
    fn test_continue_prepends_to_default_section() {
        let mut fixture = Fixture::new().with_pages("Muppets", &["Kermit"]);
        fixture.hooks.on_section(Section::Pages, |_, out| {
            out.push_str("<p>intro</p>");
            Ok(HookOutcome::Continue)
        });
        let plain = Fixture::new().with_pages("Muppets", &["Kermit"]);
        let default_html = plain.viewer("Muppets").pages().unwrap();

        let viewer = fixture.viewer("Muppets");
        assert_eq!(viewer.pages().unwrap(), format!("<p>intro</p>{default_html}"));
    }

    #[test]
    fn test_empty_category_message_once() {
        let fixture = Fixture::new();
        let viewer = fixture.viewer("Empty");

        let html = viewer.compose_full().unwrap();
        assert_eq!(
            html,
            "<p><i>This category currently contains no pages or media.</i></p>"
        );
    }

    #[test]
    fn test_plugin_content_prevents_empty_message() {
        let mut fixture = Fixture::new();
        fixture.hooks.on_section(Section::Other, |_, out| {
            out.push_str("<p>see also</p>");
            Ok(HookOutcome::Continue)
        });
        let viewer = fixture.viewer("Empty");

        assert_eq!(viewer.compose_full().unwrap(), "<p>see also</p>");
    }

    #[test]
    fn test_init_stop_leaves_uninitialised() {
        let mut fixture = Fixture::new().with_pages("Muppets", &["Kermit"]);
        fixture.hooks.on_init(|_| Ok(HookOutcome::Stop));
        let viewer = fixture.viewer("Muppets");

        assert!(!viewer.ensure_initialized().unwrap());
        assert!(!viewer.is_initialized());
        assert_eq!(fixture.membership.calls(), 0);

        // Sections still render, from empty state
        assert_eq!(viewer.pages().unwrap(), "");
    }

    #[test]
    fn test_query_hook_injects_and_suppresses() {
        let mut fixture = Fixture::new().with_pages("Muppets", &["Kermit"]);
        fixture.hooks.on_query(|viewer, membership| {
            let title = Title::new_from_text("Synthetic", crate::category::Namespace::Main)
                .ok_or_else(|| HookError::new("bad title"))?;
            membership.add(
                crate::category::MemberEntry::new(title, "Synthetic"),
                viewer.show_gallery(),
            );
            Ok(HookOutcome::Stop)
        });
        let viewer = fixture.viewer("Muppets");

        viewer.ensure_initialized().unwrap();
        assert_eq!(fixture.membership.calls(), 0);
        let pages = &viewer.membership().unwrap().pages;
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].sort_key, "Synthetic");
    }

    #[test]
    fn test_query_failure_propagates() {
        let fixture = Fixture::new().failing_membership();
        let viewer = fixture.viewer("Muppets");

        let err = viewer.compose_full().unwrap_err();
        assert!(matches!(err, ViewError::Membership(_)));
        assert!(!viewer.is_initialized());
    }

    #[test]
    fn test_section_hook_sees_membership() {
        let mut fixture = Fixture::new().with_pages("Muppets", &["Kermit", "Gonzo"]);
        fixture.hooks.on_section(Section::Top, |viewer, out| {
            let count = viewer.membership().map_or(0, |m| m.len());
            out.push_str(&format!("<p>{count} members</p>"));
            Ok(HookOutcome::Continue)
        });
        let viewer = fixture.viewer("Muppets");

        assert_eq!(viewer.top().unwrap(), "<p>2 members</p>");
    }

    #[test]
    fn test_backward_paging_shows_every_member_once() {
        let mut fixture = Fixture::new().with_pages("Letters", &["A", "B", "C", "D", "E"]);
        fixture.settings.paging_limit = 2;
        let title = Title::new_from_text("Letters", Namespace::Category).unwrap();

        let mut seen = Vec::new();
        let mut until = Some("Z".to_string());
        while let Some(cursor) = until {
            let window = PagingWindow::new(None, Some(cursor));
            let viewer = SectionedViewer::new(fixture.ctx(), title.clone(), window);
            viewer.ensure_initialized().unwrap();
            let membership = viewer.membership().unwrap();

            let mut page = shown(membership);
            page.extend(seen);
            seen = page;
            until = PagingLinks::new(viewer.window(), membership).and_then(|l| l.previous);
        }

        assert_eq!(seen, vec!["A", "B", "C", "D", "E"]);
        assert_eq!(fixture.membership.calls(), 3);
    }

    #[test]
    fn test_huge_paging_limit_does_not_overflow() {
        let mut fixture = Fixture::new().with_pages("Muppets", &["Kermit", "Gonzo"]);
        fixture.settings.paging_limit = usize::MAX;
        let viewer = fixture.viewer("Muppets");

        assert!(viewer.ensure_initialized().unwrap());
        assert_eq!(fixture.membership.last_limit(), Some(usize::MAX));
        let membership = viewer.membership().unwrap();
        assert_eq!(membership.pages.len(), 2);
        assert!(membership.next_cursor.is_none());
    }
}
