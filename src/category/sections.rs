//! Default rendering of the category body sections.
//!
//! The viewer never renders sections itself. It asks a [`SectionRenderer`]
//! for the default markup of each [`Section`], after giving plugins a chance
//! to add to or replace it.

use serde::Serialize;

use crate::category::membership::{CategoryMembership, MemberEntry, PagingWindow};
use crate::category::title::Title;
use crate::messages::MessageSource;
use crate::render::{RenderError, Renderer};

/// Lists shorter than this are rendered as a single short list.
const SHORT_LIST_THRESHOLD: usize = 6;

/// Number of columns in a long list.
const COLUMNS: usize = 3;

/// The six sections of a category body, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Top,
    Subcategories,
    Pages,
    Media,
    Other,
    Bottom,
}

impl Section {
    /// The fixed composition order.
    pub const ORDER: [Section; 6] = [
        Section::Top,
        Section::Subcategories,
        Section::Pages,
        Section::Media,
        Section::Other,
        Section::Bottom,
    ];
}

/// Everything a default section rendering can see.
pub struct SectionView<'a> {
    pub title: &'a Title,
    pub window: &'a PagingWindow,
    pub membership: &'a CategoryMembership,
    pub show_gallery: bool,
    pub limit: usize,
    pub messages: &'a dyn MessageSource,
}

/// Produces the default markup of a section.
pub trait SectionRenderer: Send + Sync {
    fn render(&self, section: Section, view: &SectionView<'_>) -> Result<String, RenderError>;
}

/// Section renderer backed by the template renderer.
pub struct TemplateSections {
    renderer: Renderer,
}

impl TemplateSections {
    pub fn new(renderer: Renderer) -> Self {
        Self { renderer }
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    fn paging(&self, view: &SectionView<'_>, position: &str) -> Result<String, RenderError> {
        let Some(links) = PagingLinks::for_view(view) else {
            return Ok(String::new());
        };
        let limit = view.limit.to_string();
        let context = PagingContext {
            position: position.to_string(),
            url: view.title.local_url(),
            previous_label: view.messages.text("prevn", &[limit.as_str()]),
            next_label: view.messages.text("nextn", &[limit.as_str()]),
            links,
        };
        self.renderer.render("category/paging.html", &context)
    }

    fn listing(
        &self,
        template: &str,
        heading: String,
        count_message: String,
        entries: &[MemberEntry],
        display: fn(&Title) -> String,
        view: &SectionView<'_>,
    ) -> Result<String, RenderError> {
        let continued = view.messages.text("listingcontinuesabbrev", &[]);
        let context = ListingContext {
            heading,
            count_message,
            list: ListLayout::build(entries, display, &continued),
        };
        self.renderer.render(template, &context)
    }
}

impl SectionRenderer for TemplateSections {
    fn render(&self, section: Section, view: &SectionView<'_>) -> Result<String, RenderError> {
        let membership = view.membership;
        let category = view.title.text();

        match section {
            Section::Top => self.paging(view, "top"),
            Section::Bottom => self.paging(view, "bottom"),
            Section::Subcategories if !membership.subcategories.is_empty() => {
                let count = membership.subcategories.len().to_string();
                self.listing(
                    "category/subcategories.html",
                    view.messages.text("subcategories", &[]),
                    view.messages.text("category-subcat-count", &[count.as_str()]),
                    &membership.subcategories,
                    Title::text,
                    view,
                )
            }
            Section::Pages if !membership.pages.is_empty() => {
                let count = membership.pages.len().to_string();
                self.listing(
                    "category/pages.html",
                    view.messages.text("category_header", &[category.as_str()]),
                    view.messages.text("category-article-count", &[count.as_str()]),
                    &membership.pages,
                    Title::prefixed_text,
                    view,
                )
            }
            Section::Media if view.show_gallery && !membership.media.is_empty() => {
                let count = membership.media.len().to_string();
                let context = GalleryContext {
                    heading: view.messages.text("category-media-header", &[category.as_str()]),
                    count_message: view.messages.text("category-file-count", &[count.as_str()]),
                    items: membership.media.iter().map(|e| ListItem::new(e, Title::text)).collect(),
                };
                self.renderer.render("category/media.html", &context)
            }
            // Other is a pure extension slot, and empty kinds render nothing
            _ => Ok(String::new()),
        }
    }
}

/// Cursors for the previous/next links around a slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PagingLinks {
    /// Cursor for the `until` parameter of the previous link.
    pub previous: Option<String>,
    /// Cursor for the `from` parameter of the next link.
    pub next: Option<String>,
}

impl PagingLinks {
    /// Links for the current window, or `None` when the whole category fits.
    pub fn for_view(view: &SectionView<'_>) -> Option<Self> {
        Self::new(view.window, view.membership)
    }

    /// Links around `membership` as fetched for `window`.
    ///
    /// Going backward, the extra row lies below the slice, so the previous
    /// page ends before the first member shown.
    pub fn new(window: &PagingWindow, membership: &CategoryMembership) -> Option<Self> {
        if let Some(until) = &window.until {
            let previous = membership
                .next_cursor
                .as_ref()
                .and_then(|_| membership.first_sort_key())
                .map(str::to_string);
            Some(Self {
                previous,
                next: Some(until.clone()),
            })
        } else if membership.next_cursor.is_some() || window.from.is_some() {
            Some(Self {
                previous: window.from.clone(),
                next: membership.next_cursor.clone(),
            })
        } else {
            None
        }
    }
}

#[derive(Serialize)]
struct PagingContext {
    position: String,
    url: String,
    previous_label: String,
    next_label: String,
    links: PagingLinks,
}

#[derive(Serialize)]
struct ListingContext {
    heading: String,
    count_message: String,
    list: ListLayout,
}

#[derive(Serialize)]
struct GalleryContext {
    heading: String,
    count_message: String,
    items: Vec<ListItem>,
}

/// A linked entry in a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListItem {
    pub text: String,
    pub url: String,
}

impl ListItem {
    fn new(entry: &MemberEntry, display: fn(&Title) -> String) -> Self {
        Self {
            text: display(&entry.title),
            url: entry.title.local_url(),
        }
    }
}

/// Consecutive entries sharing a first letter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LetterGroup {
    /// Heading text, with the "continued" marker when the group carries over
    /// from the previous column.
    pub heading: String,
    pub items: Vec<ListItem>,
}

/// Entries arranged for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListLayout {
    /// True for a single short list, false for balanced columns.
    pub short: bool,
    pub columns: Vec<Vec<LetterGroup>>,
}

impl ListLayout {
    pub fn build(entries: &[MemberEntry], display: fn(&Title) -> String, continued: &str) -> Self {
        if entries.len() < SHORT_LIST_THRESHOLD {
            return Self {
                short: true,
                columns: vec![group_by_letter(entries, display, None, continued)],
            };
        }

        let chunk = entries.len().div_ceil(COLUMNS);
        let mut columns = Vec::with_capacity(COLUMNS);
        let mut previous_letter: Option<String> = None;
        for slice in entries.chunks(chunk) {
            columns.push(group_by_letter(slice, display, previous_letter.as_deref(), continued));
            previous_letter = slice.last().map(MemberEntry::start_char);
        }

        Self {
            short: false,
            columns,
        }
    }
}

fn group_by_letter(
    entries: &[MemberEntry],
    display: fn(&Title) -> String,
    carried_letter: Option<&str>,
    continued: &str,
) -> Vec<LetterGroup> {
    let mut groups: Vec<(String, Vec<ListItem>)> = Vec::new();
    for entry in entries {
        let letter = entry.start_char();
        match groups.last_mut() {
            Some((current, items)) if *current == letter => items.push(ListItem::new(entry, display)),
            _ => groups.push((letter, vec![ListItem::new(entry, display)])),
        }
    }

    groups
        .into_iter()
        .enumerate()
        .map(|(index, (letter, items))| {
            let heading = if index == 0 && carried_letter == Some(letter.as_str()) {
                format!("{letter} {continued}")
            } else {
                letter
            };
            LetterGroup { heading, items }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::title::Namespace;
    use crate::messages::Messages;

    fn entries(names: &[&str]) -> Vec<MemberEntry> {
        names
            .iter()
            .map(|name| {
                let title = Title::new_from_text(name, Namespace::Main).unwrap();
                MemberEntry::new(title.clone(), title.text())
            })
            .collect()
    }

    fn sections() -> TemplateSections {
        TemplateSections::new(Renderer::new().unwrap())
    }

    #[test]
    fn test_short_list_groups_by_letter() {
        let layout = ListLayout::build(&entries(&["Animal", "Beaker", "Bunsen"]), Title::text, "cont.");
        assert!(layout.short);
        assert_eq!(layout.columns.len(), 1);

        let headings: Vec<_> = layout.columns[0].iter().map(|g| g.heading.as_str()).collect();
        assert_eq!(headings, vec!["A", "B"]);
        assert_eq!(layout.columns[0][1].items.len(), 2);
    }

    #[test]
    fn test_long_list_uses_three_columns() {
        let names = ["Animal", "Beaker", "Bunsen", "Bert", "Cookie", "Elmo", "Ernie"];
        let layout = ListLayout::build(&entries(&names), Title::text, "cont.");
        assert!(!layout.short);
        assert_eq!(layout.columns.len(), 3);

        // 7 entries -> columns of 3, 3, 1
        assert_eq!(layout.columns[0][0].heading, "A");
        assert_eq!(layout.columns[1][0].heading, "B cont.");
        assert_eq!(layout.columns[1][1].heading, "C");
        assert_eq!(layout.columns[2][0].heading, "E cont.");
    }

    #[test]
    fn test_paging_links_absent_for_whole_category() {
        let title = Title::new_from_text("Muppets", Namespace::Category).unwrap();
        let messages = Messages::default();
        let membership = CategoryMembership::default();
        let window = PagingWindow::default();
        let view = SectionView {
            title: &title,
            window: &window,
            membership: &membership,
            show_gallery: true,
            limit: 200,
            messages: &messages,
        };
        assert!(PagingLinks::for_view(&view).is_none());
        assert_eq!(sections().render(Section::Top, &view).unwrap(), "");
    }

    #[test]
    fn test_paging_links_forward() {
        let title = Title::new_from_text("Muppets", Namespace::Category).unwrap();
        let messages = Messages::default();
        let membership = CategoryMembership {
            next_cursor: Some("Gonzo".into()),
            ..Default::default()
        };
        let window = PagingWindow::new(Some("Beaker".into()), None);
        let view = SectionView {
            title: &title,
            window: &window,
            membership: &membership,
            show_gallery: true,
            limit: 2,
            messages: &messages,
        };

        let links = PagingLinks::for_view(&view).unwrap();
        assert_eq!(links.previous.as_deref(), Some("Beaker"));
        assert_eq!(links.next.as_deref(), Some("Gonzo"));

        let html = sections().render(Section::Bottom, &view).unwrap();
        assert!(html.contains("until=Beaker"));
        assert!(html.contains("from=Gonzo"));
        assert!(html.contains("previous 2"));
    }

    #[test]
    fn test_paging_links_backward() {
        let title = Title::new_from_text("Muppets", Namespace::Category).unwrap();
        let messages = Messages::default();
        let membership = CategoryMembership::default();
        let window = PagingWindow::new(None, Some("Kermit".into()));
        let view = SectionView {
            title: &title,
            window: &window,
            membership: &membership,
            show_gallery: true,
            limit: 200,
            messages: &messages,
        };

        let links = PagingLinks::for_view(&view).unwrap();
        assert_eq!(links.previous, None);
        assert_eq!(links.next.as_deref(), Some("Kermit"));
    }

    #[test]
    fn test_paging_links_backward_start_at_first_shown() {
        let membership = CategoryMembership {
            subcategories: entries(&["Frogs"]),
            pages: entries(&["Beaker", "Gonzo"]),
            next_cursor: Some("Animal".into()),
            ..Default::default()
        };
        let window = PagingWindow::new(None, Some("Kermit".into()));

        let links = PagingLinks::new(&window, &membership).unwrap();
        assert_eq!(links.previous.as_deref(), Some("Beaker"));
        assert_eq!(links.next.as_deref(), Some("Kermit"));
    }

    #[test]
    fn test_pages_section_escapes_titles() {
        let title = Title::new_from_text("Muppets", Namespace::Category).unwrap();
        let messages = Messages::default();
        let membership = CategoryMembership {
            pages: entries(&["Statler & Waldorf"]),
            ..Default::default()
        };
        let window = PagingWindow::default();
        let view = SectionView {
            title: &title,
            window: &window,
            membership: &membership,
            show_gallery: true,
            limit: 200,
            messages: &messages,
        };

        let html = sections().render(Section::Pages, &view).unwrap();
        assert!(html.contains("id=\"mw-pages\""));
        assert!(html.contains("Pages in category &quot;Muppets&quot;"));
        assert!(html.contains("Statler &amp; Waldorf"));
        assert!(html.contains("The following 1 pages are in this category."));
    }

    #[test]
    fn test_empty_kinds_render_nothing() {
        let title = Title::new_from_text("Muppets", Namespace::Category).unwrap();
        let messages = Messages::default();
        let membership = CategoryMembership {
            media: entries(&["File:Kermit.png"]),
            ..Default::default()
        };
        let window = PagingWindow::default();
        let mut view = SectionView {
            title: &title,
            window: &window,
            membership: &membership,
            show_gallery: false,
            limit: 200,
            messages: &messages,
        };

        let sections = sections();
        assert_eq!(sections.render(Section::Subcategories, &view).unwrap(), "");
        assert_eq!(sections.render(Section::Pages, &view).unwrap(), "");
        assert_eq!(sections.render(Section::Media, &view).unwrap(), "");
        assert_eq!(sections.render(Section::Other, &view).unwrap(), "");

        view.show_gallery = true;
        let html = sections.render(Section::Media, &view).unwrap();
        assert!(html.contains("mw-category-media"));
        assert!(html.contains("Kermit.png"));
    }
}
