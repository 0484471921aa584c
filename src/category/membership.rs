//! Category membership state and the query collaborator that fills it.

use crate::category::title::{Namespace, Title};
use crate::store::StoreError;

/// One member of a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberEntry {
    pub title: Title,
    pub sort_key: String,
}

impl MemberEntry {
    pub fn new(title: Title, sort_key: impl Into<String>) -> Self {
        Self {
            title,
            sort_key: sort_key.into(),
        }
    }

    /// Upper-cased first character of the sort key, used for list headings.
    pub fn start_char(&self) -> String {
        self.sort_key
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }
}

/// The alphabetical slice of a category being shown.
///
/// `from` is inclusive, `until` is exclusive. When both are given `from`
/// takes precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PagingWindow {
    pub from: Option<String>,
    pub until: Option<String>,
}

impl PagingWindow {
    /// Build a window, treating empty cursors as absent.
    pub fn new(from: Option<String>, until: Option<String>) -> Self {
        Self {
            from: from.filter(|s| !s.is_empty()),
            until: until.filter(|s| !s.is_empty()),
        }
    }

    /// Whether members are fetched in descending order and flipped back
    /// afterwards (an `until` cursor without a `from` cursor).
    pub fn is_reversed(&self) -> bool {
        self.from.is_none() && self.until.is_some()
    }

}

/// Members of a category partitioned by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryMembership {
    pub subcategories: Vec<MemberEntry>,
    pub pages: Vec<MemberEntry>,
    pub media: Vec<MemberEntry>,
    /// Sort key of the first member beyond the fetched slice, if any.
    pub next_cursor: Option<String>,
}

impl CategoryMembership {
    /// File it under subcategories, media or pages according to its namespace.
    pub fn add(&mut self, entry: MemberEntry, show_gallery: bool) {
        match entry.title.namespace() {
            Namespace::Category => self.subcategories.push(entry),
            Namespace::File if show_gallery => self.media.push(entry),
            _ => self.pages.push(entry),
        }
    }

    /// Partition fetched rows, keeping at most `limit` members.
    ///
    /// The row after the limit only marks that more members exist; its sort
    /// key becomes the next cursor.
    pub fn absorb(&mut self, rows: Vec<MemberEntry>, limit: usize, show_gallery: bool) {
        for (count, entry) in rows.into_iter().enumerate() {
            if count >= limit {
                self.next_cursor = Some(entry.sort_key);
                break;
            }
            self.add(entry, show_gallery);
        }
    }

    /// Restore ascending order after a reversed fetch.
    pub fn finalise(&mut self, window: &PagingWindow) {
        if window.is_reversed() {
            self.subcategories.reverse();
            self.pages.reverse();
            self.media.reverse();
        }
    }

    /// Smallest sort key among the members shown, once finalised.
    pub fn first_sort_key(&self) -> Option<&str> {
        [&self.subcategories, &self.pages, &self.media]
            .into_iter()
            .filter_map(|entries| entries.first())
            .map(|entry| entry.sort_key.as_str())
            .min()
    }

    pub fn len(&self) -> usize {
        self.subcategories.len() + self.pages.len() + self.media.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Fetches the members of a category.
///
/// Implementations return at most `limit` entries ordered by sort key:
/// ascending from `window.from` (inclusive), descending below
/// `window.until`, or ascending from the start when unbounded.
pub trait MembershipQuery: Send + Sync {
    fn fetch(
        &self,
        category: &Title,
        window: &PagingWindow,
        limit: usize,
    ) -> Result<Vec<MemberEntry>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(text: &str) -> MemberEntry {
        let title = Title::new_from_text(text, Namespace::Main).unwrap();
        MemberEntry::new(title.clone(), title.text())
    }

    #[test]
    fn test_add_partitions_by_namespace() {
        let mut state = CategoryMembership::default();
        state.add(entry("Category:Frogs"), true);
        state.add(entry("File:Kermit.png"), true);
        state.add(entry("Kermit"), true);
        state.add(entry("Talk:Kermit"), true);

        assert_eq!(state.subcategories.len(), 1);
        assert_eq!(state.media.len(), 1);
        assert_eq!(state.pages.len(), 2);
    }

    #[test]
    fn test_files_are_pages_without_gallery() {
        let mut state = CategoryMembership::default();
        state.add(entry("File:Kermit.png"), false);
        assert!(state.media.is_empty());
        assert_eq!(state.pages.len(), 1);
    }

    #[test]
    fn test_absorb_records_next_cursor() {
        let mut state = CategoryMembership::default();
        let rows = vec![entry("Animal"), entry("Beaker"), entry("Gonzo")];
        state.absorb(rows, 2, true);

        assert_eq!(state.pages.len(), 2);
        assert_eq!(state.next_cursor.as_deref(), Some("Gonzo"));
    }

    #[test]
    fn test_absorb_without_overflow() {
        let mut state = CategoryMembership::default();
        state.absorb(vec![entry("Animal")], 2, true);
        assert_eq!(state.len(), 1);
        assert!(state.next_cursor.is_none());
    }

    #[test]
    fn test_finalise_flips_reversed_window() {
        let mut state = CategoryMembership::default();
        state.absorb(vec![entry("Gonzo"), entry("Beaker")], 10, true);

        state.finalise(&PagingWindow::new(None, Some("Kermit".into())));
        assert_eq!(state.pages[0].sort_key, "Beaker");

        // Forward windows keep fetch order
        state.finalise(&PagingWindow::new(Some("A".into()), Some("Kermit".into())));
        assert_eq!(state.pages[0].sort_key, "Beaker");
    }

    #[test]
    fn test_window_ignores_empty_cursors() {
        let window = PagingWindow::new(Some(String::new()), Some(String::new()));
        assert_eq!(window, PagingWindow::default());
        assert!(!window.is_reversed());
    }

    #[test]
    fn test_first_sort_key_spans_kinds() {
        let mut state = CategoryMembership::default();
        assert_eq!(state.first_sort_key(), None);

        let rows = vec![entry("Kermit"), entry("File:Beaker.png"), entry("Category:Gonzo")];
        state.absorb(rows, 10, true);
        assert_eq!(state.first_sort_key(), Some("Beaker.png"));
    }

    #[test]
    fn test_start_char() {
        assert_eq!(entry("kermit").start_char(), "K");
        assert_eq!(MemberEntry::new(entry("x").title, "").start_char(), "");
    }
}
