//! Parameters of a page view request.

use serde::Deserialize;

use crate::category::PagingWindow;

/// The query parameters a page view understands.
///
/// Values arrive as raw strings, the way they appear in a URL.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ViewRequest {
    /// Diff selector; any value (even empty) marks a diff view.
    #[serde(default)]
    pub diff: Option<String>,

    /// Per-request override of the diff-only preference.
    #[serde(default)]
    pub diffonly: Option<String>,

    #[serde(default)]
    pub from: Option<String>,

    #[serde(default)]
    pub until: Option<String>,
}

impl ViewRequest {
    pub fn is_diff(&self) -> bool {
        self.diff.is_some()
    }

    /// Effective diff-only flag: the request value when present, else the
    /// configured preference.
    pub fn diff_only(&self, preference: bool) -> bool {
        match self.diffonly.as_deref() {
            Some(value) => parse_bool(value),
            None => preference,
        }
    }

    pub fn paging_window(&self) -> PagingWindow {
        PagingWindow::new(self.from.clone(), self.until.clone())
    }
}

fn parse_bool(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "" | "0" | "false" | "no" | "off"
    )
}
