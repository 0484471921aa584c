//! Interface messages.
//!
//! Messages are looked up by key and may carry positional placeholders
//! (`$1`, `$2`, ...). Configured overrides take precedence over the
//! built-in English defaults.

use std::collections::HashMap;

const DEFAULT_MESSAGES: &[(&str, &str)] = &[
    (
        "category-empty",
        "<p><i>This category currently contains no pages or media.</i></p>",
    ),
    ("subcategories", "Subcategories"),
    (
        "category-subcat-count",
        "This category has the following $1 subcategories.",
    ),
    ("category_header", "Pages in category \"$1\""),
    (
        "category-article-count",
        "The following $1 pages are in this category.",
    ),
    ("category-media-header", "Media in category \"$1\""),
    (
        "category-file-count",
        "The following $1 files are in this category.",
    ),
    ("prevn", "previous $1"),
    ("nextn", "next $1"),
    ("listingcontinuesabbrev", "cont."),
    ("unanswered_category", "Unanswered questions"),
    ("answered_category", "Answered questions"),
];

/// Looks up interface text.
pub trait MessageSource: Send + Sync {
    /// The message for `key` with `$N` replaced by `args[N - 1]`.
    fn text(&self, key: &str, args: &[&str]) -> String;
}

/// Built-in messages with optional overrides.
#[derive(Debug, Clone, Default)]
pub struct Messages {
    overrides: HashMap<String, String>,
}

impl Messages {
    pub fn with_overrides(overrides: HashMap<String, String>) -> Self {
        Self { overrides }
    }

    fn raw(&self, key: &str) -> Option<&str> {
        self.overrides.get(key).map(String::as_str).or_else(|| {
            DEFAULT_MESSAGES
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, text)| *text)
        })
    }
}

impl MessageSource for Messages {
    fn text(&self, key: &str, args: &[&str]) -> String {
        match self.raw(key) {
            Some(template) => substitute(template, args),
            None => {
                tracing::warn!(key, "missing interface message");
                format!("&lt;{key}&gt;")
            }
        }
    }
}

/// Replace `$1`..`$9` placeholders. Placeholders without an argument are
/// left as written.
fn substitute(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '$' {
            if let Some(arg) = chars
                .peek()
                .and_then(|d| d.to_digit(10))
                .and_then(|n| (n as usize).checked_sub(1))
                .and_then(|index| args.get(index))
            {
                out.push_str(arg);
                chars.next();
                continue;
            }
        }
        out.push(c);
    }
    out
}
