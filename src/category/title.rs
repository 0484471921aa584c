//! Page titles and namespaces.
//!
//! A title is a namespace plus a database key. Display text uses spaces,
//! database keys use underscores:
//! - "Category:Muppet Wiki" -> (Category, "Muppet_Wiki")
//! - "who is kermit?" -> (Main, "Who_is_kermit?")

use std::fmt;

use serde::Serialize;

/// Longest database key accepted, in bytes.
const MAX_TITLE_BYTES: usize = 255;

/// Characters that can never appear in a title.
const ILLEGAL_CHARS: &[char] = &['<', '>', '[', ']', '|', '{', '}'];

/// The canonical namespaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Namespace {
    Main,
    Talk,
    User,
    UserTalk,
    Project,
    ProjectTalk,
    File,
    FileTalk,
    MediaWiki,
    MediaWikiTalk,
    Template,
    TemplateTalk,
    Help,
    HelpTalk,
    Category,
    CategoryTalk,
}

impl Namespace {
    const ALL: [Namespace; 16] = [
        Namespace::Main,
        Namespace::Talk,
        Namespace::User,
        Namespace::UserTalk,
        Namespace::Project,
        Namespace::ProjectTalk,
        Namespace::File,
        Namespace::FileTalk,
        Namespace::MediaWiki,
        Namespace::MediaWikiTalk,
        Namespace::Template,
        Namespace::TemplateTalk,
        Namespace::Help,
        Namespace::HelpTalk,
        Namespace::Category,
        Namespace::CategoryTalk,
    ];

    /// Numeric namespace id as stored in the database.
    pub fn id(self) -> i64 {
        match self {
            Namespace::Main => 0,
            Namespace::Talk => 1,
            Namespace::User => 2,
            Namespace::UserTalk => 3,
            Namespace::Project => 4,
            Namespace::ProjectTalk => 5,
            Namespace::File => 6,
            Namespace::FileTalk => 7,
            Namespace::MediaWiki => 8,
            Namespace::MediaWikiTalk => 9,
            Namespace::Template => 10,
            Namespace::TemplateTalk => 11,
            Namespace::Help => 12,
            Namespace::HelpTalk => 13,
            Namespace::Category => 14,
            Namespace::CategoryTalk => 15,
        }
    }

    pub fn from_id(id: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|ns| ns.id() == id)
    }

    /// The prefix written before the colon (empty for the main namespace).
    pub fn prefix(self) -> &'static str {
        match self {
            Namespace::Main => "",
            Namespace::Talk => "Talk",
            Namespace::User => "User",
            Namespace::UserTalk => "User talk",
            Namespace::Project => "Project",
            Namespace::ProjectTalk => "Project talk",
            Namespace::File => "File",
            Namespace::FileTalk => "File talk",
            Namespace::MediaWiki => "MediaWiki",
            Namespace::MediaWikiTalk => "MediaWiki talk",
            Namespace::Template => "Template",
            Namespace::TemplateTalk => "Template talk",
            Namespace::Help => "Help",
            Namespace::HelpTalk => "Help talk",
            Namespace::Category => "Category",
            Namespace::CategoryTalk => "Category talk",
        }
    }

    /// Look up a namespace by its prefix, case-insensitively.
    ///
    /// "Image" is accepted as an alias for the file namespace.
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        let normalized = prefix.replace('_', " ").trim().to_lowercase();
        match normalized.as_str() {
            "" => None,
            "image" => Some(Namespace::File),
            "image talk" => Some(Namespace::FileTalk),
            other => Self::ALL
                .into_iter()
                .find(|ns| !ns.prefix().is_empty() && ns.prefix().to_lowercase() == other),
        }
    }
}

/// A resolved page title.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Title {
    namespace: Namespace,
    db_key: String,
}

impl Title {
    /// Parse user-supplied text into a title.
    ///
    /// Text without a recognised namespace prefix lands in `default_namespace`.
    /// A leading colon forces the main namespace. Returns `None` for empty or
    /// malformed titles.
    pub fn new_from_text(text: &str, default_namespace: Namespace) -> Option<Self> {
        let normalized = normalize(text);

        let (forced_main, rest) = match normalized.strip_prefix(':') {
            Some(rest) => (true, rest.trim_start()),
            None => (false, normalized.as_str()),
        };

        let (namespace, name) = match rest.split_once(':') {
            Some((prefix, name)) if !forced_main => match Namespace::from_prefix(prefix) {
                Some(ns) => (ns, name.trim()),
                None => (default_namespace, rest),
            },
            _ if forced_main => (Namespace::Main, rest),
            _ => (default_namespace, rest),
        };

        // Drop any fragment
        let name = name.split('#').next().unwrap_or_default().trim();

        Self::new(namespace, &name.replace(' ', "_"))
    }

    /// Build a title from a namespace and database key (as stored).
    pub fn new(namespace: Namespace, db_key: &str) -> Option<Self> {
        let db_key = db_key.trim_matches('_');
        if !is_valid_key(db_key) {
            return None;
        }

        Some(Self {
            namespace,
            db_key: capitalize_first(db_key),
        })
    }

    pub fn namespace(&self) -> Namespace {
        self.namespace
    }

    /// The database key, without namespace prefix ("Muppet_Wiki").
    pub fn db_key(&self) -> &str {
        &self.db_key
    }

    /// Display text without namespace prefix ("Muppet Wiki").
    pub fn text(&self) -> String {
        self.db_key.replace('_', " ")
    }

    /// Display text with namespace prefix ("Category:Muppet Wiki").
    pub fn prefixed_text(&self) -> String {
        match self.namespace {
            Namespace::Main => self.text(),
            ns => format!("{}:{}", ns.prefix(), self.text()),
        }
    }

    /// Database key with namespace prefix ("Category:Muppet_Wiki").
    pub fn prefixed_db_key(&self) -> String {
        self.prefixed_text().replace(' ', "_")
    }

    /// Whether this title is in one of the given content namespaces.
    pub fn is_content_page(&self, content_namespaces: &[i64]) -> bool {
        content_namespaces.contains(&self.namespace.id())
    }

    /// Local URL of the page, relative to the site root.
    pub fn local_url(&self) -> String {
        format!("/wiki/{}", self.prefixed_db_key())
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.prefixed_text())
    }
}

/// Underscores become spaces, runs of whitespace collapse, ends are trimmed.
fn normalize(text: &str) -> String {
    text.replace('_', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_valid_key(key: &str) -> bool {
    if key.is_empty() || key.len() > MAX_TITLE_BYTES {
        return false;
    }
    if key.chars().any(|c| c.is_control() || ILLEGAL_CHARS.contains(&c) || c == '#') {
        return false;
    }
    // Relative path segments would break links
    if key == "." || key == ".." || key.starts_with("./") || key.starts_with("../") {
        return false;
    }
    if key.contains("/./") || key.contains("/../") || key.ends_with("/.") || key.ends_with("/..") {
        return false;
    }
    !key.contains("~~~")
}

fn capitalize_first(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}
