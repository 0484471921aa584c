//! Collaborators shared by a page and its viewer.

use crate::category::{MembershipQuery, SectionRenderer};
use crate::config::Config;
use crate::hooks::HookRegistry;
use crate::messages::MessageSource;
use crate::page::ArticleRenderer;

/// Settings that shape a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSettings {
    /// Members shown per category page.
    pub paging_limit: usize,
    /// Show file members as a gallery instead of as pages.
    pub magic_gallery: bool,
    /// Default diff-only preference when the request does not say.
    pub diff_only: bool,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            paging_limit: 200,
            magic_gallery: true,
            diff_only: false,
        }
    }
}

impl From<&Config> for ViewSettings {
    fn from(config: &Config) -> Self {
        Self {
            paging_limit: config.category.paging_limit,
            magic_gallery: config.category.magic_gallery,
            diff_only: config.view.diff_only,
        }
    }
}

/// Everything a view borrows for the duration of one request.
#[derive(Clone, Copy)]
pub struct ViewContext<'a> {
    pub hooks: &'a HookRegistry,
    pub membership: &'a dyn MembershipQuery,
    pub articles: &'a dyn ArticleRenderer,
    pub sections: &'a dyn SectionRenderer,
    pub messages: &'a dyn MessageSource,
    pub settings: &'a ViewSettings,
}
