//! Category pages assembled from independently overridable sections.
//!
//! A [`site::Wiki`] renders pages out of a SQLite store. Category pages get
//! a body made of six sections (top, subcategories, pages, media, other,
//! bottom); extensions registered in a [`hooks::HookRegistry`] can add to,
//! replace or reorder any of them without subclassing anything.

pub mod api;
pub mod category;
pub mod config;
pub mod hooks;
pub mod logging;
pub mod messages;
pub mod page;
pub mod render;
pub mod site;
pub mod store;

#[cfg(test)]
mod test_support;
