//! View error types.

use crate::hooks::{ExtensionPoint, HookError};
use crate::render::RenderError;
use crate::store::StoreError;

/// Errors that abort a page view.
///
/// Nothing here is recovered locally: collaborator and callback failures
/// propagate to whoever requested the view.
#[derive(thiserror::Error, Debug)]
pub enum ViewError {
    #[error("extension point '{point}' failed: {source}")]
    Hook {
        point: ExtensionPoint,
        #[source]
        source: HookError,
    },

    #[error("membership query failed: {0}")]
    Membership(#[from] StoreError),

    #[error("article rendering failed: {0}")]
    Article(#[source] StoreError),

    #[error("section rendering failed: {0}")]
    Render(#[from] RenderError),
}
