//! Query API modules.
//!
//! Requests look like `api.php?action=query&list=categoriesonanswers&coatitle=..`.
//! Results and usage errors are JSON objects:
//!
//! ```json
//! {"query": {"categoriesonanswers": [{"ns": 0, "title": "Who is Kermit?"}]}}
//! {"error": {"code": "notitle", "info": "The coatitle parameter is required"}}
//! ```

mod categories_on_answers;

pub use categories_on_answers::{
    Answered, CategoriesOnAnswers, CoaEntry, CoaParams, CoaRawParams, DEFAULT_LIMIT, MAX_LIMIT,
    MODULE_NAME,
};

use serde::Deserialize;
use serde_json::{Value, json};

use crate::store::StoreError;

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    /// The caller sent something unusable; nothing was queried.
    #[error("{info}")]
    Usage { code: &'static str, info: String },

    #[error("internal error: {0}")]
    Store(#[from] StoreError),
}

impl ApiError {
    pub(crate) fn usage(code: &'static str, info: impl Into<String>) -> Self {
        Self::Usage {
            code,
            info: info.into(),
        }
    }

    /// Machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Usage { code, .. } => code,
            ApiError::Store(_) => "internal_api_error",
        }
    }

    pub fn is_usage(&self) -> bool {
        matches!(self, ApiError::Usage { .. })
    }

    pub fn to_json(&self) -> Value {
        json!({ "error": { "code": self.code(), "info": self.to_string() } })
    }
}

/// A query request addressed to one list module.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiRequest {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub list: Option<String>,
    #[serde(flatten)]
    pub params: CoaRawParams,
}

impl ApiRequest {
    /// Reject requests for anything other than the listing we serve.
    pub fn check_module(&self) -> Result<(), ApiError> {
        match self.action.as_deref() {
            None | Some("query") => {}
            Some(other) => {
                return Err(ApiError::usage(
                    "unknown_action",
                    format!("Unrecognized value for parameter 'action': {other}"),
                ));
            }
        }
        match self.list.as_deref() {
            Some(MODULE_NAME) => Ok(()),
            Some(other) => Err(ApiError::usage(
                "unknown_list",
                format!("Unrecognized value for parameter 'list': {other}"),
            )),
            None => Err(ApiError::usage("nolist", "The list parameter must be set")),
        }
    }
}

/// Wrap module output in the query envelope.
pub fn query_json(module: &str, data: Value, warnings: &[String]) -> Value {
    let mut body = json!({ "query": { module: data } });
    if !warnings.is_empty() {
        body["warnings"] = json!({ module: { "*": warnings.join("\n") } });
    }
    body
}
