//! `list=categoriesonanswers`: pages in a category that also carry an
//! answered or unanswered status, most recently categorised first.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::{ApiError, query_json};
use crate::category::{Namespace, Title};
use crate::messages::MessageSource;
use crate::store::WikiStore;

pub const MODULE_NAME: &str = "categoriesonanswers";
pub const DEFAULT_LIMIT: usize = 10;
pub const MAX_LIMIT: usize = 500;

/// Parameters as they arrive on the wire (`coa` prefix).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoaRawParams {
    #[serde(rename = "coatitle", default)]
    pub title: Option<String>,
    #[serde(rename = "coaanswered", default)]
    pub answered: Option<String>,
    #[serde(rename = "coalimit", default)]
    pub limit: Option<String>,
}

/// Which status category to intersect with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Answered {
    #[default]
    No,
    Yes,
}

impl Answered {
    /// Message holding the status category name.
    pub fn message_key(self) -> &'static str {
        match self {
            Answered::No => "unanswered_category",
            Answered::Yes => "answered_category",
        }
    }
}

impl FromStr for Answered {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "no" => Ok(Answered::No),
            "yes" => Ok(Answered::Yes),
            other => Err(ApiError::usage(
                "badparams",
                format!("Unrecognized value for parameter 'coaanswered': {other}"),
            )),
        }
    }
}

/// Validated parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoaParams {
    pub title: String,
    pub answered: Answered,
    pub limit: usize,
}

impl CoaParams {
    /// Validate raw parameters. Out-of-range limits are clamped and
    /// reported in `warnings`.
    pub fn parse(raw: &CoaRawParams, warnings: &mut Vec<String>) -> Result<Self, ApiError> {
        let title = raw
            .title
            .clone()
            .ok_or_else(|| ApiError::usage("notitle", "The coatitle parameter is required"))?;

        let answered = match raw.answered.as_deref() {
            Some(value) => value.parse()?,
            None => Answered::default(),
        };

        let limit = match raw.limit.as_deref().map(str::trim) {
            None => DEFAULT_LIMIT,
            Some("max") => MAX_LIMIT,
            Some(value) => {
                let requested: i64 = value.parse().map_err(|_| {
                    ApiError::usage(
                        "badparams",
                        format!("Invalid value '{value}' for integer parameter 'coalimit'"),
                    )
                })?;
                clamp_limit(requested, warnings)
            }
        };

        Ok(Self {
            title,
            answered,
            limit,
        })
    }
}

fn clamp_limit(requested: i64, warnings: &mut Vec<String>) -> usize {
    if requested < 1 {
        let warning = "coalimit may not be less than 1 (set to 1)".to_string();
        tracing::warn!(requested, "{warning}");
        warnings.push(warning);
        1
    } else if requested > MAX_LIMIT as i64 {
        let warning = format!("coalimit may not be over {MAX_LIMIT} (set to {MAX_LIMIT})");
        tracing::warn!(requested, "{warning}");
        warnings.push(warning);
        MAX_LIMIT
    } else {
        requested as usize
    }
}

/// One listed page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoaEntry {
    pub ns: i64,
    pub title: String,
}

/// The listing, bound to its collaborators.
pub struct CategoriesOnAnswers<'a> {
    store: &'a WikiStore,
    messages: &'a dyn MessageSource,
    content_namespaces: &'a [i64],
}

impl<'a> CategoriesOnAnswers<'a> {
    pub fn new(
        store: &'a WikiStore,
        messages: &'a dyn MessageSource,
        content_namespaces: &'a [i64],
    ) -> Self {
        Self {
            store,
            messages,
            content_namespaces,
        }
    }

    /// Run the listing for validated parameters.
    ///
    /// The limit bounds the joined rows; non-content pages are dropped
    /// afterwards, so fewer than `limit` entries may come back even when
    /// more qualifying pages exist.
    pub fn execute(&self, params: &CoaParams) -> Result<Vec<CoaEntry>, ApiError> {
        let category = Title::new_from_text(&params.title, Namespace::Category)
            .filter(|t| t.namespace() == Namespace::Category)
            .ok_or_else(|| {
                ApiError::usage("invalidcategory", "The category name you entered is not valid")
            })?;

        let status_name = self.messages.text(params.answered.message_key(), &[]);
        let status = Title::new_from_text(&status_name, Namespace::Category)
            .filter(|t| t.namespace() == Namespace::Category)
            .ok_or_else(|| {
                ApiError::usage(
                    "invalidcategory",
                    "The name of un/answered category is not valid",
                )
            })?;

        let sort_keys = self.store.recent_in_both(&category, &status, params.limit)?;

        let mut entries = Vec::with_capacity(sort_keys.len());
        for key in sort_keys {
            let Some(title) = Title::new_from_text(&key, Namespace::Main) else {
                tracing::warn!(sort_key = %key, "sort key is not a valid title, skipping");
                continue;
            };
            if title.is_content_page(self.content_namespaces) {
                entries.push(CoaEntry {
                    ns: title.namespace().id(),
                    title: title.prefixed_text(),
                });
            }
        }

        tracing::debug!(
            category = %category,
            status = %status,
            count = entries.len(),
            "categoriesonanswers listing"
        );
        Ok(entries)
    }

    /// Validate, run, and wrap the result in the query envelope.
    pub fn run(&self, raw: &CoaRawParams) -> Result<Value, ApiError> {
        let mut warnings = Vec::new();
        let params = CoaParams::parse(raw, &mut warnings)?;
        let entries = self.execute(&params)?;
        Ok(query_json(MODULE_NAME, json!(entries), &warnings))
    }
}
