use crate::classify::SiteCategory;
use serde::{Deserialize, Serialize};

/// Value object produced by one extraction and handed to the formatter.
///
/// Exactly one of two shapes holds: a hard failure carries `error` and no
/// content-bearing fields, while a success carries the content fields
/// (possibly empty) and no `error`. The envelope fields `url`, `category`,
/// and `extracted_at` are always present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub url: String,
    pub category: SiteCategory,
    pub extracted_at: String,
}

impl ExtractionResult {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Fields recovered by a site extractor, before the dispatch envelope stamps
/// `url`, `category`, and `extracted_at`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageFields {
    pub title: String,
    pub content: String,
    pub author: String,
    pub timestamp: String,
    pub warning: Option<String>,
}
