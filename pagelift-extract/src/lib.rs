//! Extraction pipeline: classify a URL, drive the browser through the
//! matching site strategy, and wrap whatever was recovered in a result
//! envelope.
//!
//! Control flow is strictly linear per invocation:
//! classify → select strategy → extract → envelope. Hard failures (navigation
//! timeout, unexpected driver faults) end up in the result's `error` field;
//! selector misses and shape mismatches degrade to empty values or, for the
//! social-post strategy, a `warning`.

pub mod classify;
pub mod format;
pub mod result;

mod article;
mod dom;
mod generic;
mod social;

pub use article::ArticlePlatformExtractor;
pub use generic::GenericExtractor;
pub use social::SocialPostExtractor;

use crate::classify::{SiteCategory, classify};
use crate::result::{ExtractionResult, PageFields};
use anyhow::Result;
use async_trait::async_trait;
use chrono::Local;
use pagelift_common::PageliftError;
use pagelift_drivers::browser::driver::PageliftBrowser;
use std::time::Duration;
use tracing::{error, info};

/// Fixed wait after navigation so client-side rendering can finish. A known
/// heuristic, not a guaranteed synchronization mechanism.
pub(crate) const SETTLE_DELAY_MS: u64 = 2_000;

/// Common capability interface implemented by each site strategy.
#[async_trait]
pub trait SiteExtractor: Send + Sync {
    async fn extract(
        &self,
        browser: &PageliftBrowser,
        url: &str,
        nav_timeout: Duration,
    ) -> Result<PageFields>;
}

/// Strategy table keyed by category.
fn extractor_for(category: SiteCategory) -> &'static dyn SiteExtractor {
    match category {
        SiteCategory::SocialPost => &SocialPostExtractor,
        SiteCategory::ArticlePlatform => &ArticlePlatformExtractor,
        SiteCategory::Generic => &GenericExtractor,
    }
}

/// Classify `url`, run the matching extractor once, and wrap the outcome in
/// a result envelope. This function itself never fails: hard failures become
/// the `error` field and no retry is attempted.
pub async fn extract(
    browser: &PageliftBrowser,
    url: &str,
    nav_timeout: Duration,
) -> ExtractionResult {
    let category = classify(url);
    info!(target: "extract", %url, %category, "starting extraction");

    let outcome = extractor_for(category)
        .extract(browser, url, nav_timeout)
        .await;
    let extracted_at = Local::now().to_rfc3339();

    match outcome {
        Ok(fields) => ExtractionResult {
            title: Some(fields.title),
            content: Some(fields.content),
            author: Some(fields.author),
            timestamp: Some(fields.timestamp),
            warning: fields.warning,
            error: None,
            url: url.to_string(),
            category,
            extracted_at,
        },
        Err(err) => {
            error!(target: "extract", %url, %err, "extraction failed");
            ExtractionResult {
                error: Some(error_message(&err)),
                url: url.to_string(),
                category,
                extracted_at,
                ..ExtractionResult::default()
            }
        }
    }
}

/// Render a dispatch-level failure as the user-facing error string. A typed
/// navigation timeout gets a fixed message; everything else is stringified.
fn error_message(err: &anyhow::Error) -> String {
    match err.downcast_ref::<PageliftError>() {
        Some(PageliftError::Timeout) => "page load timed out".to_string(),
        _ => err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_maps_to_fixed_error_message() {
        let err = anyhow::Error::from(PageliftError::Timeout);
        assert_eq!(error_message(&err), "page load timed out");
    }

    #[test]
    fn other_failures_are_stringified() {
        let err = anyhow::anyhow!("browser crashed mid-flight");
        assert_eq!(error_message(&err), "browser crashed mid-flight");
    }
}
