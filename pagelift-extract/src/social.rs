//! Social-post extractor.
//!
//! The platform's rendered markup is unreliable and the real content usually
//! arrives via an internal data-fetch call, so this strategy combines three
//! best-effort sources: DOM marker attributes, a `<time>` element, and an
//! intercepted internal API response whose text overrides the DOM when
//! present. It may legitimately come back empty against the platform's
//! anti-automation defenses, in which case the result carries a warning
//! instead of an error.

use crate::dom;
use crate::result::PageFields;
use crate::{SETTLE_DELAY_MS, SiteExtractor};
use anyhow::Result;
use async_trait::async_trait;
use pagelift_drivers::browser::driver::PageliftBrowser;
use pagelift_drivers::browser::page::{PageliftPage, WaitUntil};
use scraper::Html;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Internal endpoint name fragments whose responses carry the post payload.
const ENDPOINT_FRAGMENTS: &[&str] = &["TweetResultByRestId", "TweetDetail"];

/// Marker that shows up once the post text has rendered.
const CONTENT_MARKER_SELECTOR: &str = r#"[data-testid="tweetText"]"#;

/// Bounded, non-fatal wait for the content marker.
const MARKER_WAIT: Duration = Duration::from_secs(10);

const FALLBACK_TITLE: &str = "X post";

const BLOCKED_WARNING: &str = "X.com anti-automation measures likely blocked content \
extraction. Try again from an authenticated browser session or use the official API.";

pub struct SocialPostExtractor;

impl SocialPostExtractor {
    /// DOM-side field recovery on already-rendered HTML.
    pub fn fields_from_html(html: &str) -> PageFields {
        social_fields_from_html(html)
    }

    /// Merge DOM-derived fields with an intercepted internal API payload.
    pub fn merge_intercepted(fields: PageFields, payload: Option<&Value>) -> PageFields {
        finalize_social(fields, payload)
    }
}

#[async_trait]
impl SiteExtractor for SocialPostExtractor {
    async fn extract(
        &self,
        browser: &PageliftBrowser,
        url: &str,
        nav_timeout: Duration,
    ) -> Result<PageFields> {
        let page = browser.open_page(true).await?;
        let outcome = run(&page, url, nav_timeout).await;
        page.close().await;
        outcome
    }
}

async fn run(page: &PageliftPage, url: &str, nav_timeout: Duration) -> Result<PageFields> {
    let capture = page.capture_json_responses(ENDPOINT_FRAGMENTS).await?;

    // DOM-content-loaded only: the page polls continuously and would stall a
    // network-idle wait.
    page.goto(url, WaitUntil::DomContentLoaded, nav_timeout)
        .await?;

    let marker_found = page
        .wait_for_selector(CONTENT_MARKER_SELECTOR, MARKER_WAIT)
        .await;
    if !marker_found {
        debug!(target: "extract.social", "content marker never appeared; continuing best-effort");
    }
    page.settle(SETTLE_DELAY_MS).await;

    let html = page.content().await?;
    let payload = capture.take().await;

    Ok(finalize_social(
        social_fields_from_html(&html),
        payload.as_ref(),
    ))
}

/// DOM-side lookups on the platform's marker attributes. Every miss degrades
/// to empty.
pub(crate) fn social_fields_from_html(html: &str) -> PageFields {
    let doc = Html::parse_document(html);

    let content = dom::first(&doc, r#"div[data-testid="tweetText"]"#)
        .map(dom::text_concat)
        .unwrap_or_default();
    let author = dom::first(&doc, r#"div[data-testid="User-Name"]"#)
        .map(dom::text_concat)
        .unwrap_or_default();
    let timestamp = dom::first(&doc, "time")
        .and_then(|el| el.value().attr("datetime").map(str::to_string))
        .unwrap_or_default();

    PageFields {
        title: String::new(),
        content,
        author,
        timestamp,
        warning: None,
    }
}

/// Walk the intercepted payload for the authoritative full post text. Any
/// missing or reshaped step means "no override", never an error.
pub(crate) fn full_text_from_capture(payload: &Value) -> Option<String> {
    let text = payload
        .get("data")?
        .get("tweetResult")?
        .get("result")?
        .get("legacy")?
        .get("full_text")?
        .as_str()?;
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Merge DOM-derived fields with the intercepted payload and settle the final
/// title and warning. Pure function of its two inputs.
pub(crate) fn finalize_social(mut fields: PageFields, payload: Option<&Value>) -> PageFields {
    match payload {
        Some(value) => match full_text_from_capture(value) {
            Some(text) => fields.content = text,
            None => {
                debug!(target: "extract.social", "captured payload had an unexpected shape")
            }
        },
        None => debug!(target: "extract.social", "no internal response captured"),
    }

    if fields.content.is_empty() {
        fields.title = FALLBACK_TITLE.to_string();
        fields.warning = Some(BLOCKED_WARNING.to_string());
    } else if fields.author.is_empty() {
        fields.title = FALLBACK_TITLE.to_string();
    } else {
        fields.title = format!("{}'s post", fields.author);
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn dom_fields_recovered_from_marker_attributes() {
        let html = r#"
            <html><body>
              <div data-testid="User-Name">alice</div>
              <div data-testid="tweetText">hello from the DOM</div>
              <time datetime="2025-09-01T12:00:00.000Z">Sep 1</time>
            </body></html>
        "#;
        let fields = social_fields_from_html(html);
        assert_eq!(fields.content, "hello from the DOM");
        assert_eq!(fields.author, "alice");
        assert_eq!(fields.timestamp, "2025-09-01T12:00:00.000Z");
    }

    #[test]
    fn intercepted_full_text_overrides_dom_text() {
        let payload = json!({
            "data": { "tweetResult": { "result": { "legacy": {
                "full_text": "the complete post text"
            }}}}
        });
        let dom_fields = PageFields {
            content: "truncated DOM text".to_string(),
            author: "alice".to_string(),
            ..PageFields::default()
        };
        let fields = finalize_social(dom_fields, Some(&payload));
        assert_eq!(fields.content, "the complete post text");
        assert_eq!(fields.title, "alice's post");
        assert!(fields.warning.is_none());
    }

    #[test]
    fn reshaped_payload_is_treated_as_no_override() {
        let payload = json!({ "data": { "somethingElse": true } });
        let dom_fields = PageFields {
            content: "dom text survives".to_string(),
            author: "alice".to_string(),
            ..PageFields::default()
        };
        let fields = finalize_social(dom_fields, Some(&payload));
        assert_eq!(fields.content, "dom text survives");
    }

    #[test]
    fn empty_full_text_does_not_override() {
        let payload = json!({
            "data": { "tweetResult": { "result": { "legacy": { "full_text": "" }}}}
        });
        assert!(full_text_from_capture(&payload).is_none());
    }

    #[test]
    fn no_text_anywhere_yields_warning_not_error() {
        let dom_fields = PageFields {
            author: "alice".to_string(),
            timestamp: "2025-09-01T12:00:00.000Z".to_string(),
            ..PageFields::default()
        };
        let fields = finalize_social(dom_fields, None);
        assert_eq!(fields.content, "");
        assert_eq!(fields.title, FALLBACK_TITLE);
        assert_eq!(fields.author, "alice");
        assert!(fields.warning.is_some());
    }

    #[test]
    fn missing_author_gets_fallback_title() {
        let dom_fields = PageFields {
            content: "text without an author".to_string(),
            ..PageFields::default()
        };
        let fields = finalize_social(dom_fields, None);
        assert_eq!(fields.title, FALLBACK_TITLE);
        assert!(fields.warning.is_none());
    }
}
