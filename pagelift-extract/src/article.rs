//! Article-platform extractor.
//!
//! The platform's markup is semi-consistent but evolves, so title, body, and
//! author each run an independent selector fallback chain. Every chain
//! degrades to empty string; a selector miss is never an error.

use crate::dom;
use crate::result::PageFields;
use crate::{SETTLE_DELAY_MS, SiteExtractor};
use anyhow::Result;
use async_trait::async_trait;
use pagelift_drivers::browser::driver::PageliftBrowser;
use pagelift_drivers::browser::page::{PageliftPage, WaitUntil};
use regex::Regex;
use scraper::{ElementRef, Html};
use std::time::Duration;
use tracing::debug;

pub struct ArticlePlatformExtractor;

impl ArticlePlatformExtractor {
    /// Run the selector fallback chains on already-rendered HTML.
    pub fn fields_from_html(html: &str) -> PageFields {
        article_fields_from_html(html)
    }
}

#[async_trait]
impl SiteExtractor for ArticlePlatformExtractor {
    async fn extract(
        &self,
        browser: &PageliftBrowser,
        url: &str,
        nav_timeout: Duration,
    ) -> Result<PageFields> {
        let page = browser.open_page(false).await?;
        let outcome = run(&page, url, nav_timeout).await;
        page.close().await;
        outcome
    }
}

async fn run(page: &PageliftPage, url: &str, nav_timeout: Duration) -> Result<PageFields> {
    // This platform's pages settle quickly, so waiting for network idle is safe.
    page.goto(url, WaitUntil::NetworkIdle, nav_timeout).await?;
    page.settle(SETTLE_DELAY_MS).await;

    let html = page.content().await?;
    let fields = article_fields_from_html(&html);
    debug!(
        target: "extract.article",
        title = %fields.title,
        content_chars = fields.content.chars().count(),
        "article fields recovered"
    );
    Ok(fields)
}

pub(crate) fn article_fields_from_html(html: &str) -> PageFields {
    let mut doc = Html::parse_document(html);

    let title_class = Regex::new("(?i)title").expect("static regex");
    let title = dom::first_by_class(&doc, &["h1", "h2", "h3"], &title_class)
        .or_else(|| dom::first(&doc, "h1"))
        .or_else(|| dom::first(&doc, "h2"))
        .or_else(|| dom::first(&doc, "h3"))
        .map(dom::text_concat)
        .unwrap_or_default();

    let body_class = Regex::new("(?i)note-body|article").expect("static regex");
    let content_class = Regex::new("(?i)content").expect("static regex");
    let container_id = dom::first_by_class(&doc, &["div"], &body_class)
        .or_else(|| dom::first(&doc, "article"))
        .or_else(|| dom::first_by_class(&doc, &["div"], &content_class))
        .map(|el| el.id());

    let content = match container_id {
        Some(id) => {
            dom::strip_tags_under(&mut doc, id, &["script", "style", "nav", "footer"]);
            doc.tree
                .get(id)
                .and_then(ElementRef::wrap)
                .map(dom::text_with_breaks)
                .unwrap_or_default()
        }
        None => String::new(),
    };

    let author_class = Regex::new("(?i)creator|author").expect("static regex");
    let author = dom::first_by_class(&doc, &["a", "div"], &author_class)
        .map(dom::text_concat)
        .unwrap_or_default();

    PageFields {
        title,
        content,
        author,
        timestamp: String::new(),
        warning: None,
    }
}
