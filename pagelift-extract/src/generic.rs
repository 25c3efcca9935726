//! Best-effort extractor for arbitrary pages.
//!
//! Strips the usual noise elements document-wide, then searches for the most
//! article-like region. Body text is capped so a link farm or infinite feed
//! cannot balloon the result.

use crate::dom;
use crate::result::PageFields;
use crate::{SETTLE_DELAY_MS, SiteExtractor};
use anyhow::Result;
use async_trait::async_trait;
use pagelift_drivers::browser::driver::PageliftBrowser;
use pagelift_drivers::browser::page::{PageliftPage, WaitUntil};
use regex::Regex;
use scraper::Html;
use std::time::Duration;

/// Maximum body length, in characters, before truncation.
pub(crate) const MAX_CONTENT_CHARS: usize = 10_000;

/// Appended when the body was cut at [`MAX_CONTENT_CHARS`].
pub(crate) const TRUNCATION_MARKER: &str = "...(truncated)";

pub struct GenericExtractor;

impl GenericExtractor {
    /// Run the noise-stripping and fallback chains on already-rendered HTML.
    pub fn fields_from_html(html: &str) -> PageFields {
        generic_fields_from_html(html)
    }
}

#[async_trait]
impl SiteExtractor for GenericExtractor {
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
    page.goto(url, WaitUntil::NetworkIdle, nav_timeout).await?;
    page.settle(SETTLE_DELAY_MS).await;

    let html = page.content().await?;
    Ok(generic_fields_from_html(&html))
}

pub(crate) fn generic_fields_from_html(html: &str) -> PageFields {
    let mut doc = Html::parse_document(html);
    dom::strip_tags(
        &mut doc,
        &["script", "style", "nav", "footer", "header", "aside"],
    );

    let title = dom::first(&doc, "h1")
        .or_else(|| dom::first(&doc, "title"))
        .map(dom::text_concat)
        .unwrap_or_default();

    let container_class = Regex::new("(?i)content|main|article").expect("static regex");
    let content = dom::first(&doc, "main")
        .or_else(|| dom::first(&doc, "article"))
        .or_else(|| dom::first_by_class(&doc, &["div"], &container_class))
        .or_else(|| dom::first(&doc, "body"))
        .map(dom::text_with_breaks)
        .map(truncate_content)
        .unwrap_or_default();

    let author = dom::first(&doc, r#"meta[name="author"]"#)
        .and_then(|el| el.value().attr("content").map(str::to_string))
        .unwrap_or_default();

    PageFields {
        title,
        content,
        author,
        timestamp: String::new(),
        warning: None,
    }
}

/// Cap body text at [`MAX_CONTENT_CHARS`] characters, marking the cut.
/// Shorter bodies pass through untouched.
pub(crate) fn truncate_content(content: String) -> String {
    if content.chars().count() <= MAX_CONTENT_CHARS {
        return content;
    }
    let mut truncated: String = content.chars().take(MAX_CONTENT_CHARS).collect();
    truncated.push_str(TRUNCATION_MARKER);
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_and_main_region_extracted() {
        let html = "<html><body><h1>Hello</h1><main>World</main></body></html>";
        let fields = generic_fields_from_html(html);
        assert_eq!(fields.title, "Hello");
        assert_eq!(fields.content, "World");
        assert_eq!(fields.author, "");
        assert_eq!(fields.timestamp, "");
    }

    #[test]
    fn title_falls_back_to_document_title() {
        let html = "<html><head><title>Doc Title</title></head><body><p>x</p></body></html>";
        let fields = generic_fields_from_html(html);
        assert_eq!(fields.title, "Doc Title");
    }

    #[test]
    fn body_falls_back_through_article_and_class_to_body() {
        let by_article = generic_fields_from_html("<body><article>A</article></body>");
        assert_eq!(by_article.content, "A");

        let by_class =
            generic_fields_from_html(r#"<body><div class="page-content">B</div></body>"#);
        assert_eq!(by_class.content, "B");

        let by_body = generic_fields_from_html("<body><span>C</span></body>");
        assert_eq!(by_body.content, "C");
    }

    #[test]
    fn noise_elements_are_stripped_before_search() {
        let html = r#"
            <body>
              <header><h1>Navigation Heading</h1></header>
              <nav>menu</nav>
              <main>the real content</main>
              <footer>footer text</footer>
            </body>
        "#;
        let fields = generic_fields_from_html(html);
        assert_eq!(fields.content, "the real content");
        // the only h1 lived inside the stripped header
        assert_eq!(fields.title, "");
    }

    #[test]
    fn stripped_container_is_not_selected_as_body() {
        // A content-classed div inside the footer must not survive stripping
        // and win the body fallback chain.
        let html = r#"
            <body>
              <footer><div class="site-content">footer junk</div></footer>
              <p>real text</p>
            </body>
        "#;
        let fields = generic_fields_from_html(html);
        assert_eq!(fields.content, "real text");
    }

    #[test]
    fn author_read_from_meta_tag() {
        let html = r#"
            <head><meta name="author" content="Jane Doe"></head>
            <body><main>text</main></body>
        "#;
        let fields = generic_fields_from_html(html);
        assert_eq!(fields.author, "Jane Doe");
    }

    #[test]
    fn body_at_limit_is_untouched() {
        let body = "x".repeat(MAX_CONTENT_CHARS);
        assert_eq!(truncate_content(body.clone()), body);
    }

    #[test]
    fn body_over_limit_is_cut_with_marker() {
        let body = "y".repeat(MAX_CONTENT_CHARS + 500);
        let truncated = truncate_content(body);
        assert!(truncated.ends_with(TRUNCATION_MARKER));
        let kept = truncated.trim_end_matches(TRUNCATION_MARKER);
        assert_eq!(kept.chars().count(), MAX_CONTENT_CHARS);
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let body = "あ".repeat(MAX_CONTENT_CHARS + 1);
        let truncated = truncate_content(body);
        let kept = truncated.trim_end_matches(TRUNCATION_MARKER);
        assert_eq!(kept.chars().count(), MAX_CONTENT_CHARS);
    }
}
