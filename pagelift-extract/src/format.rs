//! Render an [`ExtractionResult`] as JSON or Markdown.

use crate::result::ExtractionResult;
use anyhow::Result;
use pagelift_common::OutputFormat;

/// Render `result` in the requested output format.
pub fn render(result: &ExtractionResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Markdown => Ok(to_markdown(result)),
    }
}

/// Markdown rendering. An error result is a heading and the message, nothing
/// else; a success result is an optional title heading, a metadata block,
/// and the body verbatim under a Content heading.
fn to_markdown(result: &ExtractionResult) -> String {
    if let Some(error) = &result.error {
        return format!("# Error\n\n{error}");
    }

    let mut lines = Vec::new();

    if let Some(title) = result.title.as_deref().filter(|t| !t.is_empty()) {
        lines.push(format!("# {title}"));
    }

    lines.push(format!("\n**URL**: {}", result.url));
    lines.push(format!("**Category**: {}", result.category));

    if let Some(author) = result.author.as_deref().filter(|a| !a.is_empty()) {
        lines.push(format!("**Author**: {author}"));
    }
    if let Some(timestamp) = result.timestamp.as_deref().filter(|t| !t.is_empty()) {
        lines.push(format!("**Timestamp**: {timestamp}"));
    }

    lines.push(format!(
        "\n## Content\n\n{}",
        result.content.as_deref().unwrap_or_default()
    ));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::SiteCategory;

    fn success_result() -> ExtractionResult {
        ExtractionResult {
            title: Some("Hello".to_string()),
            content: Some("World".to_string()),
            author: Some("Jane".to_string()),
            timestamp: Some("2026-01-01T00:00:00+00:00".to_string()),
            warning: None,
            error: None,
            url: "https://example.com".to_string(),
            category: SiteCategory::Generic,
            extracted_at: "2026-01-02T03:04:05+00:00".to_string(),
        }
    }

    #[test]
    fn error_markdown_has_only_heading_and_message() {
        let result = ExtractionResult {
            error: Some("page load timed out".to_string()),
            url: "https://example.com".to_string(),
            category: SiteCategory::Generic,
            extracted_at: "2026-01-01T00:00:00+00:00".to_string(),
            ..ExtractionResult::default()
        };
        let md = render(&result, OutputFormat::Markdown).unwrap();
        assert_eq!(md, "# Error\n\npage load timed out");
        assert!(!md.contains("**URL**"));
        assert!(!md.contains("## Content"));
    }

    #[test]
    fn success_markdown_layout() {
        let md = render(&success_result(), OutputFormat::Markdown).unwrap();
        assert!(md.starts_with("# Hello\n"));
        assert!(md.contains("**URL**: https://example.com"));
        assert!(md.contains("**Category**: generic"));
        assert!(md.contains("**Author**: Jane"));
        assert!(md.contains("## Content\n\nWorld"));
    }

    #[test]
    fn empty_optional_metadata_lines_are_omitted() {
        let mut result = success_result();
        result.title = Some(String::new());
        result.author = Some(String::new());
        result.timestamp = Some(String::new());
        let md = render(&result, OutputFormat::Markdown).unwrap();
        assert!(!md.contains("# \n"));
        assert!(!md.contains("**Author**"));
        assert!(!md.contains("**Timestamp**"));
        assert!(md.contains("## Content"));
    }

    #[test]
    fn json_round_trip_is_lossless() {
        let result = success_result();
        let json = render(&result, OutputFormat::Json).unwrap();
        let parsed: ExtractionResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.title, result.title);
        assert_eq!(parsed.content, result.content);
        assert_eq!(parsed.author, result.author);
        assert_eq!(parsed.timestamp, result.timestamp);
        assert_eq!(parsed.category, result.category);
        assert_eq!(parsed.url, result.url);
        assert_eq!(parsed.extracted_at, result.extracted_at);
        assert!(parsed.error.is_none());
        assert!(parsed.warning.is_none());
    }
}
