//! Styled document composition
//!
//! Wraps rendered HTML and a stylesheet into a complete standalone HTML page.
//! The same page is shown by the preview surfaces and handed to the exporter.

use regex::Regex;
use std::sync::OnceLock;

use crate::markdown::BODY_CLASS;

/// A `</style` sequence in any letter case.
static STYLE_CLOSE_PATTERN: OnceLock<Regex> = OnceLock::new();

/// Rendered HTML plus the stylesheet it should be shown with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledDocument {
    body_html: String,
    stylesheet: String,
}

impl StyledDocument {
    pub fn new(body_html: impl Into<String>, stylesheet: impl Into<String>) -> Self {
        Self {
            body_html: body_html.into(),
            stylesheet: stylesheet.into(),
        }
    }

    pub fn body_html(&self) -> &str {
        &self.body_html
    }

    pub fn stylesheet(&self) -> &str {
        &self.stylesheet
    }

    /// Build the complete HTML page.
    ///
    /// The body HTML goes inside a `markdown-body` container and the
    /// stylesheet goes into a single `<style>` element in the head.
    pub fn to_html(&self, title: &str) -> String {
        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <meta name="generator" content="Markpress">
    <title>{title}</title>
    <style>
{stylesheet}
    </style>
</head>
<body>
    <div class="{body_class}">
{body}
    </div>
</body>
</html>"#,
            title = html_escape(title),
            stylesheet = escape_style_content(&self.stylesheet),
            body_class = BODY_CLASS,
            body = self.body_html,
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Utility Functions
// ─────────────────────────────────────────────────────────────────────────────

/// HTML-escape a string.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Keep user CSS from closing the `<style>` element early.
fn escape_style_content(css: &str) -> String {
    STYLE_CLOSE_PATTERN
        .get_or_init(|| Regex::new(r"(?i)</(style)").expect("style pattern is valid"))
        .replace_all(css, "<\\/$1")
        .into_owned()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_structure() {
        let doc = StyledDocument::new("<p class=\"markdown-paragraph\">hi</p>", "p { color: red; }");
        let html = doc.to_html("Test Doc");

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Test Doc</title>"));
        assert!(html.contains("<div class=\"markdown-body\">"));
        assert!(html.contains("p { color: red; }"));
        assert!(html.contains("<p class=\"markdown-paragraph\">hi</p>"));
    }

    #[test]
    fn test_style_precedes_body() {
        let html = StyledDocument::new("<p>x</p>", "p{}").to_html("t");
        assert!(html.find("<style>").unwrap() < html.find("markdown-body").unwrap());
    }

    #[test]
    fn test_title_escaped() {
        let html = StyledDocument::new("", "").to_html("<b>&</b>");
        assert!(html.contains("<title>&lt;b&gt;&amp;&lt;/b&gt;</title>"));
    }

    #[test]
    fn test_style_cannot_break_out() {
        let html = StyledDocument::new("", "a{}</style><script>x()</script>").to_html("t");
        assert_eq!(html.matches("</style>").count(), 1);
    }

    #[test]
    fn test_style_close_any_case() {
        for css in ["a{}</Style>", "a{}</sTyLe >", "a{}</STYLE>"] {
            let html = StyledDocument::new("", css).to_html("t");
            assert_eq!(html.to_ascii_lowercase().matches("</style").count(), 1);
        }
    }

    #[test]
    fn test_style_escape_keeps_case() {
        assert_eq!(escape_style_content("</Style>"), "<\\/Style>");
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("Hello"), "Hello");
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("a & b"), "a &amp; b");
        assert_eq!(html_escape("\"quoted\""), "&quot;quoted&quot;");
    }
}
