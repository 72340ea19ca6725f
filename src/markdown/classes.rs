//! Semantic class injection for rendered HTML
//!
//! Stylesheets target headings, paragraphs and lists through shared class
//! names rather than bare tags. This module adds those classes to the opening
//! tags comrak emits, as a textual rewrite over the HTML string.

use regex::{Captures, Regex};
use std::sync::OnceLock;

/// Root container class wrapping the rendered document.
pub const BODY_CLASS: &str = "markdown-body";
/// Shared class for `<h1>` through `<h6>`.
pub const HEADER_CLASS: &str = "markdown-header";
/// Shared class for `<p>`.
pub const PARAGRAPH_CLASS: &str = "markdown-paragraph";
/// Shared class for `<ul>` and `<ol>`.
pub const LIST_CLASS: &str = "markdown-list";

/// Opening tags that receive a class. The name must be followed by
/// whitespace or `>` so `<pre>` and `<option>` never match.
static TAG_PATTERN: OnceLock<Regex> = OnceLock::new();

/// An existing `class` attribute, double-quoted, single-quoted or bare.
static CLASS_ATTR_PATTERN: OnceLock<Regex> = OnceLock::new();

fn tag_pattern() -> &'static Regex {
    TAG_PATTERN.get_or_init(|| {
        Regex::new(r"<(h[1-6]|p|ul|ol)(\s[^>]*)?>").expect("tag pattern is valid")
    })
}

fn class_attr_pattern() -> &'static Regex {
    CLASS_ATTR_PATTERN.get_or_init(|| {
        Regex::new(r#"(\sclass\s*=\s*)(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+))"#)
            .expect("class pattern is valid")
    })
}

/// The semantic class for a matched tag name.
fn class_for_tag(tag: &str) -> &'static str {
    match tag {
        "p" => PARAGRAPH_CLASS,
        "ul" | "ol" => LIST_CLASS,
        _ => HEADER_CLASS,
    }
}

/// Add the semantic class to an attribute string, keeping every other
/// attribute as-is. An existing `class` value is extended in place and keeps
/// its quote style; a bare value becomes double-quoted.
fn merge_class(attrs: &str, class: &str) -> String {
    let class_attr = class_attr_pattern();
    let Some(caps) = class_attr.captures(attrs) else {
        return format!(" class=\"{}\"{}", class, attrs);
    };

    let (existing, quote) = match (caps.get(2), caps.get(3), caps.get(4)) {
        (Some(value), _, _) => (value.as_str(), '"'),
        (_, Some(value), _) => (value.as_str(), '\''),
        (_, _, Some(value)) => (value.as_str(), '"'),
        _ => ("", '"'),
    };
    if existing.split_whitespace().any(|c| c == class) {
        return attrs.to_string();
    }

    let existing = existing.trim();
    let merged = if existing.is_empty() {
        class.to_string()
    } else {
        format!("{} {}", existing, class)
    };
    class_attr
        .replacen(attrs, 1, |c: &Captures| {
            format!("{}{}{}{}", &c[1], quote, merged, quote)
        })
        .into_owned()
}

/// Inject the shared heading, paragraph and list classes.
///
/// `<h2>` becomes `<h2 class="markdown-header">`, `<ol start="3">` becomes
/// `<ol class="markdown-list" start="3">`, and a tag that already has a
/// `class` attribute gets the class appended. Running this twice produces
/// the same output as running it once.
pub fn inject_semantic_classes(html: &str) -> String {
    tag_pattern()
        .replace_all(html, |caps: &Captures| {
            let tag = &caps[1];
            let class = class_for_tag(tag);
            match caps.get(2) {
                Some(attrs) => format!("<{}{}>", tag, merge_class(attrs.as_str(), class)),
                None => format!("<{} class=\"{}\">", tag, class),
            }
        })
        .into_owned()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_tags() {
        let html = "<h1>A</h1>\n<p>b</p>\n<ul>\n<li>c</li>\n</ul>\n<ol>\n<li>d</li>\n</ol>\n";
        let out = inject_semantic_classes(html);

        assert!(out.contains(r#"<h1 class="markdown-header">A</h1>"#));
        assert!(out.contains(r#"<p class="markdown-paragraph">b</p>"#));
        assert!(out.contains(r#"<ul class="markdown-list">"#));
        assert!(out.contains(r#"<ol class="markdown-list">"#));
    }

    #[test]
    fn test_all_heading_levels() {
        for level in 1..=6 {
            let out = inject_semantic_classes(&format!("<h{0}>x</h{0}>", level));
            assert_eq!(
                out,
                format!(r#"<h{0} class="markdown-header">x</h{0}>"#, level)
            );
        }
    }

    #[test]
    fn test_tag_with_attributes() {
        let out = inject_semantic_classes(r#"<ol start="3">"#);
        assert_eq!(out, r#"<ol class="markdown-list" start="3">"#);

        let out = inject_semantic_classes(r#"<h2 id="intro">Intro</h2>"#);
        assert_eq!(out, r#"<h2 class="markdown-header" id="intro">Intro</h2>"#);
    }

    #[test]
    fn test_existing_class_is_extended() {
        let out = inject_semantic_classes(r#"<ul class="contains-task-list">"#);
        assert_eq!(out, r#"<ul class="contains-task-list markdown-list">"#);
    }

    #[test]
    fn test_single_quoted_class_is_extended() {
        let out = inject_semantic_classes("<p class='note'>x</p>");
        assert_eq!(out, "<p class='note markdown-paragraph'>x</p>");
        assert_eq!(out.matches("class=").count(), 1);
    }

    #[test]
    fn test_unquoted_class_is_extended() {
        let out = inject_semantic_classes("<ul class=todo>");
        assert_eq!(out, r#"<ul class="todo markdown-list">"#);
        assert_eq!(out.matches("class=").count(), 1);
    }

    #[test]
    fn test_class_forms_keep_other_attributes() {
        let out = inject_semantic_classes("<h2 id=a class='x' title=\"t\">T</h2>");
        assert_eq!(out, "<h2 id=a class='x markdown-header' title=\"t\">T</h2>");
    }

    #[test]
    fn test_quoted_forms_idempotent() {
        let html = "<p class='note'>a</p><ol class=steps start=2></ol>";
        let once = inject_semantic_classes(html);
        assert_eq!(inject_semantic_classes(&once), once);
    }

    #[test]
    fn test_data_class_attribute_is_not_class() {
        let out = inject_semantic_classes(r#"<p data-class="x">y</p>"#);
        assert_eq!(out, r#"<p class="markdown-paragraph" data-class="x">y</p>"#);
    }

    #[test]
    fn test_similar_tags_untouched() {
        let html = "<pre><code>x</code></pre><progress></progress><option>o</option><hr />";
        assert_eq!(inject_semantic_classes(html), html);
    }

    #[test]
    fn test_closing_tags_untouched() {
        let out = inject_semantic_classes("<p>a</p>");
        assert!(out.ends_with("</p>"));
        assert_eq!(out.matches("class=").count(), 1);
    }

    #[test]
    fn test_idempotent() {
        let html = r#"<h3>T</h3><p>x</p><ol start="2"><li>y</li></ol>"#;
        let once = inject_semantic_classes(html);
        let twice = inject_semantic_classes(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_escaped_markup_untouched() {
        let html = "<code>&lt;p&gt;</code>";
        assert_eq!(inject_semantic_classes(html), html);
    }
}
