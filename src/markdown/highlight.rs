//! Decorative highlighting for fenced code blocks
//!
//! This is not a syntax highlighter. When enabled it wraps a small fixed set
//! of identifiers (React hook names) inside `<pre><code>` blocks in a span so
//! the stylesheet can call them out.

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Class applied to decorated identifiers.
pub const HIGHLIGHT_CLASS: &str = "hook-highlight";

/// Identifiers decorated by `CodeHighlight::Hooks`.
pub const HOOK_IDENTIFIERS: [&str; 4] = ["useState", "useEffect", "useRef", "useMemo"];

/// Code decoration policy applied after rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CodeHighlight {
    /// Leave code blocks as rendered
    #[default]
    Off,
    /// Wrap hook identifiers in a highlight span
    Hooks,
}

impl CodeHighlight {
    /// Get the display label for this policy.
    pub fn label(&self) -> &'static str {
        match self {
            CodeHighlight::Off => "Off",
            CodeHighlight::Hooks => "Hook names",
        }
    }
}

static CODE_BLOCK_PATTERN: OnceLock<Regex> = OnceLock::new();
static IDENTIFIER_PATTERN: OnceLock<Regex> = OnceLock::new();

fn code_block_pattern() -> &'static Regex {
    CODE_BLOCK_PATTERN.get_or_init(|| {
        Regex::new(r"(?s)(<pre[^>]*><code[^>]*>)(.*?)(</code></pre>)")
            .expect("code block pattern is valid")
    })
}

fn identifier_pattern() -> &'static Regex {
    IDENTIFIER_PATTERN.get_or_init(|| {
        Regex::new(&format!(r"\b({})\b", HOOK_IDENTIFIERS.join("|")))
            .expect("identifier pattern is valid")
    })
}

/// Wrap hook identifiers inside fenced code blocks.
///
/// Inline `<code>` and text outside code blocks are left alone.
pub fn decorate_code_blocks(html: &str) -> String {
    code_block_pattern()
        .replace_all(html, |caps: &Captures| {
            let body = identifier_pattern().replace_all(
                &caps[2],
                format!(r#"<span class="{}">$1</span>"#, HIGHLIGHT_CLASS).as_str(),
            );
            format!("{}{}{}", &caps[1], body, &caps[3])
        })
        .into_owned()
}
