//! Markdown renderer implementation using comrak
//!
//! This module wraps comrak's HTML rendering behind the `MarkdownRenderer`
//! trait so the session can be driven by any renderer, and runs the class
//! post-processing and optional code decoration over the raw output.

use comrak::{markdown_to_html, Options};
use std::panic::{self, AssertUnwindSafe};

use super::classes::inject_semantic_classes;
use super::highlight::{decorate_code_blocks, CodeHighlight};
use crate::error::{Error, Result};

// ─────────────────────────────────────────────────────────────────────────────
// Renderer Options
// ─────────────────────────────────────────────────────────────────────────────

/// Configuration options for markdown rendering.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Enable GitHub Flavored Markdown tables
    pub tables: bool,
    /// Enable strikethrough syntax (~~text~~)
    pub strikethrough: bool,
    /// Enable autolink URLs and emails
    pub autolink: bool,
    /// Enable task lists (- [ ] and - [x])
    pub tasklist: bool,
    /// Enable footnotes
    pub footnotes: bool,
    /// Render single newlines as `<br />`
    pub hard_breaks: bool,
    /// Pass raw HTML in the source through to the output
    pub allow_raw_html: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            tables: true,
            strikethrough: true,
            autolink: true,
            tasklist: true,
            footnotes: true,
            hard_breaks: true,
            allow_raw_html: true,
        }
    }
}

impl RenderOptions {
    /// Convert to comrak Options.
    fn to_comrak_options(&self) -> Options {
        let mut options = Options::default();

        // Extension options
        options.extension.strikethrough = self.strikethrough;
        options.extension.table = self.tables;
        options.extension.autolink = self.autolink;
        options.extension.tasklist = self.tasklist;
        options.extension.footnotes = self.footnotes;

        // Render options
        options.render.hardbreaks = self.hard_breaks;
        options.render.unsafe_ = self.allow_raw_html;

        options
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Renderer Trait
// ─────────────────────────────────────────────────────────────────────────────

/// Converts markdown source into an HTML fragment.
pub trait MarkdownRenderer {
    fn render(&self, markdown: &str) -> Result<String>;
}

/// The comrak-backed renderer used by the application.
#[derive(Debug, Clone, Default)]
pub struct ComrakRenderer {
    options: RenderOptions,
}

impl MarkdownRenderer for ComrakRenderer {
    /// Render markdown to HTML.
    ///
    /// comrak does not report errors, so the only failure mode is a panic
    /// inside the parser. That panic is caught here and returned as
    /// `Error::Render` so the caller can keep its previous output.
    fn render(&self, markdown: &str) -> Result<String> {
        let options = self.options.to_comrak_options();

        panic::catch_unwind(AssertUnwindSafe(|| markdown_to_html(markdown, &options))).map_err(
            |payload| {
                let message = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "renderer panicked".to_string());
                Error::Render(message)
            },
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Pipeline
// ─────────────────────────────────────────────────────────────────────────────

/// Render markdown and apply the fixed post-processing rules.
///
/// The output is a pure function of `markdown`, the renderer configuration
/// and the highlight policy.
pub fn render_document(
    renderer: &dyn MarkdownRenderer,
    markdown: &str,
    highlight: CodeHighlight,
) -> Result<String> {
    let raw = renderer.render(markdown)?;
    let html = inject_semantic_classes(&raw);

    Ok(match highlight {
        CodeHighlight::Off => html,
        CodeHighlight::Hooks => decorate_code_blocks(&html),
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
