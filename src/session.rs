//! Editing session for Markpress
//!
//! A `Session` owns the three pieces of document state: the markdown
//! source, the user CSS, and the HTML rendered from the markdown. Editing the
//! markdown re-renders immediately; editing the CSS never touches the HTML.

use crate::markdown::{render_document, CodeHighlight, ComrakRenderer, MarkdownRenderer};
use crate::preview::StyledDocument;
use crate::samples::{SAMPLE_CSS, SAMPLE_MARKDOWN};
use crate::style::compose_stylesheet;
use log::{debug, error};

/// Revision counters used to detect when the preview is out of date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Revision {
    /// Bumped every time the rendered HTML is replaced
    pub html: u64,
    /// Bumped every time the user CSS changes
    pub css: u64,
}

/// The document being edited.
pub struct Session {
    renderer: Box<dyn MarkdownRenderer>,
    highlight: CodeHighlight,
    markdown: String,
    css: String,
    html: String,
    revision: Revision,
}

impl Session {
    /// Create a session with the sample document and stylesheet.
    pub fn new(highlight: CodeHighlight) -> Self {
        Self::with_sources(
            Box::new(ComrakRenderer::default()),
            highlight,
            SAMPLE_MARKDOWN,
            SAMPLE_CSS,
        )
    }

    /// Create a session with explicit sources and renderer.
    ///
    /// The markdown is rendered once up front. If that first render fails
    /// the HTML starts out empty.
    pub fn with_sources(
        renderer: Box<dyn MarkdownRenderer>,
        highlight: CodeHighlight,
        markdown: impl Into<String>,
        css: impl Into<String>,
    ) -> Self {
        let mut session = Self {
            renderer,
            highlight,
            markdown: markdown.into(),
            css: css.into(),
            html: String::new(),
            revision: Revision::default(),
        };
        session.rerender();
        session
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn markdown(&self) -> &str {
        &self.markdown
    }

    pub fn css(&self) -> &str {
        &self.css
    }

    /// The most recent successfully rendered HTML.
    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn revision(&self) -> Revision {
        self.revision
    }

    pub fn highlight(&self) -> CodeHighlight {
        self.highlight
    }

    /// Baseline stylesheet followed by the current user CSS.
    pub fn stylesheet(&self) -> String {
        compose_stylesheet(&self.css)
    }

    /// Detached copy of the current HTML and stylesheet for preview or export.
    pub fn snapshot(&self) -> StyledDocument {
        StyledDocument::new(self.html.clone(), self.stylesheet())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Edits
    // ─────────────────────────────────────────────────────────────────────────

    /// Edit the markdown in place. `edit` returns whether it changed the
    /// text; if so the HTML is re-rendered before this returns.
    pub fn edit_markdown(&mut self, edit: impl FnOnce(&mut String) -> bool) -> bool {
        let changed = edit(&mut self.markdown);
        if changed {
            self.rerender();
        }
        changed
    }

    /// Replace the markdown wholesale.
    pub fn set_markdown(&mut self, markdown: impl Into<String>) {
        let markdown = markdown.into();
        self.edit_markdown(|text| {
            *text = markdown;
            true
        });
    }

    /// Edit the user CSS in place. The HTML is never re-rendered here.
    pub fn edit_css(&mut self, edit: impl FnOnce(&mut String) -> bool) -> bool {
        let changed = edit(&mut self.css);
        if changed {
            self.revision.css += 1;
        }
        changed
    }

    /// Replace the user CSS wholesale.
    #[cfg(test)]
    pub fn set_css(&mut self, css: impl Into<String>) {
        let css = css.into();
        self.edit_css(|text| {
            *text = css;
            true
        });
    }

    /// Switch the code decoration policy and re-render.
    pub fn set_highlight(&mut self, highlight: CodeHighlight) {
        if self.highlight != highlight {
            self.highlight = highlight;
            self.rerender();
        }
    }

    /// Render the current markdown. On failure the previous HTML is kept.
    fn rerender(&mut self) -> bool {
        match render_document(self.renderer.as_ref(), &self.markdown, self.highlight) {
            Ok(html) => {
                self.html = html;
                self.revision.html += 1;
                debug!(
                    "Rendered {} bytes of markdown into {} bytes of HTML",
                    self.markdown.len(),
                    self.html.len()
                );
                true
            }
            Err(e) => {
                error!("Error parsing markdown: {}", e);
                false
            }
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(CodeHighlight::default())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
