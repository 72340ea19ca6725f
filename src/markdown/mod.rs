//! Markdown rendering module
//!
//! This module turns markdown source into classed HTML using the comrak
//! library, a CommonMark + GFM compatible parser.
//!
//! # Features
//! - Render markdown to HTML with hard line breaks and GFM extensions
//! - Inject semantic class names onto headings, paragraphs and lists
//! - Optional decoration of hook identifiers inside code blocks
//!
//! # Example
//! ```ignore
//! use crate::markdown::{render_document, CodeHighlight, ComrakRenderer};
//!
//! let html = render_document(&ComrakRenderer::default(), "# Hello", CodeHighlight::Off)?;
//! assert_eq!(html, "<h1 class=\"markdown-header\">Hello</h1>\n");
//! ```

pub mod classes;
pub mod highlight;
mod renderer;

pub use classes::{BODY_CLASS, HEADER_CLASS, LIST_CLASS, PARAGRAPH_CLASS};
pub use highlight::{CodeHighlight, HIGHLIGHT_CLASS};
pub use renderer::{render_document, ComrakRenderer, MarkdownRenderer};
