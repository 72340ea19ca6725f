//! Clipboard Operations
//!
//! Copies the styled document to the system clipboard using the arboard
//! crate. Rich-paste targets get the full page, everything else gets the
//! markdown source.

use arboard::Clipboard;
use log::info;

use crate::error::{Error, Result};
use crate::preview::StyledDocument;

/// Title embedded in the copied page.
const CLIPBOARD_TITLE: &str = "Markdown Document";

fn open_clipboard() -> Result<Clipboard> {
    Clipboard::new().map_err(|e| Error::Clipboard(e.to_string()))
}

/// Copy the styled page as HTML with the markdown source as plain text.
pub fn copy_document_to_clipboard(document: &StyledDocument, markdown: &str) -> Result<()> {
    let html = document.to_html(CLIPBOARD_TITLE);
    open_clipboard()?
        .set_html(html, Some(markdown.to_owned()))
        .map_err(|e| Error::Clipboard(e.to_string()))?;

    info!("Copied styled document to clipboard");
    Ok(())
}

/// Copy plain text to the clipboard.
pub fn copy_text_to_clipboard(text: &str) -> Result<()> {
    open_clipboard()?
        .set_text(text)
        .map_err(|e| Error::Clipboard(e.to_string()))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
