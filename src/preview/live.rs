//! Live preview window
//!
//! The preview is a visible Chrome window whose document is replaced every
//! time the session's HTML or CSS revision moves on.

use headless_chrome::{Browser, Tab};
use log::debug;
use std::sync::Arc;

use super::document::StyledDocument;
use crate::browser::{launch_browser, BrowserMode, BrowserSettings};
use crate::error::{Error, Result};
use crate::session::Revision;

/// Title shown in the preview window.
const PREVIEW_TITLE: &str = "Markpress Preview";

/// Initial preview window size in CSS pixels.
const PREVIEW_WINDOW_SIZE: (u32, u32) = (960, 1100);

/// A visible surface that displays the styled document.
pub trait PreviewSurface {
    /// Replace the displayed document.
    fn show(&mut self, document: &StyledDocument, revision: Revision) -> Result<()>;

    /// Revision currently on screen, if anything has been shown yet.
    fn shown_revision(&self) -> Option<Revision>;

    /// Whether the surface is behind the given revision.
    fn is_stale(&self, revision: Revision) -> bool {
        self.shown_revision() != Some(revision)
    }
}

/// Chrome window used as the live preview surface.
pub struct BrowserPreview {
    /// Keeps the browser process alive
    _browser: Browser,
    tab: Arc<Tab>,
    shown: Option<Revision>,
}

impl BrowserPreview {
    /// Launch a visible browser window for previewing.
    pub fn open(settings: &BrowserSettings) -> Result<Self> {
        let browser = launch_browser(settings, BrowserMode::Windowed, PREVIEW_WINDOW_SIZE)?;
        let tab = browser
            .new_tab()
            .map_err(|e| Error::Browser(format!("Failed to create preview tab: {}", e)))?;

        Ok(Self {
            _browser: browser,
            tab,
            shown: None,
        })
    }
}

impl PreviewSurface for BrowserPreview {
    fn show(&mut self, document: &StyledDocument, revision: Revision) -> Result<()> {
        let page = document.to_html(PREVIEW_TITLE);
        let literal = serde_json::to_string(&page)
            .map_err(|e| Error::Browser(format!("Failed to encode preview: {}", e)))?;
        let script = format!(
            "document.open(); document.write({}); document.close();",
            literal
        );

        self.tab
            .evaluate(&script, false)
            .map_err(|e| Error::Browser(format!("Failed to update preview: {}", e)))?;

        debug!(
            "Preview updated to html rev {}, css rev {}",
            revision.html, revision.css
        );
        self.shown = Some(revision);
        Ok(())
    }

    fn shown_revision(&self) -> Option<Revision> {
        self.shown
    }
}
