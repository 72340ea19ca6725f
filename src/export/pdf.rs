//! PDF and snapshot composition
//!
//! The styled document is loaded into a headless Chrome tab at the capture
//! width and measured. The whole capture box is then rasterized at the
//! raster scale: as PNG for PDF output, which is sliced into JPEG pages, or
//! directly as a JPEG snapshot.

use base64::{engine::general_purpose::STANDARD, Engine};
use headless_chrome::protocol::cdp::Page;
use headless_chrome::Tab;
use log::{debug, info};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

use super::options::{CaptureBox, ExportFormat, PageOptions};
use super::paginate::raster_pdf;
use crate::browser::{launch_browser, BrowserMode, BrowserSettings};
use crate::error::{Error, Result};
use crate::markdown::BODY_CLASS;
use crate::preview::StyledDocument;

/// Title embedded in exported documents.
const DOCUMENT_TITLE: &str = "Markdown Document";

/// Initial viewport height for the headless tab.
const VIEWPORT_HEIGHT: u32 = 1200;

/// Produces export bytes from a styled document.
pub trait PdfEngine: Send + Sync {
    fn render(
        &self,
        document: &StyledDocument,
        format: ExportFormat,
        page: &PageOptions,
    ) -> Result<Vec<u8>>;
}

/// Headless Chrome export engine.
#[derive(Debug, Clone, Default)]
pub struct ChromeEngine {
    settings: BrowserSettings,
}

impl ChromeEngine {
    pub fn new(settings: BrowserSettings) -> Self {
        Self { settings }
    }
}

impl PdfEngine for ChromeEngine {
    fn render(
        &self,
        document: &StyledDocument,
        format: ExportFormat,
        page: &PageOptions,
    ) -> Result<Vec<u8>> {
        // Loading from a file is more reliable than a data URL for large documents
        let staged = stage_document(document)?;

        let browser = launch_browser(
            &self.settings,
            BrowserMode::Headless,
            (page.capture_width_px, VIEWPORT_HEIGHT),
        )?;
        let tab = browser
            .new_tab()
            .map_err(|e| Error::Browser(format!("Failed to create new tab: {}", e)))?;

        let url = file_url(staged.path());
        tab.navigate_to(&url)
            .map_err(|e| Error::Browser(format!("Failed to navigate: {}", e)))?;
        tab.wait_until_navigated()
            .map_err(|e| Error::Browser(format!("Failed to wait for navigation: {}", e)))?;

        // Let fonts and images settle before measuring
        std::thread::sleep(self.settings.render_wait());

        let capture = page.capture_box(measure_content_height(&tab)?);
        debug!("Capture box {}x{}", capture.width, capture.height);

        let image = capture_region(&tab, capture_request(page, capture, format))?;
        let bytes = match format {
            ExportFormat::Pdf => raster_pdf(&image, page)?,
            ExportFormat::Jpeg => image,
        };

        info!("Composed {} ({} bytes)", format.label(), bytes.len());
        Ok(bytes)
    }
}

/// Write the document to a temporary HTML file, removed on drop.
fn stage_document(document: &StyledDocument) -> Result<NamedTempFile> {
    let mut staged = tempfile::Builder::new()
        .prefix("markpress-")
        .suffix(".html")
        .tempfile()?;
    staged.write_all(document.to_html(DOCUMENT_TITLE).as_bytes())?;
    staged.flush()?;
    Ok(staged)
}

/// Build a `file://` URL for a local path.
fn file_url(path: &Path) -> String {
    let path = path.to_string_lossy().replace('\\', "/");
    if path.starts_with('/') {
        format!("file://{}", path)
    } else {
        format!("file:///{}", path)
    }
}

/// Height of the rendered `markdown-body` container in CSS pixels.
fn measure_content_height(tab: &Tab) -> Result<f64> {
    let script = format!("document.querySelector('.{}').scrollHeight", BODY_CLASS);
    let result = tab
        .evaluate(&script, false)
        .map_err(|e| Error::Export(format!("Failed to measure document: {}", e)))?;

    result
        .value
        .and_then(|v| v.as_f64())
        .ok_or_else(|| Error::Export("Document height is not available".to_string()))
}

/// Screenshot request for the whole capture box.
///
/// Content below the initial viewport is painted too, so long documents are
/// captured in full.
fn capture_request(
    page: &PageOptions,
    capture: CaptureBox,
    format: ExportFormat,
) -> Page::CaptureScreenshot {
    let (image_format, quality) = match format {
        // Lossless here; each page slice is JPEG-encoded later
        ExportFormat::Pdf => (Page::CaptureScreenshotFormatOption::Png, None),
        ExportFormat::Jpeg => (
            Page::CaptureScreenshotFormatOption::Jpeg,
            Some(page.jpeg_quality_percent()),
        ),
    };

    Page::CaptureScreenshot {
        format: Some(image_format),
        quality,
        clip: Some(Page::Viewport {
            x: 0.0,
            y: 0.0,
            width: capture.width,
            height: capture.height,
            scale: page.raster_scale,
        }),
        from_surface: Some(true),
        capture_beyond_viewport: Some(true),
        optimize_for_speed: None,
    }
}

fn capture_region(tab: &Tab, request: Page::CaptureScreenshot) -> Result<Vec<u8>> {
    let data = tab
        .call_method(request)
        .map_err(|e| Error::Export(format!("Failed to capture document: {}", e)))?
        .data;

    STANDARD
        .decode(data)
        .map_err(|e| Error::Export(format!("Failed to decode capture: {}", e)))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
