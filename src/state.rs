//! Application state management for Markpress
//!
//! This module defines the central `AppState` struct that owns the editing
//! session, the settings, the export runner, the live preview surface, and
//! the UI state.

use crate::browser::BrowserSettings;
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::export::{
    ChromeEngine, Delivery, DeliveryMode, ExportController, ExportFormat, ExportJob, PdfEngine,
};
use crate::files::dialogs::save_export_dialog;
use crate::preview::{BrowserPreview, PreviewSurface};
use crate::session::Session;
use log::{debug, error, info, warn};
use std::sync::Arc;

/// How long success toasts stay on screen, in seconds.
const TOAST_DURATION: f64 = 3.0;

// ─────────────────────────────────────────────────────────────────────────────
// UI State
// ─────────────────────────────────────────────────────────────────────────────

/// Source view shown in the central panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    /// Rendered HTML with the injected classes
    #[default]
    Html,
    /// Baseline plus user CSS, as applied to the preview
    Stylesheet,
}

impl ActiveView {
    /// Get the display label for this view.
    pub fn label(&self) -> &'static str {
        match self {
            ActiveView::Html => "Rendered HTML",
            ActiveView::Stylesheet => "Composed Stylesheet",
        }
    }

    /// All views, in tab order.
    pub fn all() -> &'static [ActiveView] {
        &[ActiveView::Html, ActiveView::Stylesheet]
    }
}

/// UI-related state flags.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Whether to show error modal
    pub show_error_modal: bool,
    /// Error message for modal
    pub error_message: String,
    /// Temporary toast message
    pub toast_message: Option<String>,
    /// When the toast message should expire (as seconds since app start)
    pub toast_expires_at: Option<f64>,
    /// Source view in the central panel
    pub active_view: ActiveView,
    /// Whether the class reference panel is open
    pub show_class_reference: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// Application State
// ─────────────────────────────────────────────────────────────────────────────

/// Central application state struct.
///
/// # Example
///
/// ```ignore
/// let mut state = AppState::new(load_config());
/// state.session.set_markdown("# Hello");
/// state.start_export(ExportFormat::Pdf, Delivery::download("hello.pdf"));
/// ```
pub struct AppState {
    /// User settings (read from config)
    pub settings: Settings,
    /// Markdown, CSS and rendered HTML
    pub session: Session,
    /// UI-related state
    pub ui: UiState,
    /// Single-flight export runner
    exports: ExportController,
    /// Composes export bytes
    engine: Arc<dyn PdfEngine>,
    /// Live preview window, when open
    preview: Option<Box<dyn PreviewSurface>>,
}

impl AppState {
    /// Create the application state for the given settings.
    pub fn new(settings: Settings) -> Self {
        let engine = Arc::new(ChromeEngine::new(settings.browser.clone()));
        let session = Session::new(settings.code_highlight);
        Self::with_parts(settings, session, engine)
    }

    /// Create the application state from explicit parts.
    pub fn with_parts(settings: Settings, session: Session, engine: Arc<dyn PdfEngine>) -> Self {
        info!("AppState initialized with settings");
        debug!(
            "Theme: {:?}, code highlight: {:?}",
            settings.theme, settings.code_highlight
        );

        Self {
            settings,
            session,
            ui: UiState::default(),
            exports: ExportController::new(),
            engine,
            preview: None,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Export
    // ─────────────────────────────────────────────────────────────────────────

    /// Whether an export is in flight.
    pub fn is_exporting(&self) -> bool {
        self.exports.is_busy()
    }

    /// Format of the export in flight, if any.
    pub fn exporting_format(&self) -> Option<ExportFormat> {
        self.exports.busy_format()
    }

    /// Start an export, asking for a location first in save mode.
    ///
    /// Returns `true` if an export was started.
    pub fn request_export(&mut self, format: ExportFormat, mode: DeliveryMode) -> bool {
        if self.is_exporting() {
            warn!("Export already in progress, ignoring {} request", format.label());
            return false;
        }

        let file_name = self.settings.export.file_name_for(format).to_string();
        let delivery = match mode {
            DeliveryMode::Save => match save_export_dialog(format, &file_name) {
                Some(path) => Delivery::Save(path),
                None => {
                    debug!("Save dialog cancelled");
                    return false;
                }
            },
            DeliveryMode::Download => Delivery::download(file_name),
        };

        self.start_export(format, delivery)
    }

    /// Start an export to a resolved delivery target.
    ///
    /// The document is snapshotted now; edits made while the export runs do
    /// not affect it. Returns `true` if an export was started.
    pub fn start_export(&mut self, format: ExportFormat, delivery: Delivery) -> bool {
        let mode = delivery.mode();
        let open_when_done = self.settings.export.open_after_export
            && matches!(delivery, Delivery::Download { .. });
        let job = ExportJob {
            document: self.session.snapshot(),
            format,
            page: self.settings.export.page.clone(),
            delivery,
            open_when_done,
        };

        match self.exports.request(Arc::clone(&self.engine), job) {
            Ok(()) => {
                info!("Exporting {}", format.label());
                true
            }
            Err(Error::ExportBusy) => {
                warn!("Export already in progress, ignoring {} request", format.label());
                false
            }
            Err(e) => {
                self.report_export_failure(format, mode, &e);
                false
            }
        }
    }

    /// Collect a finished export and report it.
    ///
    /// Call this each frame with the current time.
    pub fn poll_exports(&mut self, current_time: f64) {
        let Some(outcome) = self.exports.poll() else {
            return;
        };

        match outcome.result {
            Ok(path) => {
                info!("Exported {} to {}", outcome.format.label(), path.display());
                self.show_toast(
                    format!("Saved: {}", path.display()),
                    current_time,
                    TOAST_DURATION,
                );
            }
            Err(e) => self.report_export_failure(outcome.format, outcome.mode, &e),
        }
    }

    fn report_export_failure(&mut self, format: ExportFormat, mode: DeliveryMode, err: &Error) {
        let action = match mode {
            DeliveryMode::Save => "generating",
            DeliveryMode::Download => "downloading",
        };
        error!("Error {} {}: {}", action, format.label(), err);
        self.show_error(format!(
            "Error {} {}. Please try again.\n\n{}",
            action,
            format.label(),
            err
        ));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Live Preview
    // ─────────────────────────────────────────────────────────────────────────

    /// Whether the live preview window is open.
    pub fn has_live_preview(&self) -> bool {
        self.preview.is_some()
    }

    /// Launch the live preview window and show the current document.
    pub fn open_live_preview(&mut self, browser: &BrowserSettings) -> Result<()> {
        let surface = BrowserPreview::open(browser)?;
        self.attach_preview(Box::new(surface))
    }

    /// Use `surface` as the live preview and show the current document.
    pub fn attach_preview(&mut self, mut surface: Box<dyn PreviewSurface>) -> Result<()> {
        surface.show(&self.session.snapshot(), self.session.revision())?;
        self.preview = Some(surface);
        info!("Live preview opened");
        Ok(())
    }

    /// Close the live preview window.
    pub fn close_live_preview(&mut self) {
        if self.preview.take().is_some() {
            info!("Live preview closed");
        }
    }

    /// Push the current document to the live preview if it is behind.
    ///
    /// Returns `false` if the preview stopped responding and was closed.
    pub fn refresh_preview(&mut self) -> bool {
        let revision = self.session.revision();
        let Some(surface) = self.preview.as_mut() else {
            return true;
        };
        if !surface.is_stale(revision) {
            return true;
        }

        match surface.show(&self.session.snapshot(), revision) {
            Ok(()) => true,
            Err(e) => {
                warn!("Live preview stopped responding: {}", e);
                self.preview = None;
                false
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // UI State Helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Toggle the class reference panel.
    pub fn toggle_class_reference(&mut self) {
        self.ui.show_class_reference = !self.ui.show_class_reference;
    }

    /// Show an error in a modal dialog.
    pub fn show_error(&mut self, message: impl Into<String>) {
        self.ui.error_message = message.into();
        self.ui.show_error_modal = true;
    }

    /// Dismiss the error modal.
    pub fn dismiss_error(&mut self) {
        self.ui.show_error_modal = false;
        self.ui.error_message.clear();
    }

    /// Show a temporary toast message (disappears after duration).
    ///
    /// `current_time` should be the current app time in seconds.
    /// `duration` is how long to show the message in seconds.
    pub fn show_toast(&mut self, message: impl Into<String>, current_time: f64, duration: f64) {
        self.ui.toast_message = Some(message.into());
        self.ui.toast_expires_at = Some(current_time + duration);
    }

    /// Update toast state - clears expired toasts.
    ///
    /// Call this each frame with the current time.
    pub fn update_toast(&mut self, current_time: f64) {
        if let Some(expires_at) = self.ui.toast_expires_at {
            if current_time >= expires_at {
                self.ui.toast_message = None;
                self.ui.toast_expires_at = None;
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
