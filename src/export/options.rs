//! Export Options and Configuration
//!
//! This module defines the export formats, delivery modes, and page geometry
//! used when turning the styled document into a PDF or snapshot.

use serde::{Deserialize, Serialize};

/// PDF points per inch.
pub const POINTS_PER_INCH: f64 = 72.0;

/// Millimetres per inch.
pub const MM_PER_INCH: f64 = 25.4;

/// Convert millimetres to inches.
pub fn mm_to_in(mm: f64) -> f64 {
    mm / MM_PER_INCH
}

/// Convert millimetres to PDF points.
pub fn mm_to_pt(mm: f64) -> f64 {
    mm_to_in(mm) * POINTS_PER_INCH
}

// ─────────────────────────────────────────────────────────────────────────────
// Export Format
// ─────────────────────────────────────────────────────────────────────────────

/// Supported export outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Paginated PDF document
    #[default]
    Pdf,
    /// Single raster snapshot of the whole document
    Jpeg,
}

impl ExportFormat {
    /// Get the display label for this format.
    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "PDF",
            ExportFormat::Jpeg => "JPEG Snapshot",
        }
    }

    /// Get the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Jpeg => "jpg",
        }
    }

    /// Name of the save dialog filter.
    pub fn filter_name(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "PDF Documents",
            ExportFormat::Jpeg => "JPEG Images",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Delivery Mode
// ─────────────────────────────────────────────────────────────────────────────

/// How the exported bytes reach the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMode {
    /// Ask for a location with the native save dialog
    #[default]
    Save,
    /// Drop the file into the downloads folder
    Download,
}

impl DeliveryMode {
    /// Get the display label for this mode.
    pub fn label(&self) -> &'static str {
        match self {
            DeliveryMode::Save => "Generate PDF",
            DeliveryMode::Download => "Download PDF",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Page Geometry
// ─────────────────────────────────────────────────────────────────────────────

/// Paper sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    #[default]
    A4,
    Letter,
}

impl PageSize {
    /// Portrait width and height in millimetres.
    pub fn dimensions_mm(&self) -> (f64, f64) {
        match self {
            PageSize::A4 => (210.0, 297.0),
            PageSize::Letter => (215.9, 279.4),
        }
    }
}

/// Page orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// Page margins in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margins {
    pub fn uniform(mm: f64) -> Self {
        Self {
            top: mm,
            right: mm,
            bottom: mm,
            left: mm,
        }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(20.0)
    }
}

/// Region of the laid-out page captured for a snapshot, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureBox {
    pub width: f64,
    pub height: f64,
}

/// Page and capture settings for an export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageOptions {
    pub page_size: PageSize,
    pub orientation: Orientation,
    pub margins_mm: Margins,
    /// Layout width of the captured document
    pub capture_width_px: u32,
    /// Extra height added below the measured content
    pub capture_padding_px: u32,
    /// Device pixel ratio for raster output
    pub raster_scale: f64,
    /// JPEG quality in 0.0..=1.0
    pub jpeg_quality: f64,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            page_size: PageSize::A4,
            orientation: Orientation::Portrait,
            margins_mm: Margins::default(),
            capture_width_px: 800,
            capture_padding_px: 100,
            raster_scale: 2.0,
            jpeg_quality: 0.98,
        }
    }
}

impl PageOptions {
    pub const MAX_MARGIN_MM: f64 = 80.0;
    pub const MIN_CAPTURE_WIDTH: u32 = 320;
    pub const MAX_CAPTURE_WIDTH: u32 = 4000;
    pub const MIN_RASTER_SCALE: f64 = 1.0;
    pub const MAX_RASTER_SCALE: f64 = 4.0;

    /// Paper width and height in millimetres, after orientation.
    pub fn paper_size_mm(&self) -> (f64, f64) {
        let (w, h) = self.page_size.dimensions_mm();
        match self.orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }

    /// Capture region for content of the given scroll height.
    pub fn capture_box(&self, content_height_px: f64) -> CaptureBox {
        CaptureBox {
            width: f64::from(self.capture_width_px),
            height: content_height_px.max(0.0) + f64::from(self.capture_padding_px),
        }
    }

    /// JPEG quality as the 0-100 integer Chrome expects.
    pub fn jpeg_quality_percent(&self) -> u32 {
        (self.jpeg_quality * 100.0).round().clamp(0.0, 100.0) as u32
    }

    /// Clamp values to valid ranges.
    pub fn sanitize(&mut self) {
        let clamp_margin = |mm: f64| {
            if mm.is_finite() {
                mm.clamp(0.0, Self::MAX_MARGIN_MM)
            } else {
                20.0
            }
        };
        self.margins_mm = Margins {
            top: clamp_margin(self.margins_mm.top),
            right: clamp_margin(self.margins_mm.right),
            bottom: clamp_margin(self.margins_mm.bottom),
            left: clamp_margin(self.margins_mm.left),
        };

        self.capture_width_px = self
            .capture_width_px
            .clamp(Self::MIN_CAPTURE_WIDTH, Self::MAX_CAPTURE_WIDTH);

        if !self.raster_scale.is_finite() {
            self.raster_scale = 2.0;
        }
        self.raster_scale = self
            .raster_scale
            .clamp(Self::MIN_RASTER_SCALE, Self::MAX_RASTER_SCALE);

        if !self.jpeg_quality.is_finite() {
            self.jpeg_quality = 0.98;
        }
        self.jpeg_quality = self.jpeg_quality.clamp(0.0, 1.0);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Export Settings
// ─────────────────────────────────────────────────────────────────────────────

/// Export settings read from the user configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Fixed name of the exported PDF
    pub file_name: String,
    /// Fixed name of the exported snapshot
    pub snapshot_file_name: String,
    /// Delivery used by the keyboard shortcut
    pub default_delivery: DeliveryMode,
    /// Open downloaded files with the system handler
    pub open_after_export: bool,
    /// Page geometry
    pub page: PageOptions,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            file_name: "markdown-document.pdf".to_string(),
            snapshot_file_name: "markdown-document.jpg".to_string(),
            default_delivery: DeliveryMode::Save,
            open_after_export: false,
            page: PageOptions::default(),
        }
    }
}

impl ExportSettings {
    /// The configured output file name for a format.
    pub fn file_name_for(&self, format: ExportFormat) -> &str {
        match format {
            ExportFormat::Pdf => &self.file_name,
            ExportFormat::Jpeg => &self.snapshot_file_name,
        }
    }

    /// Clamp values to valid ranges and restore empty names.
    pub fn sanitize(&mut self) {
        let defaults = Self::default();
        if self.file_name.trim().is_empty() {
            self.file_name = defaults.file_name;
        }
        if self.snapshot_file_name.trim().is_empty() {
            self.snapshot_file_name = defaults.snapshot_file_name;
        }
        self.page.sanitize();
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
