//! User settings and preferences for Markpress
//!
//! This module defines the `Settings` struct that holds all user-configurable
//! options, with serde support for reading them from JSON.

use serde::{Deserialize, Serialize};

use crate::browser::BrowserSettings;
use crate::export::ExportSettings;
use crate::markdown::CodeHighlight;

// ─────────────────────────────────────────────────────────────────────────────
// Theme Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Available color themes for the application shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    /// Follow the operating system preference
    System,
}

impl Theme {
    /// Get the display label for this theme.
    pub fn label(&self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
            Theme::System => "System",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Window Size Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Initial window dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSize {
    /// Window width in pixels
    pub width: f32,
    /// Window height in pixels
    pub height: f32,
    /// Start maximized
    pub maximized: bool,
}

impl Default for WindowSize {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 820.0,
            maximized: false,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Settings
// ─────────────────────────────────────────────────────────────────────────────

/// User settings for the application.
///
/// Read from JSON in the user's config directory at startup. All fields have
/// sensible defaults via the `Default` trait and `#[serde(default)]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // ─────────────────────────────────────────────────────────────────────────
    // Appearance
    // ─────────────────────────────────────────────────────────────────────────
    /// Color theme (light, dark, or system)
    pub theme: Theme,

    /// Initial window size
    pub window_size: WindowSize,

    /// Font size for the source editors (in points)
    pub font_size: f32,

    // ─────────────────────────────────────────────────────────────────────────
    // Rendering
    // ─────────────────────────────────────────────────────────────────────────
    /// Hook decoration inside code blocks
    pub code_highlight: CodeHighlight,

    // ─────────────────────────────────────────────────────────────────────────
    // Export and Browser
    // ─────────────────────────────────────────────────────────────────────────
    /// Export file names, delivery, and page geometry
    pub export: ExportSettings,

    /// Chrome launch settings for preview and export
    pub browser: BrowserSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            window_size: WindowSize::default(),
            font_size: 14.0,
            code_highlight: CodeHighlight::Off,
            export: ExportSettings::default(),
            browser: BrowserSettings::default(),
        }
    }
}

impl Settings {
    /// Minimum allowed font size.
    pub const MIN_FONT_SIZE: f32 = 8.0;
    /// Maximum allowed font size.
    pub const MAX_FONT_SIZE: f32 = 32.0;
    /// Minimum window dimension.
    pub const MIN_WINDOW_SIZE: f32 = 400.0;
    /// Maximum window dimension.
    pub const MAX_WINDOW_SIZE: f32 = 10000.0;

    /// Sanitize settings by clamping values to valid ranges.
    ///
    /// The config file is edited by hand, so anything may be in it.
    pub fn sanitize(&mut self) {
        if !self.font_size.is_finite() {
            self.font_size = 14.0;
        }
        self.font_size = self
            .font_size
            .clamp(Self::MIN_FONT_SIZE, Self::MAX_FONT_SIZE);

        self.window_size.width = self
            .window_size
            .width
            .clamp(Self::MIN_WINDOW_SIZE, Self::MAX_WINDOW_SIZE);
        self.window_size.height = self
            .window_size
            .height
            .clamp(Self::MIN_WINDOW_SIZE, Self::MAX_WINDOW_SIZE);

        self.export.sanitize();
        self.browser.sanitize();
    }

    /// Load settings and sanitize them to ensure validity.
    pub fn from_json_sanitized(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::DeliveryMode;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.theme, Theme::Light);
        assert_eq!(settings.font_size, 14.0);
        assert_eq!(settings.code_highlight, CodeHighlight::Off);
        assert_eq!(settings.export.file_name, "markdown-document.pdf");
        assert!(settings.browser.sandbox);
    }

    #[test]
    fn test_theme_serialization() {
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
        let theme: Theme = serde_json::from_str("\"system\"").unwrap();
        assert_eq!(theme, Theme::System);
    }

    #[test]
    fn test_theme_labels() {
        assert_eq!(Theme::Light.label(), "Light");
        assert_eq!(Theme::System.label(), "System");
        assert_eq!(Theme::Dark.label(), "Dark");
    }

    #[test]
    fn test_settings_deserialize_empty_json() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_settings_deserialize_nested_partial() {
        let json = r#"{
            "code_highlight": "hooks",
            "export": { "default_delivery": "download", "page": { "margins_mm": { "top": 10 } } },
            "browser": { "chrome_path": "/usr/bin/chromium" }
        }"#;
        let settings: Settings = serde_json::from_str(json).unwrap();

        assert_eq!(settings.code_highlight, CodeHighlight::Hooks);
        assert_eq!(settings.export.default_delivery, DeliveryMode::Download);
        assert_eq!(settings.export.page.margins_mm.top, 10.0);
        assert_eq!(settings.export.page.margins_mm.left, 20.0);
        assert_eq!(settings.export.file_name, "markdown-document.pdf");
        assert_eq!(
            settings.browser.chrome_path.as_deref(),
            Some(std::path::Path::new("/usr/bin/chromium"))
        );
        assert!(settings.browser.sandbox);
    }

    #[test]
    fn test_settings_serialization_roundtrip() {
        let original = Settings {
            theme: Theme::Dark,
            font_size: 18.0,
            ..Settings::default()
        };
        let json = serde_json::to_string(&original).unwrap();
        let deserialized: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_window_size_default() {
        let size = WindowSize::default();
        assert_eq!(size.width, 1280.0);
        assert_eq!(size.height, 820.0);
        assert!(!size.maximized);
    }

    #[test]
    fn test_sanitize_font_size() {
        let mut settings = Settings {
            font_size: 2.0,
            ..Settings::default()
        };
        settings.sanitize();
        assert_eq!(settings.font_size, Settings::MIN_FONT_SIZE);

        settings.font_size = f32::NAN;
        settings.sanitize();
        assert_eq!(settings.font_size, 14.0);
    }

    #[test]
    fn test_sanitize_window_size() {
        let mut settings = Settings::default();
        settings.window_size.width = 50.0;
        settings.window_size.height = 50_000.0;
        settings.sanitize();

        assert_eq!(settings.window_size.width, Settings::MIN_WINDOW_SIZE);
        assert_eq!(settings.window_size.height, Settings::MAX_WINDOW_SIZE);
    }

    #[test]
    fn test_sanitize_nested_sections() {
        let mut settings = Settings::default();
        settings.export.file_name = String::new();
        settings.browser.render_wait_ms = 1_000_000;
        settings.sanitize();

        assert_eq!(settings.export.file_name, "markdown-document.pdf");
        assert_eq!(
            settings.browser.render_wait_ms,
            BrowserSettings::MAX_RENDER_WAIT_MS
        );
    }

    #[test]
    fn test_from_json_sanitized() {
        let settings = Settings::from_json_sanitized(r#"{"font_size": 100}"#).unwrap();
        assert_eq!(settings.font_size, Settings::MAX_FONT_SIZE);
    }

    #[test]
    fn test_from_json_sanitized_invalid() {
        assert!(Settings::from_json_sanitized("{ not json").is_err());
    }
}
