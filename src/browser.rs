//! Chrome/Chromium process management
//!
//! Both the live preview window and the exporter drive a local Chrome or
//! Chromium through `headless_chrome`. This module holds the user-facing
//! browser settings and the shared launch logic.

use headless_chrome::{Browser, LaunchOptions};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Error, Result};

/// Upper bound on a silent browser during a single export.
const EXPORT_IDLE_TIMEOUT: Duration = Duration::from_secs(60);

/// Keeps the live preview window open while the user is idle.
const PREVIEW_IDLE_TIMEOUT: Duration = Duration::from_secs(60 * 60 * 24);

/// Browser launch settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserSettings {
    /// Explicit Chrome/Chromium executable. Auto-detected when `None`.
    pub chrome_path: Option<PathBuf>,
    /// Run Chrome with its sandbox enabled
    pub sandbox: bool,
    /// Time to let fonts and images settle before measuring or printing
    pub render_wait_ms: u64,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            chrome_path: None,
            sandbox: true,
            render_wait_ms: 500,
        }
    }
}

impl BrowserSettings {
    pub const MAX_RENDER_WAIT_MS: u64 = 10_000;

    pub fn render_wait(&self) -> Duration {
        Duration::from_millis(self.render_wait_ms)
    }

    /// Clamp values to valid ranges.
    pub fn sanitize(&mut self) {
        self.render_wait_ms = self.render_wait_ms.min(Self::MAX_RENDER_WAIT_MS);
    }
}

/// How the browser window should appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserMode {
    /// Off-screen, closed after the job finishes
    Headless,
    /// Visible window kept open for the live preview
    Windowed,
}

/// Launch a browser process.
///
/// `window_size` is the initial viewport in CSS pixels.
pub fn launch_browser(
    settings: &BrowserSettings,
    mode: BrowserMode,
    window_size: (u32, u32),
) -> Result<Browser> {
    let idle_timeout = match mode {
        BrowserMode::Headless => EXPORT_IDLE_TIMEOUT,
        BrowserMode::Windowed => PREVIEW_IDLE_TIMEOUT,
    };

    let options = LaunchOptions::default_builder()
        .headless(mode == BrowserMode::Headless)
        .sandbox(settings.sandbox)
        .path(settings.chrome_path.clone())
        .window_size(Some(window_size))
        .idle_browser_timeout(idle_timeout)
        .build()
        .map_err(|e| Error::Browser(format!("Failed to build launch options: {}", e)))?;

    debug!(
        "Launching browser ({:?}, {}x{})",
        mode, window_size.0, window_size.1
    );

    let browser = Browser::new(options)
        .map_err(|e| Error::Browser(format!("Failed to launch browser: {}", e)))?;

    info!("Browser launched ({:?})", mode);
    Ok(browser)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = BrowserSettings::default();
        assert!(settings.chrome_path.is_none());
        assert!(settings.sandbox);
        assert_eq!(settings.render_wait(), Duration::from_millis(500));
    }

    #[test]
    fn test_sanitize_clamps_wait() {
        let mut settings = BrowserSettings {
            render_wait_ms: 1_000_000,
            ..BrowserSettings::default()
        };
        settings.sanitize();
        assert_eq!(settings.render_wait_ms, BrowserSettings::MAX_RENDER_WAIT_MS);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: BrowserSettings =
            serde_json::from_str(r#"{"chrome_path": "/usr/bin/chromium"}"#).unwrap();
        assert_eq!(settings.chrome_path, Some(PathBuf::from("/usr/bin/chromium")));
        assert!(settings.sandbox);
    }
}
