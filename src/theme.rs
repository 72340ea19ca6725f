//! Theme handling for the Markpress shell
//!
//! Resolves the configured `Theme` (including "follow the system") to egui
//! `Visuals` and applies them only when the effective theme changes.

use eframe::egui::{self, Color32, Context, Rounding, Stroke, Visuals};
use log::{debug, info};

use crate::config::Theme;

// ─────────────────────────────────────────────────────────────────────────────
// Palette
// ─────────────────────────────────────────────────────────────────────────────

/// Colors used by the shell on top of egui's defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Color32,
    pub panel: Color32,
    pub border: Color32,
    pub accent: Color32,
    pub code_background: Color32,
    pub muted_text: Color32,
}

impl Palette {
    pub fn light() -> Self {
        Self {
            background: Color32::from_rgb(255, 255, 255),
            panel: Color32::from_rgb(246, 248, 250),
            border: Color32::from_rgb(208, 215, 222),
            accent: Color32::from_rgb(9, 105, 218),
            code_background: Color32::from_rgb(246, 248, 250),
            muted_text: Color32::from_rgb(101, 109, 118),
        }
    }

    pub fn dark() -> Self {
        Self {
            background: Color32::from_rgb(13, 17, 23),
            panel: Color32::from_rgb(22, 27, 34),
            border: Color32::from_rgb(48, 54, 61),
            accent: Color32::from_rgb(88, 166, 255),
            code_background: Color32::from_rgb(22, 27, 34),
            muted_text: Color32::from_rgb(139, 148, 158),
        }
    }

    pub fn for_mode(dark: bool) -> Self {
        if dark {
            Self::dark()
        } else {
            Self::light()
        }
    }
}

/// Build egui visuals for a light or dark shell.
pub fn create_visuals(dark: bool) -> Visuals {
    let palette = Palette::for_mode(dark);
    let mut visuals = if dark {
        Visuals::dark()
    } else {
        Visuals::light()
    };

    visuals.panel_fill = palette.panel;
    visuals.window_fill = palette.background;
    visuals.extreme_bg_color = palette.background;
    visuals.code_bg_color = palette.code_background;
    visuals.hyperlink_color = palette.accent;

    visuals.selection.stroke = Stroke::new(1.0, palette.accent);
    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, palette.border);
    visuals.widgets.inactive.rounding = Rounding::same(4.0);
    visuals.widgets.hovered.rounding = Rounding::same(4.0);
    visuals.widgets.active.rounding = Rounding::same(4.0);
    visuals.window_rounding = Rounding::same(6.0);

    visuals
}

// ─────────────────────────────────────────────────────────────────────────────
// Theme Manager
// ─────────────────────────────────────────────────────────────────────────────

/// Tracks the configured theme and applies it to the egui context.
#[derive(Debug, Clone)]
pub struct ThemeManager {
    current_theme: Theme,
    /// Dark flag of the visuals last applied, `None` before the first frame
    applied_dark: Option<bool>,
}

impl ThemeManager {
    pub fn new(theme: Theme) -> Self {
        info!("ThemeManager initialized with theme: {:?}", theme);
        Self {
            current_theme: theme,
            applied_dark: None,
        }
    }

    pub fn current_theme(&self) -> Theme {
        self.current_theme
    }

    /// Switch theme. Takes effect on the next `apply_if_needed`.
    pub fn set_theme(&mut self, theme: Theme) {
        if self.current_theme != theme {
            info!("Theme changed from {:?} to {:?}", self.current_theme, theme);
            self.current_theme = theme;
            self.applied_dark = None;
        }
    }

    /// Cycle Light -> Dark -> System -> Light.
    pub fn cycle(&mut self) -> Theme {
        let next = match self.current_theme {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::System,
            Theme::System => Theme::Light,
        };
        self.set_theme(next);
        next
    }

    /// Whether the effective theme is dark, given the system preference.
    pub fn resolve_dark(&self, system_dark: Option<bool>) -> bool {
        match self.current_theme {
            Theme::Light => false,
            Theme::Dark => true,
            Theme::System => system_dark.unwrap_or(false),
        }
    }

    /// Apply visuals if the effective theme changed since the last call,
    /// or if something else replaced the context visuals.
    ///
    /// Returns `true` if visuals were applied.
    pub fn apply_if_needed(&mut self, ctx: &Context, system_dark: Option<bool>) -> bool {
        let dark = self.resolve_dark(system_dark);
        if self.applied_dark == Some(dark) && ctx.style().visuals.dark_mode == dark {
            return false;
        }

        ctx.set_visuals(create_visuals(dark));
        self.applied_dark = Some(dark);
        debug!("Applied theme: {:?} (dark: {})", self.current_theme, dark);
        true
    }

    /// Palette for the theme last applied.
    pub fn palette(&self) -> Palette {
        Palette::for_mode(self.applied_dark.unwrap_or(false))
    }
}

impl Default for ThemeManager {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

/// Dark flag of the operating system theme, if eframe knows it.
pub fn system_dark_mode(frame: &eframe::Frame) -> Option<bool> {
    frame
        .info()
        .system_theme
        .map(|theme| theme == eframe::Theme::Dark)
}

/// Monospace font sized for the source views.
pub fn code_font(size: f32) -> egui::FontId {
    egui::FontId::monospace(size)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_dark() {
        assert!(!ThemeManager::new(Theme::Light).resolve_dark(Some(true)));
        assert!(ThemeManager::new(Theme::Dark).resolve_dark(Some(false)));
        assert!(ThemeManager::new(Theme::System).resolve_dark(Some(true)));
        assert!(!ThemeManager::new(Theme::System).resolve_dark(None));
    }

    #[test]
    fn test_cycle() {
        let mut manager = ThemeManager::new(Theme::Light);
        assert_eq!(manager.cycle(), Theme::Dark);
        assert_eq!(manager.cycle(), Theme::System);
        assert_eq!(manager.cycle(), Theme::Light);
    }

    #[test]
    fn test_apply_only_on_change() {
        let ctx = Context::default();
        let mut manager = ThemeManager::new(Theme::System);

        assert!(manager.apply_if_needed(&ctx, Some(false)));
        assert!(!manager.apply_if_needed(&ctx, Some(false)));
        assert!(manager.apply_if_needed(&ctx, Some(true)));
        assert!(ctx.style().visuals.dark_mode);
    }

    #[test]
    fn test_set_theme_forces_apply() {
        let ctx = Context::default();
        let mut manager = ThemeManager::new(Theme::Light);
        manager.apply_if_needed(&ctx, None);

        manager.set_theme(Theme::Dark);
        assert!(manager.apply_if_needed(&ctx, None));
        assert_eq!(manager.palette(), Palette::dark());
    }

    #[test]
    fn test_reapply_after_external_change() {
        let ctx = Context::default();
        let mut manager = ThemeManager::new(Theme::Dark);
        assert!(manager.apply_if_needed(&ctx, None));

        ctx.set_visuals(Visuals::light());
        assert!(manager.apply_if_needed(&ctx, None));
        assert!(ctx.style().visuals.dark_mode);
    }

    #[test]
    fn test_create_visuals_mode() {
        assert!(create_visuals(true).dark_mode);
        assert!(!create_visuals(false).dark_mode);
    }
}
