//! Main application module for Markpress
//!
//! This module implements the eframe App trait for the main application,
//! handling the window layout, UI updates, and event processing.

use crate::config::{Settings, Theme};
use crate::export::{
    copy_document_to_clipboard, copy_text_to_clipboard, DeliveryMode, ExportFormat,
};
use crate::markdown::{
    CodeHighlight, BODY_CLASS, HEADER_CLASS, HIGHLIGHT_CLASS, LIST_CLASS, PARAGRAPH_CLASS,
};
use crate::preview::open_in_browser;
use crate::state::{ActiveView, AppState};
use crate::theme::{code_font, system_dark_mode, ThemeManager};
use eframe::egui;
use log::{debug, info, warn};
use std::time::Duration;

/// Application name shown in the header and window title.
pub const APP_NAME: &str = "Markpress";

/// Repaint interval while waiting on a background export.
const EXPORT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Semantic classes listed in the reference panel.
const CLASS_REFERENCE: &[(&str, &str)] = &[
    (BODY_CLASS, "Main container"),
    (HEADER_CLASS, "All headings (h1-h6)"),
    (PARAGRAPH_CLASS, "Paragraph text"),
    (LIST_CLASS, "Ordered & unordered lists"),
    (HIGHLIGHT_CLASS, "Hook names in code blocks"),
];

/// User actions collected while drawing and executed afterwards.
///
/// Deferring them avoids borrowing `self` mutably inside panel closures.
#[derive(Debug, Clone, Copy, PartialEq)]
enum UiAction {
    /// Export in the given format and delivery mode
    Export(ExportFormat, DeliveryMode),
    /// Open or close the live preview window
    ToggleLivePreview,
    /// Open the styled page in the system browser
    OpenInBrowser,
    /// Copy the styled page to the clipboard
    CopyHtml,
    /// Copy the text of the active output view
    CopySource,
    /// Switch to the next theme
    CycleTheme,
    /// Change the code decoration policy
    SetHighlight(CodeHighlight),
    /// Show or hide the class reference panel
    ToggleClassReference,
}

/// The main application struct that holds all state and implements eframe::App.
pub struct MarkpressApp {
    /// Central application state
    state: AppState,
    /// Theme manager for handling theme switching
    theme_manager: ThemeManager,
    /// Application start time for timing toast messages
    start_time: std::time::Instant,
}

impl MarkpressApp {
    /// Create a new MarkpressApp instance from loaded settings.
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings) -> Self {
        info!("Initializing {}", APP_NAME);

        let mut theme_manager = ThemeManager::new(settings.theme);
        let system_dark = cc
            .integration_info
            .system_theme
            .map(|theme| theme == eframe::Theme::Dark);
        theme_manager.apply_if_needed(&cc.egui_ctx, system_dark);

        Self {
            state: AppState::new(settings),
            theme_manager,
            start_time: std::time::Instant::now(),
        }
    }

    /// Get elapsed time since app start in seconds.
    fn get_app_time(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Layout
    // ─────────────────────────────────────────────────────────────────────────

    /// Render the main UI content and return the action requested, if any.
    fn render_ui(&mut self, ctx: &egui::Context) -> Option<UiAction> {
        let mut action = None;

        self.render_header(ctx, &mut action);
        self.render_status_bar(ctx);
        if self.state.ui.show_class_reference {
            self.render_class_reference(ctx);
        }
        self.render_sources(ctx);
        self.render_output(ctx, &mut action);

        action
    }

    fn render_header(&mut self, ctx: &egui::Context, action: &mut Option<UiAction>) {
        let exporting = self.state.exporting_format();
        let palette = self.theme_manager.palette();

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.heading("Markdown to PDF");
                ui.label(
                    egui::RichText::new("Convert your Markdown with elegant styling")
                        .color(palette.muted_text),
                );

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    for (format, mode) in [
                        (ExportFormat::Jpeg, DeliveryMode::Download),
                        (ExportFormat::Pdf, DeliveryMode::Download),
                        (ExportFormat::Pdf, DeliveryMode::Save),
                    ] {
                        let label = match (format, mode) {
                            (ExportFormat::Jpeg, _) => "Snapshot",
                            (ExportFormat::Pdf, mode) => mode.label(),
                        };
                        let text = if exporting == Some(format) {
                            "Generating..."
                        } else {
                            label
                        };

                        let button = ui.add_enabled(exporting.is_none(), egui::Button::new(text));
                        if button.clicked() {
                            *action = Some(UiAction::Export(format, mode));
                        }
                    }

                    if exporting.is_some() {
                        ui.spinner();
                    }
                });
            });
            ui.add_space(6.0);
        });
    }

    fn render_status_bar(&mut self, ctx: &egui::Context) {
        let revision = self.state.session.revision();
        let live = self.state.has_live_preview();

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if let Some(toast) = &self.state.ui.toast_message {
                    ui.label(egui::RichText::new(toast).italics());
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("html r{} · css r{}", revision.html, revision.css));
                    ui.separator();
                    ui.label(if live {
                        "Live preview: on"
                    } else {
                        "Live preview: off"
                    });
                });
            });
        });
    }

    fn render_class_reference(&mut self, ctx: &egui::Context) {
        let palette = self.theme_manager.palette();

        egui::TopBottomPanel::bottom("class_reference")
            .resizable(false)
            .show(ctx, |ui| {
                ui.add_space(4.0);
                ui.strong("Available CSS Classes");
                ui.horizontal_wrapped(|ui| {
                    for (class, description) in CLASS_REFERENCE {
                        ui.vertical(|ui| {
                            ui.code(format!(".{}", class));
                            ui.label(egui::RichText::new(*description).color(palette.muted_text));
                        });
                        ui.add_space(16.0);
                    }
                });
                ui.add_space(4.0);
            });
    }

    fn render_sources(&mut self, ctx: &egui::Context) {
        let font = code_font(self.state.settings.font_size);

        egui::SidePanel::left("sources")
            .resizable(true)
            .default_width(520.0)
            .show(ctx, |ui| {
                let editor_height = (ui.available_height() - 80.0).max(200.0);

                ui.add_space(4.0);
                ui.strong("Markdown Input");
                egui::ScrollArea::vertical()
                    .id_source("markdown_scroll")
                    .max_height(editor_height * 0.62)
                    .show(ui, |ui| {
                        self.state.session.edit_markdown(|text| {
                            ui.add(
                                egui::TextEdit::multiline(text)
                                    .font(font.clone())
                                    .hint_text("Enter your Markdown content here...")
                                    .desired_width(f32::INFINITY)
                                    .desired_rows(20),
                            )
                            .changed()
                        });
                    });

                ui.separator();
                ui.strong("Custom CSS");
                egui::ScrollArea::vertical()
                    .id_source("css_scroll")
                    .max_height(editor_height * 0.38)
                    .show(ui, |ui| {
                        self.state.session.edit_css(|text| {
                            ui.add(
                                egui::TextEdit::multiline(text)
                                    .font(font.clone())
                                    .hint_text("Add your custom CSS styles here...")
                                    .desired_width(f32::INFINITY)
                                    .desired_rows(12),
                            )
                            .changed()
                        });
                    });
            });
    }

    fn render_output(&mut self, ctx: &egui::Context, action: &mut Option<UiAction>) {
        let font = code_font(self.state.settings.font_size);
        let live = self.state.has_live_preview();
        let highlight = self.state.session.highlight();
        let theme_label = self.theme_manager.current_theme().label();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                for view in ActiveView::all() {
                    ui.selectable_value(&mut self.state.ui.active_view, *view, view.label());
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .button(format!("Theme: {}", theme_label))
                        .on_hover_text("Cycle theme (Ctrl+Shift+T)")
                        .clicked()
                    {
                        *action = Some(UiAction::CycleTheme);
                    }
                    if ui.button("Classes").clicked() {
                        *action = Some(UiAction::ToggleClassReference);
                    }
                    if ui.button("Copy HTML").clicked() {
                        *action = Some(UiAction::CopyHtml);
                    }
                    if ui
                        .button("Copy Source")
                        .on_hover_text("Copy the text shown below")
                        .clicked()
                    {
                        *action = Some(UiAction::CopySource);
                    }
                    if ui.button("Open in Browser").clicked() {
                        *action = Some(UiAction::OpenInBrowser);
                    }
                    let preview_label = if live {
                        "Close Live Preview"
                    } else {
                        "Live Preview"
                    };
                    if ui.button(preview_label).clicked() {
                        *action = Some(UiAction::ToggleLivePreview);
                    }

                    egui::ComboBox::from_id_source("code_highlight")
                        .selected_text(format!("Code: {}", highlight.label()))
                        .show_ui(ui, |ui| {
                            for option in [CodeHighlight::Off, CodeHighlight::Hooks] {
                                if ui
                                    .selectable_label(highlight == option, option.label())
                                    .clicked()
                                {
                                    *action = Some(UiAction::SetHighlight(option));
                                }
                            }
                        });
                });
            });
            ui.separator();

            let stylesheet;
            let mut source: &str = match self.state.ui.active_view {
                ActiveView::Html => self.state.session.html(),
                ActiveView::Stylesheet => {
                    stylesheet = self.state.session.stylesheet();
                    &stylesheet
                }
            };

            egui::ScrollArea::both()
                .id_source("output_scroll")
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.add(
                        egui::TextEdit::multiline(&mut source)
                            .font(font)
                            .desired_width(f32::INFINITY)
                            .code_editor(),
                    );
                });
        });
    }

    /// Show the error modal when an error is pending.
    fn render_dialogs(&mut self, ctx: &egui::Context) {
        if self.state.ui.show_error_modal {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label(egui::RichText::new("⚠").size(24.0));
                    ui.label(&self.state.ui.error_message);
                    ui.separator();
                    if ui.button("OK").clicked() {
                        self.state.dismiss_error();
                    }
                });
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Actions
    // ─────────────────────────────────────────────────────────────────────────

    fn handle_keyboard_shortcuts(&mut self, ctx: &egui::Context) {
        let action = ctx.input(|i| {
            // Ctrl+Shift+E: Export with the configured delivery
            if i.modifiers.ctrl && i.modifiers.shift && i.key_pressed(egui::Key::E) {
                debug!("Keyboard shortcut: Ctrl+Shift+E (Export)");
                return Some(UiAction::Export(
                    ExportFormat::Pdf,
                    self.state.settings.export.default_delivery,
                ));
            }

            // Ctrl+Shift+T: Cycle Theme
            if i.modifiers.ctrl && i.modifiers.shift && i.key_pressed(egui::Key::T) {
                debug!("Keyboard shortcut: Ctrl+Shift+T (Cycle Theme)");
                return Some(UiAction::CycleTheme);
            }

            None
        });

        if let Some(action) = action {
            self.handle_action(action);
        }
    }

    fn handle_action(&mut self, action: UiAction) {
        match action {
            UiAction::Export(format, mode) => {
                self.state.request_export(format, mode);
            }
            UiAction::ToggleLivePreview => self.handle_toggle_live_preview(),
            UiAction::OpenInBrowser => self.handle_open_in_browser(),
            UiAction::CopyHtml => self.handle_copy_html(),
            UiAction::CopySource => self.handle_copy_source(),
            UiAction::CycleTheme => self.handle_cycle_theme(),
            UiAction::SetHighlight(highlight) => {
                self.state.session.set_highlight(highlight);
                self.state.settings.code_highlight = highlight;
            }
            UiAction::ToggleClassReference => self.state.toggle_class_reference(),
        }
    }

    fn handle_toggle_live_preview(&mut self) {
        if self.state.has_live_preview() {
            self.state.close_live_preview();
            return;
        }

        let browser = self.state.settings.browser.clone();
        if let Err(e) = self.state.open_live_preview(&browser) {
            warn!("Failed to open live preview: {}", e);
            self.state.show_error(format!(
                "Failed to open the live preview:\n{}\n\nUse \"Open in Browser\" instead.",
                e
            ));
        }
    }

    fn handle_open_in_browser(&mut self) {
        let document = self.state.session.snapshot();
        match open_in_browser(&document) {
            Ok(_) => {
                let time = self.get_app_time();
                self.state.show_toast("Opened preview in browser", time, 2.0);
            }
            Err(e) => {
                self.state
                    .show_error(format!("Failed to open browser:\n{}", e));
            }
        }
    }

    fn handle_copy_html(&mut self) {
        let document = self.state.session.snapshot();
        let time = self.get_app_time();

        match copy_document_to_clipboard(&document, self.state.session.markdown()) {
            Ok(()) => {
                self.state.show_toast("HTML copied to clipboard", time, 2.0);
            }
            Err(e) => {
                warn!("Failed to copy HTML to clipboard: {}", e);
                self.state
                    .show_toast(format!("Copy failed: {}", e), time, 3.0);
            }
        }
    }

    fn handle_copy_source(&mut self) {
        let text = match self.state.ui.active_view {
            ActiveView::Html => self.state.session.html().to_string(),
            ActiveView::Stylesheet => self.state.session.stylesheet(),
        };
        let time = self.get_app_time();

        match copy_text_to_clipboard(&text) {
            Ok(()) => {
                let message = format!("{} copied to clipboard", self.state.ui.active_view.label());
                self.state.show_toast(message, time, 2.0);
            }
            Err(e) => {
                warn!("Failed to copy source to clipboard: {}", e);
                self.state
                    .show_toast(format!("Copy failed: {}", e), time, 3.0);
            }
        }
    }

    fn handle_cycle_theme(&mut self) {
        let theme: Theme = self.theme_manager.cycle();
        self.state.settings.theme = theme;
        info!("Theme cycled to: {:?}", theme);
    }
}

impl eframe::App for MarkpressApp {
    /// Called each time the UI needs repainting.
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        self.theme_manager
            .apply_if_needed(ctx, system_dark_mode(frame));

        let current_time = self.get_app_time();
        self.state.update_toast(current_time);

        // Collect a finished export before drawing so buttons re-enable
        self.state.poll_exports(current_time);

        let action = self.render_ui(ctx);
        self.render_dialogs(ctx);

        if let Some(action) = action {
            self.handle_action(action);
        }
        self.handle_keyboard_shortcuts(ctx);

        if !self.state.refresh_preview() {
            self.state
                .show_toast("Live preview window closed", current_time, 3.0);
        }

        if self.state.is_exporting() {
            ctx.request_repaint_after(EXPORT_POLL_INTERVAL);
        }
        if self.state.ui.toast_message.is_some() {
            ctx.request_repaint_after(Duration::from_millis(250));
        }
    }

    /// Called when the application is about to close.
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Application exiting");
        self.state.close_live_preview();
    }
}
