use egui::{Key, KeyboardShortcut, Modifiers};
use egui_file_dialog::FileDialog;
use std::sync::Arc;

use crate::config::AppSettings;
use crate::fit::{fit_with, TextMeasure};
use crate::history::CallHistory;
use crate::messages::UiAction;
use crate::names::NameList;
use crate::selector::Selector;
use crate::ui::{
    apply_picked_file, render_history_window, render_main_panel, render_settings_panel,
    FileDialogTarget, PainterMeasure,
};

const FALLBACK_FONT_NAME: &str = "names_fallback";

/// The name currently on display
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalledName {
    pub index: usize,
    pub name: String,
    pub font_size: u32,
}

pub struct RollCallApp {
    pub settings: AppSettings,
    pub names: NameList,
    pub current: Option<CalledName>,
    pub history: CallHistory,
    selector: Selector,

    // Settings as last applied, to tell what an edit changed
    applied_settings: AppSettings,
    settings_changed: bool,

    // Notices shown in the main panel
    pub settings_notice: Option<String>,
    pub load_notice: Option<String>,

    // UI state
    pub show_settings: bool,
    pub show_history: bool,

    // File dialog for settings
    file_dialog: FileDialog,
    file_dialog_target: Option<FileDialogTarget>,
}

impl RollCallApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let loaded = AppSettings::load_with_notice();
        install_fallback_font(&cc.egui_ctx, loaded.settings.display.font_file.as_deref());

        let mut app = Self::with_settings(loaded.settings);
        app.settings_notice = loaded.notice;
        app.reload_names();
        app
    }

    /// App state with no names loaded yet
    pub fn with_settings(mut settings: AppSettings) -> Self {
        settings.validate();
        let selector = Selector::new(settings.selection.seed);

        Self {
            applied_settings: settings.clone(),
            settings,
            names: NameList::default(),
            current: None,
            history: CallHistory::new(),
            selector,
            settings_changed: false,
            settings_notice: None,
            load_notice: None,
            show_settings: false,
            show_history: false,
            file_dialog: FileDialog::new(),
            file_dialog_target: None,
        }
    }

    pub fn can_call(&self) -> bool {
        !self.names.is_empty()
    }

    /// Pick the next name and size it for the display box.
    /// Does nothing when no names are loaded.
    pub fn call_with<M: TextMeasure + ?Sized>(&mut self, measure: &mut M) -> Option<&CalledName> {
        let index = self.selector.pick(&self.names)?;
        let name = self.names.get(index)?.to_string();
        let font_size = self.fit_name(&name, measure);

        log::debug!("Called #{} '{}' at size {}", index, name, font_size);
        self.history.record(index, &name, font_size);
        self.current = Some(CalledName {
            index,
            name,
            font_size,
        });
        self.current.as_ref()
    }

    fn fit_name<M: TextMeasure + ?Sized>(&self, name: &str, measure: &mut M) -> u32 {
        let display = &self.settings.display;
        fit_with(name, &display.fit_box(), display.fit_strategy, measure)
    }

    /// Read the names file again. A different list starts a fresh session.
    pub fn reload_names(&mut self) {
        let limits = self.settings.names.limits();
        let (names, report) = NameList::load_with_report(self.settings.names.path(), &limits);
        self.load_notice = report.summary();

        if names != self.names {
            self.names = names;
            self.selector.reset();
            self.history.clear();
            self.current = None;
        }
    }

    /// Apply edited settings; returns true if anything differed from the last apply
    pub fn apply_settings_changes<M: TextMeasure + ?Sized>(&mut self, measure: &mut M) -> bool {
        self.settings.validate();
        if self.settings == self.applied_settings {
            return false;
        }
        let previous = std::mem::replace(&mut self.applied_settings, self.settings.clone());

        if previous.selection.seed != self.settings.selection.seed {
            self.selector.reseed(self.settings.selection.seed);
        }

        if previous.names != self.settings.names {
            self.reload_names();
        }

        if previous.display != self.settings.display {
            if let Some(mut called) = self.current.take() {
                called.font_size = self.fit_name(&called.name, measure);
                self.current = Some(called);
            }
        }

        true
    }

    /// Single dispatch point for everything the UI asks for
    fn handle_action(&mut self, ctx: &egui::Context, action: UiAction) {
        match action {
            UiAction::Call => {
                let mut measure = PainterMeasure::new(ctx);
                self.call_with(&mut measure);
            }
            UiAction::ReloadNames => self.reload_names(),
            UiAction::SettingsChanged => {
                let mut measure = PainterMeasure::new(ctx);
                if self.apply_settings_changes(&mut measure) {
                    if let Err(e) = self.settings.save() {
                        log::warn!("Failed to save settings: {}", e);
                    }
                }
            }
            UiAction::ToggleSettings => self.show_settings = !self.show_settings,
            UiAction::ToggleHistory => self.show_history = !self.show_history,
            UiAction::ClearHistory => self.history.clear(),
            UiAction::DismissNotice => self.settings_notice = None,
            UiAction::Minimize => ctx.send_viewport_cmd(egui::ViewportCommand::Minimized(true)),
            UiAction::Close => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
            UiAction::DragWindow => ctx.send_viewport_cmd(egui::ViewportCommand::StartDrag),
        }
    }

    fn handle_keyboard(&mut self, ctx: &egui::Context, actions: &mut Vec<UiAction>) {
        ctx.input_mut(|i| {
            // Consumed here so a focused button does not also see the key
            if i.consume_key(Modifiers::NONE, Key::Space) || i.consume_key(Modifiers::NONE, Key::Enter)
            {
                if self.can_call() {
                    actions.push(UiAction::Call);
                }
            }

            if i.consume_key(Modifiers::NONE, Key::F5) {
                actions.push(UiAction::ReloadNames);
            }

            if i.consume_shortcut(&KeyboardShortcut::new(Modifiers::COMMAND, Key::Comma)) {
                actions.push(UiAction::ToggleSettings);
            }

            if i.consume_key(Modifiers::NONE, Key::Escape) {
                actions.push(UiAction::Close);
            }
        });
    }

    fn render_settings_viewport(&mut self, ctx: &egui::Context) {
        let settings = &mut self.settings;
        let settings_changed = &mut self.settings_changed;
        let show_settings = &mut self.show_settings;
        let file_dialog = &mut self.file_dialog;
        let file_dialog_target = &mut self.file_dialog_target;

        ctx.show_viewport_immediate(
            egui::ViewportId::from_hash_of("settings_viewport"),
            egui::ViewportBuilder::default()
                .with_title("Settings")
                .with_inner_size([420.0, 520.0]),
            |ctx, _class| {
                // Update file dialog
                file_dialog.update(ctx);

                // Check if a file was picked
                if let Some(path) = file_dialog.take_picked() {
                    if let Some(target) = file_dialog_target.take() {
                        if apply_picked_file(settings, target, &path) {
                            *settings_changed = true;
                        }
                    }
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    render_settings_panel(
                        ui,
                        settings,
                        settings_changed,
                        file_dialog,
                        file_dialog_target,
                    );
                });

                if ctx.input(|i| i.viewport().close_requested()) {
                    *show_settings = false;
                }
            },
        );
    }
}

/// Add a user supplied font after the built-in ones so glyphs they lack
/// (CJK names, for one) still render.
fn install_fallback_font(ctx: &egui::Context, font_file: Option<&str>) {
    let Some(path) = font_file else {
        return;
    };

    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            log::warn!("Could not read font file {}: {}", path, e);
            return;
        }
    };

    let mut fonts = egui::FontDefinitions::default();
    fonts.font_data.insert(
        FALLBACK_FONT_NAME.to_owned(),
        Arc::new(egui::FontData::from_owned(bytes)),
    );
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        fonts
            .families
            .entry(family)
            .or_default()
            .push(FALLBACK_FONT_NAME.to_owned());
    }
    ctx.set_fonts(fonts);
    log::info!("Installed fallback font from {}", path);
}

impl eframe::App for RollCallApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut actions = Vec::new();

        // Handle keyboard input
        self.handle_keyboard(ctx, &mut actions);

        // Settings window (separate OS window)
        if self.show_settings {
            self.render_settings_viewport(ctx);
        }
        if std::mem::take(&mut self.settings_changed) {
            actions.push(UiAction::SettingsChanged);
        }

        // History window (separate OS window)
        if self.show_history {
            render_history_window(
                ctx,
                &self.history,
                self.names.len(),
                &mut self.show_history,
                &mut actions,
            );
        }

        // Main content
        egui::CentralPanel::default().show(ctx, |ui| {
            render_main_panel(ui, self, &mut actions);
        });

        for action in actions {
            self.handle_action(ctx, action);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    /// Every character is half the font size wide
    fn half_width(text: &str, size: u32) -> f32 {
        text.chars().count() as f32 * size as f32 * 0.5
    }

    fn app_with_names(lines: &str) -> (RollCallApp, tempfile::NamedTempFile) {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", lines).unwrap();

        let mut settings = AppSettings::default();
        settings.names.file = file.path().to_string_lossy().into_owned();
        settings.selection.seed = Some(11);

        let mut app = RollCallApp::with_settings(settings);
        app.reload_names();
        (app, file)
    }

    #[test]
    fn test_call_without_names_is_inert() {
        let mut settings = AppSettings::default();
        settings.names.file = "/nonexistent/roll_call/names.txt".to_string();
        let mut app = RollCallApp::with_settings(settings);
        app.reload_names();

        assert!(!app.can_call());
        assert!(app.load_notice.is_some());

        let mut measure = half_width;
        assert!(app.call_with(&mut measure).is_none());
        assert!(app.current.is_none());
        assert!(app.history.calls.is_empty());
    }

    #[test]
    fn test_call_shows_and_records_name() {
        let (mut app, _file) = app_with_names("Alice\nBob\nCharlie\n");
        assert!(app.can_call());
        assert!(app.load_notice.is_none());

        let mut measure = half_width;
        let called = app.call_with(&mut measure).cloned().unwrap();
        assert_eq!(app.names.get(called.index), Some(called.name.as_str()));
        // Short names fit at the maximum size
        assert_eq!(called.font_size, 60);
        assert_eq!(app.history.calls.len(), 1);
        assert_eq!(app.current, Some(called));
    }

    #[test]
    fn test_consecutive_calls_differ() {
        let (mut app, _file) = app_with_names("Alice\nBob\nCharlie\n");
        let mut measure = half_width;

        let mut previous = None;
        for _ in 0..100 {
            let index = app.call_with(&mut measure).map(|c| c.index);
            assert!(index.is_some());
            assert_ne!(index, previous);
            previous = index;
        }
    }

    #[test]
    fn test_long_name_is_shrunk() {
        let long = "Bartholomew Maximilian Fitzgerald-Worthington the Third";
        let (mut app, _file) = app_with_names(&format!("{}\n", long));
        let mut measure = half_width;

        let called = app.call_with(&mut measure).cloned().unwrap();
        assert_eq!(called.name, long);
        assert!(called.font_size < 60);
        assert!(half_width(long, called.font_size) <= 800.0);
        assert!(half_width(long, called.font_size + 1) > 800.0);
    }

    #[test]
    fn test_reload_same_list_keeps_session() {
        let (mut app, _file) = app_with_names("Alice\nBob\n");
        let mut measure = half_width;
        app.call_with(&mut measure);

        app.reload_names();
        assert!(app.current.is_some());
        assert_eq!(app.history.calls.len(), 1);
    }

    #[test]
    fn test_changing_names_file_reloads() {
        let (mut app, _first) = app_with_names("Alice\nBob\n");
        let mut measure = half_width;
        app.call_with(&mut measure);

        let mut second = tempfile::NamedTempFile::new().unwrap();
        write!(second, "Dana\nEli\nFay\n").unwrap();
        app.settings.names.file = second.path().to_string_lossy().into_owned();

        assert!(app.apply_settings_changes(&mut measure));
        assert_eq!(app.names.len(), 3);
        assert!(app.current.is_none());
        assert!(app.history.calls.is_empty());

        // Nothing new to apply
        assert!(!app.apply_settings_changes(&mut measure));
    }

    #[test]
    fn test_display_change_refits_current_name() {
        let (mut app, _file) = app_with_names("Charlotte\n");
        let mut measure = half_width;
        app.call_with(&mut measure);
        assert_eq!(app.current.as_ref().map(|c| c.font_size), Some(60));

        app.settings.display.max_width = 90.0;
        assert!(app.apply_settings_changes(&mut measure));
        // 9 chars * size * 0.5 <= 90
        assert_eq!(app.current.as_ref().map(|c| c.font_size), Some(20));
    }

    #[test]
    fn test_seed_change_does_not_repeat_shown_name() {
        let mut measure = half_width;
        for seed in 0..50 {
            let (mut app, _file) = app_with_names("Alice\nBob\n");
            app.settings.selection.seed = Some(1000);
            app.apply_settings_changes(&mut measure);
            let first = app.call_with(&mut measure).map(|c| c.index);

            app.settings.selection.seed = Some(seed);
            assert!(app.apply_settings_changes(&mut measure));
            let second = app.call_with(&mut measure).map(|c| c.index);

            assert!(second.is_some());
            assert_ne!(first, second, "seed {}", seed);
        }
    }
}
