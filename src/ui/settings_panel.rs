use crate::config::{AppSettings, MAX_SEED};
use crate::fit::FitStrategy;
use crate::names::OverlongPolicy;
use egui::RichText;
use egui_file_dialog::FileDialog;

/// Tracks which file field triggered the file dialog
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FileDialogTarget {
    NamesFile,
    FontFile,
}

pub fn render_settings_panel(
    ui: &mut egui::Ui,
    settings: &mut AppSettings,
    settings_changed: &mut bool,
    file_dialog: &mut FileDialog,
    file_dialog_target: &mut Option<FileDialogTarget>,
) {
    egui::ScrollArea::vertical().show(ui, |ui| {
        // Names
        egui::CollapsingHeader::new(RichText::new("Names").strong())
            .default_open(true)
            .show(ui, |ui| {
                ui.label("Names File:");
                ui.horizontal(|ui| {
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut settings.names.file).desired_width(250.0),
                    );
                    // Only reload once editing is finished
                    if response.lost_focus() {
                        *settings_changed = true;
                    }
                    if ui.button("Browse...").clicked() {
                        *file_dialog_target = Some(FileDialogTarget::NamesFile);
                        file_dialog.pick_file();
                    }
                });

                ui.horizontal(|ui| {
                    ui.label("Max Names:");
                    if ui
                        .add(
                            egui::DragValue::new(&mut settings.names.max_entries)
                                .range(1..=1_000_000),
                        )
                        .changed()
                    {
                        *settings_changed = true;
                    }
                });

                ui.horizontal(|ui| {
                    ui.label("Max Name Length:");
                    if ui
                        .add(egui::DragValue::new(&mut settings.names.max_entry_chars).range(1..=1000))
                        .changed()
                    {
                        *settings_changed = true;
                    }
                });

                ui.horizontal(|ui| {
                    ui.label("Longer Names:");
                    egui::ComboBox::from_id_salt("overlong_policy")
                        .selected_text(overlong_label(settings.names.overlong))
                        .show_ui(ui, |ui| {
                            for policy in [OverlongPolicy::Truncate, OverlongPolicy::Skip] {
                                if ui
                                    .selectable_value(
                                        &mut settings.names.overlong,
                                        policy,
                                        overlong_label(policy),
                                    )
                                    .changed()
                                {
                                    *settings_changed = true;
                                }
                            }
                        });
                });
            });

        ui.add_space(8.0);

        // Display
        egui::CollapsingHeader::new(RichText::new("Display").strong())
            .default_open(true)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label("Max Name Width:");
                    if ui
                        .add(
                            egui::Slider::new(&mut settings.display.max_width, 100.0..=1000.0)
                                .fixed_decimals(0),
                        )
                        .changed()
                    {
                        *settings_changed = true;
                    }
                });

                ui.horizontal(|ui| {
                    ui.label("Max Font Size:");
                    if ui
                        .add(egui::Slider::new(&mut settings.display.max_font_size, 8..=72))
                        .changed()
                    {
                        *settings_changed = true;
                    }
                });

                ui.horizontal(|ui| {
                    ui.label("Min Font Size:");
                    let max = settings.display.max_font_size;
                    if ui
                        .add(egui::Slider::new(&mut settings.display.min_font_size, 1..=max))
                        .changed()
                    {
                        *settings_changed = true;
                    }
                });

                ui.horizontal(|ui| {
                    ui.label("Fit Search:");
                    for (strategy, label) in [
                        (FitStrategy::Linear, "Step down"),
                        (FitStrategy::Binary, "Bisect"),
                    ] {
                        if ui
                            .radio_value(&mut settings.display.fit_strategy, strategy, label)
                            .changed()
                        {
                            *settings_changed = true;
                        }
                    }
                });

                ui.add_space(4.0);
                ui.label("Extra Font (for names the default font cannot show):");
                ui.horizontal(|ui| {
                    let display = settings
                        .display
                        .font_file
                        .clone()
                        .unwrap_or_else(|| "(built-in fonts only)".to_string());
                    ui.add(egui::TextEdit::singleline(&mut display.as_str()).desired_width(250.0));
                    if ui.button("Browse...").clicked() {
                        *file_dialog_target = Some(FileDialogTarget::FontFile);
                        file_dialog.pick_file();
                    }
                    if settings.display.font_file.is_some() && ui.button("Clear").clicked() {
                        settings.display.font_file = None;
                        *settings_changed = true;
                    }
                });
                ui.label(RichText::new("Font changes take effect on next start.").weak());
            });

        ui.add_space(8.0);

        // Selection
        egui::CollapsingHeader::new(RichText::new("Selection").strong())
            .default_open(false)
            .show(ui, |ui| {
                let mut fixed = settings.selection.seed.is_some();
                if ui.checkbox(&mut fixed, "Fixed Random Seed").changed() {
                    settings.selection.seed = fixed.then_some(0);
                    *settings_changed = true;
                }
                if let Some(seed) = settings.selection.seed.as_mut() {
                    ui.horizontal(|ui| {
                        ui.label("Seed:");
                        if ui
                            .add(egui::DragValue::new(seed).range(0..=MAX_SEED))
                            .changed()
                        {
                            *settings_changed = true;
                        }
                    });
                }
            });
    });
}

/// Apply a path chosen in the file dialog to the field that asked for it
pub fn apply_picked_file(
    settings: &mut AppSettings,
    target: FileDialogTarget,
    path: &std::path::Path,
) -> bool {
    let Some(path_str) = path.to_str() else {
        log::warn!("Ignoring non UTF-8 path {}", path.display());
        return false;
    };
    match target {
        FileDialogTarget::NamesFile => settings.names.file = path_str.to_string(),
        FileDialogTarget::FontFile => settings.display.font_file = Some(path_str.to_string()),
    }
    true
}

fn overlong_label(policy: OverlongPolicy) -> &'static str {
    match policy {
        OverlongPolicy::Truncate => "Truncate",
        OverlongPolicy::Skip => "Skip",
    }
}
