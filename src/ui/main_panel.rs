use crate::app::RollCallApp;
use crate::messages::UiAction;
use egui::{Align2, Color32, FontId, RichText, Sense, Vec2};

const DISPLAY_HEIGHT: f32 = 80.0;
const CALL_BUTTON_SIZE: Vec2 = Vec2::new(200.0, 60.0);
const CORNER_BUTTON_SIZE: Vec2 = Vec2::new(70.0, 30.0);

pub fn render_main_panel(ui: &mut egui::Ui, app: &RollCallApp, actions: &mut Vec<UiAction>) {
    // The window has no title bar, so the background moves it
    let background = ui.interact(ui.max_rect(), ui.id().with("window_drag"), Sense::drag());
    if background.drag_started() {
        actions.push(UiAction::DragWindow);
    }

    render_window_controls(ui, actions);

    if let Some(notice) = &app.settings_notice {
        ui.horizontal(|ui| {
            ui.label(RichText::new(notice).color(Color32::YELLOW));
            if ui.button("Dismiss").clicked() {
                actions.push(UiAction::DismissNotice);
            }
        });
    }

    let top_gap = ((ui.available_height() - DISPLAY_HEIGHT) / 2.0 - 60.0).max(8.0);
    ui.add_space(top_gap);

    render_name_display(ui, app);

    ui.add_space(40.0);

    render_call_button(ui, app, actions);

    ui.add_space(16.0);

    render_status(ui, app, actions);
}

fn render_window_controls(ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
    ui.horizontal(|ui| {
        if ui
            .add_sized(CORNER_BUTTON_SIZE, egui::Button::new("Minimize"))
            .clicked()
        {
            actions.push(UiAction::Minimize);
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui
                .add_sized(CORNER_BUTTON_SIZE, egui::Button::new("Close"))
                .clicked()
            {
                actions.push(UiAction::Close);
            }
            if ui.button("History").clicked() {
                actions.push(UiAction::ToggleHistory);
            }
            if ui.button("Settings").clicked() {
                actions.push(UiAction::ToggleSettings);
            }
        });
    });
}

fn render_name_display(ui: &mut egui::Ui, app: &RollCallApp) {
    let (rect, _) = ui.allocate_exact_size(
        Vec2::new(ui.available_width(), DISPLAY_HEIGHT),
        Sense::hover(),
    );
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 0.0, Color32::WHITE);

    if let Some(called) = &app.current {
        painter.text(
            rect.center(),
            Align2::CENTER_CENTER,
            &called.name,
            FontId::proportional(called.font_size as f32),
            Color32::BLACK,
        );
    }
}

fn render_call_button(ui: &mut egui::Ui, app: &RollCallApp, actions: &mut Vec<UiAction>) {
    ui.vertical_centered(|ui| {
        let button = egui::Button::new(RichText::new("Call").size(24.0)).min_size(CALL_BUTTON_SIZE);
        // No names, no call
        let response = ui.add_enabled(app.can_call(), button);
        if response.clicked() {
            actions.push(UiAction::Call);
        }
    });
}

fn render_status(ui: &mut egui::Ui, app: &RollCallApp, actions: &mut Vec<UiAction>) {
    ui.vertical_centered(|ui| {
        if app.names.is_empty() {
            ui.label(
                RichText::new(format!(
                    "No names loaded from {}",
                    app.settings.names.path().display()
                ))
                .color(Color32::from_rgb(255, 165, 0)),
            );
        } else {
            ui.label(
                RichText::new(format!(
                    "{} names  |  Space: call  |  F5: reload  |  Esc: close",
                    app.names.len()
                ))
                .weak(),
            );
        }

        if let Some(notice) = &app.load_notice {
            ui.label(RichText::new(notice).color(Color32::YELLOW));
        }

        if ui.small_button("Reload Names").clicked() {
            actions.push(UiAction::ReloadNames);
        }
    });
}
