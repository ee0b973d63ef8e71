use crate::history::CallHistory;
use crate::messages::UiAction;
use egui::RichText;

pub fn render_history_window(
    ctx: &egui::Context,
    history: &CallHistory,
    list_len: usize,
    show_history: &mut bool,
    actions: &mut Vec<UiAction>,
) {
    ctx.show_viewport_immediate(
        egui::ViewportId::from_hash_of("history_viewport"),
        egui::ViewportBuilder::default()
            .with_title("Roll Call History")
            .with_inner_size([380.0, 480.0]),
        |ctx, _class| {
            egui::CentralPanel::default().show(ctx, |ui| {
                render_history_content(ui, history, list_len, actions);
            });

            if ctx.input(|i| i.viewport().close_requested()) {
                *show_history = false;
            }
        },
    );
}

fn render_history_content(
    ui: &mut egui::Ui,
    history: &CallHistory,
    list_len: usize,
    actions: &mut Vec<UiAction>,
) {
    let summary = history.summarize(list_len);

    ui.heading("This Session");
    ui.add_space(8.0);

    egui::Grid::new("history_summary_grid")
        .num_columns(2)
        .spacing([40.0, 4.0])
        .show(ui, |ui| {
            ui.label("Calls:");
            ui.label(format!("{}", summary.total_calls));
            ui.end_row();

            ui.label("Different Names:");
            ui.label(format!("{} of {}", summary.distinct_names, list_len));
            ui.end_row();

            ui.label("Not Yet Called:");
            ui.label(format!("{}", summary.never_called));
            ui.end_row();
        });

    ui.add_space(8.0);
    if ui.button("Clear History").clicked() {
        actions.push(UiAction::ClearHistory);
    }

    ui.add_space(8.0);
    ui.separator();
    ui.add_space(8.0);

    ui.heading("Recent Calls");
    ui.add_space(4.0);

    egui::ScrollArea::vertical()
        .id_salt("recent_calls")
        .max_height(200.0)
        .show(ui, |ui| {
            if history.calls.is_empty() {
                ui.label(RichText::new("No names called yet").weak());
            }
            for call in history.calls.iter().rev() {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(call.called_at.format("%H:%M:%S").to_string()).monospace(),
                    );
                    ui.label(&call.name);
                    ui.label(RichText::new(format!("{} pt", call.font_size)).weak());
                });
            }
        });

    ui.add_space(8.0);
    ui.separator();
    ui.add_space(8.0);

    ui.heading("Times Called");
    ui.add_space(4.0);

    egui::ScrollArea::vertical()
        .id_salt("call_counts")
        .show(ui, |ui| {
            egui::Grid::new("call_counts_grid")
                .num_columns(2)
                .spacing([40.0, 2.0])
                .show(ui, |ui| {
                    for (name, count) in &summary.counts {
                        ui.label(name);
                        ui.label(format!("{}", count));
                        ui.end_row();
                    }
                });
        });
}
