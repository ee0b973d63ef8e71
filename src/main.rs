mod app;
mod config;
mod error;
mod fit;
mod history;
mod messages;
mod names;
mod selector;
mod ui;

use app::RollCallApp;

fn main() -> Result<(), eframe::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Roll Call")
            .with_inner_size([1000.0, 595.0])
            .with_min_inner_size([600.0, 400.0])
            .with_decorations(false),
        centered: true,
        ..Default::default()
    };

    eframe::run_native(
        "Roll Call",
        options,
        Box::new(|cc| Ok(Box::new(RollCallApp::new(cc)))),
    )
}
