pub mod history_window;
pub mod main_panel;
pub mod measure;
pub mod settings_panel;

pub use history_window::render_history_window;
pub use main_panel::render_main_panel;
pub use measure::PainterMeasure;
pub use settings_panel::{apply_picked_file, render_settings_panel, FileDialogTarget};
