use egui::{Color32, FontId, Painter};

use crate::fit::TextMeasure;

/// Measures text with egui's own font metrics, the same ones the name label
/// is drawn with.
pub struct PainterMeasure {
    painter: Painter,
}

impl PainterMeasure {
    pub fn new(ctx: &egui::Context) -> Self {
        Self {
            painter: ctx.layer_painter(egui::LayerId::background()),
        }
    }
}

impl TextMeasure for PainterMeasure {
    fn width(&mut self, text: &str, size: u32) -> f32 {
        let galley = self.painter.layout_no_wrap(
            text.to_string(),
            FontId::proportional(size as f32),
            Color32::BLACK,
        );
        galley.size().x
    }
}
