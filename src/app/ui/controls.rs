use eframe::egui::{self, Rect, RichText, Ui, pos2, vec2};

use super::super::ViewModel;

const BUTTON_SIZE: f32 = 30.0;
const BUTTON_GAP: f32 = 6.0;
const OVERLAY_MARGIN: f32 = 12.0;

impl ViewModel {
    pub(in crate::app) fn draw_zoom_controls(&mut self, ui: &mut Ui, rect: Rect) {
        let canvas = rect.size();
        let scale = self.viewport.scale();
        let range = self.viewport.range();

        let slot = |row: usize| {
            let top = rect.top() + OVERLAY_MARGIN + (row as f32 * (BUTTON_SIZE + BUTTON_GAP));
            Rect::from_min_size(
                pos2(rect.right() - OVERLAY_MARGIN - BUTTON_SIZE, top),
                vec2(BUTTON_SIZE, BUTTON_SIZE),
            )
        };

        let zoom_in = ui
            .put(
                slot(0),
                egui::Button::new(RichText::new("+").size(18.0)).frame(true),
            )
            .on_hover_text("Zoom in");
        if zoom_in.clicked() && scale < range.max() {
            self.viewport.zoom_in(canvas);
        }

        let zoom_out = ui
            .put(
                slot(1),
                egui::Button::new(RichText::new("−").size(18.0)).frame(true),
            )
            .on_hover_text("Zoom out");
        if zoom_out.clicked() && scale > range.min() {
            self.viewport.zoom_out(canvas);
        }

        let reset = ui
            .put(
                slot(2),
                egui::Button::new(RichText::new("⟲").size(16.0)).frame(true),
            )
            .on_hover_text("Reset view");
        if reset.clicked() && !self.viewport.is_animating() {
            self.viewport.reset();
            ui.ctx().request_repaint();
        }
    }
}
