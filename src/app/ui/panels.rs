use std::path::Path;

use eframe::egui::{self, Align, Context, Layout};

use crate::dataset::Dataset;

use super::super::drag::DragController;
use super::super::truncation::TruncationSet;
use super::super::viewport::ViewportTransform;
use super::super::{LayoutSettings, PointerGesture, ViewModel};

impl ViewModel {
    pub(in crate::app) fn new(dataset: Dataset, settings: LayoutSettings) -> Self {
        Self {
            dataset,
            settings,
            simulation: None,
            viewport: ViewportTransform::new(settings.zoom_range()),
            drag: DragController::default(),
            gesture: PointerGesture::Idle,
            truncation: TruncationSet::default(),
            hovered: None,
            canvas_size: None,
            layout_revision: 0,
            live_physics: true,
        }
    }

    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        dataset_path: &Path,
        reload_requested: &mut bool,
        is_loading: bool,
    ) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("bubble-field");
                    ui.separator();
                    ui.label(format!("dataset: {}", dataset_path.display()));
                    ui.label(format!("bubbles: {}", self.dataset.len()));
                    if let Some(focal) = self.dataset.focal_id() {
                        ui.label(format!("center: {focal}"));
                    }

                    let reload_button =
                        ui.add_enabled(!is_loading, egui::Button::new("Reload dataset"));
                    if reload_button.clicked() {
                        *reload_requested = true;
                    }
                    if ui.button("Re-run layout").clicked()
                        && let Some(canvas) = self.canvas_size
                    {
                        self.reseed_simulation(canvas);
                    }
                    ui.checkbox(&mut self.live_physics, "Live physics");

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(self.status_text());
                    });
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            if is_loading {
                ui.vertical_centered(|ui| {
                    ui.add_space(120.0);
                    ui.heading("Reloading bubbles...");
                    ui.add_space(8.0);
                    ui.spinner();
                });
            } else {
                self.draw_graph(ui);
            }
        });
    }

    fn status_text(&self) -> String {
        let zoom = format!("zoom {:.0}%", self.viewport.scale() * 100.0);
        let truncated = format!("truncated {}", self.truncation.len());

        match self.simulation.as_ref() {
            Some(simulation) => format!(
                "{} (alpha {:.3}) | {zoom} | {truncated}",
                simulation.phase().label(),
                simulation.alpha()
            ),
            None => format!("{zoom} | {truncated}"),
        }
    }
}
