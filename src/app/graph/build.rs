use eframe::egui::Vec2;

use crate::dataset::Dataset;

use super::super::physics::Simulation;
use super::super::scale::SizeScale;
use super::super::{PointerGesture, ViewModel};

// Sub-pixel jitter in the reported panel size must not trigger a reseed.
const CANVAS_RESIZE_TOLERANCE: f32 = 0.5;

impl ViewModel {
    fn canvas_changed(&self, canvas: Vec2) -> bool {
        self.canvas_size.is_none_or(|previous| {
            (previous.x - canvas.x).abs() > CANVAS_RESIZE_TOLERANCE
                || (previous.y - canvas.y).abs() > CANVAS_RESIZE_TOLERANCE
        })
    }

    fn teardown_simulation(&mut self) {
        if let Some(mut previous) = self.simulation.take() {
            previous.stop();
        }
        self.drag.cancel();
        self.gesture = PointerGesture::Idle;
        self.hovered = None;
        self.truncation.invalidate();
    }

    pub(in crate::app) fn reseed_simulation(&mut self, canvas: Vec2) {
        self.teardown_simulation();
        self.layout_revision = self.layout_revision.wrapping_add(1);
        self.canvas_size = Some(canvas);

        let size_scale = SizeScale::for_viewport(canvas, self.settings.radius_divisor);
        let simulation = Simulation::seed(
            &self.dataset,
            canvas,
            size_scale,
            self.settings.force_config(),
        );

        let (min_radius, max_radius) = size_scale.range();
        log::info!(
            "seeded {} bubbles in {:.0}x{:.0} canvas (radius {:.1}..{:.1}, revision {})",
            simulation.bodies().len(),
            canvas.x,
            canvas.y,
            min_radius,
            max_radius,
            self.layout_revision
        );

        self.simulation = Some(simulation);
    }

    pub(in crate::app) fn ensure_simulation(&mut self, canvas: Vec2) {
        if self.simulation.is_none() || self.canvas_changed(canvas) {
            self.reseed_simulation(canvas);
        }
    }

    pub(in crate::app) fn replace_dataset(&mut self, dataset: Dataset) {
        self.dataset = dataset;
        match self.canvas_size {
            Some(canvas) => self.reseed_simulation(canvas),
            None => self.teardown_simulation(),
        }
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::vec2;

    use super::*;
    use crate::app::LayoutSettings;
    use crate::app::truncation::{GeometryKey, LabelBox};
    use crate::dataset::BubbleRecord;

    fn dataset(ids: &[&str]) -> Dataset {
        Dataset::from_records(
            ids.iter()
                .map(|id| BubbleRecord::new(*id, format!("Bubble {id}"), 35.0))
                .collect(),
        )
        .unwrap()
    }

    fn model() -> ViewModel {
        let mut model = ViewModel::new(dataset(&["a", "b", "c", "d"]), LayoutSettings::default());
        model.ensure_simulation(vec2(800.0, 600.0));
        model
    }

    fn mark_truncation_fresh(model: &mut ViewModel) -> GeometryKey {
        let key = GeometryKey {
            layout_revision: model.layout_revision,
            canvas: vec2(800.0, 600.0),
            scale: model.viewport.scale(),
        };
        model.truncation.replace(
            key,
            &[LabelBox {
                id: "a".to_owned(),
                content_size: vec2(400.0, 20.0),
                container_size: vec2(100.0, 100.0),
            }],
        );
        key
    }

    #[test]
    fn replacing_dataset_mid_drag_cancels_gesture() {
        let mut model = model();
        let key = mark_truncation_fresh(&mut model);
        let simulation = model.simulation.as_mut().unwrap();
        assert!(model.drag.gesture_start(simulation, "b", vec2(10.0, 10.0)));
        model.gesture = PointerGesture::Body;
        model.hovered = Some(1);

        model.replace_dataset(dataset(&["x", "y"]));

        assert!(!model.drag.is_active());
        assert_eq!(model.gesture, PointerGesture::Idle);
        assert_eq!(model.hovered, None);
        assert!(model.truncation.is_stale(key));
        assert_eq!(model.truncation.len(), 0);

        let simulation = model.simulation.as_ref().unwrap();
        assert_eq!(simulation.bodies().len(), 2);
        assert!(simulation.bodies().iter().all(|body| body.pinned.is_none()));
        assert_eq!(simulation.index_of("b"), None);
    }

    #[test]
    fn resize_beyond_tolerance_reseeds() {
        let mut model = model();
        let revision = model.layout_revision;
        let key = mark_truncation_fresh(&mut model);

        model.ensure_simulation(vec2(801.0, 600.0));

        assert_eq!(model.layout_revision, revision + 1);
        assert_eq!(model.canvas_size, Some(vec2(801.0, 600.0)));
        assert!(model.truncation.is_stale(key));
        let simulation = model.simulation.as_ref().unwrap();
        assert_eq!(simulation.alpha(), 1.0);
    }

    #[test]
    fn sub_pixel_resize_keeps_simulation() {
        let mut model = model();
        for _ in 0..20 {
            model.simulation.as_mut().unwrap().tick();
        }
        let revision = model.layout_revision;
        let alpha = model.simulation.as_ref().unwrap().alpha();

        model.ensure_simulation(vec2(800.5, 599.5));

        assert_eq!(model.layout_revision, revision);
        assert_eq!(model.canvas_size, Some(vec2(800.0, 600.0)));
        assert_eq!(model.simulation.as_ref().unwrap().alpha(), alpha);
    }

    #[test]
    fn reseed_keeps_viewport_transform() {
        let mut model = model();
        model.viewport.zoom_by(2.0, vec2(100.0, 80.0));
        model.viewport.pan_by(vec2(-30.0, 12.0));
        let (offset, scale) = (model.viewport.offset(), model.viewport.scale());

        model.ensure_simulation(vec2(1024.0, 768.0));
        assert_eq!(model.viewport.offset(), offset);
        assert_eq!(model.viewport.scale(), scale);

        model.replace_dataset(dataset(&["solo"]));
        assert_eq!(model.viewport.offset(), offset);
        assert_eq!(model.viewport.scale(), scale);
    }

    #[test]
    fn dataset_before_first_frame_waits_for_canvas() {
        let mut model = ViewModel::new(dataset(&["a"]), LayoutSettings::default());
        model.replace_dataset(dataset(&["a", "b"]));

        assert!(model.simulation.is_none());
        assert_eq!(model.layout_revision, 0);

        model.ensure_simulation(vec2(320.0, 240.0));
        assert_eq!(model.simulation.as_ref().unwrap().bodies().len(), 2);
    }
}
