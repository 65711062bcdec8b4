use eframe::egui::{self, PointerButton, Pos2, Rect, Ui, Vec2};

use super::super::{PointerGesture, ViewModel};

const WHEEL_ZOOM_SENSITIVITY: f32 = 0.0018;

impl ViewModel {
    fn canvas_local(rect: Rect, screen: Pos2) -> Vec2 {
        screen - rect.min
    }

    pub(in crate::app) fn handle_graph_zoom(
        &mut self,
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
    ) {
        if !response.hovered() {
            return;
        }

        let (scroll, pinch) = ui.input(|input| (input.raw_scroll_delta.y, input.zoom_delta()));
        let mut factor = pinch;
        if scroll.abs() > f32::EPSILON {
            factor *= (1.0 + (scroll * WHEEL_ZOOM_SENSITIVITY)).clamp(0.85, 1.15);
        }
        if (factor - 1.0).abs() <= f32::EPSILON {
            return;
        }

        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| rect.center());
        self.viewport
            .zoom_by(factor, Self::canvas_local(rect, pointer));
    }

    pub(in crate::app) fn handle_pointer_gestures(
        &mut self,
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
    ) {
        if response.dragged_by(PointerButton::Secondary)
            || response.dragged_by(PointerButton::Middle)
        {
            self.viewport.pan_by(response.drag_delta());
        }

        if response.drag_started_by(PointerButton::Primary) {
            let origin = ui
                .input(|input| input.pointer.press_origin())
                .or_else(|| response.interact_pointer_pos());
            self.gesture = match origin {
                Some(origin) => self.begin_primary_gesture(rect, origin),
                None => PointerGesture::Idle,
            };
        }

        if response.dragged_by(PointerButton::Primary) {
            match self.gesture {
                PointerGesture::Body => {
                    if let Some(pointer) = response.interact_pointer_pos() {
                        let world = self.viewport.to_world(Self::canvas_local(rect, pointer));
                        if let Some(simulation) = self.simulation.as_mut() {
                            self.drag.gesture_move(simulation, world);
                        }
                        if !self.drag.is_active() {
                            self.gesture = PointerGesture::Idle;
                        }
                    }
                }
                PointerGesture::Pan => self.viewport.pan_by(response.drag_delta()),
                PointerGesture::Idle => {}
            }
        }

        if response.drag_stopped() {
            if self.gesture == PointerGesture::Body
                && let Some(simulation) = self.simulation.as_mut()
            {
                self.drag.gesture_end(simulation);
            }
            self.gesture = PointerGesture::Idle;
        }
    }

    fn begin_primary_gesture(&mut self, rect: Rect, origin: Pos2) -> PointerGesture {
        let world = self.viewport.to_world(Self::canvas_local(rect, origin));
        let Some(simulation) = self.simulation.as_mut() else {
            return PointerGesture::Pan;
        };

        let Some(index) = simulation.body_at(world) else {
            return PointerGesture::Pan;
        };

        let body_id = simulation.bodies()[index].id.clone();
        if self.drag.gesture_start(simulation, &body_id, world) {
            PointerGesture::Body
        } else {
            PointerGesture::Idle
        }
    }

    pub(in crate::app) fn hovered_index(&self, ui: &Ui, rect: Rect) -> Option<usize> {
        if let Some(active) = self.drag.active_body() {
            return self
                .simulation
                .as_ref()
                .and_then(|simulation| simulation.index_of(active));
        }

        let pointer = ui.input(|input| input.pointer.hover_pos())?;
        if !rect.contains(pointer) {
            return None;
        }

        let world = self.viewport.to_world(Self::canvas_local(rect, pointer));
        self.simulation
            .as_ref()
            .and_then(|simulation| simulation.body_at(world))
    }
}
