use eframe::egui::Vec2;

use super::physics::Simulation;

#[derive(Clone, Debug, PartialEq)]
struct ActiveDrag {
    body_index: usize,
    body_id: String,
    // Pointer minus body center at press time, so the body does not jump.
    grab_offset: Vec2,
}

#[derive(Debug, Default)]
pub(in crate::app) struct DragController {
    active: Option<ActiveDrag>,
}

impl DragController {
    pub(in crate::app) fn active_body(&self) -> Option<&str> {
        self.active.as_ref().map(|drag| drag.body_id.as_str())
    }

    pub(in crate::app) fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub(in crate::app) fn gesture_start(
        &mut self,
        simulation: &mut Simulation,
        body_id: &str,
        pointer: Vec2,
    ) -> bool {
        if self.active.is_some() {
            self.gesture_end(simulation);
        }

        let Some(body_index) = simulation.index_of(body_id) else {
            log::warn!("ignoring drag on unknown bubble `{body_id}`");
            return false;
        };

        let anchor = simulation.bodies()[body_index].position;
        let reheat_alpha = simulation.config().reheat_alpha;
        simulation.set_alpha_target(reheat_alpha);
        simulation.reheat(reheat_alpha);
        simulation.pin(body_index, anchor);

        self.active = Some(ActiveDrag {
            body_index,
            body_id: body_id.to_owned(),
            grab_offset: pointer - anchor,
        });
        true
    }

    pub(in crate::app) fn gesture_move(&mut self, simulation: &mut Simulation, pointer: Vec2) {
        let Some(drag) = &self.active else {
            return;
        };

        let still_present = simulation
            .bodies()
            .get(drag.body_index)
            .is_some_and(|body| body.id == drag.body_id);
        if !still_present {
            log::warn!("dropping drag on stale bubble `{}`", drag.body_id);
            self.active = None;
            return;
        }

        simulation.pin(drag.body_index, pointer - drag.grab_offset);
    }

    pub(in crate::app) fn gesture_end(&mut self, simulation: &mut Simulation) {
        let Some(drag) = self.active.take() else {
            return;
        };

        simulation.set_alpha_target(0.0);
        if simulation
            .bodies()
            .get(drag.body_index)
            .is_some_and(|body| body.id == drag.body_id)
        {
            simulation.unpin(drag.body_index);
        }
    }

    pub(in crate::app) fn cancel(&mut self) {
        if let Some(drag) = self.active.take() {
            log::debug!("cancelled drag on `{}`", drag.body_id);
        }
    }
}
