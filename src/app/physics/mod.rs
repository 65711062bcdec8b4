mod forces;

use std::collections::HashMap;
use std::f32::consts::PI;

use eframe::egui::{Vec2, vec2};

use crate::dataset::Dataset;

use super::scale::SizeScale;
use forces::{apply_centering, apply_pull, apply_repulsion, resolve_collisions};

const SETTLING_ALPHA: f32 = 0.05;
const INITIAL_SPIRAL_RADIUS: f32 = 10.0;

#[derive(Clone, Debug, PartialEq)]
pub(in crate::app) struct Body {
    pub(in crate::app) id: String,
    pub(in crate::app) label: String,
    pub(in crate::app) value: f32,
    pub(in crate::app) is_focal: bool,
    pub(in crate::app) position: Vec2,
    pub(in crate::app) velocity: Vec2,
    pub(in crate::app) pinned: Option<Vec2>,
    radius: f32,
}

impl Body {
    pub(in crate::app) fn new(
        id: String,
        label: String,
        value: f32,
        is_focal: bool,
        radius: f32,
        position: Vec2,
    ) -> Self {
        Self {
            id,
            label,
            value,
            is_focal,
            position,
            velocity: Vec2::ZERO,
            pinned: None,
            radius,
        }
    }

    pub(in crate::app) fn radius(&self) -> f32 {
        self.radius
    }

    pub(in crate::app) fn contains(&self, point: Vec2) -> bool {
        (point - self.position).length_sq() <= self.radius * self.radius
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(in crate::app) struct ForceConfig {
    pub(in crate::app) repulsion_strength: f32,
    pub(in crate::app) centering_strength: f32,
    pub(in crate::app) pull_strength: f32,
    pub(in crate::app) collision_padding: f32,
    pub(in crate::app) collision_passes: usize,
    pub(in crate::app) velocity_decay: f32,
    pub(in crate::app) alpha_min: f32,
    pub(in crate::app) alpha_decay: f32,
    pub(in crate::app) reheat_alpha: f32,
}

impl Default for ForceConfig {
    fn default() -> Self {
        let alpha_min = 0.001_f32;
        Self {
            repulsion_strength: 20.0,
            centering_strength: 0.1,
            pull_strength: 0.1,
            collision_padding: 2.0,
            collision_passes: 3,
            velocity_decay: 0.4,
            alpha_min,
            // Cools from 1 to alpha_min in roughly 300 ticks.
            alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
            reheat_alpha: 0.3,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::app) enum SolverPhase {
    Idle,
    Running,
    Settling,
}

impl SolverPhase {
    pub(in crate::app) fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Settling => "settling",
        }
    }
}

// Owns the body set for one dataset + canvas size. Membership never changes;
// a new dataset or canvas size gets a new `Simulation`.
#[derive(Clone, Debug)]
pub(in crate::app) struct Simulation {
    bodies: Vec<Body>,
    index_by_id: HashMap<String, usize>,
    config: ForceConfig,
    center: Vec2,
    alpha: f32,
    alpha_target: f32,
    phase: SolverPhase,
    ticks: u64,
    residual_overlap: f32,
}

impl Simulation {
    pub(in crate::app) fn seed(
        dataset: &Dataset,
        viewport: Vec2,
        size_scale: SizeScale,
        config: ForceConfig,
    ) -> Self {
        let center = viewport * 0.5;
        let bodies = dataset
            .records()
            .iter()
            .enumerate()
            .map(|(index, record)| {
                Body::new(
                    record.id.clone(),
                    record.label.clone(),
                    record.value,
                    record.is_focal,
                    size_scale.radius(record.value),
                    center + spiral_offset(index),
                )
            })
            .collect();

        Self::from_bodies(bodies, viewport, config)
    }

    pub(in crate::app) fn from_bodies(bodies: Vec<Body>, viewport: Vec2, config: ForceConfig) -> Self {
        let index_by_id = bodies
            .iter()
            .enumerate()
            .map(|(index, body)| (body.id.clone(), index))
            .collect();

        let degenerate = bodies.is_empty()
            || !(viewport.x > 0.0 && viewport.y > 0.0)
            || !viewport.x.is_finite()
            || !viewport.y.is_finite();
        let phase = if degenerate {
            log::debug!(
                "solver idle: {} bodies in a {}x{} canvas",
                bodies.len(),
                viewport.x,
                viewport.y
            );
            SolverPhase::Idle
        } else {
            SolverPhase::Running
        };

        Self {
            bodies,
            index_by_id,
            config,
            center: viewport * 0.5,
            alpha: if degenerate { 0.0 } else { 1.0 },
            alpha_target: 0.0,
            phase,
            ticks: 0,
            residual_overlap: 0.0,
        }
    }

    pub(in crate::app) fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub(in crate::app) fn config(&self) -> ForceConfig {
        self.config
    }

    pub(in crate::app) fn alpha(&self) -> f32 {
        self.alpha
    }

    pub(in crate::app) fn phase(&self) -> SolverPhase {
        self.phase
    }

    pub(in crate::app) fn is_active(&self) -> bool {
        self.phase != SolverPhase::Idle
    }

    pub(in crate::app) fn index_of(&self, id: &str) -> Option<usize> {
        self.index_by_id.get(id).copied()
    }

    #[cfg(test)]
    pub(in crate::app) fn body(&self, id: &str) -> Option<&Body> {
        self.index_of(id).map(|index| &self.bodies[index])
    }

    pub(in crate::app) fn body_at(&self, point: Vec2) -> Option<usize> {
        self.bodies.iter().rposition(|body| body.contains(point))
    }

    pub(in crate::app) fn reheat(&mut self, alpha: f32) {
        if self.bodies.is_empty() {
            return;
        }

        self.alpha = self.alpha.max(alpha.clamp(0.0, 1.0));
        if self.phase != SolverPhase::Running {
            log::debug!("solver reheated to alpha {:.3}", self.alpha);
        }
        self.phase = SolverPhase::Running;
    }

    pub(in crate::app) fn set_alpha_target(&mut self, target: f32) {
        self.alpha_target = target.clamp(0.0, 1.0);
    }

    pub(in crate::app) fn pin(&mut self, index: usize, position: Vec2) -> bool {
        let Some(body) = self.bodies.get_mut(index) else {
            return false;
        };
        body.pinned = Some(position);
        body.position = position;
        body.velocity = Vec2::ZERO;
        true
    }

    pub(in crate::app) fn unpin(&mut self, index: usize) {
        if let Some(body) = self.bodies.get_mut(index) {
            body.pinned = None;
        }
    }

    fn has_pinned(&self) -> bool {
        self.bodies.iter().any(|body| body.pinned.is_some())
    }

    pub(in crate::app) fn stop(&mut self) {
        if self.phase != SolverPhase::Idle {
            log::debug!("solver stopped after {} ticks", self.ticks);
        }
        self.alpha_target = 0.0;
        self.phase = SolverPhase::Idle;
    }

    pub(in crate::app) fn tick(&mut self) -> bool {
        if self.phase == SolverPhase::Idle {
            return false;
        }

        let friction = 1.0 - self.config.velocity_decay.clamp(0.0, 1.0);
        for body in &mut self.bodies {
            body.velocity *= friction;
        }

        apply_repulsion(&mut self.bodies, self.config.repulsion_strength, self.alpha);
        apply_centering(&mut self.bodies, self.center, self.config.centering_strength);
        apply_pull(
            &mut self.bodies,
            self.center,
            self.config.pull_strength,
            self.alpha,
        );

        for body in self.bodies.iter_mut().filter(|body| body.pinned.is_none()) {
            body.position += body.velocity;
        }

        self.residual_overlap = resolve_collisions(
            &mut self.bodies,
            self.config.collision_padding,
            self.config.collision_passes,
        );

        for body in &mut self.bodies {
            if let Some(pinned) = body.pinned {
                body.position = pinned;
                body.velocity = Vec2::ZERO;
            }
        }

        self.alpha += (self.alpha_target - self.alpha) * self.config.alpha_decay;
        self.ticks += 1;

        let previous = self.phase;
        self.phase = if self.alpha < self.config.alpha_min
            && self.alpha_target < self.config.alpha_min
            && !self.has_pinned()
        {
            SolverPhase::Idle
        } else if self.alpha < SETTLING_ALPHA && !self.has_pinned() {
            SolverPhase::Settling
        } else {
            SolverPhase::Running
        };

        if previous != self.phase {
            log::debug!(
                "solver {} -> {} at tick {} (alpha {:.4}, overlap {:.2}px)",
                previous.label(),
                self.phase.label(),
                self.ticks,
                self.alpha,
                self.residual_overlap
            );
        }

        self.is_active()
    }
}

fn spiral_offset(index: usize) -> Vec2 {
    let radius = INITIAL_SPIRAL_RADIUS * (0.5 + index as f32).sqrt();
    let angle = index as f32 * PI * (3.0 - 5.0_f32.sqrt());
    vec2(angle.cos(), angle.sin()) * radius
}
