use eframe::egui::{Vec2, vec2};

use super::Body;

const MIN_DISTANCE: f32 = 1.0;
const COINCIDENT_EPSILON: f32 = 0.0001;

// Unit vector from `b` towards `a`; coincident points split along +x.
fn separation_direction(a: Vec2, b: Vec2) -> (Vec2, f32) {
    let delta = a - b;
    let distance = delta.length();
    if distance > COINCIDENT_EPSILON {
        (delta / distance, distance)
    } else {
        (vec2(1.0, 0.0), 0.0)
    }
}

pub(super) fn apply_repulsion(bodies: &mut [Body], strength: f32, alpha: f32) {
    let count = bodies.len();
    if count < 2 || strength <= 0.0 || alpha <= 0.0 {
        return;
    }

    for i in 0..count {
        for j in (i + 1)..count {
            let (direction, distance) =
                separation_direction(bodies[i].position, bodies[j].position);
            let push = direction * (strength * alpha / distance.max(MIN_DISTANCE));

            bodies[i].velocity += push;
            bodies[j].velocity -= push;
        }
    }
}

pub(super) fn apply_centering(bodies: &mut [Body], center: Vec2, strength: f32) {
    if bodies.is_empty() || strength <= 0.0 {
        return;
    }

    let mut centroid = Vec2::ZERO;
    for body in bodies.iter() {
        centroid += body.position;
    }
    centroid /= bodies.len() as f32;

    let correction = (center - centroid) * strength;
    if correction.length_sq() <= f32::EPSILON {
        return;
    }

    for body in bodies.iter_mut().filter(|body| body.pinned.is_none()) {
        body.velocity += correction;
    }
}

// Per-body spring toward the center, fading with alpha.
pub(super) fn apply_pull(bodies: &mut [Body], center: Vec2, strength: f32, alpha: f32) {
    if strength <= 0.0 || alpha <= 0.0 {
        return;
    }

    for body in bodies.iter_mut().filter(|body| body.pinned.is_none()) {
        body.velocity += (center - body.position) * (strength * alpha);
    }
}

pub(super) fn resolve_collisions(bodies: &mut [Body], padding: f32, passes: usize) -> f32 {
    let count = bodies.len();
    let mut worst_overlap = 0.0_f32;
    if count < 2 {
        return worst_overlap;
    }

    for _ in 0..passes.max(1) {
        worst_overlap = 0.0;
        for i in 0..count {
            for j in (i + 1)..count {
                let i_pinned = bodies[i].pinned.is_some();
                let j_pinned = bodies[j].pinned.is_some();
                if i_pinned && j_pinned {
                    continue;
                }

                let min_distance = bodies[i].radius() + bodies[j].radius() + padding;
                let (direction, distance) =
                    separation_direction(bodies[i].position, bodies[j].position);
                if distance >= min_distance {
                    continue;
                }

                let overlap = min_distance - distance;
                worst_overlap = worst_overlap.max(overlap);

                let (share_i, share_j) = if i_pinned {
                    (0.0, 1.0)
                } else if j_pinned {
                    (1.0, 0.0)
                } else {
                    let area_i = bodies[i].radius() * bodies[i].radius();
                    let area_j = bodies[j].radius() * bodies[j].radius();
                    let share_i = area_j / (area_i + area_j);
                    (share_i, 1.0 - share_i)
                };

                bodies[i].position += direction * (overlap * share_i);
                bodies[j].position -= direction * (overlap * share_j);
            }
        }

        if worst_overlap <= 0.0 {
            break;
        }
    }

    worst_overlap
}
