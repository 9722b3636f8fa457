use std::f32::consts::TAU;

use eframe::egui::{Vec2, vec2};

use super::quadtree::QuadNode;

/// Tiny deterministic offset used when two bodies coincide.
pub(super) fn jiggle(a: usize, b: usize) -> Vec2 {
    let angle = ((a as f32) * 0.618_034 + (b as f32) * 0.414_214 + 0.11) * TAU;
    vec2(angle.cos(), angle.sin()) * 1e-3
}

#[derive(Clone, Copy, Debug)]
pub(super) struct ChargeParams {
    pub(super) strength: f32,
    pub(super) alpha: f32,
    pub(super) theta_sq: f32,
    pub(super) distance_min_sq: f32,
}

impl ChargeParams {
    /// Velocity change for a body at `delta` from a charge of `weight` bodies.
    fn pull(self, mut delta: Vec2, weight: f32, salt: (usize, usize)) -> Vec2 {
        let mut distance_sq = delta.length_sq();
        if distance_sq == 0.0 {
            delta = jiggle(salt.0, salt.1);
            distance_sq = delta.length_sq();
        }
        if distance_sq < self.distance_min_sq {
            distance_sq = (self.distance_min_sq * distance_sq).sqrt();
        }
        delta * (self.strength * weight * self.alpha / distance_sq)
    }
}

/// Many-body force on body `index`, walking the quadtree and approximating
/// cells that are far enough away by their centroid.
pub(super) fn accumulate_charge(
    cell: &QuadNode,
    index: usize,
    positions: &[Vec2],
    params: ChargeParams,
    velocity: &mut Vec2,
) {
    if cell.count == 0 {
        return;
    }

    let point = positions[index];
    if cell.is_leaf() {
        for &other in &cell.indices {
            if other != index {
                *velocity += params.pull(positions[other] - point, 1.0, (index, other));
            }
        }
        return;
    }

    let delta = cell.centroid - point;
    let width = cell.bounds.width();
    if !cell.bounds.contains(point) && width * width / params.theta_sq < delta.length_sq() {
        *velocity += params.pull(delta, cell.count as f32, (index, cell.count));
        return;
    }

    for child in cell.children() {
        accumulate_charge(child, index, positions, params, velocity);
    }
}

/// Spring along one edge, applied to predicted positions and split between
/// the endpoints by `bias`.
#[derive(Clone, Copy, Debug)]
pub(super) struct Spring {
    pub(super) source: usize,
    pub(super) target: usize,
    pub(super) strength: f32,
    pub(super) bias: f32,
}

pub(super) fn apply_springs(
    springs: &[Spring],
    positions: &[Vec2],
    velocities: &mut [Vec2],
    distance: f32,
    alpha: f32,
) {
    for spring in springs {
        let (source, target) = (spring.source, spring.target);
        let mut delta = (positions[target] + velocities[target]) - (positions[source] + velocities[source]);
        if delta.length_sq() == 0.0 {
            delta = jiggle(source, target);
        }

        let length = delta.length();
        let correction = delta * ((length - distance) / length * alpha * spring.strength);
        velocities[target] -= correction * spring.bias;
        velocities[source] += correction * (1.0 - spring.bias);
    }
}

/// Shift that moves the centroid of `positions` onto `center`.
pub(super) fn centering_shift(positions: &[Vec2], center: Vec2) -> Vec2 {
    if positions.is_empty() {
        return Vec2::ZERO;
    }
    let sum = positions.iter().fold(Vec2::ZERO, |sum, position| sum + *position);
    sum / positions.len() as f32 - center
}
