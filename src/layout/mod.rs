//! Force-directed layout: springs along edges, many-body repulsion and a
//! centering pull, integrated with velocity damping while the `alpha` energy
//! term cools toward rest.

mod forces;
mod quadtree;

use std::collections::HashSet;
use std::f32::consts::PI;

use eframe::egui::{Vec2, vec2};
use tracing::{debug, trace};

use crate::graph::{EdgeIndex, GraphModel, NodeIndex};

use forces::{ChargeParams, Spring, accumulate_charge, apply_springs, centering_shift};
use quadtree::QuadNode;

const INITIAL_RADIUS: f32 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutConfig {
    pub width: f32,
    pub height: f32,
    /// Pairwise charge; negative values repel.
    pub charge_strength: f32,
    /// Rest length of edge springs.
    pub link_distance: f32,
    /// Barnes-Hut opening angle.
    pub theta: f32,
    pub distance_min: f32,
    pub alpha_min: f32,
    pub alpha_decay: f32,
    /// Fraction of velocity lost every tick.
    pub velocity_decay: f32,
    /// Alpha target held while a drag is in progress.
    pub reheat_alpha: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let alpha_min = 0.001_f32;
        Self {
            width: 1600.0,
            height: 900.0,
            charge_strength: -300.0,
            link_distance: 30.0,
            theta: 0.9,
            distance_min: 1.0,
            alpha_min,
            alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
            velocity_decay: 0.4,
            reheat_alpha: 0.3,
        }
    }
}

impl LayoutConfig {
    pub fn with_viewport(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn center(&self) -> Vec2 {
        vec2(self.width * 0.5, self.height * 0.5)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeSegment {
    pub edge: EdgeIndex,
    pub from: Vec2,
    pub to: Vec2,
}

/// Positions emitted after one tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickFrame {
    pub nodes: Vec<(NodeIndex, Vec2)>,
    pub edges: Vec<EdgeSegment>,
}

pub struct Simulation {
    config: LayoutConfig,
    positions: Vec<Vec2>,
    velocities: Vec<Vec2>,
    pins: Vec<Option<Vec2>>,
    edges: Vec<(usize, usize)>,
    springs: Vec<Spring>,
    alpha: f32,
    alpha_target: f32,
    dragging: HashSet<usize>,
    previous: Vec<Vec2>,
    last_displacement: f32,
}

impl Simulation {
    pub fn new(graph: &GraphModel, config: LayoutConfig) -> Self {
        let center = config.center();
        let golden_angle = PI * (3.0 - 5.0_f32.sqrt());
        let positions = (0..graph.node_count())
            .map(|index| {
                let radius = INITIAL_RADIUS * (0.5 + index as f32).sqrt();
                let angle = index as f32 * golden_angle;
                center + vec2(angle.cos(), angle.sin()) * radius
            })
            .collect::<Vec<_>>();

        let edges = graph
            .edges()
            .iter()
            .map(|edge| (edge.source.0, edge.target.0))
            .collect::<Vec<_>>();

        let springs = edges
            .iter()
            .filter(|(source, target)| source != target)
            .map(|&(source, target)| {
                let source_degree = graph.degree(NodeIndex(source)).max(1) as f32;
                let target_degree = graph.degree(NodeIndex(target)).max(1) as f32;
                Spring {
                    source,
                    target,
                    strength: 1.0 / source_degree.min(target_degree),
                    bias: source_degree / (source_degree + target_degree),
                }
            })
            .collect();

        let node_count = positions.len();
        Self {
            config,
            velocities: vec![Vec2::ZERO; node_count],
            pins: vec![None; node_count],
            previous: Vec::with_capacity(node_count),
            positions,
            edges,
            springs,
            alpha: 1.0,
            alpha_target: 0.0,
            dragging: HashSet::new(),
            last_displacement: 0.0,
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Swaps the tunables; positions and velocities carry over.
    pub fn configure(&mut self, config: LayoutConfig) {
        self.config = config;
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn alpha_target(&self) -> f32 {
        self.alpha_target
    }

    pub fn is_settled(&self) -> bool {
        self.alpha < self.config.alpha_min && self.alpha_target < self.config.alpha_min
    }

    /// Sum of node movement during the most recent tick.
    pub fn last_displacement(&self) -> f32 {
        self.last_displacement
    }

    pub fn position(&self, node: NodeIndex) -> Option<Vec2> {
        self.positions.get(node.0).copied()
    }

    pub fn positions(&self) -> &[Vec2] {
        &self.positions
    }

    pub fn pinned(&self, node: NodeIndex) -> Option<Vec2> {
        self.pins.get(node.0).copied().flatten()
    }

    pub fn segment(&self, edge: EdgeIndex) -> Option<EdgeSegment> {
        let &(source, target) = self.edges.get(edge.0)?;
        Some(EdgeSegment {
            edge,
            from: self.positions[source],
            to: self.positions[target],
        })
    }

    /// Runs one step unless the layout has cooled down.
    pub fn tick(&mut self) -> Option<TickFrame> {
        if self.is_settled() {
            return None;
        }
        self.step();
        if self.is_settled() {
            debug!(alpha = self.alpha, "layout settled");
        }
        Some(self.frame())
    }

    /// Current positions of every node and edge.
    pub fn frame(&self) -> TickFrame {
        TickFrame {
            nodes: self
                .positions
                .iter()
                .enumerate()
                .map(|(index, position)| (NodeIndex(index), *position))
                .collect(),
            edges: (0..self.edges.len())
                .filter_map(|index| self.segment(EdgeIndex(index)))
                .collect(),
        }
    }

    /// One integration step regardless of alpha.
    pub fn step(&mut self) {
        let node_count = self.positions.len();
        self.alpha += (self.alpha_target - self.alpha) * self.config.alpha_decay;
        if node_count == 0 {
            self.last_displacement = 0.0;
            return;
        }

        let alpha = self.alpha;
        self.previous.clear();
        self.previous.extend_from_slice(&self.positions);

        apply_springs(
            &self.springs,
            &self.positions,
            &mut self.velocities,
            self.config.link_distance,
            alpha,
        );

        if let Some(tree) = QuadNode::build(&self.positions) {
            let params = ChargeParams {
                strength: self.config.charge_strength,
                alpha,
                theta_sq: self.config.theta * self.config.theta,
                distance_min_sq: self.config.distance_min * self.config.distance_min,
            };
            for (index, velocity) in self.velocities.iter_mut().enumerate() {
                accumulate_charge(&tree, index, &self.positions, params, velocity);
            }
        }

        let shift = centering_shift(&self.positions, self.config.center());
        for position in &mut self.positions {
            *position -= shift;
        }

        let retained = 1.0 - self.config.velocity_decay;
        for ((position, velocity), pin) in self
            .positions
            .iter_mut()
            .zip(self.velocities.iter_mut())
            .zip(self.pins.iter())
        {
            if let Some(pin) = pin {
                *position = *pin;
                *velocity = Vec2::ZERO;
            } else {
                *velocity *= retained;
                *position += *velocity;
            }
        }

        self.last_displacement = self
            .positions
            .iter()
            .zip(&self.previous)
            .map(|(now, before)| (*now - *before).length())
            .sum();
        trace!(alpha, displacement = self.last_displacement, "layout tick");
    }

    /// Restarts a cooled layout at full energy.
    pub fn reheat(&mut self) {
        self.alpha = 1.0;
    }

    /// Pins `node` under the pointer and keeps the layout hot until every
    /// drag has ended.
    pub fn begin_drag(&mut self, node: NodeIndex, pointer: Vec2) {
        let Some(pin) = self.pins.get_mut(node.0) else {
            return;
        };
        *pin = Some(pointer);
        if self.dragging.is_empty() {
            self.alpha_target = self.config.reheat_alpha;
        }
        self.dragging.insert(node.0);
    }

    pub fn drag_to(&mut self, node: NodeIndex, pointer: Vec2) {
        if self.dragging.contains(&node.0) {
            self.pins[node.0] = Some(pointer);
        }
    }

    pub fn end_drag(&mut self, node: NodeIndex) {
        if !self.dragging.remove(&node.0) {
            return;
        }
        self.pins[node.0] = None;
        if self.dragging.is_empty() {
            self.alpha_target = 0.0;
        }
    }
}
