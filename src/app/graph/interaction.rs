use bionet_explorer::{EdgeIndex, Element, NodeIndex};
use eframe::egui::{self, Pos2, Rect, Ui};

use super::super::ViewModel;
use super::super::render_utils::{node_radius, segment_distance};

/// Screen-space slack around an edge line that still counts as a hit.
const EDGE_HIT_TOLERANCE: f32 = 4.0;

/// Screen-space endpoints of one edge segment.
pub(super) struct ProjectedEdge {
    pub(super) edge: EdgeIndex,
    pub(super) start: Pos2,
    pub(super) end: Pos2,
}

/// The latest tick frame projected onto the canvas.
pub(super) struct Projection {
    pub(super) origin: Pos2,
    pub(super) positions: Vec<Pos2>,
    pub(super) radii: Vec<f32>,
    pub(super) edges: Vec<ProjectedEdge>,
}

impl ViewModel {
    pub(in crate::app) fn handle_graph_zoom(
        &mut self,
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
    ) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| rect.center());
        let zoom_factor = (1.0 + (scroll * 0.0018)).clamp(0.85, 1.15);
        self.view.zoom_about(rect.center(), pointer, zoom_factor);
    }

    pub(super) fn project(&self, rect: Rect) -> Projection {
        let origin = rect.center();
        let graph = self.explorer.graph();
        let zoom = self.view.zoom();

        let mut positions = Vec::with_capacity(self.frame.nodes.len());
        let mut radii = Vec::with_capacity(self.frame.nodes.len());
        for &(node, position) in &self.frame.nodes {
            let category = graph
                .node(node)
                .map_or("", |node| node.category_or_uncategorized());
            positions.push(self.view.world_to_screen(origin, position));
            radii.push((node_radius(category) * zoom).max(2.0));
        }

        let edges = self
            .frame
            .edges
            .iter()
            .map(|segment| ProjectedEdge {
                edge: segment.edge,
                start: self.view.world_to_screen(origin, segment.from),
                end: self.view.world_to_screen(origin, segment.to),
            })
            .collect();

        Projection {
            origin,
            positions,
            radii,
            edges,
        }
    }

    /// Topmost interactive element under `pointer`. Nodes win over edges.
    pub(super) fn hit_test(&self, projection: &Projection, pointer: Pos2) -> Option<Element> {
        let node_hit = projection
            .positions
            .iter()
            .zip(&projection.radii)
            .enumerate()
            .filter_map(|(index, (position, radius))| {
                let distance = position.distance(pointer);
                (distance <= *radius).then_some((NodeIndex(index), distance))
            })
            .filter(|(node, _)| {
                self.explorer
                    .node_view(*node)
                    .is_some_and(|view| view.visibility.is_interactive())
            })
            .min_by(|a, b| a.1.total_cmp(&b.1));
        if let Some((node, _)) = node_hit {
            return Some(Element::Node(node));
        }

        projection
            .edges
            .iter()
            .filter_map(|projected| {
                let distance = segment_distance(pointer, projected.start, projected.end);
                (distance <= EDGE_HIT_TOLERANCE).then_some((projected.edge, distance))
            })
            .filter(|(edge, _)| {
                self.explorer
                    .edge_view(*edge)
                    .is_some_and(|view| view.visibility.is_interactive())
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(edge, _)| Element::Edge(edge))
    }

    fn set_hovered(&mut self, hovered: Option<Element>) {
        if hovered == self.pointer.hovered {
            return;
        }

        match self.pointer.hovered {
            Some(Element::Node(node)) => self.explorer.on_node_hover_end(node),
            Some(Element::Edge(edge)) => self.explorer.on_edge_hover_end(edge),
            None => {}
        }
        match hovered {
            Some(Element::Node(node)) => self.explorer.on_node_hover(node),
            Some(Element::Edge(edge)) => self.explorer.on_edge_hover(edge),
            None => {}
        }
        self.pointer.hovered = hovered;
    }

    /// Routes this frame's pointer activity on the canvas into the explorer.
    pub(super) fn handle_graph_pointer(
        &mut self,
        ui: &Ui,
        response: &egui::Response,
        projection: &Projection,
    ) {
        let pointer = ui.input(|input| input.pointer.hover_pos());
        let hit = pointer
            .filter(|_| response.hovered())
            .and_then(|pointer| self.hit_test(projection, pointer));

        if self.pointer.dragging.is_none() {
            self.set_hovered(hit);
        }
        if hit.is_some() || self.pointer.dragging.is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }

        if response.drag_started_by(egui::PointerButton::Primary)
            && let Some(origin) = ui.input(|input| input.pointer.press_origin())
            && let Some(Element::Node(node)) = self.hit_test(projection, origin)
        {
            let world = self.view.screen_to_world(projection.origin, origin);
            if self.explorer.on_drag_start(node, world) {
                self.pointer.dragging = Some(node);
            }
        }

        if let Some(node) = self.pointer.dragging {
            if let Some(position) = response.interact_pointer_pos() {
                let world = self.view.screen_to_world(projection.origin, position);
                self.explorer.on_drag(node, world);
            }
            if response.drag_stopped() || !response.dragged() {
                self.explorer.on_drag_end(node);
                self.pointer.dragging = None;
            }
        } else if response.dragged_by(egui::PointerButton::Primary)
            || response.dragged_by(egui::PointerButton::Secondary)
            || response.dragged_by(egui::PointerButton::Middle)
        {
            self.view.pan_by(response.drag_delta());
        }

        if response.clicked_by(egui::PointerButton::Primary) {
            match hit {
                Some(Element::Node(node)) => self.explorer.on_node_click(node),
                Some(Element::Edge(edge)) => self.explorer.on_edge_click(edge),
                None => self.explorer.on_background_click(),
            }
        }
    }
}
