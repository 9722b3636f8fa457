use std::collections::HashSet;
use std::sync::Arc;

use bionet_explorer::{ElementState, NodeIndex, humanize};
use eframe::egui::{self, Align2, Color32, FontId, Sense, Stroke, Ui, vec2};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use super::super::render_utils::{
    blend_color, category_color, draw_arrowhead, draw_background, with_opacity,
};
use super::super::{SearchMatchCache, ViewModel};

const SELECTED_COLOR: Color32 = Color32::from_rgb(245, 206, 93);
const SEARCH_COLOR: Color32 = Color32::from_rgb(103, 196, 255);
const EDGE_COLOR: Color32 = Color32::from_rgb(153, 153, 153);

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}

impl ViewModel {
    fn cached_search_matches(&mut self) -> Option<Arc<HashSet<NodeIndex>>> {
        let query = self.search.trim();
        if query.is_empty() {
            return None;
        }

        if let Some(cached) = &self.search_match_cache
            && cached.query == query
        {
            return Some(Arc::clone(&cached.matches));
        }

        let matcher = SkimMatcherV2::default();
        let matches = self
            .explorer
            .graph()
            .nodes()
            .iter()
            .enumerate()
            .filter(|(_, node)| {
                fuzzy_match_score(&matcher, &node.name, query).is_some()
                    || fuzzy_match_score(&matcher, &node.id, query).is_some()
            })
            .map(|(index, _)| NodeIndex(index))
            .collect::<HashSet<_>>();
        let matches = Arc::new(matches);

        self.search_match_cache = Some(SearchMatchCache {
            query: query.to_owned(),
            matches: Arc::clone(&matches),
        });

        Some(matches)
    }

    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        draw_background(&painter, rect, &self.view);
        self.handle_graph_zoom(ui, rect, &response);

        if (self.live_physics || self.pointer.dragging.is_some())
            && let Some(frame) = self.explorer.tick()
        {
            self.frame = frame;
            ui.ctx().request_repaint();
        }

        let projection = self.project(rect);
        self.handle_graph_pointer(ui, &response, &projection);

        let search_matches = self.cached_search_matches();
        let zoom = self.view.zoom();
        let zoom_sqrt = zoom.sqrt();
        let graph = self.explorer.graph();

        for projected in &projection.edges {
            let (Some(edge), Some(view)) = (
                graph.edge(projected.edge),
                self.explorer.edge_view(projected.edge),
            ) else {
                continue;
            };
            let (start, end) = (projected.start, projected.end);

            let opacity = view.visibility.opacity();
            let (width, color) = match view.state {
                ElementState::Locked => ((2.6 * zoom_sqrt).clamp(1.4, 4.6), SELECTED_COLOR),
                ElementState::Hovered => (
                    (2.2 * zoom_sqrt).clamp(1.2, 4.0),
                    blend_color(EDGE_COLOR, Color32::WHITE, 0.45),
                ),
                ElementState::Idle => ((1.4 * zoom_sqrt).clamp(0.6, 3.0), EDGE_COLOR),
            };
            let color = with_opacity(color, opacity * 0.8);
            painter.line_segment([start, end], Stroke::new(width, color));

            if view.decoration.arrow_visible {
                let target_radius = projection.radii.get(edge.target.0).copied().unwrap_or(0.0);
                draw_arrowhead(&painter, start, end, target_radius, zoom, color);
            }
            if view.decoration.label_visible && !edge.interaction.is_empty() {
                painter.text(
                    start + (end - start) * 0.5,
                    Align2::CENTER_BOTTOM,
                    humanize(&edge.interaction),
                    FontId::proportional((12.0 * zoom).clamp(9.0, 20.0)),
                    with_opacity(Color32::from_gray(235), opacity),
                );
            }
        }

        let mut selection_animating = false;
        for (index, node) in graph.nodes().iter().enumerate() {
            let node_index = NodeIndex(index);
            let Some(view) = self.explorer.node_view(node_index) else {
                continue;
            };
            let (Some(&position), Some(&radius)) =
                (projection.positions.get(index), projection.radii.get(index))
            else {
                continue;
            };
            let opacity = view.visibility.opacity();

            let base_color = category_color(node.category_or_uncategorized());
            let color = if view.state == ElementState::Hovered {
                blend_color(base_color, Color32::WHITE, 0.3)
            } else {
                base_color
            };

            let selection_mix = ui.ctx().animate_bool(
                ui.make_persistent_id(("node-selection", index)),
                view.state == ElementState::Locked,
            );
            if selection_mix > 0.0 && selection_mix < 1.0 {
                selection_animating = true;
            }

            painter.circle_filled(position, radius, with_opacity(color, opacity));
            painter.circle_stroke(
                position,
                radius,
                Stroke::new(1.5, with_opacity(Color32::WHITE, opacity)),
            );

            if selection_mix > 0.0 {
                painter.circle_stroke(
                    position,
                    radius + 3.0 + ((1.0 - selection_mix) * 6.0),
                    Stroke::new(2.0, with_opacity(SELECTED_COLOR, selection_mix * opacity)),
                );
            }

            let is_search_match = search_matches
                .as_ref()
                .is_some_and(|matches| matches.contains(&node_index));
            if is_search_match && view.visibility.is_interactive() {
                painter.circle_stroke(
                    position,
                    radius + 5.0,
                    Stroke::new(1.6, with_opacity(SEARCH_COLOR, opacity)),
                );
            }

            let show_label = zoom > 0.35 || view.state != ElementState::Idle || is_search_match;
            if show_label {
                painter.text(
                    position + vec2(radius + 4.0, 4.0 * zoom),
                    Align2::LEFT_CENTER,
                    &node.name,
                    FontId::proportional((14.0 * zoom).clamp(8.0, 24.0)),
                    with_opacity(Color32::from_gray(238), opacity),
                );
            }
        }

        if selection_animating {
            ui.ctx().request_repaint();
        }

        if self.pointer.dragging.is_some() || response.dragged() {
            ui.ctx().request_repaint();
        }
        ui.output_mut(|output| {
            if response.dragged_by(egui::PointerButton::Secondary) {
                output.cursor_icon = egui::CursorIcon::Grabbing;
            }
        });
    }
}
