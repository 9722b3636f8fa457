//! The session object tying the graph, layout, selection and filter together
//! behind the hooks a rendering surface calls.

use eframe::egui::Vec2;
use tracing::{debug, info};

use crate::detail::DetailRecord;
use crate::filter::{EdgeDecoration, FilterCriteria, PolicyKind, Visibility, VisibilityFilter};
use crate::graph::{EdgeIndex, Element, GraphModel, NodeIndex};
use crate::layout::{EdgeSegment, LayoutConfig, Simulation, TickFrame};
use crate::selection::{ElementState, Selection, SelectionController};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ExplorerConfig {
    pub layout: LayoutConfig,
    pub policy: PolicyKind,
}

/// Display state of one node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeView {
    pub position: Vec2,
    pub visibility: Visibility,
    pub state: ElementState,
}

/// Display state of one edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeView {
    pub segment: EdgeSegment,
    pub visibility: Visibility,
    pub state: ElementState,
    pub decoration: EdgeDecoration,
}

pub struct Explorer {
    graph: GraphModel,
    simulation: Simulation,
    selection: SelectionController,
    filter: VisibilityFilter,
}

impl Explorer {
    pub fn new(graph: GraphModel, config: ExplorerConfig) -> Self {
        let simulation = Simulation::new(&graph, config.layout);
        let filter = VisibilityFilter::new(&graph, config.policy);
        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            policy = config.policy.label(),
            "explorer session started"
        );
        Self {
            graph,
            simulation,
            selection: SelectionController::new(),
            filter,
        }
    }

    pub fn graph(&self) -> &GraphModel {
        &self.graph
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    pub fn selection(&self) -> Selection {
        self.selection.selection()
    }

    pub fn policy(&self) -> PolicyKind {
        self.filter.kind()
    }

    pub fn criteria(&self) -> &FilterCriteria {
        self.filter.criteria()
    }

    pub fn categories(&self) -> Vec<String> {
        self.graph.categories()
    }

    pub fn scales(&self) -> Vec<String> {
        self.graph.scales()
    }

    /// Advances the layout one step; `None` once it has settled.
    pub fn tick(&mut self) -> Option<TickFrame> {
        self.simulation.tick()
    }

    /// Current positions without stepping the layout.
    pub fn frame(&self) -> TickFrame {
        self.simulation.frame()
    }

    pub fn is_settled(&self) -> bool {
        self.simulation.is_settled()
    }

    pub fn reheat(&mut self) {
        self.simulation.reheat();
    }

    pub fn configure_layout(&mut self, config: LayoutConfig) {
        self.simulation.configure(config);
        self.simulation.reheat();
    }

    fn node_interactive(&self, node: NodeIndex) -> bool {
        self.graph.node(node).is_some() && self.filter.node(node).is_interactive()
    }

    fn edge_interactive(&self, edge: EdgeIndex) -> bool {
        self.graph.edge(edge).is_some() && self.filter.edge(edge).is_interactive()
    }

    pub fn on_node_hover(&mut self, node: NodeIndex) {
        if self.node_interactive(node) {
            self.selection.hover(Element::Node(node));
        }
    }

    pub fn on_node_hover_end(&mut self, node: NodeIndex) {
        self.selection.hover_end(Element::Node(node));
    }

    pub fn on_edge_hover(&mut self, edge: EdgeIndex) {
        if self.edge_interactive(edge) {
            self.selection.hover(Element::Edge(edge));
            self.filter.decorate(&self.graph, edge);
        }
    }

    pub fn on_edge_hover_end(&mut self, edge: EdgeIndex) {
        self.selection.hover_end(Element::Edge(edge));
        self.filter.undecorate(edge);
    }

    pub fn on_node_click(&mut self, node: NodeIndex) {
        if self.node_interactive(node) {
            self.selection.click(Element::Node(node));
        }
    }

    pub fn on_edge_click(&mut self, edge: EdgeIndex) {
        if self.edge_interactive(edge) {
            self.selection.click(Element::Edge(edge));
        }
    }

    pub fn on_background_click(&mut self) {
        self.selection.clear_background();
    }

    /// Returns false when the node cannot be dragged.
    pub fn on_drag_start(&mut self, node: NodeIndex, pointer: Vec2) -> bool {
        if !self.node_interactive(node) {
            return false;
        }
        debug!(node = node.0, "drag started");
        self.simulation.begin_drag(node, pointer);
        true
    }

    pub fn on_drag(&mut self, node: NodeIndex, pointer: Vec2) {
        self.simulation.drag_to(node, pointer);
    }

    pub fn on_drag_end(&mut self, node: NodeIndex) {
        self.simulation.end_drag(node);
    }

    /// Recomputes visibility. A hover on an element that is no longer
    /// interactive ends here.
    pub fn set_filter(&mut self, criteria: FilterCriteria) {
        self.filter.apply(&self.graph, criteria);

        match self.selection.hovered() {
            Some(Element::Node(node)) if !self.node_interactive(node) => {
                debug!(node = node.0, "hover ended by filter");
                self.on_node_hover_end(node);
            }
            Some(Element::Edge(edge)) if !self.edge_interactive(edge) => {
                debug!(edge = edge.0, "hover ended by filter");
                self.on_edge_hover_end(edge);
            }
            _ => {}
        }
    }

    pub fn node_view(&self, node: NodeIndex) -> Option<NodeView> {
        Some(NodeView {
            position: self.simulation.position(node)?,
            visibility: self.filter.node(node),
            state: self.selection.state_of(Element::Node(node)),
        })
    }

    pub fn edge_view(&self, edge: EdgeIndex) -> Option<EdgeView> {
        Some(EdgeView {
            segment: self.simulation.segment(edge)?,
            visibility: self.filter.edge(edge),
            state: self.selection.state_of(Element::Edge(edge)),
            decoration: self.filter.decoration(edge),
        })
    }

    /// Record for the locked element, or the hovered one when nothing is
    /// locked.
    pub fn detail(&self) -> Option<DetailRecord> {
        let target = self.selection.detail_target()?;
        DetailRecord::for_element(&self.graph, target)
    }

    pub fn detail_locked(&self) -> bool {
        self.selection.is_locked()
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::vec2;

    use super::*;
    use crate::graph::{RawEdge, RawNode};

    fn explorer(policy: PolicyKind) -> Explorer {
        let graph = GraphModel::build(
            vec![
                RawNode::new("SNCA").with_scale("molecular").with_category("protein"),
                RawNode::new("Tremor").with_scale("clinical").with_category("clinical_symptom"),
                RawNode::new("LRRK2").with_scale("molecular").with_category("protein"),
            ],
            vec![
                RawEdge::new("SNCA", "Tremor").with_interaction("contributes_to").directed(),
                RawEdge::new("LRRK2", "SNCA").with_interaction("phosphorylates"),
            ],
        );
        Explorer::new(
            graph,
            ExplorerConfig {
                policy,
                ..ExplorerConfig::default()
            },
        )
    }

    const SNCA: NodeIndex = NodeIndex(0);
    const TREMOR: NodeIndex = NodeIndex(1);
    const CAUSES: EdgeIndex = EdgeIndex(0);

    #[test]
    fn hover_shows_transient_detail_until_hover_ends() {
        let mut explorer = explorer(PolicyKind::Scale);
        explorer.on_node_hover(SNCA);
        assert_eq!(explorer.detail().map(|record| record.title), Some("SNCA".to_owned()));
        assert!(!explorer.detail_locked());

        explorer.on_node_hover_end(SNCA);
        assert!(explorer.detail().is_none());
    }

    #[test]
    fn lock_pins_detail_against_hover() {
        let mut explorer = explorer(PolicyKind::Scale);
        explorer.on_edge_click(CAUSES);
        explorer.on_node_hover(TREMOR);

        let detail = explorer.detail().unwrap();
        assert_eq!(detail.get("Interaction"), Some("contributes to"));
        assert!(explorer.detail_locked());

        explorer.on_edge_click(CAUSES);
        assert!(explorer.detail().is_none());
    }

    #[test]
    fn edge_hover_decorates_directed_edge() {
        let mut explorer = explorer(PolicyKind::Scale);
        explorer.on_edge_hover(CAUSES);
        let view = explorer.edge_view(CAUSES).unwrap();
        assert!(view.decoration.label_visible);
        assert!(view.decoration.arrow_visible);
        assert_eq!(view.state, ElementState::Hovered);

        explorer.on_edge_hover_end(CAUSES);
        assert!(!explorer.edge_view(CAUSES).unwrap().decoration.is_shown());
    }

    #[test]
    fn suppressed_elements_ignore_interaction() {
        let mut explorer = explorer(PolicyKind::Scale);
        explorer.set_filter(FilterCriteria::scale("molecular", false));

        explorer.on_node_hover(TREMOR);
        explorer.on_node_click(TREMOR);
        explorer.on_edge_hover(CAUSES);
        assert!(!explorer.on_drag_start(TREMOR, vec2(0.0, 0.0)));

        assert_eq!(explorer.selection(), Selection::None);
        assert!(explorer.detail().is_none());
        assert!(!explorer.edge_view(CAUSES).unwrap().decoration.is_shown());
        assert_eq!(explorer.node_view(TREMOR).unwrap().visibility.opacity(), 0.01);
    }

    #[test]
    fn filter_change_clears_decorations_of_hidden_edges() {
        let mut explorer = explorer(PolicyKind::Category);
        explorer.on_edge_hover(CAUSES);

        let mut criteria = FilterCriteria::all(explorer.graph());
        criteria.categories.remove("clinical_symptom");
        explorer.set_filter(criteria);
        assert!(!explorer.edge_view(CAUSES).unwrap().decoration.is_shown());
        assert_eq!(explorer.edge_view(EdgeIndex(1)).unwrap().visibility, Visibility::Full);

        explorer.set_filter(FilterCriteria::all(explorer.graph()));
        assert_eq!(explorer.node_view(TREMOR).unwrap().visibility, Visibility::Full);
    }

    #[test]
    fn filter_ends_hover_on_suppressed_elements() {
        let mut explorer = explorer(PolicyKind::Scale);
        explorer.on_node_hover(TREMOR);
        explorer.set_filter(FilterCriteria::scale("molecular", false));

        let view = explorer.node_view(TREMOR).unwrap();
        assert_eq!(view.visibility, Visibility::Suppressed);
        assert_eq!(view.state, ElementState::Idle);
        assert!(explorer.detail().is_none());

        explorer.set_filter(FilterCriteria::all(explorer.graph()));
        explorer.on_edge_hover(CAUSES);
        explorer.set_filter(FilterCriteria::scale("molecular", false));
        let view = explorer.edge_view(CAUSES).unwrap();
        assert_eq!(view.state, ElementState::Idle);
        assert!(!view.decoration.is_shown());
        assert!(explorer.detail().is_none());
    }

    #[test]
    fn filter_keeps_hover_on_interactive_elements() {
        let mut explorer = explorer(PolicyKind::Scale);
        explorer.on_node_hover(SNCA);
        explorer.set_filter(FilterCriteria::scale("clinical", true));

        assert_eq!(explorer.node_view(SNCA).unwrap().visibility, Visibility::Dimmed);
        assert_eq!(explorer.node_view(SNCA).unwrap().state, ElementState::Hovered);
        assert_eq!(explorer.detail().map(|record| record.title), Some("SNCA".to_owned()));
    }

    #[test]
    fn frame_matches_ticked_positions() {
        let mut explorer = explorer(PolicyKind::Scale);
        let ticked = explorer.tick().unwrap();
        assert_eq!(explorer.frame(), ticked);
        assert_eq!(ticked.edges[0].from, explorer.node_view(SNCA).unwrap().position);
    }

    #[test]
    fn drag_moves_node_and_reheats_layout() {
        let mut explorer = explorer(PolicyKind::Scale);
        while explorer.tick().is_some() {}
        assert!(explorer.is_settled());

        assert!(explorer.on_drag_start(SNCA, vec2(100.0, 100.0)));
        explorer.on_drag(SNCA, vec2(140.0, 90.0));
        assert!(explorer.tick().is_some());
        assert_eq!(explorer.node_view(SNCA).unwrap().position, vec2(140.0, 90.0));

        explorer.on_drag_end(SNCA);
        while explorer.tick().is_some() {}
        assert!(explorer.is_settled());
    }

    #[test]
    fn background_click_releases_lock() {
        let mut explorer = explorer(PolicyKind::Scale);
        explorer.on_node_click(SNCA);
        assert_eq!(explorer.node_view(SNCA).unwrap().state, ElementState::Locked);

        explorer.on_background_click();
        assert_eq!(explorer.selection(), Selection::None);
        assert_eq!(explorer.node_view(SNCA).unwrap().state, ElementState::Idle);
    }

    #[test]
    fn lists_filter_choices() {
        let explorer = explorer(PolicyKind::Scale);
        assert_eq!(explorer.scales(), vec!["clinical", "molecular"]);
        assert_eq!(explorer.categories(), vec!["protein", "clinical_symptom"]);
        assert!(explorer.node_view(NodeIndex(9)).is_none());
    }
}
