//! Per-element visibility tiers derived from the active filter, plus the
//! hover decorations (label and arrow) that survive recomputation.

mod category;
mod scale;

use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::graph::{EdgeIndex, GraphModel, NodeIndex};

pub use category::CategoryPolicy;
pub use scale::ScalePolicy;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Visibility {
    Full,
    Dimmed,
    Suppressed,
}

impl Visibility {
    pub fn opacity(self) -> f32 {
        match self {
            Self::Full => 1.0,
            Self::Dimmed => 0.3,
            Self::Suppressed => 0.01,
        }
    }

    /// Suppressed elements ignore hover, click and drag.
    pub fn is_interactive(self) -> bool {
        self != Self::Suppressed
    }
}

/// Edge tier from its endpoint tiers, shared by every policy.
pub fn edge_visibility(source: Visibility, target: Visibility) -> Visibility {
    match (source, target) {
        (Visibility::Full, Visibility::Full) => Visibility::Full,
        (Visibility::Dimmed, _) | (_, Visibility::Dimmed) => Visibility::Dimmed,
        _ => Visibility::Suppressed,
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ScaleSelection {
    #[default]
    All,
    Only(String),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub scale: ScaleSelection,
    pub show_connected: bool,
    pub categories: BTreeSet<String>,
}

impl FilterCriteria {
    /// Criteria that hide nothing.
    pub fn all(graph: &GraphModel) -> Self {
        Self {
            scale: ScaleSelection::All,
            show_connected: false,
            categories: graph.categories().into_iter().collect(),
        }
    }

    pub fn scale(scale: impl Into<String>, show_connected: bool) -> Self {
        Self {
            scale: ScaleSelection::Only(scale.into()),
            show_connected,
            ..Self::default()
        }
    }

    pub fn categories<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            categories: categories.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}

/// Strategy deciding node tiers for a set of criteria.
pub trait FilterPolicy {
    fn node_visibility(
        &self,
        graph: &GraphModel,
        criteria: &FilterCriteria,
        node: NodeIndex,
    ) -> Visibility;

    /// True when the criteria hide nothing; the filter then resets every
    /// tier and decoration.
    fn is_unrestricted(&self, graph: &GraphModel, criteria: &FilterCriteria) -> bool;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PolicyKind {
    #[default]
    Scale,
    Category,
}

impl PolicyKind {
    pub fn policy(self) -> Box<dyn FilterPolicy> {
        match self {
            Self::Scale => Box::new(ScalePolicy),
            Self::Category => Box::new(CategoryPolicy),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Scale => "scale",
            Self::Category => "category",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EdgeDecoration {
    pub label_visible: bool,
    pub arrow_visible: bool,
}

impl EdgeDecoration {
    pub fn is_shown(self) -> bool {
        self.label_visible || self.arrow_visible
    }
}

pub struct VisibilityFilter {
    kind: PolicyKind,
    policy: Box<dyn FilterPolicy>,
    criteria: FilterCriteria,
    nodes: Vec<Visibility>,
    edges: Vec<Visibility>,
    decorations: Vec<EdgeDecoration>,
}

impl VisibilityFilter {
    pub fn new(graph: &GraphModel, kind: PolicyKind) -> Self {
        Self {
            kind,
            policy: kind.policy(),
            criteria: FilterCriteria::all(graph),
            nodes: vec![Visibility::Full; graph.node_count()],
            edges: vec![Visibility::Full; graph.edge_count()],
            decorations: vec![EdgeDecoration::default(); graph.edge_count()],
        }
    }

    pub fn kind(&self) -> PolicyKind {
        self.kind
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Recomputes every tier. Decorations of edges that stay interactive are
    /// kept; suppressed edges lose theirs. A graph of a different shape than
    /// the one the filter was built for is ignored.
    pub fn apply(&mut self, graph: &GraphModel, criteria: FilterCriteria) {
        if graph.node_count() != self.nodes.len() || graph.edge_count() != self.edges.len() {
            warn!(
                nodes = graph.node_count(),
                edges = graph.edge_count(),
                "filter not applied to a graph of a different shape"
            );
            return;
        }

        if self.policy.is_unrestricted(graph, &criteria) {
            self.nodes.fill(Visibility::Full);
            self.edges.fill(Visibility::Full);
            self.decorations.fill(EdgeDecoration::default());
            debug!(policy = self.kind.label(), "filter reset");
            self.criteria = criteria;
            return;
        }

        for node in graph.node_indices() {
            self.nodes[node.0] = self.policy.node_visibility(graph, &criteria, node);
        }
        for (index, edge) in graph.edges().iter().enumerate() {
            let tier = edge_visibility(self.nodes[edge.source.0], self.nodes[edge.target.0]);
            self.edges[index] = tier;
            if !tier.is_interactive() {
                self.decorations[index] = EdgeDecoration::default();
            }
        }

        debug!(
            policy = self.kind.label(),
            visible_nodes = self.nodes.iter().filter(|tier| tier.is_interactive()).count(),
            visible_edges = self.edges.iter().filter(|tier| tier.is_interactive()).count(),
            "filter applied"
        );
        self.criteria = criteria;
    }

    pub fn node(&self, node: NodeIndex) -> Visibility {
        self.nodes.get(node.0).copied().unwrap_or(Visibility::Suppressed)
    }

    pub fn edge(&self, edge: EdgeIndex) -> Visibility {
        self.edges.get(edge.0).copied().unwrap_or(Visibility::Suppressed)
    }

    pub fn decoration(&self, edge: EdgeIndex) -> EdgeDecoration {
        self.decorations.get(edge.0).copied().unwrap_or_default()
    }

    /// Shows the label, and the arrow for directed edges. Returns false when
    /// the edge is suppressed or unknown.
    pub fn decorate(&mut self, graph: &GraphModel, edge: EdgeIndex) -> bool {
        let Some(directed) = graph.edge(edge).map(|edge| edge.directed) else {
            return false;
        };
        if !self.edge(edge).is_interactive() {
            return false;
        }
        self.decorations[edge.0] = EdgeDecoration {
            label_visible: true,
            arrow_visible: directed,
        };
        true
    }

    pub fn undecorate(&mut self, edge: EdgeIndex) {
        if let Some(decoration) = self.decorations.get_mut(edge.0) {
            *decoration = EdgeDecoration::default();
        }
    }
}
