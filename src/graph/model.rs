use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Bucket for nodes without a category tag.
pub const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(pub usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeIndex(pub usize);

/// A selectable diagram element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Element {
    Node(NodeIndex),
    Edge(EdgeIndex),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub id: String,
    pub name: String,
    pub category: Option<String>,
    pub scale: Option<String>,
    pub attributes: BTreeMap<String, String>,
}

impl Node {
    /// Category tag used for filtering and coloring.
    pub fn category_or_uncategorized(&self) -> &str {
        self.category.as_deref().unwrap_or(UNCATEGORIZED)
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    pub source: NodeIndex,
    pub target: NodeIndex,
    pub interaction: String,
    pub directed: bool,
    pub description: Option<String>,
}

/// Problems found while normalizing ingested data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Diagnostic {
    DuplicateNode {
        id: String,
    },
    DanglingEdge {
        source: String,
        target: String,
        missing: Vec<String>,
    },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateNode { id } => write!(f, "duplicate node id {id:?}; kept the first"),
            Self::DanglingEdge {
                source,
                target,
                missing,
            } => write!(
                f,
                "edge {source:?} -> {target:?} dropped; unknown node(s): {}",
                missing.join(", ")
            ),
        }
    }
}

/// Normalized node-link graph. Topology never changes after construction.
#[derive(Clone, Debug, Default)]
pub struct GraphModel {
    pub(super) nodes: Vec<Node>,
    pub(super) edges: Vec<Edge>,
    pub(super) index_by_id: HashMap<String, NodeIndex>,
    pub(super) neighbors: Vec<Vec<NodeIndex>>,
    pub(super) incident: Vec<Vec<EdgeIndex>>,
    pub(super) diagnostics: Vec<Diagnostic>,
}

impl GraphModel {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, index: NodeIndex) -> Option<&Node> {
        self.nodes.get(index.0)
    }

    pub fn edge(&self, index: EdgeIndex) -> Option<&Edge> {
        self.edges.get(index.0)
    }

    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        (0..self.nodes.len()).map(NodeIndex)
    }

    pub fn edge_indices(&self) -> impl Iterator<Item = EdgeIndex> + '_ {
        (0..self.edges.len()).map(EdgeIndex)
    }

    pub fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.index_by_id.get(id).copied()
    }

    pub fn node_by_id(&self, id: &str) -> Option<&Node> {
        self.index_of(id).and_then(|index| self.node(index))
    }

    /// Nodes one edge-hop away, in either direction, without duplicates.
    pub fn neighbors(&self, index: NodeIndex) -> &[NodeIndex] {
        self.neighbors.get(index.0).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn incident_edges(&self, index: NodeIndex) -> &[EdgeIndex] {
        self.incident.get(index.0).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of edge endpoints at `index`; a self-loop counts twice.
    pub fn degree(&self, index: NodeIndex) -> usize {
        self.incident_edges(index)
            .iter()
            .filter_map(|edge| self.edge(*edge))
            .map(|edge| usize::from(edge.source == index) + usize::from(edge.target == index))
            .sum()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Distinct categories in first-seen order, `Uncategorized` included when
    /// any node lacks a tag.
    pub fn categories(&self) -> Vec<String> {
        let mut seen = BTreeSet::new();
        let mut ordered = Vec::new();
        for node in &self.nodes {
            let category = node.category_or_uncategorized();
            if seen.insert(category) {
                ordered.push(category.to_owned());
            }
        }
        ordered
    }

    /// Distinct scale tags, sorted.
    pub fn scales(&self) -> Vec<String> {
        self.nodes
            .iter()
            .filter_map(|node| node.scale.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
