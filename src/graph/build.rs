use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::{debug, warn};

use super::model::{Diagnostic, Edge, EdgeIndex, GraphModel, Node, NodeIndex};

/// Node as produced by an ingestion reader, before identity checks.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawNode {
    pub id: String,
    pub name: Option<String>,
    pub category: Option<String>,
    pub scale: Option<String>,
    pub attributes: BTreeMap<String, String>,
}

impl RawNode {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_scale(mut self, scale: impl Into<String>) -> Self {
        self.scale = Some(scale.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Edge referencing node ids, before they are resolved to indices.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawEdge {
    pub source: String,
    pub target: String,
    pub interaction: String,
    pub directed: bool,
    pub description: Option<String>,
}

impl RawEdge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            ..Self::default()
        }
    }

    pub fn with_interaction(mut self, interaction: impl Into<String>) -> Self {
        self.interaction = interaction.into();
        self
    }

    pub fn directed(mut self) -> Self {
        self.directed = true;
        self
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

impl GraphModel {
    /// Builds a model, dropping duplicate node ids and edges with unknown
    /// endpoints. Every dropped record is kept in [`GraphModel::diagnostics`].
    pub fn build(raw_nodes: Vec<RawNode>, raw_edges: Vec<RawEdge>) -> Self {
        let mut diagnostics = Vec::new();
        let mut nodes = Vec::with_capacity(raw_nodes.len());
        let mut index_by_id = HashMap::with_capacity(raw_nodes.len());

        for raw in raw_nodes {
            let id = raw.id.trim().to_owned();
            if id.is_empty() {
                continue;
            }
            if index_by_id.contains_key(&id) {
                diagnostics.push(Diagnostic::DuplicateNode { id });
                continue;
            }

            let name = non_blank(raw.name).unwrap_or_else(|| id.clone());
            index_by_id.insert(id.clone(), NodeIndex(nodes.len()));
            nodes.push(Node {
                id,
                name,
                category: non_blank(raw.category),
                scale: non_blank(raw.scale),
                attributes: raw.attributes,
            });
        }

        let mut edges = Vec::with_capacity(raw_edges.len());
        for raw in raw_edges {
            let source = index_by_id.get(raw.source.trim()).copied();
            let target = index_by_id.get(raw.target.trim()).copied();
            let (Some(source), Some(target)) = (source, target) else {
                let missing = [&raw.source, &raw.target]
                    .into_iter()
                    .filter(|id| !index_by_id.contains_key(id.trim()))
                    .cloned()
                    .collect();
                diagnostics.push(Diagnostic::DanglingEdge {
                    source: raw.source,
                    target: raw.target,
                    missing,
                });
                continue;
            };

            edges.push(Edge {
                source,
                target,
                interaction: raw.interaction,
                directed: raw.directed,
                description: non_blank(raw.description),
            });
        }

        let mut neighbor_sets = vec![HashSet::new(); nodes.len()];
        let mut neighbors = vec![Vec::new(); nodes.len()];
        let mut incident = vec![Vec::new(); nodes.len()];
        for (index, edge) in edges.iter().enumerate() {
            let edge_index = EdgeIndex(index);
            incident[edge.source.0].push(edge_index);
            if edge.target != edge.source {
                incident[edge.target.0].push(edge_index);
            }

            for (from, to) in [(edge.source, edge.target), (edge.target, edge.source)] {
                if from != to && neighbor_sets[from.0].insert(to) {
                    neighbors[from.0].push(to);
                }
            }
        }

        for diagnostic in &diagnostics {
            warn!(%diagnostic, "graph construction");
        }
        debug!(
            nodes = nodes.len(),
            edges = edges.len(),
            dropped = diagnostics.len(),
            "graph model built"
        );

        Self {
            nodes,
            edges,
            index_by_id,
            neighbors,
            incident,
            diagnostics,
        }
    }
}
