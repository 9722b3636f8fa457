use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::error::IngestError;
use crate::graph::{RawEdge, RawNode};

#[derive(Debug, Deserialize)]
struct DocumentFile {
    #[serde(default)]
    nodes: Vec<DocumentNode>,
    #[serde(default, alias = "edges")]
    links: Vec<DocumentLink>,
}

#[derive(Debug, Deserialize)]
struct DocumentNode {
    id: Value,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    scale: Option<String>,
    #[serde(flatten)]
    extra: BTreeMap<String, Value>,
}

#[derive(Debug, Deserialize)]
struct DocumentLink {
    source: Value,
    target: Value,
    #[serde(default)]
    interaction: Option<String>,
    #[serde(default)]
    directed: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Renders a JSON scalar as display text; containers and null yield `None`.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Array(items) => {
            let parts = items.iter().filter_map(scalar_text).collect::<Vec<_>>();
            (!parts.is_empty()).then(|| parts.join(", "))
        }
        Value::Null | Value::Object(_) => None,
    }
}

/// Parses a `{"nodes": [...], "links": [...]}` graph document.
pub(super) fn parse_document(raw: &str) -> Result<(Vec<RawNode>, Vec<RawEdge>), IngestError> {
    let document: DocumentFile = serde_json::from_str(raw)?;

    let nodes = document
        .nodes
        .into_iter()
        .filter_map(|node| {
            let id = scalar_text(&node.id)?;
            let attributes = node
                .extra
                .iter()
                .filter_map(|(key, value)| scalar_text(value).map(|text| (key.clone(), text)))
                .collect();
            Some(RawNode {
                id,
                name: node.name,
                category: node.category,
                scale: node.scale,
                attributes,
            })
        })
        .collect();

    let edges = document
        .links
        .into_iter()
        .map(|link| RawEdge {
            source: scalar_text(&link.source).unwrap_or_default(),
            target: scalar_text(&link.target).unwrap_or_default(),
            interaction: link.interaction.unwrap_or_default(),
            directed: link.directed,
            description: link.description,
        })
        .collect();

    Ok((nodes, edges))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphModel;

    const SAMPLE: &str = r#"{
        "nodes": [
            {"id": "SNCA", "name": "Alpha-synuclein", "category": "protein",
             "scale": "molecular", "function": "Synaptic vesicle trafficking",
             "role_in_PD": "Aggregates into Lewy bodies"},
            {"id": "SN", "name": "Substantia nigra", "category": "brain_region",
             "scale": "anatomical"},
            {"id": 42, "name": "Numeric id"}
        ],
        "links": [
            {"source": "SNCA", "target": "SN", "interaction": "accumulates_in",
             "directed": true, "description": "Lewy pathology"},
            {"source": "SN", "target": "42"},
            {"source": "SNCA", "target": "LRRK2", "interaction": "binds"}
        ]
    }"#;

    #[test]
    fn parses_nodes_links_and_attributes() {
        let (nodes, edges) = parse_document(SAMPLE).unwrap();

        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[0].id, "SNCA");
        assert_eq!(nodes[0].scale.as_deref(), Some("molecular"));
        assert_eq!(
            nodes[0].attributes.get("function").map(String::as_str),
            Some("Synaptic vesicle trafficking")
        );
        assert_eq!(
            nodes[0].attributes.get("role_in_PD").map(String::as_str),
            Some("Aggregates into Lewy bodies")
        );
        assert_eq!(nodes[2].id, "42");

        assert_eq!(edges.len(), 3);
        assert!(edges[0].directed);
        assert_eq!(edges[0].interaction, "accumulates_in");
        assert!(!edges[1].directed);
        assert_eq!(edges[1].interaction, "");
    }

    #[test]
    fn unknown_link_endpoints_become_diagnostics() {
        let (nodes, edges) = parse_document(SAMPLE).unwrap();
        let graph = GraphModel::build(nodes, edges);

        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.diagnostics().len(), 1);
    }

    #[test]
    fn missing_sections_yield_empty_graph() {
        let (nodes, edges) = parse_document("{}").unwrap();
        assert!(nodes.is_empty());
        assert!(edges.is_empty());
    }

    #[test]
    fn malformed_json_is_an_error() {
        let error = parse_document("{\"nodes\": [").unwrap_err();
        assert!(matches!(error, IngestError::Json(_)));
    }
}
