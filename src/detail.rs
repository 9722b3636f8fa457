//! Plain key/value records for the detail panel.

use crate::graph::{EdgeIndex, Element, GraphModel, NodeIndex};
use crate::util::humanize;

const MISSING: &str = "-";

/// Attributes listed under their own label, in this order.
const NODE_ATTRIBUTES: [(&str, &str); 2] = [("function", "Function"), ("role_in_PD", "Role")];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailField {
    pub key: String,
    pub value: String,
}

impl DetailField {
    fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailRecord {
    pub element: Element,
    pub title: String,
    pub fields: Vec<DetailField>,
}

impl DetailRecord {
    pub fn for_element(graph: &GraphModel, element: Element) -> Option<Self> {
        match element {
            Element::Node(node) => Self::for_node(graph, node),
            Element::Edge(edge) => Self::for_edge(graph, edge),
        }
    }

    pub fn for_node(graph: &GraphModel, index: NodeIndex) -> Option<Self> {
        let node = graph.node(index)?;
        let mut fields = vec![
            DetailField::new("Name", node.name.clone()),
            DetailField::new("Category", node.category_or_uncategorized()),
        ];
        for (attribute, label) in NODE_ATTRIBUTES {
            fields.push(DetailField::new(
                label,
                node.attribute(attribute).unwrap_or(MISSING),
            ));
        }
        if let Some(scale) = &node.scale {
            fields.push(DetailField::new("Scale", scale.clone()));
        }
        for (key, value) in &node.attributes {
            if NODE_ATTRIBUTES.iter().any(|(attribute, _)| attribute == key) {
                continue;
            }
            fields.push(DetailField::new(humanize(key), value.clone()));
        }

        Some(Self {
            element: Element::Node(index),
            title: node.name.clone(),
            fields,
        })
    }

    pub fn for_edge(graph: &GraphModel, index: EdgeIndex) -> Option<Self> {
        let edge = graph.edge(index)?;
        let source = graph.node(edge.source)?;
        let target = graph.node(edge.target)?;
        let interaction = if edge.interaction.is_empty() {
            MISSING.to_owned()
        } else {
            humanize(&edge.interaction)
        };

        Some(Self {
            element: Element::Edge(index),
            title: format!("{} -> {}", source.name, target.name),
            fields: vec![
                DetailField::new("From", source.name.clone()),
                DetailField::new("To", target.name.clone()),
                DetailField::new("Interaction", interaction),
                DetailField::new(
                    "Description",
                    edge.description.as_deref().unwrap_or(MISSING),
                ),
            ],
        })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.key == key)
            .map(|field| field.value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{RawEdge, RawNode};

    fn graph() -> GraphModel {
        let mut snca = RawNode::new("SNCA")
            .with_name("alpha-synuclein")
            .with_category("protein");
        snca.attributes
            .insert("function".to_owned(), "synaptic vesicle trafficking".to_owned());
        snca.attributes
            .insert("role_in_PD".to_owned(), "Lewy body aggregation".to_owned());
        snca.attributes.insert("gene_locus".to_owned(), "4q22.1".to_owned());

        let mut edge = RawEdge::new("SNCA", "SN")
            .with_interaction("accumulates_in")
            .directed();
        edge.description = Some("aggregates in dopaminergic neurons".to_owned());

        GraphModel::build(vec![snca, RawNode::new("SN")], vec![edge])
    }

    #[test]
    fn node_record_lists_core_fields_first() {
        let record = DetailRecord::for_node(&graph(), NodeIndex(0)).unwrap();
        let keys = record
            .fields
            .iter()
            .map(|field| field.key.as_str())
            .collect::<Vec<_>>();

        assert_eq!(keys, vec!["Name", "Category", "Function", "Role", "gene locus"]);
        assert_eq!(record.title, "alpha-synuclein");
        assert_eq!(record.get("Role"), Some("Lewy body aggregation"));
    }

    #[test]
    fn missing_attributes_render_as_placeholder() {
        let record = DetailRecord::for_node(&graph(), NodeIndex(1)).unwrap();
        assert_eq!(record.get("Category"), Some("Uncategorized"));
        assert_eq!(record.get("Function"), Some("-"));
    }

    #[test]
    fn edge_record_uses_names_and_humanized_interaction() {
        let record = DetailRecord::for_element(&graph(), Element::Edge(EdgeIndex(0))).unwrap();

        assert_eq!(record.get("From"), Some("alpha-synuclein"));
        assert_eq!(record.get("To"), Some("SN"));
        assert_eq!(record.get("Interaction"), Some("accumulates in"));
        assert_eq!(
            record.get("Description"),
            Some("aggregates in dopaminergic neurons")
        );
    }

    #[test]
    fn unknown_elements_have_no_record() {
        assert!(DetailRecord::for_node(&graph(), NodeIndex(7)).is_none());
        assert!(DetailRecord::for_edge(&graph(), EdgeIndex(3)).is_none());
    }
}
