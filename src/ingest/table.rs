use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::path::Path;

use crate::error::IngestError;
use crate::graph::{RawEdge, RawNode};

/// Case-insensitive id → category table used to tag cross-reference ids.
#[derive(Clone, Debug, Default)]
pub struct CategoryLookup {
    categories: HashMap<String, String>,
}

impl CategoryLookup {
    pub fn from_path(path: &Path) -> Result<Self, IngestError> {
        let file = std::fs::File::open(path).map_err(|error| IngestError::io(path, error))?;
        Self::from_reader(file)
    }

    /// Reads an `id,category` CSV with a header row. Extra columns are ignored.
    pub fn from_reader(reader: impl Read) -> Result<Self, IngestError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut categories = HashMap::new();
        for record in reader.records() {
            let record = record?;
            let (Some(id), Some(category)) = (record.get(0), record.get(1)) else {
                continue;
            };
            if id.is_empty() || category.is_empty() {
                continue;
            }
            categories
                .entry(id.to_lowercase())
                .or_insert_with(|| category.to_owned());
        }

        Ok(Self { categories })
    }

    pub fn resolve(&self, id: &str) -> Option<&str> {
        self.categories
            .get(&id.trim().to_lowercase())
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Parses a cross-reference table. The first column holds row ids, the other
/// headers are column ids, and every non-empty cell links its row to its
/// column.
pub(super) fn parse_table(
    reader: impl Read,
    delimiter: u8,
    lookup: &CategoryLookup,
) -> Result<(Vec<RawNode>, Vec<RawEdge>), IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    if headers.iter().all(str::is_empty) {
        return Err(IngestError::MissingHeader);
    }

    let mut ids = Vec::new();
    let mut seen = HashSet::new();
    let mut push_id = |id: &str, ids: &mut Vec<String>| {
        if !id.is_empty() && seen.insert(id.to_owned()) {
            ids.push(id.to_owned());
        }
    };

    for column in headers.iter().skip(1) {
        push_id(column, &mut ids);
    }

    let mut edges = Vec::new();
    for record in reader.records() {
        let record = record?;
        let Some(row_id) = record.get(0).filter(|id| !id.is_empty()) else {
            continue;
        };
        push_id(row_id, &mut ids);

        for (column, cell) in headers.iter().zip(record.iter()).skip(1) {
            if column.is_empty() || cell.is_empty() {
                continue;
            }
            edges.push(RawEdge {
                source: row_id.to_owned(),
                target: column.to_owned(),
                interaction: cell.to_owned(),
                directed: false,
                description: Some(format!("{row_id} - {cell}")),
            });
        }
    }

    let nodes = ids
        .into_iter()
        .map(|id| {
            let category = lookup.resolve(&id).map(str::to_owned);
            RawNode {
                category,
                ..RawNode::new(id)
            }
        })
        .collect();

    Ok((nodes, edges))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphModel;

    const TABLE: &str = "\
Manifestation,Tremor,Bradykinesia,Rigidity
Dopamine,reduced,reduced,
SNCA,,aggregates,
Insomnia,,,
";

    #[test]
    fn non_empty_cells_become_edges() {
        let (nodes, edges) = parse_table(TABLE.as_bytes(), b',', &CategoryLookup::default()).unwrap();

        let ids = nodes.iter().map(|node| node.id.as_str()).collect::<Vec<_>>();
        assert_eq!(
            ids,
            vec!["Tremor", "Bradykinesia", "Rigidity", "Dopamine", "SNCA", "Insomnia"]
        );
        assert_eq!(edges.len(), 3);
        assert_eq!(edges[0].source, "Dopamine");
        assert_eq!(edges[0].target, "Tremor");
        assert_eq!(edges[0].interaction, "reduced");
        assert_eq!(edges[2].description.as_deref(), Some("SNCA - aggregates"));
    }

    #[test]
    fn categories_resolve_case_insensitively() {
        let lookup = CategoryLookup::from_reader(
            "id,category\ndopamine,neurotransmitter\nTREMOR,clinical_symptom\n".as_bytes(),
        )
        .unwrap();
        let (nodes, edges) = parse_table(TABLE.as_bytes(), b',', &lookup).unwrap();
        let graph = GraphModel::build(nodes, edges);

        assert_eq!(
            graph.node_by_id("Dopamine").and_then(|node| node.category.as_deref()),
            Some("neurotransmitter")
        );
        assert_eq!(
            graph.node_by_id("Tremor").and_then(|node| node.category.as_deref()),
            Some("clinical_symptom")
        );
        assert_eq!(
            graph
                .node_by_id("Rigidity")
                .map(|node| node.category_or_uncategorized()),
            Some("Uncategorized")
        );
    }

    #[test]
    fn shared_row_and_column_ids_collapse_into_one_node() {
        let table = "Entity,SNCA,LRRK2\nSNCA,,interacts\n";
        let (nodes, edges) = parse_table(table.as_bytes(), b',', &CategoryLookup::default()).unwrap();

        assert_eq!(nodes.len(), 2);
        assert_eq!(edges.len(), 1);
    }

    #[test]
    fn tab_delimited_tables_parse() {
        let table = "Entity\tTremor\nDopamine\treduced\n";
        let (nodes, edges) = parse_table(table.as_bytes(), b'\t', &CategoryLookup::default()).unwrap();

        assert_eq!(nodes.len(), 2);
        assert_eq!(edges.len(), 1);
    }

    #[test]
    fn empty_input_is_missing_header() {
        let error = parse_table("".as_bytes(), b',', &CategoryLookup::default()).unwrap_err();
        assert!(matches!(error, IngestError::MissingHeader));
    }
}
