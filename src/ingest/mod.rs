//! Readers that normalize source files into a [`GraphModel`].

mod document;
mod table;

use std::path::Path;

use tracing::{info, warn};

use crate::error::IngestError;
use crate::graph::GraphModel;

pub use table::CategoryLookup;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceFormat {
    /// JSON `{"nodes": [...], "links": [...]}` document.
    Document,
    /// Row/column cross-reference table.
    Table { delimiter: u8 },
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(Self::Document),
            "csv" => Some(Self::Table { delimiter: b',' }),
            "tsv" | "tab" => Some(Self::Table { delimiter: b'\t' }),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Document => "graph document",
            Self::Table { .. } => "cross-reference table",
        }
    }
}

/// Loads a graph from `path`. `format` falls back to the file extension; the
/// lookup only applies to tables.
pub fn load_graph(
    path: &Path,
    format: Option<SourceFormat>,
    lookup: &CategoryLookup,
) -> Result<GraphModel, IngestError> {
    let format = format
        .or_else(|| SourceFormat::from_path(path))
        .ok_or_else(|| IngestError::UnknownFormat {
            path: path.to_path_buf(),
        })?;

    let (nodes, edges) = match format {
        SourceFormat::Document => {
            let raw =
                std::fs::read_to_string(path).map_err(|error| IngestError::io(path, error))?;
            document::parse_document(&raw)?
        }
        SourceFormat::Table { delimiter } => {
            let file = std::fs::File::open(path).map_err(|error| IngestError::io(path, error))?;
            table::parse_table(file, delimiter, lookup)?
        }
    };

    let graph = GraphModel::build(nodes, edges);
    info!(
        path = %path.display(),
        format = format.label(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        diagnostics = graph.diagnostics().len(),
        "graph loaded"
    );
    Ok(graph)
}

/// Like [`load_graph`], but a failure is logged and replaced by an empty
/// graph so the session can still start.
pub fn load_graph_or_empty(
    path: &Path,
    format: Option<SourceFormat>,
    lookup: &CategoryLookup,
) -> (GraphModel, Option<IngestError>) {
    match load_graph(path, format, lookup) {
        Ok(graph) => (graph, None),
        Err(error) => {
            warn!(path = %path.display(), %error, "falling back to an empty graph");
            (GraphModel::empty(), Some(error))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn format_follows_extension() {
        assert_eq!(
            SourceFormat::from_path(Path::new("data/pd.json")),
            Some(SourceFormat::Document)
        );
        assert_eq!(
            SourceFormat::from_path(Path::new("cross.CSV")),
            Some(SourceFormat::Table { delimiter: b',' })
        );
        assert_eq!(
            SourceFormat::from_path(Path::new("cross.tsv")),
            Some(SourceFormat::Table { delimiter: b'\t' })
        );
        assert_eq!(SourceFormat::from_path(Path::new("notes.txt")), None);
    }

    #[test]
    fn loads_document_from_disk() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"nodes": [{{"id": "a"}}, {{"id": "b"}}], "links": [{{"source": "a", "target": "b"}}]}}"#
        )
        .unwrap();

        let graph = load_graph(file.path(), None, &CategoryLookup::default()).unwrap();
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn missing_file_falls_back_to_empty_graph() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");

        let (graph, error) = load_graph_or_empty(&path, None, &CategoryLookup::default());
        assert!(graph.is_empty());
        assert!(matches!(error, Some(IngestError::Io { .. })));
    }

    #[test]
    fn unknown_extension_without_format_falls_back() {
        let file = tempfile::Builder::new().suffix(".dat").tempfile().unwrap();

        let (graph, error) = load_graph_or_empty(file.path(), None, &CategoryLookup::default());
        assert!(graph.is_empty());
        assert!(matches!(error, Some(IngestError::UnknownFormat { .. })));
    }

    #[test]
    fn explicit_format_overrides_extension() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        writeln!(file, "Entity,Tremor").unwrap();
        writeln!(file, "Dopamine,reduced").unwrap();

        let graph = load_graph(
            file.path(),
            Some(SourceFormat::Table { delimiter: b',' }),
            &CategoryLookup::default(),
        )
        .unwrap();
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
    }
}
