use std::path::PathBuf;

use thiserror::Error;

/// Failures while reading source data. Callers usually log these and fall
/// back to an empty graph.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid graph document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid table data: {0}")]
    Csv(#[from] csv::Error),

    #[error("table has no header row")]
    MissingHeader,

    #[error("cannot infer the data format of {}; pass --format", .path.display())]
    UnknownFormat { path: PathBuf },
}

impl IngestError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
