//! Error type shared by loading, resolution and persistence.

use std::path::PathBuf;

/// Everything that can abort an extraction run.
///
/// Missing optional attributes are never errors; they resolve to defaults inside the walk.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("no declared namespace contains `{marker}`")]
    NamespaceNotFound { marker: String },

    #[error("no top-level resource: no resource has children without itself being a child")]
    NoRootFound,

    #[error("ambiguous root: {} top-level resources ({})", candidates.len(), candidates.join(", "))]
    AmbiguousRoot { candidates: Vec<String> },

    #[error("turtle parse error: {message}")]
    Parse { message: String },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("fact store error: {0}")]
    Store(#[from] sled::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = ExtractError> = std::result::Result<T, E>;
