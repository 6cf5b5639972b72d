//! Extraction settings.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ExtractError, Result};

/// Substring identifying the organization's namespace among the declared prefixes.
pub const DEFAULT_DOMAIN_MARKER: &str = "example.org";

/// Upper bound on cells consumed while walking one vertex collection.
pub const DEFAULT_MAX_COLLECTION_CELLS: usize = 100_000;

/// Order in which the children of a resource are visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChildOrder {
    /// Sorted by identity string; output is reproducible across stores.
    #[default]
    Sorted,
    /// Whatever order the fact store enumerates them in.
    Store,
}

/// What to do when more than one top-level resource exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RootSelection {
    /// Take the smallest identity string.
    #[default]
    FirstSorted,
    /// Fail with [`ExtractError::AmbiguousRoot`].
    RequireUnique,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    pub domain_marker: String,
    pub child_order: ChildOrder,
    pub root_selection: RootSelection,
    pub max_collection_cells: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            domain_marker: DEFAULT_DOMAIN_MARKER.to_string(),
            child_order: ChildOrder::default(),
            root_selection: RootSelection::default(),
            max_collection_cells: DEFAULT_MAX_COLLECTION_CELLS,
        }
    }
}

impl ExtractConfig {
    /// Reads a JSON config file. Absent keys keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ExtractError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&raw)?)
    }
}
