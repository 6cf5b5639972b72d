//! Locating the domain namespace among the declared prefixes.

use tracing::debug;

use crate::error::{ExtractError, Result};
use crate::store::FactStore;

/// Picks the domain namespace: the first declared URI containing `marker`.
pub fn resolve_namespace<S: FactStore + ?Sized>(store: &S, marker: &str) -> Result<String> {
    let mut matches = store
        .namespaces()
        .into_iter()
        .filter(|(_, uri)| uri.contains(marker));

    let Some((prefix, uri)) = matches.next() else {
        return Err(ExtractError::NamespaceNotFound {
            marker: marker.to_string(),
        });
    };

    let ignored: Vec<String> = matches.map(|(_, uri)| uri).collect();
    if !ignored.is_empty() {
        debug!(chosen = %uri, ?ignored, "several namespaces match the domain marker");
    }
    debug!(%prefix, %uri, "resolved domain namespace");
    Ok(uri)
}
