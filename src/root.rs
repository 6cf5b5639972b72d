//! Top-level resource discovery.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::config::RootSelection;
use crate::error::{ExtractError, Result};
use crate::store::FactStore;
use crate::term::Term;
use crate::vocab::Vocabulary;

/// Resources that have children but are nobody's child, sorted by identity.
pub fn root_candidates<S: FactStore + ?Sized>(store: &S, vocab: &Vocabulary) -> Vec<Term> {
    let children: HashSet<Term> = store.objects_with(&vocab.has_child).into_iter().collect();

    let mut roots: Vec<Term> = store
        .subjects_with(&vocab.has_child)
        .into_iter()
        .filter(|parent| !children.contains(parent))
        .collect();
    roots.sort_by_cached_key(Term::to_string);
    roots
}

/// Resolves the single root of the containment hierarchy.
pub fn resolve_root<S: FactStore + ?Sized>(
    store: &S,
    vocab: &Vocabulary,
    selection: RootSelection,
) -> Result<Term> {
    let mut roots = root_candidates(store, vocab);

    match (roots.len(), selection) {
        (0, _) => Err(ExtractError::NoRootFound),
        (1, _) => {
            let root = roots.remove(0);
            debug!(root = %root, "resolved root");
            Ok(root)
        }
        (_, RootSelection::RequireUnique) => Err(ExtractError::AmbiguousRoot {
            candidates: roots.iter().map(Term::to_string).collect(),
        }),
        (_, RootSelection::FirstSorted) => {
            let root = roots.remove(0);
            let ignored: Vec<String> = roots.iter().map(Term::to_string).collect();
            warn!(root = %root, ?ignored, "several top-level resources; using the first");
            Ok(root)
        }
    }
}
