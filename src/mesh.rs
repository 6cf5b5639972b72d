//! Mesh geometry decoding.
//!
//! A mesh points at its vertices through `hasVertices`, whose object is the head of an
//! `rdf:first`/`rdf:rest` chain ending in `rdf:nil`. The chain is author-supplied data, so the
//! walk is iterative and bounded: it stops on a revisited cell, a missing `rdf:rest`, or after
//! `max_cells` cells, keeping the vertices read so far.

use std::collections::HashSet;

use tracing::{trace, warn};

use crate::model::MeshGeometry;
use crate::store::FactStore;
use crate::term::Term;
use crate::vocab::Vocabulary;

/// Decodes one mesh resource. Returns `None` when the mesh has no `hasVertices` fact.
pub fn decode_mesh<S: FactStore + ?Sized>(
    store: &S,
    vocab: &Vocabulary,
    mesh: &Term,
    max_cells: usize,
) -> Option<MeshGeometry> {
    let head = store.value(mesh, &vocab.has_vertices)?;

    let vertices = collection_items(store, vocab, &head, max_cells)
        .into_iter()
        .filter_map(|vertex| match store.value(&vertex, &vocab.as_wkt) {
            Some(wkt) => Some(wkt.lexical().to_string()),
            None => {
                trace!(mesh = %mesh, vertex = %vertex, "vertex without WKT; skipped");
                None
            }
        })
        .collect();

    Some(MeshGeometry {
        name: mesh.local_name().to_string(),
        vertices,
    })
}

/// Elements of the collection starting at `head`, in chain order.
pub fn collection_items<S: FactStore + ?Sized>(
    store: &S,
    vocab: &Vocabulary,
    head: &Term,
    max_cells: usize,
) -> Vec<Term> {
    let mut items = Vec::new();
    let mut seen = HashSet::new();
    let mut cell = head.clone();

    while cell != vocab.rdf_nil {
        if seen.len() >= max_cells {
            warn!(head = %head, max_cells, "collection exceeds cell limit; truncated");
            break;
        }
        if !seen.insert(cell.clone()) {
            warn!(head = %head, cell = %cell, "collection loops back on itself; truncated");
            break;
        }

        if let Some(element) = store.value(&cell, &vocab.rdf_first) {
            items.push(element);
        }

        match store.value(&cell, &vocab.rdf_rest) {
            Some(next) => cell = next,
            None => {
                warn!(head = %head, cell = %cell, "collection cell has no rdf:rest; truncated");
                break;
            }
        }
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    const NS: &str = "http://www.example.org/digitaltwin#";

    fn ns(local: &str) -> Term {
        Term::iri(format!("{NS}{local}"))
    }

    /// Builds `mesh hasVertices (v0 v1 …)` with one WKT point per vertex.
    fn mesh_with_chain(store: &mut MemoryStore, vocab: &Vocabulary, vertices: &[&str]) -> Vec<Term> {
        let cells: Vec<Term> = (0..vertices.len())
            .map(|i| Term::blank(format!("c{i}")))
            .collect();
        let head = cells.first().cloned().unwrap_or_else(|| vocab.rdf_nil.clone());
        store.add(ns("Mesh"), vocab.has_vertices.clone(), head);

        for (i, wkt) in vertices.iter().enumerate() {
            let vertex = ns(&format!("V{i}"));
            store.add(cells[i].clone(), vocab.rdf_first.clone(), vertex.clone());
            store.add(vertex, vocab.as_wkt.clone(), Term::literal(*wkt));
            let next = cells.get(i + 1).cloned().unwrap_or_else(|| vocab.rdf_nil.clone());
            store.add(cells[i].clone(), vocab.rdf_rest.clone(), next);
        }
        cells
    }

    #[test]
    fn vertices_follow_chain_order() {
        let vocab = Vocabulary::new(NS);
        let mut store = MemoryStore::new();
        mesh_with_chain(
            &mut store,
            &vocab,
            &["POINT Z (3 0 0)", "POINT Z (1 0 0)", "POINT Z (2 0 0)"],
        );

        let mesh = decode_mesh(&store, &vocab, &ns("Mesh"), 100).unwrap();
        assert_eq!(mesh.name, "Mesh");
        assert_eq!(
            mesh.vertices,
            vec!["POINT Z (3 0 0)", "POINT Z (1 0 0)", "POINT Z (2 0 0)"]
        );
    }

    #[test]
    fn mesh_without_vertices_edge_is_omitted() {
        let vocab = Vocabulary::new(NS);
        let store = MemoryStore::new();
        assert_eq!(decode_mesh(&store, &vocab, &ns("Mesh"), 100), None);
    }

    #[test]
    fn empty_collection_gives_empty_mesh() {
        let vocab = Vocabulary::new(NS);
        let mut store = MemoryStore::new();
        mesh_with_chain(&mut store, &vocab, &[]);

        let mesh = decode_mesh(&store, &vocab, &ns("Mesh"), 100).unwrap();
        assert!(mesh.vertices.is_empty());
    }

    #[test]
    fn vertex_without_wkt_is_skipped() {
        let vocab = Vocabulary::new(NS);
        let mut store = MemoryStore::new();
        let cells = mesh_with_chain(&mut store, &vocab, &["POINT(0 0)", "POINT(1 1)"]);
        // A third cell whose element carries no WKT.
        let last = Term::blank("c2");
        let mut facts: Vec<_> = store.triples().to_vec();
        facts.retain(|t| !(t.subject == cells[1] && t.predicate == vocab.rdf_rest));
        let mut store: MemoryStore = facts.into_iter().collect();
        store.add(cells[1].clone(), vocab.rdf_rest.clone(), last.clone());
        store.add(last.clone(), vocab.rdf_first.clone(), ns("Bare"));
        store.add(last, vocab.rdf_rest.clone(), vocab.rdf_nil.clone());

        let mesh = decode_mesh(&store, &vocab, &ns("Mesh"), 100).unwrap();
        assert_eq!(mesh.vertices, vec!["POINT(0 0)", "POINT(1 1)"]);
    }

    #[test]
    fn cyclic_chain_terminates() {
        let vocab = Vocabulary::new(NS);
        let mut store = MemoryStore::new();
        let (a, b) = (Term::blank("a"), Term::blank("b"));
        store.add(ns("Mesh"), vocab.has_vertices.clone(), a.clone());
        store.add(a.clone(), vocab.rdf_first.clone(), ns("V0"));
        store.add(a.clone(), vocab.rdf_rest.clone(), b.clone());
        store.add(b.clone(), vocab.rdf_first.clone(), ns("V1"));
        store.add(b, vocab.rdf_rest.clone(), a);
        store.add(ns("V0"), vocab.as_wkt.clone(), Term::literal("POINT(0 0)"));
        store.add(ns("V1"), vocab.as_wkt.clone(), Term::literal("POINT(1 1)"));

        let mesh = decode_mesh(&store, &vocab, &ns("Mesh"), 100).unwrap();
        assert_eq!(mesh.vertices, vec!["POINT(0 0)", "POINT(1 1)"]);
    }

    #[test]
    fn broken_chain_and_cell_limit_truncate() {
        let vocab = Vocabulary::new(NS);
        let mut store = MemoryStore::new();
        let cells = mesh_with_chain(
            &mut store,
            &vocab,
            &["POINT(0 0)", "POINT(1 1)", "POINT(2 2)"],
        );

        let head = cells[0].clone();
        assert_eq!(collection_items(&store, &vocab, &head, 2).len(), 2);

        let facts: Vec<_> = store
            .triples()
            .iter()
            .filter(|t| !(t.subject == cells[0] && t.predicate == vocab.rdf_rest))
            .cloned()
            .collect();
        let broken: MemoryStore = facts.into_iter().collect();
        assert_eq!(collection_items(&broken, &vocab, &head, 100), vec![ns("V0")]);
    }
}
