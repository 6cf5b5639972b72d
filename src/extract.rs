//! Containment traversal and per-resource extraction.
//!
//! The walk is depth-first and preorder. One visited set lives for the whole call, so a
//! resource reached twice (cycle or diamond) is recorded once, under the parent that reached
//! it first.

use std::collections::HashSet;

use tracing::{debug, instrument, trace, warn};

use crate::config::{ChildOrder, ExtractConfig};
use crate::mesh::decode_mesh;
use crate::model::{Actuator, GeoLocation, MeshGeometry, Report, ResourceRecord, Sensor};
use crate::store::FactStore;
use crate::term::Term;
use crate::vocab::Vocabulary;

/// Walks the hierarchy below a root and gathers attachments for every resource.
#[derive(Debug)]
pub struct Extractor<'s, S: FactStore + ?Sized> {
    store: &'s S,
    vocab: Vocabulary,
    child_order: ChildOrder,
    max_collection_cells: usize,
}

/// State of a single `extract` call.
#[derive(Default)]
struct Traversal {
    visited: HashSet<Term>,
    records: Vec<ResourceRecord>,
}

impl<'s, S: FactStore + ?Sized> Extractor<'s, S> {
    pub fn new(store: &'s S, vocab: Vocabulary, config: &ExtractConfig) -> Self {
        Self {
            store,
            vocab,
            child_order: config.child_order,
            max_collection_cells: config.max_collection_cells,
        }
    }

    /// Produces the report rooted at `root`.
    #[instrument(skip_all, fields(root = %root))]
    pub fn extract(&self, root: &Term) -> Report {
        let mut traversal = Traversal::default();
        self.walk(&mut traversal, root);
        debug!(records = traversal.records.len(), "extraction complete");
        Report::from(traversal.records)
    }

    /// Preorder walk on an explicit stack, so containment depth is bounded by the heap.
    fn walk(&self, traversal: &mut Traversal, root: &Term) {
        let mut pending: Vec<(Term, Option<Term>)> = vec![(root.clone(), None)];

        while let Some((resource, parent)) = pending.pop() {
            if !traversal.visited.insert(resource.clone()) {
                debug!(resource = %resource, "already visited; skipping");
                continue;
            }
            trace!(resource = %resource, "visiting");

            // Reversed so the first child is popped next.
            let children = self.children(&resource);
            pending.extend(
                children
                    .into_iter()
                    .rev()
                    .map(|child| (child, Some(resource.clone()))),
            );

            traversal.records.push(ResourceRecord {
                sensors: self.sensors(&resource),
                actuators: self.actuators(&resource),
                geo_locations: self.geo_locations(&resource),
                meshes: self.meshes(&resource),
                resource,
                parent,
            });
        }
    }

    fn sensors(&self, resource: &Term) -> Vec<Sensor> {
        let v = &self.vocab;
        self.store
            .objects(resource, &v.has_sensor)
            .iter()
            .map(|s| Sensor::new(self.text(s, &v.sensor_id), self.text(s, &v.sensor_type)))
            .collect()
    }

    fn actuators(&self, resource: &Term) -> Vec<Actuator> {
        let v = &self.vocab;
        self.store
            .objects(resource, &v.has_actuator)
            .iter()
            .map(|a| Actuator::new(self.text(a, &v.actuator_id), self.text(a, &v.actuator_type)))
            .collect()
    }

    fn geo_locations(&self, resource: &Term) -> Vec<GeoLocation> {
        let v = &self.vocab;
        self.store
            .objects(resource, &v.has_geo_location)
            .iter()
            .map(|g| GeoLocation {
                latitude: self.number(g, &v.latitude),
                longitude: self.number(g, &v.longitude),
                altitude: self.number(g, &v.altitude),
            })
            .collect()
    }

    fn meshes(&self, resource: &Term) -> Vec<MeshGeometry> {
        self.store
            .objects(resource, &self.vocab.has_mesh_geometry)
            .iter()
            .filter_map(|mesh| {
                decode_mesh(self.store, &self.vocab, mesh, self.max_collection_cells)
            })
            .collect()
    }

    fn children(&self, resource: &Term) -> Vec<Term> {
        let mut children = self.store.objects(resource, &self.vocab.has_child);
        if self.child_order == ChildOrder::Sorted {
            children.sort_by_cached_key(Term::to_string);
        }
        children
    }

    fn text(&self, subject: &Term, predicate: &Term) -> Option<String> {
        self.store
            .value(subject, predicate)
            .map(|t| t.lexical().to_string())
    }

    /// Numeric attribute; absent or non-numeric values read as `0`.
    fn number(&self, subject: &Term, predicate: &Term) -> f64 {
        match self.store.value(subject, predicate) {
            None => 0.0,
            Some(value) => value.as_f64().unwrap_or_else(|| {
                warn!(subject = %subject, predicate = %predicate, value = %value, "non-numeric value read as 0");
                0.0
            }),
        }
    }
}

/// Extracts the report below `root` with predicates qualified by `namespace`, using default
/// settings.
pub fn extract<S: FactStore + ?Sized>(store: &S, root: &Term, namespace: &str) -> Report {
    Extractor::new(store, Vocabulary::new(namespace), &ExtractConfig::default()).extract(root)
}
