//! Digital-twin inventory extraction.
//!
//! This crate defines:
//! - [`FactStore`]: the read-only fact graph contract, with [`MemoryStore`] and the persistent
//!   [`SledStore`] behind it.
//! - [`parse_turtle`] / [`load_turtle_file`]: loading a Turtle description into memory.
//! - [`resolve_namespace`] and [`resolve_root`]: locating the domain vocabulary and the
//!   top-level facility.
//! - [`Extractor`]: the containment walk producing a [`Report`] of sensors, actuators,
//!   geolocations and meshes per resource.
//! - [`render_text`] / [`render_json`]: operator-facing output.
//!
//! ```rust,ignore
//! use twin_inventory::{extract_report, load_turtle_file, render_text, ExtractConfig};
//!
//! let store = load_turtle_file("dt.ttl")?;
//! let report = extract_report(&store, &ExtractConfig::default())?;
//! print!("{}", render_text(&report));
//! ```

use tracing::instrument;

pub mod config;
pub mod error;
pub mod extract;
pub mod geometry;
pub mod mesh;
pub mod model;
pub mod namespace;
pub mod report;
pub mod root;
pub mod sled_store;
pub mod store;
pub mod term;
pub mod turtle;
pub mod vocab;

pub use config::{ChildOrder, ExtractConfig, RootSelection};
pub use error::{ExtractError, Result};
pub use extract::{extract, Extractor};
pub use geometry::{parse_wkt_point, Vector3D};
pub use mesh::decode_mesh;
pub use model::{Actuator, GeoLocation, MeshGeometry, Report, ResourceRecord, Sensor};
pub use namespace::resolve_namespace;
pub use report::{render_json, render_text};
pub use root::resolve_root;
pub use sled_store::SledStore;
pub use store::{FactStore, MemoryStore};
pub use term::{Term, Triple};
pub use turtle::{load_turtle_file, parse_turtle};
pub use vocab::Vocabulary;

// Re-export so callers can open or configure the database without a direct `sled` dependency.
pub use sled;

/// Resolves namespace and root, then extracts the full report.
///
/// Either resolution failing aborts the run; no partial report is produced.
#[instrument(skip_all, fields(marker = %config.domain_marker))]
pub fn extract_report<S: FactStore + ?Sized>(store: &S, config: &ExtractConfig) -> Result<Report> {
    let namespace = resolve_namespace(store, &config.domain_marker)?;
    let vocab = Vocabulary::new(namespace);
    let root = resolve_root(store, &vocab, config.root_selection)?;
    Ok(Extractor::new(store, vocab, config).extract(&root))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: &str = r#"
        @prefix ns0: <http://www.example.org/digitaltwin#> .
        @prefix geo: <http://www.opengis.net/ont/geosparql#> .

        ns0:Floor ns0:hasChildDigitalTwin ns0:Room1, ns0:Room2 .
        ns0:Room1 ns0:hasSensor [ ns0:sensorID "S-1" ; ns0:sensorType "CO2" ] .
    "#;

    #[test]
    fn pipeline_resolves_and_extracts() {
        let store = parse_turtle(DT).unwrap();
        let report = extract_report(&store, &ExtractConfig::default()).unwrap();

        let names: Vec<_> = report.iter().map(|r| r.resource.local_name()).collect();
        assert_eq!(names, vec!["Floor", "Room1", "Room2"]);
        assert_eq!(report.records()[1].sensors[0].kind, "CO2");
    }

    #[test]
    fn pipeline_stops_on_missing_namespace() {
        let store = parse_turtle(DT).unwrap();
        let config = ExtractConfig {
            domain_marker: "acme.test".into(),
            ..ExtractConfig::default()
        };
        assert!(matches!(
            extract_report(&store, &config),
            Err(ExtractError::NamespaceNotFound { .. })
        ));
    }

    #[test]
    fn works_through_trait_objects() {
        let store = parse_turtle(DT).unwrap();
        let dynamic: &dyn FactStore = &store;
        let report = extract_report(dynamic, &ExtractConfig::default()).unwrap();
        assert_eq!(report.len(), 3);
    }
}
