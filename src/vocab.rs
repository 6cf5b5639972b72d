//! Predicate vocabulary of the digital-twin model.

use crate::term::Term;

pub const XSD_NS: &str = "http://www.w3.org/2001/XMLSchema#";
pub const GEO_NS: &str = "http://www.opengis.net/ont/geosparql#";

pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
pub const RDF_FIRST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#first";
pub const RDF_REST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#rest";
pub const RDF_NIL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#nil";
pub const GEO_AS_WKT: &str = "http://www.opengis.net/ont/geosparql#asWKT";

pub const HAS_CHILD_DIGITAL_TWIN: &str = "hasChildDigitalTwin";

/// The fixed predicate set, qualified against one domain namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    namespace: String,
    pub has_child: Term,
    pub has_sensor: Term,
    pub sensor_id: Term,
    pub sensor_type: Term,
    pub has_actuator: Term,
    pub actuator_id: Term,
    pub actuator_type: Term,
    pub has_geo_location: Term,
    pub latitude: Term,
    pub longitude: Term,
    pub altitude: Term,
    pub has_mesh_geometry: Term,
    pub has_vertices: Term,
    pub as_wkt: Term,
    pub rdf_first: Term,
    pub rdf_rest: Term,
    pub rdf_nil: Term,
}

impl Vocabulary {
    pub fn new(namespace: impl Into<String>) -> Self {
        let namespace = namespace.into();
        let term = |local: &str| Term::iri(format!("{namespace}{local}"));
        Self {
            has_child: term(HAS_CHILD_DIGITAL_TWIN),
            has_sensor: term("hasSensor"),
            sensor_id: term("sensorID"),
            sensor_type: term("sensorType"),
            has_actuator: term("hasActuator"),
            actuator_id: term("actuatorID"),
            actuator_type: term("actuatorType"),
            has_geo_location: term("hasGeoLocation"),
            latitude: term("latitude"),
            longitude: term("longitude"),
            altitude: term("altitude"),
            has_mesh_geometry: term("hasMeshGeometry"),
            has_vertices: term("hasVertices"),
            as_wkt: Term::iri(GEO_AS_WKT),
            rdf_first: Term::iri(RDF_FIRST),
            rdf_rest: Term::iri(RDF_REST),
            rdf_nil: Term::iri(RDF_NIL),
            namespace,
        }
    }

    /// Any other name in the domain namespace.
    pub fn term(&self, local: &str) -> Term {
        Term::iri(format!("{}{local}", self.namespace))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predicates_are_namespace_qualified() {
        let vocab = Vocabulary::new("http://www.example.org/digitaltwin#");
        assert_eq!(
            vocab.has_child,
            Term::iri("http://www.example.org/digitaltwin#hasChildDigitalTwin")
        );
        assert_eq!(vocab.term("sensorID"), vocab.sensor_id);
        assert_eq!(vocab.as_wkt.as_iri(), Some(GEO_AS_WKT));
    }
}
