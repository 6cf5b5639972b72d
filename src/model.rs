//! Records produced by an extraction run.

use serde::{Deserialize, Serialize};

use crate::term::Term;

/// Placeholder for a sensor or actuator without an id fact.
pub const UNKNOWN_ID: &str = "Unknown ID";
/// Placeholder for a sensor or actuator without a type fact.
pub const UNKNOWN_TYPE: &str = "Unknown Type";

/// A sensor attached to a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sensor {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Sensor {
    pub fn new(id: Option<String>, kind: Option<String>) -> Self {
        Self {
            id: id.unwrap_or_else(|| UNKNOWN_ID.to_string()),
            kind: kind.unwrap_or_else(|| UNKNOWN_TYPE.to_string()),
        }
    }
}

/// An actuator attached to a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actuator {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Actuator {
    pub fn new(id: Option<String>, kind: Option<String>) -> Self {
        Self {
            id: id.unwrap_or_else(|| UNKNOWN_ID.to_string()),
            kind: kind.unwrap_or_else(|| UNKNOWN_TYPE.to_string()),
        }
    }
}

/// Geographic position; absent components are `0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
}

/// A named mesh with its vertices as WKT point strings, in collection order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeshGeometry {
    pub name: String,
    pub vertices: Vec<String>,
}

/// Everything gathered for one resource of the hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceRecord {
    pub resource: Term,
    /// The resource whose containment edge first reached this one; `None` for the root.
    pub parent: Option<Term>,
    pub sensors: Vec<Sensor>,
    pub actuators: Vec<Actuator>,
    pub geo_locations: Vec<GeoLocation>,
    pub meshes: Vec<MeshGeometry>,
}

impl ResourceRecord {
    pub fn new(resource: Term, parent: Option<Term>) -> Self {
        Self {
            resource,
            parent,
            sensors: Vec::new(),
            actuators: Vec::new(),
            geo_locations: Vec::new(),
            meshes: Vec::new(),
        }
    }

    /// True when nothing is attached to the resource.
    pub fn is_bare(&self) -> bool {
        self.sensors.is_empty()
            && self.actuators.is_empty()
            && self.geo_locations.is_empty()
            && self.meshes.is_empty()
    }
}

/// Records in traversal (preorder) order, one per distinct resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Report {
    records: Vec<ResourceRecord>,
}

impl Report {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[ResourceRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResourceRecord> {
        self.records.iter()
    }

    /// Index of the record for `resource`.
    pub fn position(&self, resource: &Term) -> Option<usize> {
        self.records.iter().position(|r| r.resource == *resource)
    }

    pub fn get(&self, resource: &Term) -> Option<&ResourceRecord> {
        self.position(resource).map(|i| &self.records[i])
    }
}

impl From<Vec<ResourceRecord>> for Report {
    fn from(records: Vec<ResourceRecord>) -> Self {
        Self { records }
    }
}

impl IntoIterator for Report {
    type Item = ResourceRecord;
    type IntoIter = std::vec::IntoIter<ResourceRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a Report {
    type Item = &'a ResourceRecord;
    type IntoIter = std::slice::Iter<'a, ResourceRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
