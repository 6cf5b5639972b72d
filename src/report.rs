//! Console and JSON rendering of a [`Report`].

use std::fmt::Write as _;

use crate::error::Result;
use crate::model::{Report, ResourceRecord};

/// Renders the operator-facing console listing, one block per resource.
pub fn render_text(report: &Report) -> String {
    let mut out = String::new();
    for record in report {
        write_record(&mut out, record);
    }
    out
}

fn write_record(out: &mut String, record: &ResourceRecord) {
    let parent = record
        .parent
        .as_ref()
        .map_or("None", |p| p.local_name());
    // Writing into a String cannot fail.
    let _ = writeln!(
        out,
        "\nResource: {} (Parent: {parent})",
        record.resource.local_name()
    );

    if record.sensors.is_empty() {
        out.push_str("  Sensors: None\n");
    } else {
        out.push_str("  Sensors:\n");
        for s in &record.sensors {
            let _ = writeln!(out, "    - ID: {} (Type: {})", s.id, s.kind);
        }
    }

    if record.actuators.is_empty() {
        out.push_str("  Actuators: None\n");
    } else {
        out.push_str("  Actuators:\n");
        for a in &record.actuators {
            let _ = writeln!(out, "    - ID: {} (Type: {})", a.id, a.kind);
        }
    }

    if record.geo_locations.is_empty() {
        out.push_str("  geoLocation: None\n");
    } else {
        out.push_str("  Geolocation:\n");
        for g in &record.geo_locations {
            let _ = writeln!(out, "    - latitude: {}", g.latitude);
            let _ = writeln!(out, "    - longitude: {}", g.longitude);
            let _ = writeln!(out, "    - altitude: {}", g.altitude);
        }
    }

    if record.meshes.is_empty() {
        out.push_str("  Mesh Geometry: None\n");
    } else {
        out.push_str("  Mesh Geometry:\n");
        for mesh in &record.meshes {
            let _ = writeln!(out, "    Mesh: {}", mesh.name);
            for vertex in &mesh.vertices {
                let _ = writeln!(out, "      - Vertex: {vertex}");
            }
        }
    }
}

/// Serializes the report as a JSON array of records.
pub fn render_json(report: &Report, pretty: bool) -> Result<String> {
    Ok(if pretty {
        serde_json::to_string_pretty(report)?
    } else {
        serde_json::to_string(report)?
    })
}
