//! Spatial helpers over extracted mesh vertices and geolocations.
//!
//! Vertices are carried through a report as WKT text; these helpers turn them into vectors
//! for downstream math.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::model::{GeoLocation, MeshGeometry};

/// A 3D coordinate wrapper over [`nalgebra::Vector3<f64>`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vector3D(pub Vector3<f64>);

impl Vector3D {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self(Vector3::new(x, y, z))
    }

    pub fn x(&self) -> f64 {
        self.0.x
    }

    pub fn y(&self) -> f64 {
        self.0.y
    }

    pub fn z(&self) -> f64 {
        self.0.z
    }
}

/// Parses a WKT point.
///
/// Accepts `POINT(x y)`, `POINT (x y z)` and `POINT Z (x y z)`, keyword case-insensitive,
/// optionally preceded by a `<crs>` IRI as GeoSPARQL literals allow. A missing z is `0`.
pub fn parse_wkt_point(text: &str) -> Option<Vector3D> {
    let mut text = text.trim();
    if text.starts_with('<') {
        let end = text.find('>')?;
        text = text[end + 1..].trim_start();
    }

    let open = text.find('(')?;
    let close = text.rfind(')')?;
    if close < open || !text[close + 1..].trim().is_empty() {
        return None;
    }

    let mut keyword = text[..open].split_whitespace();
    if !keyword.next()?.eq_ignore_ascii_case("POINT") {
        return None;
    }
    match keyword.next() {
        None => {}
        Some(dim) if dim.eq_ignore_ascii_case("Z") => {}
        Some(_) => return None,
    }
    if keyword.next().is_some() {
        return None;
    }

    let coords = text[open + 1..close]
        .split_whitespace()
        .map(str::parse::<f64>)
        .collect::<Result<Vec<_>, _>>()
        .ok()?;

    match coords.as_slice() {
        [x, y] => Some(Vector3D::new(*x, *y, 0.0)),
        [x, y, z] => Some(Vector3D::new(*x, *y, *z)),
        _ => None,
    }
}

impl MeshGeometry {
    /// Parsed vertices; entries that are not WKT points are skipped.
    pub fn points(&self) -> Vec<Vector3D> {
        self.vertices
            .iter()
            .filter_map(|v| parse_wkt_point(v))
            .collect()
    }

    /// Mean of the parsed vertices.
    pub fn centroid(&self) -> Option<Vector3D> {
        let points = self.points();
        if points.is_empty() {
            return None;
        }
        let sum = points
            .iter()
            .fold(Vector3::<f64>::zeros(), |acc, p| acc + p.0);
        Some(Vector3D(sum / points.len() as f64))
    }
}

impl GeoLocation {
    /// `(longitude, latitude, altitude)`, matching WKT axis order.
    pub fn to_vector(&self) -> Vector3D {
        Vector3D::new(self.longitude, self.latitude, self.altitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wkt_point_variants() {
        assert_eq!(parse_wkt_point("POINT(1 2)"), Some(Vector3D::new(1.0, 2.0, 0.0)));
        assert_eq!(
            parse_wkt_point("point z (1.5 -2 3e1)"),
            Some(Vector3D::new(1.5, -2.0, 30.0))
        );
        assert_eq!(
            parse_wkt_point("<http://www.opengis.net/def/crs/OGC/1.3/CRS84> POINT (4 5 6)"),
            Some(Vector3D::new(4.0, 5.0, 6.0))
        );
    }

    #[test]
    fn wkt_rejects_non_points() {
        assert_eq!(parse_wkt_point("LINESTRING(0 0, 1 1)"), None);
        assert_eq!(parse_wkt_point("POINT EMPTY"), None);
        assert_eq!(parse_wkt_point("POINT(1)"), None);
        assert_eq!(parse_wkt_point("POINT(a b)"), None);
        assert_eq!(parse_wkt_point("POINT M (1 2 3)"), None);
    }

    #[test]
    fn centroid_of_mesh() {
        let mesh = MeshGeometry {
            name: "Mesh_Room_10".into(),
            vertices: vec![
                "POINT Z (0 0 0)".into(),
                "POINT Z (2 0 0)".into(),
                "not a point".into(),
                "POINT Z (1 3 3)".into(),
            ],
        };
        assert_eq!(mesh.points().len(), 3);

        let c = mesh.centroid().unwrap();
        assert!((c.x() - 1.0).abs() < 1e-12);
        assert!((c.y() - 1.0).abs() < 1e-12);
        assert!((c.z() - 1.0).abs() < 1e-12);

        let empty = MeshGeometry {
            name: "Empty".into(),
            vertices: vec![],
        };
        assert_eq!(empty.centroid(), None);
    }

    #[test]
    fn geolocation_axis_order() {
        let geo = GeoLocation {
            latitude: 52.0,
            longitude: 4.0,
            altitude: 10.0,
        };
        assert_eq!(geo.to_vector(), Vector3D::new(4.0, 52.0, 10.0));
    }
}
