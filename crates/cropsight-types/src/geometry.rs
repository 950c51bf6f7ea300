//! Polygon geometry for farmer boundaries
//!
//! A boundary arrives from the coordinate directory as an ordered, open
//! vertex list. Closing the ring (duplicating the first vertex at the end)
//! happens only when an imagery request is built.

use serde::{Deserialize, Serialize};

/// One polygon vertex.
///
/// The coordinate directory serializes vertices as `{lat, lng}`; internally
/// we keep the GeoJSON-style longitude-first naming.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    /// Longitude in degrees (wire name `lng`)
    #[serde(rename = "lng")]
    pub lon: f64,
    /// Latitude in degrees
    pub lat: f64,
}

impl Vertex {
    /// Create a new vertex
    #[inline]
    #[must_use]
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// As a `[lon, lat]` position pair (imagery provider wire format)
    #[inline]
    #[must_use]
    pub fn position(&self) -> [f64; 2] {
        [self.lon, self.lat]
    }
}

/// Ordered vertex list delimiting a land parcel.
///
/// Implicitly open as resolved: the first vertex is *not* repeated at the
/// end. A valid boundary has at least 3 distinct vertices.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polygon(pub Vec<Vertex>);

impl Polygon {
    /// Create a polygon from vertices
    #[inline]
    #[must_use]
    pub fn new(vertices: Vec<Vertex>) -> Self {
        Self(vertices)
    }

    /// Number of vertices in the open polygon
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the polygon has no vertices
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Vertices of the open polygon
    #[inline]
    #[must_use]
    pub fn vertices(&self) -> &[Vertex] {
        &self.0
    }

    /// Closed ring as `[lon, lat]` pairs: the input vertices followed by a
    /// copy of the first vertex.
    ///
    /// Empty polygons are a contract violation upstream and yield an empty
    /// ring here rather than a panic.
    #[must_use]
    pub fn closed_ring(&self) -> Vec<[f64; 2]> {
        let mut ring: Vec<[f64; 2]> = self.0.iter().map(Vertex::position).collect();
        if let Some(first) = self.0.first() {
            ring.push(first.position());
        }
        ring
    }
}

impl From<Vec<Vertex>> for Polygon {
    fn from(vertices: Vec<Vertex>) -> Self {
        Self(vertices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Polygon {
        Polygon::new(vec![
            Vertex::new(77.10, 28.50),
            Vertex::new(77.20, 28.50),
            Vertex::new(77.20, 28.60),
            Vertex::new(77.10, 28.60),
        ])
    }

    #[test]
    fn closed_ring_appends_first_vertex() {
        let polygon = square();
        let ring = polygon.closed_ring();

        assert_eq!(ring.len(), polygon.len() + 1);
        assert_eq!(ring.first(), ring.last());
    }

    #[test]
    fn closed_ring_preserves_order() {
        let polygon = square();
        let ring = polygon.closed_ring();

        for (i, vertex) in polygon.vertices().iter().enumerate() {
            assert_eq!(ring[i], vertex.position());
        }
    }

    #[test]
    fn empty_polygon_yields_empty_ring() {
        let polygon = Polygon::default();
        assert!(polygon.closed_ring().is_empty());
    }

    #[test]
    fn vertex_deserializes_from_directory_shape() {
        let vertex: Vertex = serde_json::from_str(r#"{"lat": 28.5, "lng": 77.1}"#).unwrap();
        assert_eq!(vertex.lat, 28.5);
        assert_eq!(vertex.lon, 77.1);
    }
}
