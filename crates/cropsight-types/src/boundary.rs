//! Resolved farmer boundaries
//!
//! The coordinate directory returns every known boundary on each listing
//! call; resolution is a per-request lookup, never cached.

use crate::geometry::Polygon;
use serde::{Deserialize, Serialize};

/// A farmer's land parcel: identifier, open polygon, and total area.
///
/// Immutable once resolved. The wire shape matches the coordinate
/// directory's listing records: `{farmerId, coordinates: [...], area}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FarmerBoundary {
    /// Unique farmer identifier
    #[serde(rename = "farmerId")]
    pub farmer_id: String,
    /// Open boundary polygon
    #[serde(rename = "coordinates")]
    pub polygon: Polygon,
    /// Total parcel area in hectares
    #[serde(rename = "area")]
    pub total_area_ha: f64,
}

impl FarmerBoundary {
    /// Create a new boundary
    #[inline]
    #[must_use]
    pub fn new(farmer_id: impl Into<String>, polygon: Polygon, total_area_ha: f64) -> Self {
        Self {
            farmer_id: farmer_id.into(),
            polygon,
            total_area_ha,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_deserializes_from_directory_record() {
        let json = r#"{
            "farmerId": "F100",
            "coordinates": [
                {"lat": 28.50, "lng": 77.10},
                {"lat": 28.50, "lng": 77.20},
                {"lat": 28.60, "lng": 77.20}
            ],
            "area": 12.5
        }"#;

        let boundary: FarmerBoundary = serde_json::from_str(json).unwrap();
        assert_eq!(boundary.farmer_id, "F100");
        assert_eq!(boundary.polygon.len(), 3);
        assert_eq!(boundary.total_area_ha, 12.5);
    }
}
