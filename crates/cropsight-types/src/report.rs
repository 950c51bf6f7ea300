//! The composed NDVI change report
//!
//! The comparator service produces the per-class breakdown; the orchestrator
//! overwrites `total_area_ha` with the resolved boundary's area and fills in
//! the uploaded artifact URLs before the report leaves the pipeline.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Before/after breakdown for one vegetation class.
///
/// Field names follow the comparator's wire format.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VegClassChange {
    /// Class area in the earlier window, hectares
    pub before_ha: f64,
    /// Class area in the later window, hectares
    pub after_ha: f64,
    /// Signed area change, hectares
    pub change_ha: f64,
    /// Class share of the boundary in the earlier window, percent
    pub before_perc: f64,
    /// Class share of the boundary in the later window, percent
    pub after_perc: f64,
}

/// Structured before/after vegetation change over a farmer's boundary.
///
/// `Default` is the empty report returned for an unknown farmer: all numeric
/// fields zero, no classes, no artifact URLs.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChangeReport {
    /// Total boundary area in hectares (always the resolved boundary's area)
    pub total_area_ha: f64,
    /// Per-class breakdown keyed by class name
    #[serde(default)]
    pub classes: BTreeMap<String, VegClassChange>,
    /// Public URLs of the uploaded snapshots, in upload order
    #[serde(default)]
    pub urls: Vec<String>,
}

impl ChangeReport {
    /// The empty report produced for a boundary lookup miss
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_report_has_defaults() {
        let report = ChangeReport::empty();
        assert_eq!(report.total_area_ha, 0.0);
        assert!(report.classes.is_empty());
        assert!(report.urls.is_empty());
    }

    #[test]
    fn report_round_trips_comparator_wire_format() {
        let json = r#"{
            "total_area_ha": 10.0,
            "classes": {
                "dense vegetation": {
                    "before_ha": 2.0,
                    "after_ha": 3.0,
                    "change_ha": 1.0,
                    "before_perc": 20.0,
                    "after_perc": 30.0
                }
            }
        }"#;

        let report: ChangeReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.total_area_ha, 10.0);
        assert!(report.urls.is_empty());

        let class = &report.classes["dense vegetation"];
        assert_eq!(class.change_ha, 1.0);
    }
}
