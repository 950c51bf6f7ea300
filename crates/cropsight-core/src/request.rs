//! Imagery request construction (the geometry builder)
//!
//! Pure, no I/O: a raw vertex list plus a sampling window become a fully
//! specified process-API payload. Everything except the polygon ring and the
//! time window is fixed: CRS, data source, mosaicking order, output shape,
//! and the 4-band NDVI classification script the downstream comparator
//! depends on.

use cropsight_types::Polygon;
use serde::{Deserialize, Serialize};

/// Fixed coordinate reference system (EPSG:4326)
pub const CRS: &str = "http://www.opengis.net/def/crs/EPSG/0/4326";

/// Fixed imagery data source
pub const DATA_SOURCE: &str = "sentinel-2-l2a";

/// Fixed mosaicking order: least cloud cover first
pub const MOSAICKING_ORDER: &str = "leastCC";

/// Fixed output edge length in pixels
pub const OUTPUT_SIZE: u32 = 1024;

/// Fixed output format
pub const OUTPUT_FORMAT: &str = "image/png";

/// Pixel-classification script sent with every request.
///
/// Maps NDVI to 4 discrete color bands; pixels outside the data mask are
/// background. The comparator's class breakdown depends on this exact
/// banding, so the script is reproduced verbatim.
pub const EVALSCRIPT: &str = r#"//VERSION=3
function setup() {
  return {
    input: ["B04", "B08", "dataMask"],
    output: { bands: 3, sampleType: "AUTO" }
  };
}

function evaluatePixel(s) {
  if (s.dataMask === 0) return [0, 0, 0];
  let ndvi = (s.B08 - s.B04) / (s.B08 + s.B04);

  if (ndvi < 0.2) {
    return [0.5, 0.5, 0.5]; // gray = Bare/Non-Veg
  } else if (ndvi < 0.4) {
    return [1, 1, 0];       // yellow = Sparse Veg
  } else if (ndvi < 0.6) {
    return [0, 1, 0];       // light green = Moderate Veg
  } else {
    return [0, 0.5, 0];     // dark green = Dense Veg
  }
}
"#;

/// One calendar month to sample imagery from.
///
/// The time window always spans the 1st through the 30th day of the month at
/// UTC day boundaries, matching the provider contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplingWindow {
    /// Calendar year
    pub year: i32,
    /// Calendar month, 1-12
    pub month: u32,
}

impl SamplingWindow {
    /// Create a sampling window
    #[inline]
    #[must_use]
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// Window start: first day of the month at midnight UTC
    #[inline]
    #[must_use]
    pub fn from_instant(&self) -> String {
        format!("{:04}-{:02}-01T00:00:00Z", self.year, self.month)
    }

    /// Window end: 30th day of the month, last second UTC
    #[inline]
    #[must_use]
    pub fn to_instant(&self) -> String {
        format!("{:04}-{:02}-30T23:59:59Z", self.year, self.month)
    }
}

/// Fully specified imagery-processing request.
///
/// Constructed fresh per call by [`build_request`]; never persisted. The
/// serde shape mirrors the provider's process API exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRequest {
    pub input: Input,
    pub output: Output,
    pub evalscript: String,
}

/// Request input: bounds plus data-source filters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Input {
    pub bounds: Bounds,
    pub data: Vec<DataSource>,
}

/// Geometry plus CRS properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub geometry: Geometry,
    pub properties: BoundsProperties,
}

/// GeoJSON-style polygon geometry: one closed ring of `[lon, lat]` pairs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: Vec<Vec<[f64; 2]>>,
}

/// Bounds properties: coordinate reference system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundsProperties {
    pub crs: String,
}

/// One imagery data source with its filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSource {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "dataFilter")]
    pub data_filter: DataFilter,
}

/// Time window and mosaicking rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataFilter {
    #[serde(rename = "timeRange")]
    pub time_range: TimeRange,
    #[serde(rename = "mosaickingOrder")]
    pub mosaicking_order: String,
}

/// ISO-8601 instant pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    pub from: String,
    pub to: String,
}

/// Output shape and response formats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Output {
    pub width: u32,
    pub height: u32,
    pub responses: Vec<OutputResponse>,
}

/// One named output response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputResponse {
    pub identifier: String,
    pub format: OutputFormat,
}

/// Output MIME type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputFormat {
    #[serde(rename = "type")]
    pub kind: String,
}

/// Build a complete imagery request for one sampling window.
///
/// Closes the polygon ring by appending the first vertex; the caller
/// guarantees a non-empty polygon (zero vertices is a contract violation
/// upstream and is not validated here).
#[must_use]
pub fn build_request(window: SamplingWindow, polygon: &Polygon) -> ImageRequest {
    ImageRequest {
        input: Input {
            bounds: Bounds {
                geometry: Geometry {
                    kind: "Polygon".to_string(),
                    coordinates: vec![polygon.closed_ring()],
                },
                properties: BoundsProperties {
                    crs: CRS.to_string(),
                },
            },
            data: vec![DataSource {
                kind: DATA_SOURCE.to_string(),
                data_filter: DataFilter {
                    time_range: TimeRange {
                        from: window.from_instant(),
                        to: window.to_instant(),
                    },
                    mosaicking_order: MOSAICKING_ORDER.to_string(),
                },
            }],
        },
        output: Output {
            width: OUTPUT_SIZE,
            height: OUTPUT_SIZE,
            responses: vec![OutputResponse {
                identifier: "default".to_string(),
                format: OutputFormat {
                    kind: OUTPUT_FORMAT.to_string(),
                },
            }],
        },
        evalscript: EVALSCRIPT.to_string(),
    }
}
