//! Shared wire and data-model types for the campus energy API.
//!
//! Three families live here:
//! - the sensor record as stored in Postgres (`SensorRecord`),
//! - the raw series document shape produced by the ingestion side
//!   (`SeriesDocument` and friends),
//! - the GeoJSON output model (`Feature`, `FeatureCollection`).
//!
//! No business logic; serde types only. The merge itself lives in
//! `sce-reconcile`.

use serde::{Deserialize, Serialize};

/// Fixed `source` label stamped on every output feature.
pub const SOURCE_LABEL: &str = "PRODUCTION PHOTOVOLTAÏQUE";

/// Placeholder used for `time`, `symbol` and `lastUpdated` when no data exists.
pub const NOT_AVAILABLE: &str = "N/A";

// ---------------------------------------------------------------------------
// Sensor record (Postgres side)
// ---------------------------------------------------------------------------

/// One physical sensor: identity plus geographic placement.
///
/// Latitude/longitude are kept as text verbatim from the table; the merge
/// trims surrounding whitespace but never reinterprets them as numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorRecord {
    #[serde(rename = "sourceid")]
    pub source_id: i32,
    pub latitude: String,
    pub longitude: String,
}

// ---------------------------------------------------------------------------
// Series document (ingestion side)
// ---------------------------------------------------------------------------

/// The raw time-series payload: nested groups of positional rows.
///
/// This mirrors the columnar results shape the ingestion pipeline emits.
/// Every container defaults to empty so a sparse or truncated document still
/// deserializes; row-level validation happens during the merge, not here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesDocument {
    #[serde(default)]
    pub results: Vec<ResultGroup>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultGroup {
    #[serde(default)]
    pub series: Vec<SeriesGroup>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesGroup {
    #[serde(default)]
    pub columns: Vec<String>,
    /// Positional rows: `[timestamp, _, sourceIdAsString, symbol, value]`.
    #[serde(default)]
    pub values: Vec<SeriesRow>,
}

/// One observation row. Positions are meaningful, types are not guaranteed.
pub type SeriesRow = Vec<CellValue>;

/// A single loosely-typed cell of a series row.
///
/// The feed mixes string and number encodings for the same logical field, so
/// the boundary models exactly that union. Anything else (null, bool, nested
/// containers) is captured as `Other` and rejected by row validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl CellValue {
    /// The cell as a string, or `None` when it is not string-encoded.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The cell as a float, accepting both the numeric and the
    /// numeric-string encodings. `"4.2"` and `4.2` yield the same result.
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(s) => s.parse::<f64>().ok(),
            CellValue::Other(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// GeoJSON output model
// ---------------------------------------------------------------------------

/// One normalized observation matched to a sensor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub time: String,
    pub value: f64,
    pub symbol: String,
}

impl Reading {
    /// The reading used when a sensor has no matched history.
    pub fn placeholder() -> Self {
        Self {
            time: NOT_AVAILABLE.to_string(),
            value: 0.0,
            symbol: NOT_AVAILABLE.to_string(),
        }
    }
}

/// Point geometry with coordinates kept as (trimmed) text, verbatim from the
/// sensor table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: Vec<String>,
}

impl Geometry {
    pub fn point(latitude: String, longitude: String) -> Self {
        Self {
            kind: "Point".to_string(),
            coordinates: vec![latitude, longitude],
        }
    }
}

/// One sensor enriched with its latest reading and full matched history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub source: String,
    #[serde(rename = "sourceId")]
    pub source_id: i32,
    pub geometry: Geometry,
    /// Latest reading: first history entry in document order, or placeholder.
    pub properties: Reading,
    pub history: Vec<Reading>,
    /// Always `"N/A"`; carried through unchanged, never derived from history.
    #[serde(rename = "lastUpdated")]
    pub last_updated: String,
}

/// The full response payload, one feature per sensor, sensor order preserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: String,
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            kind: "FeatureCollection".to_string(),
            features,
        }
    }
}
