//! Request and response types for the sce-daemon HTTP endpoints.
//!
//! The GeoJSON payload itself lives in `sce-schemas`; only the daemon-local
//! envelopes are defined here. No business logic.

use sce_schemas::SensorRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub service: &'static str,
    pub version: &'static str,
}

/// Uniform error body for every failing route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Envelope for GET /tabsensor/:id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorShowResponse {
    pub tabsensor: SensorRecord,
}
