//! Shared runtime state for sce-daemon.
//!
//! Handlers receive `State<Arc<AppState>>` from Axum. The sensor store and
//! the series source are injected here once at startup as trait objects;
//! handlers never reach through ambient globals, and tests substitute
//! in-memory fakes.

use std::sync::Arc;

use sce_db::SensorStore;
use sce_series::SeriesSource;

/// Static build metadata included in the health response.
#[derive(Clone, Debug)]
pub struct BuildInfo {
    pub service: &'static str,
    pub version: &'static str,
}

/// Cloneable (Arc) handle shared across all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub build: BuildInfo,
    /// Sensor identity and placement (Postgres in production).
    pub store: Arc<dyn SensorStore>,
    /// Raw series document bytes (file on disk in production).
    pub series: Arc<dyn SeriesSource>,
}

impl AppState {
    pub fn new(store: Arc<dyn SensorStore>, series: Arc<dyn SeriesSource>) -> Self {
        Self {
            build: BuildInfo {
                service: "sce-daemon",
                version: env!("CARGO_PKG_VERSION"),
            },
            store,
            series,
        }
    }
}
