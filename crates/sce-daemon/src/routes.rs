//! Axum router and all HTTP handlers for sce-daemon.
//!
//! `build_router` is the single entry point; `main.rs` calls it and attaches
//! middleware layers. All handlers are `pub(crate)` so the scenario tests in
//! `tests/` can compose the router directly.
//!
//! Error mapping (deliberately asymmetric): document-level failures are
//! fatal to the request (store down → 500, document missing → 404, document
//! malformed → 500), while row-level anomalies never surface here at all —
//! the merge engine skips them.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tracing::{error, warn};

use sce_db::StoreError;
use sce_series::SeriesError;

use crate::{
    api_types::{ErrorResponse, HealthResponse, SensorShowResponse},
    state::AppState,
};

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Build the complete application router wired to the given shared state.
///
/// Middleware layers (CORS, tracing) are **not** applied here; `main.rs`
/// attaches them after this call so tests can use the bare router.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/tabsensor", get(tabsensor_index))
        .route("/tabsensor/:id", get(tabsensor_show))
        .route("/energy", get(energy_document))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// GET /health
// ---------------------------------------------------------------------------

pub(crate) async fn health(State(st): State<Arc<AppState>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            ok: true,
            service: st.build.service,
            version: st.build.version,
        }),
    )
}

// ---------------------------------------------------------------------------
// GET /tabsensor
// ---------------------------------------------------------------------------

/// The merged GeoJSON view: every sensor, enriched with its latest reading
/// and full matched history from the series document.
pub(crate) async fn tabsensor_index(State(st): State<Arc<AppState>>) -> Response {
    let sensors = match st.store.find_all().await {
        Ok(sensors) => sensors,
        Err(e) => return store_failure(e),
    };

    let bytes = match st.series.read_bytes().await {
        Ok(bytes) => bytes,
        Err(e) => return series_failure(e),
    };

    let doc = match sce_series::parse_document(&bytes) {
        Ok(doc) => doc,
        Err(e) => return series_failure(e),
    };

    let collection = sce_reconcile::reconcile(&sensors, &doc);
    (StatusCode::OK, Json(collection)).into_response()
}

// ---------------------------------------------------------------------------
// GET /tabsensor/:id
// ---------------------------------------------------------------------------

/// Single sensor record by id, independent of the merge.
pub(crate) async fn tabsensor_show(
    State(st): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Response {
    match st.store.find_by_id(id).await {
        Ok(Some(tabsensor)) => {
            (StatusCode::OK, Json(SensorShowResponse { tabsensor })).into_response()
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("no sensor with sourceid {id}"),
            }),
        )
            .into_response(),
        Err(e) => store_failure(e),
    }
}

// ---------------------------------------------------------------------------
// GET /energy
// ---------------------------------------------------------------------------

/// The raw series document, byte-for-byte, for direct download.
pub(crate) async fn energy_document(State(st): State<Arc<AppState>>) -> Response {
    match st.series.read_bytes().await {
        Ok(bytes) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            bytes,
        )
            .into_response(),
        Err(e) => series_failure(e),
    }
}

// ---------------------------------------------------------------------------
// Error mapping
// ---------------------------------------------------------------------------

fn store_failure(e: StoreError) -> Response {
    error!(%e, "sensor store failure");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: "failed to load sensors from the store".to_string(),
        }),
    )
        .into_response()
}

fn series_failure(e: SeriesError) -> Response {
    // Missing document is a distinct, non-fault condition for the caller;
    // everything else is a server-side failure.
    let (status, msg) = match &e {
        SeriesError::NotFound(_) => (StatusCode::NOT_FOUND, "series document not found"),
        SeriesError::Read(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "failed to read series document",
        ),
        SeriesError::Format(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "series document is malformed",
        ),
    };
    warn!(%e, "series document failure");
    (
        status,
        Json(ErrorResponse {
            error: msg.to_string(),
        }),
    )
        .into_response()
}
