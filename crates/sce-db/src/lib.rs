//! sce-db
//!
//! Postgres access for sensor records: pool bootstrap, embedded migrations
//! and the [`SensorStore`] contract the daemon consumes.
//!
//! The store is injected into request handling as a trait object so the HTTP
//! layer (and its tests) never touch a concrete pool type.

use std::fmt;

use anyhow::{Context, Result};
use async_trait::async_trait;
use sce_schemas::SensorRecord;
use sqlx::{postgres::PgPoolOptions, PgPool};

pub const ENV_DB_URL: &str = "SCE_DATABASE_URL";

/// Connect to Postgres using SCE_DATABASE_URL.
pub async fn connect_from_env() -> Result<PgPool> {
    let url =
        std::env::var(ENV_DB_URL).with_context(|| format!("missing env var {ENV_DB_URL}"))?;

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&url)
        .await
        .context("failed to connect to Postgres")?;

    Ok(pool)
}

/// Run embedded SQLx migrations (creates `tabsensor`).
pub async fn migrate(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("db migrate failed")?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Store failures are server-side faults: the caller reports them, never
/// retries, and never mistakes them for a missing document.
#[derive(Debug)]
pub enum StoreError {
    Query(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Query(msg) => write!(f, "sensor store query failed: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::Query(e.to_string())
    }
}

// ---------------------------------------------------------------------------
// SensorStore contract
// ---------------------------------------------------------------------------

/// Read-only sensor store contract.
///
/// Object-safe so the daemon can hold an `Arc<dyn SensorStore>` without
/// knowing the concrete backend; tests substitute in-memory fakes.
#[async_trait]
pub trait SensorStore: Send + Sync {
    /// All sensors, ordered by source id for deterministic output.
    async fn find_all(&self) -> Result<Vec<SensorRecord>, StoreError>;

    /// One sensor by id, `None` when absent.
    async fn find_by_id(&self, id: i32) -> Result<Option<SensorRecord>, StoreError>;
}

// ---------------------------------------------------------------------------
// Postgres implementation
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct PgSensorStore {
    pool: PgPool,
}

impl PgSensorStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SensorStore for PgSensorStore {
    async fn find_all(&self) -> Result<Vec<SensorRecord>, StoreError> {
        let rows: Vec<(i32, String, String)> = sqlx::query_as(
            r#"
            select sourceid, latitude, longitude
            from tabsensor
            order by sourceid
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(source_id, latitude, longitude)| SensorRecord {
                source_id,
                latitude,
                longitude,
            })
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<SensorRecord>, StoreError> {
        let row: Option<(i32, String, String)> = sqlx::query_as(
            r#"
            select sourceid, latitude, longitude
            from tabsensor
            where sourceid = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(source_id, latitude, longitude)| SensorRecord {
            source_id,
            latitude,
            longitude,
        }))
    }
}
