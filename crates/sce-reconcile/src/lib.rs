//! sce-reconcile
//!
//! Reconciliation engine joining the two heterogeneous sources:
//! sensor records from Postgres and the raw series document from the
//! ingestion side.
//!
//! Architectural decisions:
//! - Every sensor yields exactly one output feature, matched or not
//! - Row-level anomalies (short rows, wrong types, unparsable numbers)
//!   are skips, never errors; only the surrounding layer fails requests
//! - Feature order equals sensor input order
//! - History preserves document scan order, not chronological order
//!
//! Deterministic, pure logic. No IO. No DB calls.

mod engine;

pub use engine::reconcile;
