//! sce-series
//!
//! Source boundary for the raw time-series document.
//!
//! This crate defines **only** the byte-level source contract, the file
//! implementation and the parse step to [`SeriesDocument`]. No merge logic
//! and no HTTP belong here. Document-level failures are fatal to a request
//! and therefore explicit in the error type; row-level noise is not this
//! crate's concern (the merge skips it).

use std::fmt;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use sce_schemas::SeriesDocument;

pub const ENV_SERIES_PATH: &str = "SCE_SERIES_PATH";
pub const DEFAULT_SERIES_PATH: &str = "data/energy.json";

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Failures obtaining or decoding the series document.
///
/// The three variants stay distinct so the caller can report "document
/// missing" vs "unreadable" vs "malformed" instead of one opaque failure.
#[derive(Debug)]
pub enum SeriesError {
    /// The document does not exist at the configured location.
    NotFound(PathBuf),
    /// The document exists but could not be read.
    Read(String),
    /// The bytes do not parse as the expected document shape.
    Format(String),
}

impl fmt::Display for SeriesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeriesError::NotFound(path) => {
                write!(f, "series document not found: {}", path.display())
            }
            SeriesError::Read(msg) => write!(f, "series document read failed: {msg}"),
            SeriesError::Format(msg) => write!(f, "series document is malformed: {msg}"),
        }
    }
}

impl std::error::Error for SeriesError {}

// ---------------------------------------------------------------------------
// Source contract
// ---------------------------------------------------------------------------

/// Provider of the raw series document bytes.
///
/// Object-safe so the daemon holds an `Arc<dyn SeriesSource>`; tests
/// substitute in-memory fakes.
#[async_trait]
pub trait SeriesSource: Send + Sync {
    async fn read_bytes(&self) -> Result<Vec<u8>, SeriesError>;
}

// ---------------------------------------------------------------------------
// File implementation
// ---------------------------------------------------------------------------

/// Reads the document from a file produced by the ingestion side.
#[derive(Debug, Clone)]
pub struct FileSeriesSource {
    path: PathBuf,
}

impl FileSeriesSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path from SCE_SERIES_PATH, falling back to `data/energy.json`.
    pub fn from_env() -> Self {
        let path = std::env::var(ENV_SERIES_PATH)
            .unwrap_or_else(|_| DEFAULT_SERIES_PATH.to_string());
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SeriesSource for FileSeriesSource {
    async fn read_bytes(&self) -> Result<Vec<u8>, SeriesError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(SeriesError::NotFound(self.path.clone()))
            }
            Err(e) => Err(SeriesError::Read(e.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse
// ---------------------------------------------------------------------------

/// Decode raw bytes into the document shape.
///
/// All-or-nothing: a document that does not match the container shape is a
/// [`SeriesError::Format`], never partially accepted.
pub fn parse_document(bytes: &[u8]) -> Result<SeriesDocument, SeriesError> {
    serde_json::from_slice(bytes).map_err(|e| SeriesError::Format(e.to_string()))
}
