//! Typed errors for the enrichment library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling. The split mirrors how
//! failures propagate: source and analysis errors are handled at the
//! pipeline boundary and never abort a run, while credential and
//! storage errors are fatal.

use thiserror::Error;

/// Fatal errors that abort a run (or prevent it from starting).
#[derive(Debug, Error)]
pub enum EnrichmentError {
    /// Required credential missing at startup; no run is attempted.
    #[error("missing credential: {var} is not set")]
    MissingCredential { var: String },

    /// Persistence failed; the run aborts and prior artifacts are kept.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Errors from an event source query. Per-query and non-fatal: the
/// pipeline logs them and substitutes an empty batch.
#[derive(Debug, Error)]
pub enum SourceError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Search API returned a non-success status
    #[error("search API returned status {status}")]
    Status { status: u16 },

    /// Response body did not decode as an event array
    #[error("malformed response body: {0}")]
    Body(#[from] serde_json::Error),
}

/// Errors from the AI analysis call. Non-fatal: the pipeline logs them
/// and keeps the plain event list persisted.
///
/// A response that arrives but contains no parseable brief is not an
/// error; `Analyst::analyze` returns `Ok(None)` for that case.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Model endpoint returned a non-success status
    #[error("model endpoint returned status {status}")]
    Status { status: u16 },
}

/// Errors reading or writing the persisted artifacts.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Persisted JSON could not be encoded or decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, EnrichmentError>;

/// Result type alias for event source queries.
pub type SourceResult<T> = std::result::Result<T, SourceError>;

/// Result type alias for analysis operations.
pub type AnalysisResult<T> = std::result::Result<T, AnalysisError>;

/// Result type alias for storage operations.
pub type StorageResult<T> = std::result::Result<T, StorageError>;
