//! # Ingestion Errors

use thiserror::Error;

/// Result type for ingestion
pub type IngestResult<T> = Result<T, IngestError>;

/// Ingestion errors
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Failed to open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed record data in {origin}: {source}")]
    Malformed {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
}

impl IngestError {
    /// Get the error code
    pub fn code(&self) -> &'static str {
        match self {
            IngestError::Open { .. } => "TT_INGEST_OPEN_FAILED",
            IngestError::Malformed { .. } => "TT_INGEST_MALFORMED",
        }
    }
}
