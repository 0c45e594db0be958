//! Query error types
//!
//! Error codes:
//! - TT_INDEX_NOT_BUILT (FATAL)
//! - TT_BOUND_TYPE_MISMATCH (ERROR)
//! - TT_INVALID_BOUND (ERROR)
//! - TT_INVALID_REQUEST (ERROR)
//! - TT_EXPORT_FAILED (ERROR)
//!
//! Absent values and empty results are never errors.

use std::fmt;

use crate::record::{AttributeKind, RecordError};

/// Severity levels for query errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Request failed, engine state unchanged
    Error,
    /// Caller violated an engine precondition
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Query-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryErrorCode {
    /// Query issued before any batch was loaded
    TtIndexNotBuilt,
    /// Range bound kind does not match the attribute kind
    TtBoundTypeMismatch,
    /// Lower bound above upper bound (request layer only)
    TtInvalidBound,
    /// Request names an unknown attribute or an unparseable value
    TtInvalidRequest,
    /// Export collaborator failed
    TtExportFailed,
}

impl QueryErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            QueryErrorCode::TtIndexNotBuilt => "TT_INDEX_NOT_BUILT",
            QueryErrorCode::TtBoundTypeMismatch => "TT_BOUND_TYPE_MISMATCH",
            QueryErrorCode::TtInvalidBound => "TT_INVALID_BOUND",
            QueryErrorCode::TtInvalidRequest => "TT_INVALID_REQUEST",
            QueryErrorCode::TtExportFailed => "TT_EXPORT_FAILED",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        match self {
            QueryErrorCode::TtIndexNotBuilt => Severity::Fatal,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for QueryErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Query error with code and message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryError {
    code: QueryErrorCode,
    message: String,
}

impl QueryError {
    /// No batch has been loaded (FATAL)
    pub fn index_not_built() -> Self {
        Self {
            code: QueryErrorCode::TtIndexNotBuilt,
            message: "No record batch loaded; indexes have not been built".to_string(),
        }
    }

    /// Bound of the wrong kind for the searched attribute
    pub fn bound_type_mismatch(target: &str, expected: AttributeKind, found: AttributeKind) -> Self {
        Self {
            code: QueryErrorCode::TtBoundTypeMismatch,
            message: format!(
                "Range on {} expects {} bounds, got {}",
                target,
                expected.name(),
                found.name()
            ),
        }
    }

    /// Lower bound above upper bound
    pub fn invalid_bound(target: &str, lower: &str, upper: &str) -> Self {
        Self {
            code: QueryErrorCode::TtInvalidBound,
            message: format!(
                "Range on {}: lower bound {} is after upper bound {}",
                target, lower, upper
            ),
        }
    }

    /// Request cannot be interpreted
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            code: QueryErrorCode::TtInvalidRequest,
            message: message.into(),
        }
    }

    /// Export collaborator failed
    pub fn export_failed(reason: impl Into<String>) -> Self {
        Self {
            code: QueryErrorCode::TtExportFailed,
            message: reason.into(),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> QueryErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns true if this is a precondition violation
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity(), self.code, self.message)
    }
}

impl std::error::Error for QueryError {}

impl From<RecordError> for QueryError {
    fn from(err: RecordError) -> Self {
        Self::invalid_request(format!("{}: {}", err.code(), err.message()))
    }
}

/// Result type for query operations
pub type QueryResult<T> = Result<T, QueryError>;
