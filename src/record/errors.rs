//! Record error types
//!
//! Error codes:
//! - TT_UNKNOWN_ATTRIBUTE (ERROR)
//! - TT_INVALID_VALUE (ERROR)

use std::fmt;

/// Record-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordErrorCode {
    /// Attribute name does not match any of the 15 record attributes
    TtUnknownAttribute,
    /// Value string cannot be read as the attribute's kind
    TtInvalidValue,
}

impl RecordErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            RecordErrorCode::TtUnknownAttribute => "TT_UNKNOWN_ATTRIBUTE",
            RecordErrorCode::TtInvalidValue => "TT_INVALID_VALUE",
        }
    }
}

impl fmt::Display for RecordErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Record error with code and message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordError {
    code: RecordErrorCode,
    message: String,
}

impl RecordError {
    /// Unknown attribute name
    pub fn unknown_attribute(name: &str) -> Self {
        Self {
            code: RecordErrorCode::TtUnknownAttribute,
            message: format!("Unknown attribute '{}'", name),
        }
    }

    /// Value does not parse as the expected kind
    pub fn invalid_value(attribute: &str, raw: &str, expected: &str) -> Self {
        Self {
            code: RecordErrorCode::TtInvalidValue,
            message: format!(
                "Value '{}' for attribute '{}' is not a valid {}",
                raw, attribute, expected
            ),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> RecordErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ERROR] {}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for RecordError {}

/// Result type for record operations
pub type RecordResult<T> = Result<T, RecordError>;
