//! Error types for the domain layer.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

use super::ids::AreaId;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: f64,
        max: f64,
        actual: f64,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: f64, max: f64, actual: f64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Stable machine-readable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InvalidInput,
    AreaNotFound,
    DataSourceUnavailable,
    SnapshotUnreadable,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidInput => "INVALID_INPUT",
            ErrorCode::AreaNotFound => "AREA_NOT_FOUND",
            ErrorCode::DataSourceUnavailable => "DATA_SOURCE_UNAVAILABLE",
            ErrorCode::SnapshotUnreadable => "SNAPSHOT_UNREADABLE",
        }
    }

    /// True when retrying against the same source may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, ErrorCode::DataSourceUnavailable)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure reported to callers of the engine.
///
/// Missing optional data (EPI, CBI, rent) is never a `DomainError`; it is
/// carried as "not available" on the comparison result instead.
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[error("[{code}] {message}")]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    /// The area the failure concerns, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<AreaId>,
}

impl DomainError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            area: None,
        }
    }

    pub fn for_area(mut self, area: AreaId) -> Self {
        self.area = Some(area);
        self
    }
}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        DomainError::new(ErrorCode::InvalidInput, err.to_string())
    }
}
