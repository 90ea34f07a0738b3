//! Error types for the screener crate.

use thiserror::Error;

use crate::record::Field;

/// Errors raised while loading records or building conditions.
///
/// The filter, search and sort stages themselves never fail.
#[derive(Debug, Error)]
pub enum ScreenerError {
    /// Reading the detection-result file failed.
    #[error("failed to read detection results: {0}")]
    Io(#[from] std::io::Error),

    /// The detection-result file is not valid JSON for a record list.
    #[error("malformed detection results: {0}")]
    Parse(#[from] serde_json::Error),

    /// A numeric field is NaN, infinite or negative.
    #[error("record '{code}' has invalid {field} value {value}")]
    InvalidMetric {
        code: String,
        field: Field,
        value: f64,
    },

    /// Two records share the same code.
    #[error("duplicate record code '{0}'")]
    DuplicateCode(String),

    /// A range bound is NaN or infinite.
    #[error("range bound for {field} must be finite, got {value}")]
    NonFiniteBound { field: Field, value: f64 },

    /// Range conditions only exist for the three pattern metrics.
    #[error("{0} is not a pattern metric and cannot carry range bounds")]
    NotAMetric(Field),

    /// A field name did not match any column.
    #[error("unknown field '{0}'")]
    UnknownField(String),
}

/// Result type for screener operations.
pub type Result<T> = std::result::Result<T, ScreenerError>;
