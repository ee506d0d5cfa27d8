//! Error types for the SlimSense analytics engine

use thiserror::Error;

/// Errors raised by the analytics engine
///
/// Missing data (no samples, no trend match, no forecast) is never an
/// error; those cases are reported as `None` by the engine functions.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetricsError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl MetricsError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        MetricsError::InvalidInput(msg.into())
    }
}

/// Result alias used across the engine
pub type MetricsResult<T> = Result<T, MetricsError>;
