//! # Core Error Types
//!
//! Every failure in this crate is a caller-fixable argument error. Degenerate
//! results (NaN leverage, infinite leverage, a missing tick) are values, not
//! errors.

use thiserror::Error;

/// Errors raised by the math kernel
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(serde::Serialize))]
pub enum MarginCoreError {
    #[error("Invalid argument to {operation}: {reason}")]
    InvalidArgument {
        operation: &'static str,
        reason: String,
    },
}

/// Result type using core errors
pub type CoreResult<T> = Result<T, MarginCoreError>;

impl MarginCoreError {
    /// Create an invalid argument error for `operation`
    pub fn invalid_argument(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            operation,
            reason: reason.into(),
        }
    }

    /// Name of the operation that rejected its input
    pub fn operation(&self) -> &'static str {
        match self {
            Self::InvalidArgument { operation, .. } => operation,
        }
    }
}
