//! Error types for trust-flow

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while computing a flow
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Malformed input at the public boundary (e.g. a zero or negative
    /// edge capacity reaching [`crate::graph::Edge::new`]).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An invariant was violated during augmentation or extraction. These
    /// are bugs in the solver, not recoverable runtime conditions.
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create an invalid-argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
