//! Shared error type across drainPrism crates.

use thiserror::Error;

/// Stable error codes used in HTTP error bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Invalid input / malformed request or config.
    BadRequest,
    /// Generic metric sender got a type label it does not know.
    UnknownMetricType,
    /// The metrics daemon could not be reached.
    Transport,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal error.
    Internal,
}

impl ErrorCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::UnknownMetricType => "UNKNOWN_METRIC_TYPE",
            ErrorCode::Transport => "TRANSPORT",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, DrainError>;

/// Unified error type used by core and relay.
#[derive(Debug, Error)]
pub enum DrainError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unrecognized metric type: {0}")]
    UnknownMetricType(String),
    #[error("transport: {0}")]
    Transport(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl DrainError {
    /// Map an error to its stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            DrainError::BadRequest(_) => ErrorCode::BadRequest,
            DrainError::UnknownMetricType(_) => ErrorCode::UnknownMetricType,
            DrainError::Transport(_) => ErrorCode::Transport,
            DrainError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
            DrainError::Internal(_) => ErrorCode::Internal,
        }
    }
}

impl From<std::io::Error> for DrainError {
    fn from(e: std::io::Error) -> Self {
        DrainError::Transport(e.to_string())
    }
}
