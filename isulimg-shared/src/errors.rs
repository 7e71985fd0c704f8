//! Error types used across isulimg.

use thiserror::Error;

/// Result type for isulimg operations.
pub type IsulimgResult<T> = Result<T, IsulimgError>;

#[derive(Debug, Error)]
pub enum IsulimgError {
    /// The image module reported a failure status.
    #[error("image module reported an error: {0}")]
    Engine(String),

    #[error("configuration error: {0}")]
    Config(String),

    /// Rootfs preparation, mount or unmount failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// A required argument was absent or not representable across FFI.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("unsupported: {0}")]
    Unsupported(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<std::io::Error> for IsulimgError {
    fn from(err: std::io::Error) -> Self {
        IsulimgError::Internal(format!("I/O error: {}", err))
    }
}

impl From<serde_json::Error> for IsulimgError {
    fn from(err: serde_json::Error) -> Self {
        IsulimgError::Internal(format!("JSON error: {}", err))
    }
}

impl From<String> for IsulimgError {
    fn from(err: String) -> Self {
        IsulimgError::Internal(err)
    }
}

impl From<&str> for IsulimgError {
    fn from(err: &str) -> Self {
        IsulimgError::Internal(err.to_string())
    }
}
