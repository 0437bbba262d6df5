//! Error types for the Vanguard site client.
//!
//! Library crates use [`VanguardError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all Vanguard operations.
#[derive(Debug, thiserror::Error)]
pub enum VanguardError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Transport-level failure (connect, DNS, body read).
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status.
    #[error("{url}: HTTP {status}")]
    Status { url: String, status: u16 },

    /// Response body was not the JSON shape we expected.
    #[error("decode error: {message}")]
    Decode { message: String },

    /// Input validation error (missing required field, unknown interest area).
    #[error("validation error: {message}")]
    Validation { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, VanguardError>;

impl VanguardError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a decode error from any displayable message.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Non-2xx response from `url`.
    pub fn status(url: impl Into<String>, status: u16) -> Self {
        Self::Status {
            url: url.into(),
            status,
        }
    }
}
