//! Crate-wide error type.
//!
//! Services and repositories return [`AppError`]; the CLI binary surfaces it
//! through `anyhow` with context at the top level.

use serde_json::Value;
use thiserror::Error;

/// Errors produced by catalog operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Input rejected before any database call.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// No document or collection matched the request.
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// Driver-level failure (connection, server selection, command execution).
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),

    /// Unexpected state that is not the caller's fault.
    #[error("{message}")]
    Internal { message: String, details: Value },

    /// Invalid or missing configuration.
    #[error("configuration error: {message}")]
    Config { message: String },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
