// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Lumen data client.

use thiserror::Error;

use crate::types::DependencyStatus;

/// The primary error type returned by database clients and the data facade.
#[derive(Debug, Error)]
pub enum LumenError {
    /// Configuration errors (invalid TOML, missing database URL, bad header values).
    #[error("configuration error: {0}")]
    Config(String),

    /// The client's dependency check did not report `Available`.
    #[error("could not resolve database dependencies: {status}")]
    DependencyUnavailable { status: DependencyStatus },

    /// The facade was used before initialization completed, or after it failed.
    #[error("database is not initialized")]
    NotInitialized,

    /// A child path was rejected before any request was issued.
    #[error("invalid path `{path}`: {reason}")]
    InvalidPath { path: String, reason: String },

    /// A record could not be converted to JSON.
    #[error("failed to serialize record: {source}")]
    Serialization { source: serde_json::Error },

    /// Stored JSON could not be converted into the requested shape.
    #[error("failed to deserialize data at {path}: {source}")]
    Deserialization {
        path: String,
        source: serde_json::Error,
    },

    /// The remote database rejected a request or could not be reached.
    #[error("remote database error: {message}")]
    Remote {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl LumenError {
    /// Builds an `InvalidPath` error.
    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
