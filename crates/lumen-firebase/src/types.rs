// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the Realtime Database REST API.

use std::time::Duration;

use serde::Deserialize;

/// Error body returned by the REST API, e.g. `{"error": "Permission denied"}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: String,
}

/// Timeout and retry settings for REST requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestPolicy {
    /// Per-request timeout enforced by the HTTP client.
    pub timeout: Duration,
    /// Retries after a transient status.
    pub max_retries: u32,
    /// Delay before each retry.
    pub retry_delay: Duration,
}

impl Default for RequestPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_retries: 1,
            retry_delay: Duration::from_secs(1),
        }
    }
}

impl From<&lumen_config::ClientConfig> for RequestPolicy {
    fn from(config: &lumen_config::ClientConfig) -> Self {
        Self {
            timeout: Duration::from_secs(config.request_timeout_secs),
            max_retries: config.max_retries,
            retry_delay: Duration::from_millis(config.retry_delay_ms),
        }
    }
}
