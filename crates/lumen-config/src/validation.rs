// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks semantic constraints serde attributes cannot express: URL shape,
//! known log levels, sane timeout and retry bounds, and a well-formed probe path.

use lumen_core::DbPath;
use url::Url;

use crate::diagnostic::ConfigError;
use crate::model::LumenConfig;

/// Log levels accepted by `app.log_level`.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Upper bound on `client.max_retries`.
pub const MAX_RETRIES_LIMIT: u32 = 10;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &LumenConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let level = config.app.log_level.trim().to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "app.log_level `{}` is not one of {}",
                config.app.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if let Some(url) = &config.database.url
        && let Err(reason) = parse_database_url(url)
    {
        errors.push(ConfigError::Validation {
            message: format!("database.url `{url}` {reason}"),
        });
    }

    if !config.database.probe_path.trim_matches('/').is_empty()
        && let Err(err) = DbPath::parse(&config.database.probe_path)
    {
        errors.push(ConfigError::Validation {
            message: format!("database.probe_path: {err}"),
        });
    }

    if config.client.request_timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "client.request_timeout_secs must be greater than 0".to_string(),
        });
    }

    if config.client.max_retries > MAX_RETRIES_LIMIT {
        errors.push(ConfigError::Validation {
            message: format!(
                "client.max_retries must be at most {MAX_RETRIES_LIMIT}, got {}",
                config.client.max_retries
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Parses a database URL, requiring an http(s) scheme and a host.
///
/// The REST client parses its base URL with this too, so any URL that
/// passes validation is one the client accepts.
pub fn parse_database_url(raw: &str) -> Result<Url, String> {
    let url = Url::parse(raw.trim()).map_err(|e| format!("is not a valid URL: {e}"))?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err("must be an http:// or https:// URL".to_string());
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err("has no host".to_string());
    }
    Ok(url)
}
