// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Firebase Realtime Database adapter for the Lumen data client.
//!
//! This crate implements [`DatabaseClient`] over the Realtime Database REST
//! API: values are written with `PUT <url>/<path>.json` and read with
//! `GET <url>/<path>.json`, where a `null` body means nothing is stored.

pub mod client;
pub mod types;

use async_trait::async_trait;
use lumen_config::LumenConfig;
use lumen_core::traits::{DatabaseClient, PluginAdapter};
use lumen_core::types::{DependencyStatus, HealthStatus, Snapshot};
use lumen_core::{DbPath, LumenError};
use secrecy::SecretString;
use tracing::{debug, info, warn};

use crate::client::RestClient;
use crate::types::RequestPolicy;

/// Environment variable consulted when no auth token is configured.
pub const AUTH_TOKEN_ENV: &str = "FIREBASE_AUTH_TOKEN";

/// Realtime Database client implementing [`DatabaseClient`].
///
/// A client built from incomplete configuration is still constructed; its
/// dependency check reports why it cannot be used.
#[derive(Debug)]
pub struct FirebaseClient {
    backend: Backend,
    probe_path: Option<DbPath>,
}

#[derive(Debug)]
enum Backend {
    Rest(RestClient),
    Unusable(DependencyStatus),
}

impl FirebaseClient {
    /// Creates a client from the loaded configuration.
    ///
    /// # Auth token resolution
    /// 1. `config.database.auth_token` if set and non-empty
    /// 2. `FIREBASE_AUTH_TOKEN` environment variable
    /// 3. No token (public rules)
    pub fn from_config(config: &LumenConfig) -> Result<Self, LumenError> {
        let probe_path = match config.database.probe_path.trim_matches('/') {
            "" => None,
            raw => Some(DbPath::parse(raw)?),
        };

        let Some(url) = config.database.url.as_deref() else {
            warn!("no database URL configured");
            return Ok(Self {
                backend: Backend::Unusable(DependencyStatus::UnavailableMissing),
                probe_path,
            });
        };

        if let Err(e) = client::parse_base_url(url) {
            warn!(error = %e, "database URL is invalid");
            return Ok(Self {
                backend: Backend::Unusable(DependencyStatus::UnavailableInvalid),
                probe_path,
            });
        }

        let auth_token = resolve_auth_token(&config.database.auth_token);
        let rest = RestClient::new(url, auth_token, RequestPolicy::from(&config.client))?;

        info!(url = %rest.base_url(), "Firebase client created");
        Ok(Self {
            backend: Backend::Rest(rest),
            probe_path,
        })
    }

    /// Creates a client for `url` with explicit settings.
    pub fn new(
        url: &str,
        auth_token: Option<SecretString>,
        policy: RequestPolicy,
    ) -> Result<Self, LumenError> {
        Ok(Self {
            backend: Backend::Rest(RestClient::new(url, auth_token, policy)?),
            probe_path: None,
        })
    }

    /// Probes `path` instead of the root during the dependency check.
    pub fn with_probe_path(mut self, path: DbPath) -> Self {
        self.probe_path = Some(path);
        self
    }

    fn rest(&self) -> Result<&RestClient, LumenError> {
        match &self.backend {
            Backend::Rest(rest) => Ok(rest),
            Backend::Unusable(status) => {
                Err(LumenError::DependencyUnavailable { status: *status })
            }
        }
    }
}

#[async_trait]
impl PluginAdapter for FirebaseClient {
    fn name(&self) -> &str {
        "firebase"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, LumenError> {
        Ok(match self.check_dependencies().await {
            DependencyStatus::Available => HealthStatus::Healthy,
            status => HealthStatus::Unhealthy(status.to_string()),
        })
    }
}

#[async_trait]
impl DatabaseClient for FirebaseClient {
    async fn check_dependencies(&self) -> DependencyStatus {
        let rest = match &self.backend {
            Backend::Rest(rest) => rest,
            Backend::Unusable(status) => return *status,
        };

        match rest.probe(self.probe_path.as_ref()).await {
            Ok(status) if status.is_success() => DependencyStatus::Available,
            Ok(status) if matches!(status.as_u16(), 401 | 403) => {
                debug!(status = %status, "dependency probe rejected");
                DependencyStatus::UnavailablePermission
            }
            Ok(status) => {
                debug!(status = %status, "dependency probe failed");
                DependencyStatus::UnavailableOther
            }
            Err(e) => {
                debug!(error = %e, "dependency probe could not reach the database");
                DependencyStatus::UnavailableOther
            }
        }
    }

    async fn set_raw_json(&self, path: &DbPath, json: String) -> Result<(), LumenError> {
        self.rest()?.put_json(path, json).await
    }

    async fn get_snapshot(&self, path: &DbPath) -> Result<Snapshot, LumenError> {
        let raw = self.rest()?.get_json(path).await?;
        Ok(Snapshot::from_raw_json(raw))
    }
}

/// Resolves the auth token from config, falling back to `FIREBASE_AUTH_TOKEN`.
fn resolve_auth_token(config_token: &Option<String>) -> Option<SecretString> {
    if let Some(token) = config_token
        && !token.is_empty()
    {
        return Some(SecretString::from(token.clone()));
    }

    std::env::var(AUTH_TOKEN_ENV)
        .ok()
        .filter(|token| !token.is_empty())
        .map(SecretString::from)
}
