// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by database clients and the data facade.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Result of a client's self-check for the components it needs at runtime.
///
/// Returned once per initialization attempt and only branched on.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum DependencyStatus {
    /// Everything needed to talk to the database is in place.
    Available,
    /// No database URL was configured.
    UnavailableMissing,
    /// The configured database URL is malformed.
    UnavailableInvalid,
    /// The database rejected the probe request (401/403).
    UnavailablePermission,
    /// Transport failure or an unexpected response.
    UnavailableOther,
}

impl DependencyStatus {
    pub fn is_available(self) -> bool {
        self == Self::Available
    }
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// A point-in-time read result from the remote database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Whether any value is stored at the read path.
    pub exists: bool,
    /// Raw serialized payload. `"null"` when nothing exists.
    pub raw_json: String,
}

impl Snapshot {
    /// A snapshot for a path that holds no value.
    pub fn absent() -> Self {
        Self {
            exists: false,
            raw_json: "null".to_string(),
        }
    }

    /// Builds a snapshot from a raw JSON body, treating a JSON `null` as absent.
    pub fn from_raw_json(raw_json: impl Into<String>) -> Self {
        let raw_json = raw_json.into();
        let trimmed = raw_json.trim();
        if trimmed.is_empty() || trimmed == "null" {
            return Self::absent();
        }
        Self {
            exists: true,
            raw_json,
        }
    }
}
