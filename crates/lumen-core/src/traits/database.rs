// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Remote database client trait.

use async_trait::async_trait;

use crate::error::LumenError;
use crate::path::DbPath;
use crate::traits::adapter::PluginAdapter;
use crate::types::{DependencyStatus, Snapshot};

/// A client for a hosted hierarchical JSON database.
///
/// The client owns transport and authentication. Callers address values by
/// [`DbPath`] and exchange raw JSON strings; (de)serialization of typed
/// records happens above this trait.
#[async_trait]
pub trait DatabaseClient: PluginAdapter {
    /// Checks that everything the client needs at runtime is in place.
    async fn check_dependencies(&self) -> DependencyStatus;

    /// Replaces the value at `path` with the given raw JSON.
    async fn set_raw_json(&self, path: &DbPath, json: String) -> Result<(), LumenError>;

    /// Reads the value currently stored at `path`.
    async fn get_snapshot(&self, path: &DbPath) -> Result<Snapshot, LumenError>;
}
