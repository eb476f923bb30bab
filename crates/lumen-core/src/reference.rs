// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Root and child handles into the database's key space.

use std::fmt;
use std::sync::Arc;

use crate::error::LumenError;
use crate::path::DbPath;
use crate::traits::DatabaseClient;
use crate::types::Snapshot;

/// A handle addressing one location in the database.
///
/// The root handle has no path. Child handles are derived with
/// [`DatabaseRef::child`] and share the underlying client.
#[derive(Clone)]
pub struct DatabaseRef {
    client: Arc<dyn DatabaseClient>,
    path: Option<DbPath>,
}

impl DatabaseRef {
    /// Creates the root handle for a client.
    pub fn root(client: Arc<dyn DatabaseClient>) -> Self {
        Self { client, path: None }
    }

    /// Returns a handle for `path` relative to this one.
    pub fn child(&self, path: &str) -> Result<Self, LumenError> {
        let path = match &self.path {
            Some(parent) => parent.join(path)?,
            None => DbPath::parse(path)?,
        };
        Ok(Self {
            client: Arc::clone(&self.client),
            path: Some(path),
        })
    }

    /// The addressed path, or `None` for the root.
    pub fn path(&self) -> Option<&DbPath> {
        self.path.as_ref()
    }

    /// Replaces the value at this location with raw JSON.
    pub async fn set_raw_json_value(&self, json: String) -> Result<(), LumenError> {
        let path = self.require_path()?;
        self.client.set_raw_json(path, json).await
    }

    /// Reads the value at this location.
    pub async fn get_value(&self) -> Result<Snapshot, LumenError> {
        let path = self.require_path()?;
        self.client.get_snapshot(path).await
    }

    fn require_path(&self) -> Result<&DbPath, LumenError> {
        self.path
            .as_ref()
            .ok_or_else(|| LumenError::invalid_path("/", "the root cannot be read or written directly"))
    }
}

impl fmt::Debug for DatabaseRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseRef")
            .field("client", &self.client.name())
            .field("path", &self.path.as_ref().map(ToString::to_string))
            .finish()
    }
}
