// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory database client for deterministic testing.
//!
//! `MockDatabase` implements `DatabaseClient` over a single JSON tree, so a
//! read of a parent path sees its children and a write replaces the whole
//! subtree, as in the hosted database. Writing `null` deletes a value and
//! parents left empty by a delete are removed. The dependency status,
//! write/read failures and per-call latency can be configured to exercise
//! the facade's error paths.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::Mutex;

use lumen_core::traits::{DatabaseClient, PluginAdapter};
use lumen_core::types::{DependencyStatus, HealthStatus, Snapshot};
use lumen_core::{DbPath, LumenError};

/// An in-memory database holding one JSON tree.
pub struct MockDatabase {
    status: Mutex<DependencyStatus>,
    tree: Mutex<Value>,
    fail_writes: AtomicBool,
    fail_reads: AtomicBool,
    latency: Option<Duration>,
    dependency_checks: AtomicUsize,
    writes: AtomicUsize,
    reads: AtomicUsize,
}

impl MockDatabase {
    /// Create an empty database whose dependency check reports `Available`.
    pub fn new() -> Self {
        Self::with_status(DependencyStatus::Available)
    }

    /// Create an empty database whose dependency check reports `status`.
    pub fn with_status(status: DependencyStatus) -> Self {
        Self {
            status: Mutex::new(status),
            tree: Mutex::new(Value::Object(Map::new())),
            fail_writes: AtomicBool::new(false),
            fail_reads: AtomicBool::new(false),
            latency: None,
            dependency_checks: AtomicUsize::new(0),
            writes: AtomicUsize::new(0),
            reads: AtomicUsize::new(0),
        }
    }

    /// Delay every call by `latency` (yields to the runtime).
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Change what the next dependency check reports.
    pub async fn set_status(&self, status: DependencyStatus) {
        *self.status.lock().await = status;
    }

    /// Make subsequent writes fail with a remote error.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent reads fail with a remote error.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Seed raw JSON at `path` without going through `set_raw_json`.
    pub async fn insert_raw(&self, path: &str, json: &str) -> Result<(), serde_json::Error> {
        let value = serde_json::from_str(json)?;
        set_at(&mut *self.tree.lock().await, &segments_of(path), value);
        Ok(())
    }

    /// Value currently stored at `path`, children included.
    pub async fn raw_value(&self, path: &str) -> Option<Value> {
        get_at(&*self.tree.lock().await, &segments_of(path)).cloned()
    }

    /// Raw JSON currently stored at `path`, serialized with sorted keys.
    pub async fn raw(&self, path: &str) -> Option<String> {
        self.raw_value(path).await.map(|value| value.to_string())
    }

    pub fn dependency_checks(&self) -> usize {
        self.dependency_checks.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    async fn simulate_latency(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

impl Default for MockDatabase {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockDatabase {
    fn name(&self) -> &str {
        "mock-database"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, LumenError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl DatabaseClient for MockDatabase {
    async fn check_dependencies(&self) -> DependencyStatus {
        self.dependency_checks.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;
        *self.status.lock().await
    }

    async fn set_raw_json(&self, path: &DbPath, json: String) -> Result<(), LumenError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(LumenError::Remote {
                message: format!("mock write to {path} rejected"),
                source: None,
            });
        }
        let value: Value = serde_json::from_str(&json).map_err(|e| LumenError::Remote {
            message: format!("mock write to {path} is not valid JSON: {e}"),
            source: Some(Box::new(e)),
        })?;
        set_at(&mut *self.tree.lock().await, path.segments(), value);
        Ok(())
    }

    async fn get_snapshot(&self, path: &DbPath) -> Result<Snapshot, LumenError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(LumenError::Remote {
                message: format!("mock read of {path} rejected"),
                source: None,
            });
        }
        Ok(match get_at(&*self.tree.lock().await, path.segments()) {
            Some(value) => Snapshot::from_raw_json(value.to_string()),
            None => Snapshot::absent(),
        })
    }
}

fn segments_of(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

fn get_at<'a>(tree: &'a Value, segments: &[String]) -> Option<&'a Value> {
    segments
        .iter()
        .try_fold(tree, |node, segment| node.as_object()?.get(segment))
}

/// Replaces the subtree at `segments`, creating parents as needed.
///
/// A `null` value removes the key, and parents left empty are removed too.
fn set_at(node: &mut Value, segments: &[String], value: Value) {
    let Some((first, rest)) = segments.split_first() else {
        *node = value;
        return;
    };

    if !node.is_object() {
        if value.is_null() {
            return;
        }
        *node = Value::Object(Map::new());
    }
    let Value::Object(children) = node else {
        return;
    };

    if rest.is_empty() {
        if value.is_null() {
            children.remove(first);
        } else {
            children.insert(first.clone(), value);
        }
        return;
    }

    let child = children
        .entry(first.clone())
        .or_insert_with(|| Value::Object(Map::new()));
    set_at(child, rest, value);
    if child.is_null() || child.as_object().is_some_and(Map::is_empty) {
        children.remove(first);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stores_and_reads_raw_json() {
        let db = MockDatabase::new();
        let path = DbPath::parse("players/testUser").unwrap();

        db.set_raw_json(&path, r#"{"score":1}"#.into()).await.unwrap();
        let snapshot = db.get_snapshot(&path).await.unwrap();

        assert!(snapshot.exists);
        assert_eq!(snapshot.raw_json, r#"{"score":1}"#);
        assert_eq!(db.raw("/players/testUser/").await.as_deref(), Some(r#"{"score":1}"#));
        assert_eq!((db.writes(), db.reads()), (1, 1));
    }

    #[tokio::test]
    async fn failure_injection_rejects_calls() {
        let db = MockDatabase::new();
        let path = DbPath::parse("scores").unwrap();

        db.fail_writes(true);
        assert!(db.set_raw_json(&path, "1".into()).await.is_err());
        assert!(db.raw("scores").await.is_none());

        db.fail_reads(true);
        assert!(db.get_snapshot(&path).await.is_err());
    }

    #[tokio::test]
    async fn parent_reads_include_children() {
        let db = MockDatabase::new();
        let user = DbPath::parse("players/testUser").unwrap();
        db.set_raw_json(&user, r#"{"score":1}"#.into()).await.unwrap();

        let players = db
            .get_snapshot(&DbPath::parse("players").unwrap())
            .await
            .unwrap();
        assert!(players.exists);
        assert_eq!(players.raw_json, r#"{"testUser":{"score":1}}"#);

        let score = db
            .get_snapshot(&DbPath::parse("players/testUser/score").unwrap())
            .await
            .unwrap();
        assert_eq!(score.raw_json, "1");
    }

    #[tokio::test]
    async fn parent_write_replaces_children() {
        let db = MockDatabase::new();
        db.insert_raw("players/alice", r#"{"score":1}"#).await.unwrap();
        db.insert_raw("players/bob", r#"{"score":2}"#).await.unwrap();

        let players = DbPath::parse("players").unwrap();
        db.set_raw_json(&players, r#"{"carol":{"score":3}}"#.into())
            .await
            .unwrap();

        assert!(db.raw("players/alice").await.is_none());
        assert_eq!(db.raw("players/carol/score").await.as_deref(), Some("3"));
    }

    #[tokio::test]
    async fn writing_null_deletes_and_prunes_parents() {
        let db = MockDatabase::new();
        db.insert_raw("players/testUser", r#"{"score":1}"#).await.unwrap();

        let user = DbPath::parse("players/testUser").unwrap();
        db.set_raw_json(&user, "null".into()).await.unwrap();

        assert!(!db.get_snapshot(&user).await.unwrap().exists);
        assert!(db.raw("players").await.is_none());
    }

    #[tokio::test]
    async fn invalid_json_write_is_rejected() {
        let db = MockDatabase::new();
        let path = DbPath::parse("scores").unwrap();
        let err = db.set_raw_json(&path, "{not json".into()).await.unwrap_err();
        assert!(matches!(err, LumenError::Remote { .. }));
        assert!(db.raw("scores").await.is_none());
    }

    #[tokio::test]
    async fn status_is_configurable() {
        let db = MockDatabase::with_status(DependencyStatus::UnavailableOther);
        assert_eq!(db.check_dependencies().await, DependencyStatus::UnavailableOther);

        db.set_status(DependencyStatus::Available).await;
        assert_eq!(db.check_dependencies().await, DependencyStatus::Available);
        assert_eq!(db.dependency_checks(), 2);
    }
}
