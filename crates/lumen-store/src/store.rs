// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The [`Store`] facade: initialization plus typed `write_data` / `fetch_data`.
//!
//! Every failure is logged where it happens and returned to the caller. A
//! read of a path with no value is not a failure: it logs a warning and
//! yields `Ok(None)`.

use std::sync::{Arc, OnceLock};

use lumen_core::{DatabaseClient, DatabaseRef, LumenError};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::state::InitState;

/// Typed read/write access to a remote database.
///
/// One store is created per process and shared by reference. The root
/// handle is set exactly once, by the first successful [`initialize`](Self::initialize).
pub struct Store {
    client: Arc<dyn DatabaseClient>,
    root: OnceLock<DatabaseRef>,
    state: watch::Sender<InitState>,
}

impl Store {
    /// Creates an uninitialized store over `client`.
    pub fn new(client: Arc<dyn DatabaseClient>) -> Self {
        let (state, _) = watch::channel(InitState::Uninitialized);
        Self {
            client,
            root: OnceLock::new(),
            state,
        }
    }

    /// Current initialization state.
    pub fn state(&self) -> InitState {
        *self.state.borrow()
    }

    pub fn is_ready(&self) -> bool {
        self.state().is_ready()
    }

    /// Runs the client's dependency check and, when it reports available,
    /// stores the root handle.
    ///
    /// Returns immediately when already ready. If another initialization is
    /// in flight, waits for it and returns its outcome; if that attempt is
    /// dropped before it settles, this call runs its own. After a failure the
    /// store may be initialized again.
    pub async fn initialize(&self) -> Result<(), LumenError> {
        while !self.try_claim() {
            let mut rx = self.state.subscribe();
            let current = *rx
                .wait_for(|state| *state != InitState::Initializing)
                .await
                .map_err(|_| LumenError::Internal("initialization state channel closed".into()))?;

            match current {
                InitState::Ready => return Ok(()),
                InitState::Failed(status) => {
                    return Err(LumenError::DependencyUnavailable { status });
                }
                // The attempt we waited on was dropped before it settled.
                InitState::Uninitialized | InitState::Initializing => continue,
            }
        }

        // Puts the state back if this future is dropped mid-check.
        let mut guard = InitGuard {
            state: &self.state,
            armed: true,
        };

        info!(client = self.client.name(), "checking database dependencies");
        let status = self.client.check_dependencies().await;
        guard.armed = false;

        if status.is_available() {
            if self.root.set(DatabaseRef::root(Arc::clone(&self.client))).is_err() {
                // Only reachable if the state was reset while a handle already existed.
                warn!("root handle already set; keeping the existing one");
            }
            self.state.send_replace(InitState::Ready);
            info!("database initialized successfully");
            Ok(())
        } else {
            error!(%status, "could not resolve database dependencies");
            self.state.send_replace(InitState::Failed(status));
            Err(LumenError::DependencyUnavailable { status })
        }
    }

    /// Spawns [`initialize`](Self::initialize) on the current tokio runtime.
    ///
    /// Readiness can be awaited with [`wait_ready`](Self::wait_ready) or
    /// through the returned handle.
    pub fn spawn_initialize(self: &Arc<Self>) -> JoinHandle<Result<(), LumenError>> {
        let store = Arc::clone(self);
        tokio::spawn(async move { store.initialize().await })
    }

    /// Waits until an initialization attempt settles.
    ///
    /// Does not start one: on a store nobody initializes this waits forever.
    pub async fn wait_ready(&self) -> Result<(), LumenError> {
        let mut rx = self.state.subscribe();
        let settled = *rx
            .wait_for(|state| state.is_settled())
            .await
            .map_err(|_| LumenError::Internal("initialization state channel closed".into()))?;

        match settled {
            InitState::Ready => Ok(()),
            InitState::Failed(status) => Err(LumenError::DependencyUnavailable { status }),
            InitState::Uninitialized | InitState::Initializing => Err(LumenError::NotInitialized),
        }
    }

    /// Serializes `value` to JSON and writes it at `path`.
    pub async fn write_data<T>(&self, path: &str, value: &T) -> Result<(), LumenError>
    where
        T: Serialize + ?Sized + Sync,
    {
        let result = self.try_write(path, value).await;
        match &result {
            Ok(()) => info!(path, "data successfully written"),
            Err(e) => error!(path, error = %e, "failed to write data"),
        }
        result
    }

    /// Reads the value at `path` and deserializes it into `T`.
    ///
    /// `Ok(None)` means nothing is stored at `path`.
    pub async fn fetch_data<T>(&self, path: &str) -> Result<Option<T>, LumenError>
    where
        T: DeserializeOwned,
    {
        let result = self.try_fetch(path).await;
        match &result {
            Ok(Some(_)) => info!(path, "data successfully fetched"),
            Ok(None) => warn!(path, "no data exists at path"),
            Err(e) => error!(path, error = %e, "failed to fetch data"),
        }
        result
    }

    /// Moves the state to `Initializing` if no attempt is running and the
    /// store is not ready. Returns whether this caller now owns the attempt.
    fn try_claim(&self) -> bool {
        let mut claimed = false;
        self.state.send_if_modified(|state| match state {
            InitState::Uninitialized | InitState::Failed(_) => {
                *state = InitState::Initializing;
                claimed = true;
                true
            }
            InitState::Initializing | InitState::Ready => false,
        });
        claimed
    }

    fn root(&self) -> Result<&DatabaseRef, LumenError> {
        self.root.get().ok_or(LumenError::NotInitialized)
    }

    async fn try_write<T>(&self, path: &str, value: &T) -> Result<(), LumenError>
    where
        T: Serialize + ?Sized + Sync,
    {
        let child = self.root()?.child(path)?;
        let json =
            serde_json::to_string(value).map_err(|source| LumenError::Serialization { source })?;
        child.set_raw_json_value(json).await
    }

    async fn try_fetch<T>(&self, path: &str) -> Result<Option<T>, LumenError>
    where
        T: DeserializeOwned,
    {
        let child = self.root()?.child(path)?;
        let snapshot = child.get_value().await?;
        if !snapshot.exists {
            return Ok(None);
        }

        serde_json::from_str(&snapshot.raw_json)
            .map(Some)
            .map_err(|source| LumenError::Deserialization {
                path: path.to_string(),
                source,
            })
    }
}

struct InitGuard<'a> {
    state: &'a watch::Sender<InitState>,
    armed: bool,
}

impl Drop for InitGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.state.send_replace(InitState::Uninitialized);
        }
    }
}
