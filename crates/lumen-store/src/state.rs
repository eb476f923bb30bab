// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Initialization lifecycle of a [`Store`](crate::Store).

use lumen_core::DependencyStatus;

/// Where a store is in its initialization.
///
/// `Uninitialized -> Initializing -> Ready | Failed(status)`. A failed store
/// may be initialized again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitState {
    Uninitialized,
    Initializing,
    Ready,
    Failed(DependencyStatus),
}

impl InitState {
    /// True once an initialization attempt has finished, successfully or not.
    pub fn is_settled(self) -> bool {
        matches!(self, Self::Ready | Self::Failed(_))
    }

    pub fn is_ready(self) -> bool {
        self == Self::Ready
    }
}
