// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Lumen data client.
//!
//! This crate provides the error type, shared types, the [`DatabaseClient`]
//! adapter trait and the [`DatabaseRef`] handle used throughout the Lumen
//! workspace. Database backends implement the traits defined here.

pub mod error;
pub mod path;
pub mod reference;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::LumenError;
pub use path::DbPath;
pub use reference::DatabaseRef;
pub use traits::{DatabaseClient, PluginAdapter};
pub use types::{DependencyStatus, HealthStatus, Snapshot};
