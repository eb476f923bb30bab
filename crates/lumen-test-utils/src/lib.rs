// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Lumen integration tests.
//!
//! Provides an in-memory database client and shared fixtures for fast,
//! deterministic tests without a hosted database.
//!
//! # Components
//!
//! - [`MockDatabase`] - in-memory [`DatabaseClient`](lumen_core::DatabaseClient) with failure injection
//! - [`PlayerData`] - the sample player record used across tests

pub mod fixtures;
pub mod mock_database;

pub use fixtures::PlayerData;
pub use mock_database::MockDatabase;
