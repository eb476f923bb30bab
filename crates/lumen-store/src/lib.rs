// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Data access facade for the Lumen data client.
//!
//! [`Store`] turns a [`DatabaseClient`](lumen_core::DatabaseClient) into a
//! typed read/write API: records are serialized with `serde_json`, written
//! as raw JSON at a child path, and read back into any `DeserializeOwned`
//! shape. Construct one store at startup, share it with `Arc`, and await
//! [`Store::initialize`] before reading or writing.

pub mod state;
pub mod store;

pub use state::InitState;
pub use store::Store;
