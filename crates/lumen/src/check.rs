// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `lumen check`: report whether the database can be used.

use lumen_core::{DatabaseClient, LumenError};

/// Runs the dependency check once and prints the status.
///
/// Fails when the database is not available so the exit code reflects it.
pub async fn run_check(client: &dyn DatabaseClient) -> Result<(), LumenError> {
    let status = client.check_dependencies().await;
    println!("{}: {status}", client.name());

    if status.is_available() {
        Ok(())
    } else {
        tracing::warn!(client = client.name(), %status, "database is not usable");
        Err(LumenError::DependencyUnavailable { status })
    }
}
