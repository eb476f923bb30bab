// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `lumen write` and `lumen fetch`: raw JSON access from the command line.

use lumen_core::LumenError;
use lumen_store::Store;
use serde_json::Value;

/// Parses `json` and writes it at `path`.
pub async fn run_write(store: &Store, path: &str, json: &str) -> Result<(), LumenError> {
    let value: Value = serde_json::from_str(json).map_err(|source| {
        LumenError::Deserialization {
            path: path.to_string(),
            source,
        }
    })?;
    store.write_data(path, &value).await?;
    println!("wrote {path}");
    Ok(())
}

/// Prints the JSON stored at `path`, or a note that nothing is there.
pub async fn run_fetch(store: &Store, path: &str) -> Result<(), LumenError> {
    match store.fetch_data::<Value>(path).await? {
        Some(value) => {
            let pretty = serde_json::to_string_pretty(&value)
                .map_err(|source| LumenError::Serialization { source })?;
            println!("{pretty}");
        }
        None => println!("no data at {path}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use lumen_test_utils::MockDatabase;

    use super::*;

    async fn ready_store(db: Arc<MockDatabase>) -> Store {
        let store = Store::new(db);
        store.initialize().await.unwrap();
        store
    }

    #[tokio::test]
    async fn write_stores_parsed_json() {
        let db = Arc::new(MockDatabase::new());
        let store = ready_store(db.clone()).await;

        run_write(&store, "players/testUser", r#"{ "score" : 100 }"#)
            .await
            .unwrap();

        assert_eq!(db.raw("players/testUser").await.as_deref(), Some(r#"{"score":100}"#));
    }

    #[tokio::test]
    async fn write_rejects_invalid_json() {
        let db = Arc::new(MockDatabase::new());
        let store = ready_store(db.clone()).await;

        let err = run_write(&store, "players/testUser", "{not json").await.unwrap_err();
        assert!(matches!(err, LumenError::Deserialization { .. }));
        assert_eq!(db.writes(), 0);
    }

    #[tokio::test]
    async fn fetch_of_missing_path_succeeds() {
        let store = ready_store(Arc::new(MockDatabase::new())).await;
        run_fetch(&store, "players/unknownUser").await.unwrap();
    }
}
