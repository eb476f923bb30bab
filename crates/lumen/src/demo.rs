// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `lumen demo`: store a sample player record and read it back.

use lumen_core::LumenError;
use lumen_store::Store;
use serde::{Deserialize, Serialize};

/// Where the demo record lives.
pub const DEMO_PATH: &str = "players/testUser";

/// A player's progress as the game client stores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerData {
    pub player_name: String,
    pub score: i32,
    pub play_time: f32,
}

/// Writes the demo player, fetches it back and prints it.
pub async fn run_demo(store: &Store) -> Result<(), LumenError> {
    let player = PlayerData {
        player_name: "TestPlayer".to_string(),
        score: 100,
        play_time: 45.5,
    };
    store.write_data(DEMO_PATH, &player).await?;

    match store.fetch_data::<PlayerData>(DEMO_PATH).await? {
        Some(fetched) => println!(
            "Fetched: Name: {}, Score: {}, Time: {}",
            fetched.player_name, fetched.score, fetched.play_time
        ),
        None => println!("no data at {DEMO_PATH}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use lumen_test_utils::MockDatabase;

    use super::*;

    #[tokio::test]
    async fn demo_writes_player_record() {
        let db = Arc::new(MockDatabase::new());
        let store = Store::new(db.clone());
        store.initialize().await.unwrap();

        run_demo(&store).await.unwrap();

        assert_eq!(
            db.raw_value(DEMO_PATH).await,
            Some(serde_json::json!({"playerName": "TestPlayer", "score": 100, "playTime": 45.5}))
        );
        assert_eq!((db.writes(), db.reads()), (1, 1));
    }
}
