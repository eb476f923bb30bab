// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared record fixtures.

use serde::{Deserialize, Serialize};

/// A flat player record with the field names the game client stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerData {
    pub player_name: String,
    pub score: i32,
    pub play_time: f32,
}

impl PlayerData {
    /// The record written by the sample flow: `TestPlayer`, 100 points, 45.5 s.
    pub fn sample() -> Self {
        Self {
            player_name: "TestPlayer".to_string(),
            score: 100,
            play_time: 45.5,
        }
    }
}
