// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fantasy team document stored in Firestore.

use serde::{Deserialize, Serialize};

/// A fantasy team (document ID is the team name).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    /// Human-chosen unique name
    pub team_name: String,
    /// Hex-encoded PIN hash
    pub pin_hash: String,
    /// Hex-encoded salt; absent on documents written with unsalted SHA-256
    #[serde(default)]
    pub pin_salt: Option<String>,
    /// Selected player keys
    #[serde(default)]
    pub player_ids: Vec<String>,
    /// Nationality the manager picked for the country leaderboard
    #[serde(default)]
    pub manager_country: String,
    /// When the team was first saved (RFC3339)
    pub created_at: String,
    /// Last successful save (RFC3339)
    pub updated_at: String,
}
