// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Leaderboard rows.

use crate::models::ScoredPlayer;
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// One team's line in the leaderboard.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TeamStanding {
    pub rank: u32,
    pub team_name: String,
    pub manager_country: String,
    pub points: u32,
    pub goals: u32,
    pub assists: u32,
    pub players: Vec<ScoredPlayer>,
    /// Saved player keys no longer present in the roster
    pub missing_players: Vec<String>,
}

/// Aggregate over all teams whose managers picked the same country.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CountryStanding {
    pub rank: u32,
    pub country: String,
    pub teams: u32,
    pub points: u32,
    pub average_points: f64,
}
