// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Leaderboards.

use crate::error::Result;
use crate::models::{CountryStanding, TeamStanding};
use crate::services::scoring;
use crate::AppState;
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/leaderboard", get(get_leaderboard))
        .route("/api/leaderboard/countries", get(get_country_leaderboard))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LeaderboardResponse {
    pub standings: Vec<TeamStanding>,
    pub games_counted: u32,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CountryLeaderboardResponse {
    pub standings: Vec<CountryStanding>,
    pub games_counted: u32,
}

async fn team_standings(state: &AppState) -> Result<(Vec<TeamStanding>, u32)> {
    let teams = state.teams.list().await?;
    let table = state.stats.current().await;
    let standings =
        scoring::team_standings(&teams, &state.roster, &table, state.config.scoring);
    Ok((standings, table.games_counted))
}

async fn get_leaderboard(State(state): State<Arc<AppState>>) -> Result<Json<LeaderboardResponse>> {
    let (standings, games_counted) = team_standings(&state).await?;
    Ok(Json(LeaderboardResponse {
        standings,
        games_counted,
    }))
}

/// Teams aggregated by the country their managers picked.
async fn get_country_leaderboard(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CountryLeaderboardResponse>> {
    let (standings, games_counted) = team_standings(&state).await?;
    Ok(Json(CountryLeaderboardResponse {
        standings: scoring::country_standings(&standings),
        games_counted,
    }))
}
