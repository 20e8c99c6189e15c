// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Player pool with live stats.

use crate::error::{AppError, Result};
use crate::models::{Position, ScoredPlayer};
use crate::services::scoring;
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/players", get(get_players))
}

#[derive(Deserialize)]
struct PlayersQuery {
    /// Three-letter country code, case-insensitive
    country: Option<String>,
    /// Position code such as `F`, `D` or `G`
    position: Option<String>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PlayersResponse {
    pub players: Vec<ScoredPlayer>,
    pub total: usize,
    /// Games counted in the live stats so far
    pub games_counted: u32,
}

/// List roster players, best scorers first.
async fn get_players(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PlayersQuery>,
) -> Result<Json<PlayersResponse>> {
    let position = match params.position.as_deref().filter(|p| !p.trim().is_empty()) {
        Some(code) => Some(
            Position::from_code(code)
                .ok_or_else(|| AppError::BadRequest(format!("Unknown position: {}", code)))?,
        ),
        None => None,
    };
    let country = params
        .country
        .map(|c| c.trim().to_ascii_uppercase())
        .filter(|c| !c.is_empty());

    let table = state.stats.current().await;
    let mut players: Vec<ScoredPlayer> =
        scoring::reconcile(state.roster.players(), &table, state.config.scoring)
            .into_iter()
            .filter(|p| country.as_ref().is_none_or(|c| p.country == *c))
            .filter(|p| position.is_none_or(|pos| p.position == pos))
            .collect();

    // Stable sort keeps roster order among equal scores
    players.sort_by(|a, b| b.points.cmp(&a.points));

    Ok(Json(PlayersResponse {
        total: players.len(),
        players,
        games_counted: table.games_counted,
    }))
}
