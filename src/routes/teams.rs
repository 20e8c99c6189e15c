// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Team creation, editing and deletion.
//!
//! There are no user accounts: a team is owned by whoever knows its PIN.

use crate::error::{AppError, Result};
use crate::models::{ScoredPlayer, Team};
use crate::routes::check_body;
use crate::services::teams::ensure_unlocked;
use crate::services::validator::validate;
use crate::services::{scoring, SaveOutcome, SaveTeam};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/teams", get(list_teams).post(save_team))
        .route("/api/teams/{name}", get(get_team).delete(delete_team))
}

// ─── Responses ───────────────────────────────────────────────

/// Team listing entry. PIN material is never returned.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TeamSummary {
    pub team_name: String,
    pub manager_country: String,
    pub player_count: usize,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Team> for TeamSummary {
    fn from(team: &Team) -> Self {
        Self {
            team_name: team.team_name.clone(),
            manager_country: team.manager_country.clone(),
            player_count: team.player_ids.len(),
            created_at: team.created_at.clone(),
            updated_at: team.updated_at.clone(),
        }
    }
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TeamDetail {
    pub team_name: String,
    pub manager_country: String,
    pub created_at: String,
    pub updated_at: String,
    pub points: u32,
    pub goals: u32,
    pub assists: u32,
    pub players: Vec<ScoredPlayer>,
    pub missing_players: Vec<String>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SaveTeamResponse {
    pub created: bool,
    pub team: TeamSummary,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DeleteTeamResponse {
    pub success: bool,
    pub message: String,
}

// ─── Requests ────────────────────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
pub struct SaveTeamRequest {
    #[validate(length(min = 1, max = 40))]
    pub team_name: String,
    pub pin: String,
    #[validate(length(max = 50))]
    pub player_ids: Vec<String>,
    #[validate(length(equal = 3))]
    pub manager_country: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteTeamRequest {
    pub pin: String,
    #[serde(default)]
    pub confirm: bool,
}

// ─── Handlers ────────────────────────────────────────────────

async fn list_teams(State(state): State<Arc<AppState>>) -> Result<Json<Vec<TeamSummary>>> {
    let teams = state.teams.list().await?;
    Ok(Json(teams.iter().map(TeamSummary::from).collect()))
}

/// One team with its players scored from live stats.
async fn get_team(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<TeamDetail>> {
    let team = state.teams.get(&name).await?;
    let table = state.stats.current().await;

    let standing = scoring::team_standings(
        std::slice::from_ref(&team),
        &state.roster,
        &table,
        state.config.scoring,
    )
    .into_iter()
    .next()
    .ok_or_else(|| AppError::Internal(anyhow::anyhow!("No standing computed for team")))?;

    Ok(Json(TeamDetail {
        team_name: team.team_name,
        manager_country: team.manager_country,
        created_at: team.created_at,
        updated_at: team.updated_at,
        points: standing.points,
        goals: standing.goals,
        assists: standing.assists,
        players: standing.players,
        missing_players: standing.missing_players,
    }))
}

/// Create a team (201) or update it with the matching PIN (200).
///
/// The roster must pass every rule before anything is written.
async fn save_team(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SaveTeamRequest>,
) -> Result<(StatusCode, Json<SaveTeamResponse>)> {
    check_body(&body)?;
    let now = Utc::now();
    ensure_unlocked(state.config.draft_deadline, now)?;

    let report = validate(&state.config.ruleset, &state.roster, &body.player_ids);
    if !report.is_valid() {
        tracing::info!(
            team = %body.team_name,
            failed = report.failures().count(),
            "Rejected team save: roster invalid"
        );
        return Err(AppError::Validation(report));
    }

    let outcome = state
        .teams
        .save(
            SaveTeam {
                team_name: body.team_name,
                pin: body.pin,
                player_ids: body.player_ids,
                manager_country: body.manager_country,
            },
            now,
        )
        .await?;

    let (status, created) = match &outcome {
        SaveOutcome::Created(_) => (StatusCode::CREATED, true),
        SaveOutcome::Updated(_) => (StatusCode::OK, false),
    };

    Ok((
        status,
        Json(SaveTeamResponse {
            created,
            team: TeamSummary::from(outcome.team()),
        }),
    ))
}

/// Delete a team with its PIN and an explicit confirmation.
async fn delete_team(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Json(body): Json<DeleteTeamRequest>,
) -> Result<Json<DeleteTeamResponse>> {
    if !body.confirm {
        return Err(AppError::BadRequest(
            "Deletion must be confirmed".to_string(),
        ));
    }
    ensure_unlocked(state.config.draft_deadline, Utc::now())?;

    state.teams.delete(&name, &body.pin).await?;

    Ok(Json(DeleteTeamResponse {
        success: true,
        message: format!("Team {} deleted", name.trim()),
    }))
}
