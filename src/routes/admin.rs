// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Admin routes.
//! The admin password middleware is applied in routes/mod.rs.

use crate::error::Result;
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{delete, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/admin/teams/{name}", delete(admin_delete_team))
        .route("/api/admin/stats/refresh", post(refresh_stats))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AdminResponse {
    pub success: bool,
    pub message: String,
}

/// Delete any team without its PIN. Works after the draft deadline.
async fn admin_delete_team(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<AdminResponse>> {
    state.teams.admin_delete(&name).await?;
    Ok(Json(AdminResponse {
        success: true,
        message: format!("Team {} deleted", name.trim()),
    }))
}

/// Mark cached live stats stale and fetch again.
async fn refresh_stats(State(state): State<Arc<AppState>>) -> Json<AdminResponse> {
    state.stats.invalidate().await;
    let table = state.stats.current().await;
    tracing::info!(
        games = table.games_counted,
        players = table.len(),
        "Live stats refreshed by admin"
    );
    Json(AdminResponse {
        success: true,
        message: format!("Stats refreshed: {} games counted", table.games_counted),
    })
}
