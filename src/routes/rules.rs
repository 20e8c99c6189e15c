// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Game rules and roster validation.

use crate::error::Result;
use crate::models::{CountryRule, ScoringWeights, ValidationReport};
use crate::routes::check_body;
use crate::services::validator::validate;
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/rules", get(get_rules))
        .route("/api/validate", post(validate_roster))
}

/// Active ruleset as shown to players building a team.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RulesResponse {
    pub ruleset: String,
    pub total: u32,
    pub forwards: u32,
    pub defense: u32,
    pub goalies: u32,
    /// `unrestricted`, `at_most_one_per_country` or `exactly_one_per_country`
    pub country_rule: String,
    pub mandated_countries: Vec<String>,
    pub scoring: ScoringWeights,
    pub min_pin_length: usize,
    pub draft_deadline: Option<String>,
    pub locked: bool,
}

async fn get_rules(State(state): State<Arc<AppState>>) -> Json<RulesResponse> {
    let ruleset = &state.config.ruleset;
    let country_rule = match ruleset.country_rule {
        CountryRule::Unrestricted => "unrestricted",
        CountryRule::AtMostOnePerCountry => "at_most_one_per_country",
        CountryRule::ExactlyOnePerCountry { .. } => "exactly_one_per_country",
    };
    let deadline = state.config.draft_deadline;

    Json(RulesResponse {
        ruleset: ruleset.name.clone(),
        total: ruleset.total,
        forwards: ruleset.forwards,
        defense: ruleset.defense,
        goalies: ruleset.goalies,
        country_rule: country_rule.to_string(),
        mandated_countries: ruleset.mandated_countries().to_vec(),
        scoring: state.config.scoring,
        min_pin_length: state.config.min_pin_length,
        draft_deadline: deadline.map(format_utc_rfc3339),
        locked: deadline.is_some_and(|d| chrono::Utc::now() >= d),
    })
}

#[derive(Debug, Deserialize, Validate)]
pub struct ValidateRequest {
    #[validate(length(max = 50))]
    pub player_ids: Vec<String>,
}

/// Check a selection against the ruleset without saving anything.
///
/// Always 200; the report says which rules fail.
async fn validate_roster(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ValidateRequest>,
) -> Result<Json<ValidationReport>> {
    check_body(&body)?;
    Ok(Json(validate(
        &state.config.ruleset,
        &state.roster,
        &body.player_ids,
    )))
}
