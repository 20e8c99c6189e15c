// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! NHL web API client for schedules and boxscores.
//!
//! Only the fields the scorer needs are modeled. Everything else in the
//! responses is ignored, and missing fields fall back to defaults.

use crate::error::AppError;
use chrono::NaiveDate;
use serde::Deserialize;
use std::time::Duration;

/// The API rejects requests without a browser-like user agent.
const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// NHL web API client.
#[derive(Clone)]
pub struct NhlClient {
    http: reqwest::Client,
    base_url: String,
}

impl NhlClient {
    /// Create a client with a per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Get the schedule for the game week starting at `date`.
    pub async fn get_schedule(&self, date: NaiveDate) -> Result<ScheduleResponse, AppError> {
        let url = format!("{}/schedule/{}", self.base_url, date.format("%Y-%m-%d"));
        self.get_json(&url).await
    }

    /// Get the boxscore for a game.
    pub async fn get_boxscore(&self, game_id: u64) -> Result<Boxscore, AppError> {
        let url = format!("{}/gamecenter/{}/boxscore", self.base_url, game_id);
        self.get_json(&url).await
    }

    /// Generic GET request with JSON response.
    async fn get_json<T: for<'de> Deserialize<'de>>(&self, url: &str) -> Result<T, AppError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::FeedApi(e.to_string()))?;

        self.check_response_json(response).await
    }

    /// Check response and parse JSON body.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                tracing::warn!("NHL API rate limit hit (429)");
            }

            return Err(AppError::FeedApi(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::FeedApi(format!("JSON parse error: {}", e)))
    }
}

/// `GET /schedule/{date}` response (a whole game week).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponse {
    #[serde(default)]
    pub game_week: Vec<GameDay>,
}

impl ScheduleResponse {
    /// Games on exactly `date`; the rest of the week is ignored so
    /// consecutive daily requests do not count a game twice.
    pub fn games_on(&self, date: NaiveDate) -> impl Iterator<Item = &ScheduledGame> {
        let wanted = date.format("%Y-%m-%d").to_string();
        self.game_week
            .iter()
            .filter(move |day| day.date == wanted)
            .flat_map(|day| day.games.iter())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDay {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub games: Vec<ScheduledGame>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledGame {
    pub id: u64,
    #[serde(default)]
    pub game_type: u8,
    /// "FUT", "PRE", "LIVE", "CRIT", "FINAL", "OFF"
    #[serde(default)]
    pub game_state: Option<String>,
}

impl ScheduledGame {
    /// Whether the game has started (and so has a boxscore worth fetching).
    pub fn has_started(&self) -> bool {
        !matches!(self.game_state.as_deref(), Some("FUT") | Some("PRE"))
    }
}

/// `GET /gamecenter/{id}/boxscore` response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Boxscore {
    pub id: u64,
    #[serde(default)]
    pub game_type: u8,
    #[serde(default)]
    pub away_team: BoxscoreTeam,
    #[serde(default)]
    pub home_team: BoxscoreTeam,
    #[serde(default)]
    pub player_by_game_stats: Option<PlayerByGameStats>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BoxscoreTeam {
    #[serde(default)]
    pub abbrev: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerByGameStats {
    #[serde(default)]
    pub away_team: TeamPlayerStats,
    #[serde(default)]
    pub home_team: TeamPlayerStats,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeamPlayerStats {
    #[serde(default)]
    pub forwards: Vec<PlayerGameLine>,
    #[serde(default)]
    pub defense: Vec<PlayerGameLine>,
    #[serde(default)]
    pub goalies: Vec<PlayerGameLine>,
}

impl TeamPlayerStats {
    pub fn lines(&self) -> impl Iterator<Item = &PlayerGameLine> {
        self.forwards
            .iter()
            .chain(self.defense.iter())
            .chain(self.goalies.iter())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayerGameLine {
    #[serde(default)]
    pub name: LocalizedName,
    #[serde(default)]
    pub goals: u32,
    #[serde(default)]
    pub assists: u32,
}

/// Localized string; only the default locale is used.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocalizedName {
    #[serde(default)]
    pub default: String,
}
