// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! A `.env` file is honored for local development.

use crate::models::{Ruleset, ScoringWeights};
use chrono::{DateTime, NaiveDate, Utc};
use std::env;
use std::str::FromStr;

/// Team storage backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Firestore,
    /// Process-local map, lost on restart.
    Memory,
}

/// Where live stats come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsSourceKind {
    Nhl,
    Simulated,
    Disabled,
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// GCP project ID
    pub gcp_project_id: String,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    pub storage: StorageBackend,
    /// Admin routes are disabled when unset
    pub admin_password: Option<String>,
    /// Roster CSV; falls back to the embedded sample if unreadable
    pub roster_path: String,

    // --- Live stats ---
    pub stats_source: StatsSourceKind,
    pub nhl_api_base_url: String,
    pub tournament_start: NaiveDate,
    pub tournament_end: NaiveDate,
    /// NHL `gameType` values that count
    pub tournament_game_types: Vec<u8>,
    pub simulation_seed: u64,
    pub stats_cache_ttl_secs: u64,
    pub feed_timeout_secs: u64,

    // --- Game rules ---
    pub ruleset: Ruleset,
    pub scoring: ScoringWeights,
    pub min_pin_length: usize,
    /// Team edits are rejected at or after this instant
    pub draft_deadline: Option<DateTime<Utc>>,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            port: 8080,
            gcp_project_id: "test-project".to_string(),
            frontend_url: "http://localhost:5173".to_string(),
            storage: StorageBackend::Memory,
            admin_password: Some("test_admin".to_string()),
            roster_path: "data/players.csv".to_string(),
            stats_source: StatsSourceKind::Disabled,
            nhl_api_base_url: DEFAULT_NHL_API_BASE_URL.to_string(),
            tournament_start: NaiveDate::from_ymd_opt(2026, 2, 11).unwrap_or_default(),
            tournament_end: NaiveDate::from_ymd_opt(2026, 2, 22).unwrap_or_default(),
            tournament_game_types: vec![3],
            simulation_seed: 2026,
            stats_cache_ttl_secs: 300,
            feed_timeout_secs: 5,
            ruleset: Ruleset::default(),
            scoring: ScoringWeights::default(),
            min_pin_length: 4,
            draft_deadline: None,
        }
    }
}

const DEFAULT_NHL_API_BASE_URL: &str = "https://api-web.nhle.com/v1";

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Unset variables take their defaults; set but malformed values are errors.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let defaults = Self::default();

        let storage = match env::var("STORAGE").ok().as_deref().map(str::trim) {
            None | Some("firestore") => StorageBackend::Firestore,
            Some("memory") => StorageBackend::Memory,
            Some(_) => return Err(ConfigError::Invalid("STORAGE")),
        };

        let stats_source = match env::var("STATS_SOURCE").ok().as_deref().map(str::trim) {
            None | Some("nhl") => StatsSourceKind::Nhl,
            Some("simulated") => StatsSourceKind::Simulated,
            Some("disabled") => StatsSourceKind::Disabled,
            Some(_) => return Err(ConfigError::Invalid("STATS_SOURCE")),
        };

        let ruleset = match env::var("RULESET") {
            Ok(name) => Ruleset::from_name(&name).ok_or(ConfigError::Invalid("RULESET"))?,
            Err(_) => defaults.ruleset,
        };

        let tournament_game_types = match env::var("TOURNAMENT_GAME_TYPES") {
            Ok(list) => list
                .split(',')
                .map(|t| t.trim().parse::<u8>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|_| ConfigError::Invalid("TOURNAMENT_GAME_TYPES"))?,
            Err(_) => defaults.tournament_game_types,
        };

        // Firestore needs a real project; the memory store never uses it
        let gcp_project_id = match env::var("GCP_PROJECT_ID") {
            Ok(id) if !id.trim().is_empty() => id.trim().to_string(),
            _ if storage == StorageBackend::Firestore => {
                return Err(ConfigError::Missing("GCP_PROJECT_ID"))
            }
            _ => "local-dev".to_string(),
        };

        let draft_deadline = match env::var("DRAFT_DEADLINE") {
            Ok(ts) if !ts.trim().is_empty() => Some(
                DateTime::parse_from_rfc3339(ts.trim())
                    .map_err(|_| ConfigError::Invalid("DRAFT_DEADLINE"))?
                    .with_timezone(&Utc),
            ),
            _ => None,
        };

        let config = Self {
            port: parse_var("PORT", defaults.port)?,
            gcp_project_id,
            frontend_url: env::var("FRONTEND_URL").unwrap_or(defaults.frontend_url),
            storage,
            admin_password: env::var("ADMIN_PASSWORD")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            roster_path: env::var("ROSTER_PATH").unwrap_or(defaults.roster_path),
            stats_source,
            nhl_api_base_url: env::var("NHL_API_BASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or(defaults.nhl_api_base_url),
            tournament_start: parse_date("TOURNAMENT_START", defaults.tournament_start)?,
            tournament_end: parse_date("TOURNAMENT_END", defaults.tournament_end)?,
            tournament_game_types,
            simulation_seed: parse_var("SIMULATION_SEED", defaults.simulation_seed)?,
            stats_cache_ttl_secs: parse_var("STATS_CACHE_TTL_SECS", defaults.stats_cache_ttl_secs)?,
            feed_timeout_secs: parse_var("FEED_TIMEOUT_SECS", defaults.feed_timeout_secs)?,
            ruleset,
            scoring: ScoringWeights {
                goal: parse_var("GOAL_POINTS", defaults.scoring.goal)?,
                assist: parse_var("ASSIST_POINTS", defaults.scoring.assist)?,
            },
            min_pin_length: parse_var("MIN_PIN_LENGTH", defaults.min_pin_length)?,
            draft_deadline,
        };

        if config.tournament_end < config.tournament_start {
            return Err(ConfigError::Invalid("TOURNAMENT_END"));
        }

        Ok(config)
    }
}

fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value.trim().parse().map_err(|_| ConfigError::Invalid(name)),
        Err(_) => Ok(default),
    }
}

fn parse_date(name: &'static str, default: NaiveDate) -> Result<NaiveDate, ConfigError> {
    match env::var(name) {
        Ok(value) => NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
            .map_err(|_| ConfigError::Invalid(name)),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
