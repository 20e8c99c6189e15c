// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Player pool loading from CSV.

use crate::models::{Player, Position};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Sample pool compiled into the binary for when no roster file is available.
const EMBEDDED_ROSTER: &str = include_str!("../../data/sample_players.csv");

/// One CSV row. Extra columns (e.g. `playerId`) are ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RosterRow {
    first_name: String,
    last_name: String,
    team_name: String,
    position: String,
}

/// The static pool of eligible players, indexed by lookup key.
#[derive(Debug, Default, Clone)]
pub struct RosterService {
    players: Vec<Player>,
    by_key: HashMap<String, usize>,
}

impl RosterService {
    /// Load players from a CSV file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, RosterError> {
        let file = File::open(path.as_ref()).map_err(|e| RosterError::IoError(e.to_string()))?;
        Self::load_from_reader(file)
    }

    /// Load from `path`, falling back to the embedded sample pool on any error.
    pub fn load_or_fallback<P: AsRef<Path>>(path: P) -> Self {
        match Self::load_from_file(path.as_ref()) {
            Ok(roster) => roster,
            Err(e) => {
                tracing::warn!(
                    path = %path.as_ref().display(),
                    error = %e,
                    "Roster file unavailable, using embedded sample roster"
                );
                Self::embedded_sample()
            }
        }
    }

    /// The sample pool compiled into the binary.
    pub fn embedded_sample() -> Self {
        Self::load_from_reader(EMBEDDED_ROSTER.as_bytes()).unwrap_or_default()
    }

    /// Load players from CSV data. Malformed rows are skipped.
    pub fn load_from_reader<R: Read>(rdr: R) -> Result<Self, RosterError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(rdr);

        let mut players = Vec::new();
        for result in reader.deserialize::<RosterRow>() {
            let row = match result {
                Ok(row) => row,
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping malformed roster row");
                    continue;
                }
            };

            let Some(position) = Position::from_code(&row.position) else {
                tracing::warn!(
                    player = %format!("{} {}", row.first_name, row.last_name),
                    position = %row.position,
                    "Skipping roster row with unknown position"
                );
                continue;
            };

            players.push(Player {
                first_name: row.first_name,
                last_name: row.last_name,
                country: row.team_name.to_ascii_uppercase(),
                position,
            });
        }

        if players.is_empty() {
            return Err(RosterError::Empty);
        }

        let roster = Self::from_players(players);
        tracing::info!(count = roster.players.len(), "Loaded roster");
        Ok(roster)
    }

    /// Build a roster from players. A repeated key keeps its first player.
    pub fn from_players(players: Vec<Player>) -> Self {
        let mut roster = Self::default();
        for player in players {
            let key = player.key();
            if roster.by_key.contains_key(&key) {
                tracing::warn!(key = %key, "Duplicate player key in roster, keeping first");
                continue;
            }
            roster.by_key.insert(key, roster.players.len());
            roster.players.push(player);
        }
        roster
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Find a player by lookup key.
    pub fn get(&self, key: &str) -> Option<&Player> {
        self.by_key.get(key).map(|&i| &self.players[i])
    }

    /// Distinct country codes in the pool, sorted.
    pub fn countries(&self) -> Vec<String> {
        let mut countries: Vec<String> = self.players.iter().map(|p| p.country.clone()).collect();
        countries.sort();
        countries.dedup();
        countries
    }
}

/// Errors from roster loading.
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("Failed to read file: {0}")]
    IoError(String),

    #[error("Roster contains no usable players")]
    Empty,
}
