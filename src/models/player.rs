// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Player pool model.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Skater or goalie position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Position {
    Forward,
    Defense,
    Goalie,
}

impl Position {
    /// Parse a position code as it appears in roster files and feeds.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "F" | "C" | "L" | "R" | "LW" | "RW" | "FORWARD" => Some(Position::Forward),
            "D" | "DEFENSE" | "DEFENCE" | "DEFENSEMAN" => Some(Position::Defense),
            "G" | "GOALIE" | "GOALTENDER" => Some(Position::Goalie),
            _ => None,
        }
    }
}

/// A player from the static roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub first_name: String,
    pub last_name: String,
    /// Three-letter national team code (e.g. "FIN")
    pub country: String,
    pub position: Position,
}

impl Player {
    /// Canonical lookup key shared with the live stats feed.
    pub fn key(&self) -> String {
        crate::services::names::player_key(&self.first_name, &self.last_name, &self.country)
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A roster player merged with live stats.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ScoredPlayer {
    pub key: String,
    pub name: String,
    pub country: String,
    pub position: Position,
    pub goals: u32,
    pub assists: u32,
    pub points: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_codes() {
        assert_eq!(Position::from_code("C"), Some(Position::Forward));
        assert_eq!(Position::from_code("rw"), Some(Position::Forward));
        assert_eq!(Position::from_code(" Defence "), Some(Position::Defense));
        assert_eq!(Position::from_code("G"), Some(Position::Goalie));
        assert_eq!(Position::from_code("X"), None);
        assert_eq!(Position::from_code(""), None);
    }
}
