// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Live stat aggregates keyed by normalized player key.
//!
//! A table is built once per feed fetch. Every qualifying game adds to
//! the existing line for a key, so a player's line is the sum over the
//! whole tournament window.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Goals and assists for one player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatLine {
    pub goals: u32,
    pub assists: u32,
}

/// Per-player stat lines accumulated from the live feed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatTable {
    lines: HashMap<String, StatLine>,
    /// Number of games folded into this table
    #[serde(default)]
    pub games_counted: u32,
}

impl StatTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one game's line for a key.
    pub fn record(&mut self, key: &str, goals: u32, assists: u32) {
        let line = self.lines.entry(key.to_string()).or_default();
        line.goals = line.goals.saturating_add(goals);
        line.assists = line.assists.saturating_add(assists);
    }

    pub fn get(&self, key: &str) -> Option<&StatLine> {
        self.lines.get(key)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &StatLine)> {
        self.lines.iter()
    }
}
