// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod player;
pub mod ruleset;
pub mod standings;
pub mod stats;
pub mod team;

pub use player::{Player, Position, ScoredPlayer};
pub use ruleset::{
    CountryRule, RuleCheck, RuleKind, Ruleset, ScoringWeights, ValidationReport,
    OLYMPIC_2026_COUNTRIES,
};
pub use standings::{CountryStanding, TeamStanding};
pub use stats::{StatLine, StatTable};
pub use team::Team;
