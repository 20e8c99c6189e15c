// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod names;
pub mod nhl;
pub mod pin;
pub mod roster;
pub mod scoring;
pub mod stats;
pub mod teams;
pub mod validator;

pub use nhl::NhlClient;
pub use roster::{RosterError, RosterService};
pub use stats::{NhlFeed, StatsService, StatsSource};
pub use teams::{SaveOutcome, SaveTeam, TeamService};
