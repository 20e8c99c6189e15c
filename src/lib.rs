// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Fantasy hockey for the Olympic tournament.
//!
//! This crate provides the backend API: a fixed player pool, roster
//! validation against a ruleset, PIN-protected teams, and leaderboards
//! scored from live NHL boxscores.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::FirestoreDb;
use services::{RosterService, StatsService, TeamService};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub roster: RosterService,
    pub stats: StatsService,
    pub teams: TeamService,
}
