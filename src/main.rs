// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fantasy Hockey API Server
//!
//! Serves rosters, team management and leaderboards for the Olympic
//! men's hockey tournament, scored from live NHL boxscores.

use fantasy_hockey::{
    config::{Config, StatsSourceKind, StorageBackend},
    db::FirestoreDb,
    services::{NhlClient, NhlFeed, RosterService, StatsService, StatsSource, TeamService},
    AppState,
};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(
        port = config.port,
        ruleset = %config.ruleset.name,
        "Starting Fantasy Hockey API"
    );

    // Team storage
    let db = match config.storage {
        StorageBackend::Firestore => FirestoreDb::new(&config.gcp_project_id)
            .await
            .expect("Failed to connect to Firestore"),
        StorageBackend::Memory => FirestoreDb::new_in_memory(),
    };

    // Load the player pool
    tracing::info!(path = %config.roster_path, "Loading roster");
    let roster = RosterService::load_or_fallback(&config.roster_path);
    tracing::info!(
        players = roster.players().len(),
        countries = roster.countries().len(),
        "Roster loaded"
    );

    let source = match config.stats_source {
        StatsSourceKind::Nhl => {
            let client = NhlClient::new(
                &config.nhl_api_base_url,
                Duration::from_secs(config.feed_timeout_secs),
            )?;
            StatsSource::Nhl(NhlFeed {
                client,
                start: config.tournament_start,
                end: config.tournament_end,
                game_types: config.tournament_game_types.clone(),
            })
        }
        StatsSourceKind::Simulated => StatsSource::Simulated {
            keys: roster.players().iter().map(|p| p.key()).collect(),
            seed: config.simulation_seed,
        },
        StatsSourceKind::Disabled => StatsSource::Disabled,
    };
    let stats = StatsService::new(
        source,
        chrono::Duration::seconds(config.stats_cache_ttl_secs as i64),
    );
    tracing::info!(
        source = ?config.stats_source,
        ttl_secs = config.stats_cache_ttl_secs,
        "Stats service initialized"
    );

    if config.admin_password.is_none() {
        tracing::warn!("ADMIN_PASSWORD not set, admin routes are disabled");
    }

    let teams = TeamService::new(db.clone(), config.min_pin_length);

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        roster,
        stats,
        teams,
    });

    // Build router
    let app = fantasy_hockey::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fantasy_hockey=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
