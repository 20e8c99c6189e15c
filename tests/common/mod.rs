// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use fantasy_hockey::config::Config;
use fantasy_hockey::db::FirestoreDb;
use fantasy_hockey::models::StatTable;
use fantasy_hockey::routes::create_router;
use fantasy_hockey::services::{RosterService, StatsService, TeamService};
use fantasy_hockey::AppState;
use std::sync::Arc;

/// A roster that satisfies the olympic12 rules against the sample pool:
/// eight forwards then four defensemen, one per nation.
#[allow(dead_code)]
pub const VALID_TEAM: [&str; 12] = [
    "cmcdavid_can",
    "dpastrnak_cze",
    "nhischier_sui",
    "atexier_fra",
    "mrantanen_fin",
    "wnylander_swe",
    "jslafkovsky_svk",
    "lfrigo_ita",
    "qhughes_usa",
    "mseider_ger",
    "ubalinskis_lat",
    "jjensenaabo_den",
];

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a mock database connection (offline).
#[allow(dead_code)]
pub fn test_db_offline() -> FirestoreDb {
    FirestoreDb::new_mock()
}

/// Live stats for three players of `VALID_TEAM`.
#[allow(dead_code)]
pub fn sample_stats() -> StatTable {
    let mut table = StatTable::new();
    table.record("cmcdavid_can", 3, 4);
    table.record("mrantanen_fin", 2, 1);
    table.record("qhughes_usa", 0, 5);
    table.games_counted = 6;
    table
}

/// Create a test app with an in-memory store, the sample roster and
/// `sample_stats()`. Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with(Config::default(), FirestoreDb::new_in_memory(), sample_stats())
}

#[allow(dead_code)]
pub fn create_test_app_with(
    config: Config,
    db: FirestoreDb,
    stats: StatTable,
) -> (axum::Router, Arc<AppState>) {
    let teams = TeamService::new(db.clone(), config.min_pin_length);
    let state = Arc::new(AppState {
        config,
        db,
        roster: RosterService::embedded_sample(),
        stats: StatsService::fixed(stats),
        teams,
    });

    (create_router(state.clone()), state)
}

#[allow(dead_code)]
pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[allow(dead_code)]
pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Body of a save request for `VALID_TEAM`.
#[allow(dead_code)]
pub fn save_body(team_name: &str, pin: &str) -> serde_json::Value {
    serde_json::json!({
        "team_name": team_name,
        "pin": pin,
        "player_ids": VALID_TEAM,
        "manager_country": "FIN",
    })
}

#[allow(dead_code)]
pub async fn read_json(response: Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
