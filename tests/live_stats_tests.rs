// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Live stats against a local stand-in for the NHL web API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{Duration, NaiveDate};
use fantasy_hockey::models::StatLine;
use fantasy_hockey::services::{NhlClient, NhlFeed, StatsService, StatsSource};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

const NUM_CONCURRENT_READERS: usize = 10;

#[derive(Default)]
struct Hits {
    schedule: AtomicUsize,
    boxscore: AtomicUsize,
    /// When set, every schedule request fails.
    down: AtomicBool,
}

async fn schedule(
    State(hits): State<Arc<Hits>>,
    Path(date): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    hits.schedule.fetch_add(1, Ordering::SeqCst);
    if hits.down.load(Ordering::SeqCst) {
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    }
    match date.as_str() {
        // The response covers the whole week; only the requested day counts
        "2026-02-11" => Ok(Json(json!({
            "gameWeek": [
                {"date": "2026-02-11", "games": [
                    {"id": 101, "gameType": 3, "gameState": "OFF"},
                    {"id": 102, "gameType": 2, "gameState": "OFF"}
                ]},
                {"date": "2026-02-12", "games": [
                    {"id": 103, "gameType": 3, "gameState": "OFF"}
                ]}
            ]
        }))),
        "2026-02-12" => Ok(Json(json!({
            "gameWeek": [
                {"date": "2026-02-12", "games": [
                    {"id": 103, "gameType": 3, "gameState": "OFF"},
                    {"id": 104, "gameType": 3, "gameState": "FUT"}
                ]}
            ]
        }))),
        _ => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

async fn boxscore(
    State(hits): State<Arc<Hits>>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, StatusCode> {
    hits.boxscore.fetch_add(1, Ordering::SeqCst);
    match id {
        101 => Ok(Json(json!({
            "id": 101,
            "gameType": 3,
            "awayTeam": {"abbrev": "CAN"},
            "homeTeam": {"abbrev": "FIN"},
            "playerByGameStats": {
                "awayTeam": {"forwards": [{"name": {"default": "C. McDavid"}, "goals": 1, "assists": 1}]},
                "homeTeam": {"forwards": [{"name": {"default": "M. Rantanen"}, "goals": 0, "assists": 2}]}
            }
        }))),
        103 => Ok(Json(json!({
            "id": 103,
            "gameType": 3,
            "awayTeam": {"abbrev": "USA"},
            "homeTeam": {"abbrev": "CAN"},
            "playerByGameStats": {
                "awayTeam": {"defense": [{"name": {"default": "Q. Hughes"}, "goals": 0, "assists": 1}]},
                "homeTeam": {"forwards": [{"name": {"default": "C. McDavid"}, "goals": 2, "assists": 0}]}
            }
        }))),
        _ => Err(StatusCode::NOT_FOUND),
    }
}

async fn spawn_feed() -> (String, Arc<Hits>) {
    let hits = Arc::new(Hits::default());
    let app = Router::new()
        .route("/v1/schedule/{date}", get(schedule))
        .route("/v1/gamecenter/{id}/boxscore", get(boxscore))
        .with_state(hits.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/v1", addr), hits)
}

fn feed(base_url: &str, end: NaiveDate) -> NhlFeed {
    NhlFeed {
        client: NhlClient::new(base_url, std::time::Duration::from_secs(5)).unwrap(),
        start: NaiveDate::from_ymd_opt(2026, 2, 11).unwrap(),
        end,
        game_types: vec![3],
    }
}

#[tokio::test]
async fn test_feed_aggregates_tournament_games() {
    let (base_url, hits) = spawn_feed().await;
    // Day three fails on the server and is skipped
    let feed = feed(&base_url, NaiveDate::from_ymd_opt(2026, 2, 13).unwrap());

    let table = feed
        .fetch(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap())
        .await
        .unwrap();

    assert_eq!(table.games_counted, 2);
    assert_eq!(
        table.get("cmcdavid_can"),
        Some(&StatLine {
            goals: 3,
            assists: 1
        })
    );
    assert_eq!(table.get("mrantanen_fin").unwrap().assists, 2);
    assert_eq!(table.get("qhughes_usa").unwrap().assists, 1);

    assert_eq!(hits.schedule.load(Ordering::SeqCst), 3);
    // Exhibition and future games are never fetched
    assert_eq!(hits.boxscore.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_future_days_are_not_requested() {
    let (base_url, hits) = spawn_feed().await;
    let feed = feed(&base_url, NaiveDate::from_ymd_opt(2026, 2, 22).unwrap());

    let table = feed
        .fetch(NaiveDate::from_ymd_opt(2026, 2, 11).unwrap())
        .await
        .unwrap();

    assert_eq!(hits.schedule.load(Ordering::SeqCst), 1);
    assert_eq!(table.games_counted, 1);
    assert_eq!(table.get("cmcdavid_can").unwrap().goals, 1);
}

#[tokio::test]
async fn test_concurrent_readers_share_one_fetch() {
    let (base_url, hits) = spawn_feed().await;
    let service = StatsService::new(
        StatsSource::Nhl(feed(&base_url, NaiveDate::from_ymd_opt(2026, 2, 12).unwrap())),
        Duration::minutes(5),
    );

    let mut handles = vec![];
    for _ in 0..NUM_CONCURRENT_READERS {
        let service = service.clone();
        handles.push(tokio::spawn(async move { service.current().await }));
    }

    let mut tables = vec![];
    for handle in handles {
        tables.push(handle.await.expect("Task join failed"));
    }

    assert!(tables.iter().all(|t| t.games_counted == 2));
    assert_eq!(
        hits.schedule.load(Ordering::SeqCst),
        2,
        "Cached stats should be fetched once for all readers"
    );

    service.invalidate().await;
    service.current().await;
    assert_eq!(hits.schedule.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn test_feed_outage_keeps_previous_table() {
    let (base_url, hits) = spawn_feed().await;
    let service = StatsService::new(
        StatsSource::Nhl(feed(&base_url, NaiveDate::from_ymd_opt(2026, 2, 12).unwrap())),
        Duration::zero(),
    );

    let before = service.current().await;
    assert_eq!(before.games_counted, 2);

    hits.down.store(true, Ordering::SeqCst);
    let during = service.current().await;
    assert_eq!(hits.schedule.load(Ordering::SeqCst), 4);
    assert_eq!(*during, *before);

    // An admin refresh during the outage also keeps the old table
    service.invalidate().await;
    assert_eq!(service.current().await.get("cmcdavid_can").unwrap().goals, 3);

    hits.down.store(false, Ordering::SeqCst);
    assert_eq!(service.current().await.games_counted, 2);
}

#[tokio::test]
async fn test_feed_outage_is_reported() {
    let (base_url, hits) = spawn_feed().await;
    hits.down.store(true, Ordering::SeqCst);
    let feed = feed(&base_url, NaiveDate::from_ymd_opt(2026, 2, 12).unwrap());

    let result = feed.fetch(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()).await;
    assert!(result.is_err());
    assert_eq!(hits.boxscore.load(Ordering::SeqCst), 0);
}
