// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Live stats aggregation with a short-TTL read-through cache.
//!
//! The NHL source walks the tournament window day by day:
//! 1. Fetch the schedule for the day (future days are never requested)
//! 2. Fetch the boxscore of every qualifying game
//! 3. Add each skater's goals/assists to the table under its feed key
//!
//! A failing day or game is logged and skipped. Partial data is better
//! than an empty leaderboard. If every schedule request fails the feed
//! is treated as down and the cache keeps serving the previous table.

use crate::error::{AppError, Result};
use crate::models::StatTable;
use crate::services::names::feed_key;
use crate::services::nhl::{Boxscore, NhlClient};
use crate::time_utils::tournament_dates;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// NHL feed restricted to a tournament window and game types.
#[derive(Clone)]
pub struct NhlFeed {
    pub client: NhlClient,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub game_types: Vec<u8>,
}

impl NhlFeed {
    /// Aggregate every qualifying game from the window start up to `today`.
    ///
    /// Fails only when days were requested and none of them could be read.
    pub async fn fetch(&self, today: NaiveDate) -> Result<StatTable> {
        let mut table = StatTable::new();
        let mut seen_games = HashSet::new();
        let mut failures = 0u32;

        let dates = tournament_dates(self.start, self.end, today);
        let mut days_failed = 0usize;
        for &date in &dates {
            let schedule = match self.client.get_schedule(date).await {
                Ok(schedule) => schedule,
                Err(e) => {
                    tracing::warn!(date = %date, error = %e, "Skipping day: schedule fetch failed");
                    failures += 1;
                    days_failed += 1;
                    continue;
                }
            };

            for game in schedule.games_on(date) {
                if !self.game_types.contains(&game.game_type) || !game.has_started() {
                    continue;
                }
                if !seen_games.insert(game.id) {
                    continue;
                }

                match self.client.get_boxscore(game.id).await {
                    Ok(boxscore) => {
                        accumulate_boxscore(&mut table, &boxscore);
                    }
                    Err(e) => {
                        tracing::warn!(game_id = game.id, error = %e, "Skipping game: boxscore fetch failed");
                        failures += 1;
                    }
                }
            }
        }

        if !dates.is_empty() && days_failed == dates.len() {
            return Err(AppError::FeedApi(format!(
                "All {} schedule requests failed",
                days_failed
            )));
        }

        tracing::info!(
            games = table.games_counted,
            players = table.len(),
            failures,
            "Live stats fetched"
        );
        Ok(table)
    }
}

/// Add both teams' player lines from one boxscore.
///
/// Returns `false` if the boxscore carries no player stats yet.
pub fn accumulate_boxscore(table: &mut StatTable, boxscore: &Boxscore) -> bool {
    let Some(stats) = &boxscore.player_by_game_stats else {
        return false;
    };

    let sides = [
        (&boxscore.away_team.abbrev, &stats.away_team),
        (&boxscore.home_team.abbrev, &stats.home_team),
    ];
    for (abbrev, side) in sides {
        for line in side.lines() {
            table.record(&feed_key(&line.name.default, abbrev), line.goals, line.assists);
        }
    }

    table.games_counted += 1;
    true
}

/// Deterministic pseudo-random stats for every given key.
pub fn simulated_table(keys: &[String], seed: u64) -> StatTable {
    let mut sorted: Vec<&String> = keys.iter().collect();
    sorted.sort();

    let mut rng = StdRng::seed_from_u64(seed);
    let mut table = StatTable::new();
    for key in sorted {
        let goals = rng.gen_range(0..=4);
        let assists = rng.gen_range(0..=5);
        table.record(key, goals, assists);
    }
    table
}

/// Where live stats come from.
#[derive(Clone)]
pub enum StatsSource {
    Nhl(NhlFeed),
    /// Seeded random stats for the given player keys.
    Simulated { keys: Vec<String>, seed: u64 },
    /// A pre-built table (local fixtures and tests).
    Fixed(StatTable),
    Disabled,
}

struct CachedStats {
    table: Arc<StatTable>,
    fetched_at: DateTime<Utc>,
    stale: bool,
}

/// Read-through cache in front of a stats source.
///
/// Shared by all requests; a refresh lock keeps concurrent requests
/// from fetching the feed at the same time.
#[derive(Clone)]
pub struct StatsService {
    source: Arc<StatsSource>,
    ttl: Duration,
    cache: Arc<RwLock<Option<CachedStats>>>,
    refresh_lock: Arc<Mutex<()>>,
}

impl StatsService {
    pub fn new(source: StatsSource, ttl: Duration) -> Self {
        Self {
            source: Arc::new(source),
            ttl,
            cache: Arc::new(RwLock::new(None)),
            refresh_lock: Arc::new(Mutex::new(())),
        }
    }

    /// A service that always serves `table`.
    pub fn fixed(table: StatTable) -> Self {
        Self::new(StatsSource::Fixed(table), Duration::zero())
    }

    /// Current stat table, fetching if the cached copy is stale.
    ///
    /// Never fails: when the feed is down the previous table is served
    /// again for another TTL, or an empty one if nothing was fetched yet.
    pub async fn current(&self) -> Arc<StatTable> {
        let now = Utc::now();

        if let Some(table) = self.fresh(now).await {
            return table;
        }

        let _guard = self.refresh_lock.lock().await;

        // Another request may have refreshed while we waited.
        if let Some(table) = self.fresh(now).await {
            return table;
        }

        let table = match self.fetch(now.date_naive()).await {
            Ok(table) => Arc::new(table),
            Err(e) => {
                let previous = self.cache.read().await.as_ref().map(|c| c.table.clone());
                match previous {
                    Some(table) => {
                        tracing::warn!(error = %e, "Stats feed unavailable, keeping previous table");
                        table
                    }
                    None => {
                        tracing::warn!(error = %e, "Stats feed unavailable, no previous table");
                        Arc::new(StatTable::new())
                    }
                }
            }
        };

        *self.cache.write().await = Some(CachedStats {
            table: table.clone(),
            fetched_at: Utc::now(),
            stale: false,
        });
        table
    }

    /// Mark the cached table stale so the next read refetches.
    ///
    /// The table itself is kept as the fallback if that fetch fails.
    pub async fn invalidate(&self) {
        if let Some(cached) = self.cache.write().await.as_mut() {
            cached.stale = true;
        }
    }

    async fn fresh(&self, now: DateTime<Utc>) -> Option<Arc<StatTable>> {
        let cache = self.cache.read().await;
        cache
            .as_ref()
            .filter(|c| !c.stale && now < c.fetched_at + self.ttl)
            .map(|c| c.table.clone())
    }

    async fn fetch(&self, today: NaiveDate) -> Result<StatTable> {
        match self.source.as_ref() {
            StatsSource::Nhl(feed) => feed.fetch(today).await,
            StatsSource::Simulated { keys, seed } => Ok(simulated_table(keys, *seed)),
            StatsSource::Fixed(table) => Ok(table.clone()),
            StatsSource::Disabled => Ok(StatTable::new()),
        }
    }
}
