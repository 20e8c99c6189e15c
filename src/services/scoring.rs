// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Scoring reconciliation and leaderboards.
//!
//! Joins the static roster against the live stat table by player key.
//! A player with no feed line simply scores zero.

use crate::models::{
    CountryStanding, Player, ScoredPlayer, ScoringWeights, StatLine, StatTable, Team,
    TeamStanding,
};
use crate::services::RosterService;
use std::collections::BTreeMap;

/// Manager country bucket for teams that never picked one.
pub const UNKNOWN_COUNTRY: &str = "???";

/// Merge live stats into one roster player.
pub fn score_player(player: &Player, table: &StatTable, weights: ScoringWeights) -> ScoredPlayer {
    let key = player.key();
    let line = table.get(&key).copied().unwrap_or_default();
    ScoredPlayer {
        name: player.display_name(),
        country: player.country.clone(),
        position: player.position,
        goals: line.goals,
        assists: line.assists,
        points: weights.points(line.goals, line.assists),
        key,
    }
}

/// Merge live stats into the whole roster, preserving roster order.
pub fn reconcile(players: &[Player], table: &StatTable, weights: ScoringWeights) -> Vec<ScoredPlayer> {
    players
        .iter()
        .map(|p| score_player(p, table, weights))
        .collect()
}

/// Score every team and rank them, best first.
///
/// Ties share a rank (1, 2, 2, 4); equal points are ordered by team name.
pub fn team_standings(
    teams: &[Team],
    roster: &RosterService,
    table: &StatTable,
    weights: ScoringWeights,
) -> Vec<TeamStanding> {
    let mut standings: Vec<TeamStanding> = teams
        .iter()
        .map(|team| {
            let mut players = Vec::with_capacity(team.player_ids.len());
            let mut missing_players = Vec::new();
            for key in &team.player_ids {
                match roster.get(key) {
                    Some(player) => players.push(score_player(player, table, weights)),
                    None => missing_players.push(key.clone()),
                }
            }

            let totals = players.iter().fold(StatLine::default(), |acc, p| StatLine {
                goals: acc.goals.saturating_add(p.goals),
                assists: acc.assists.saturating_add(p.assists),
            });

            TeamStanding {
                rank: 0,
                team_name: team.team_name.clone(),
                manager_country: team.manager_country.clone(),
                points: players
                    .iter()
                    .fold(0u32, |acc, p| acc.saturating_add(p.points)),
                goals: totals.goals,
                assists: totals.assists,
                players,
                missing_players,
            }
        })
        .collect();

    standings.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then_with(|| a.team_name.cmp(&b.team_name))
    });
    assign_ranks(&mut standings, |s| s.points, |s, rank| s.rank = rank);
    standings
}

/// Group team standings by manager country.
pub fn country_standings(standings: &[TeamStanding]) -> Vec<CountryStanding> {
    let mut groups: BTreeMap<String, (u32, u32)> = BTreeMap::new();
    for standing in standings {
        let country = match standing.manager_country.trim() {
            "" => UNKNOWN_COUNTRY.to_string(),
            code => code.to_ascii_uppercase(),
        };
        let entry = groups.entry(country).or_insert((0, 0));
        entry.0 += 1;
        entry.1 = entry.1.saturating_add(standing.points);
    }

    let mut rows: Vec<CountryStanding> = groups
        .into_iter()
        .map(|(country, (teams, points))| CountryStanding {
            rank: 0,
            country,
            teams,
            points,
            average_points: (points as f64 / teams as f64 * 100.0).round() / 100.0,
        })
        .collect();

    // BTreeMap order already sorts equal totals by country code
    rows.sort_by(|a, b| b.points.cmp(&a.points));
    assign_ranks(&mut rows, |r| r.points, |r, rank| r.rank = rank);
    rows
}

/// Competition ranking over rows already sorted by descending points.
fn assign_ranks<T>(rows: &mut [T], points: impl Fn(&T) -> u32, mut set_rank: impl FnMut(&mut T, u32)) {
    let mut previous: Option<(u32, u32)> = None;
    for (i, row) in rows.iter_mut().enumerate() {
        let pts = points(row);
        let rank = match previous {
            Some((prev_pts, prev_rank)) if prev_pts == pts => prev_rank,
            _ => i as u32 + 1,
        };
        set_rank(row, rank);
        previous = Some((pts, rank));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Position;

    fn player(first: &str, last: &str, country: &str) -> Player {
        Player {
            first_name: first.to_string(),
            last_name: last.to_string(),
            country: country.to_string(),
            position: Position::Forward,
        }
    }

    fn team(name: &str, country: &str, player_ids: &[&str]) -> Team {
        Team {
            team_name: name.to_string(),
            pin_hash: String::new(),
            pin_salt: None,
            player_ids: player_ids.iter().map(|s| s.to_string()).collect(),
            manager_country: country.to_string(),
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn test_accumulated_lines_are_summed() {
        let mut table = StatTable::new();
        table.record("mrantanen_fin", 2, 1);
        table.record("mrantanen_fin", 1, 0);

        let scored = score_player(
            &player("Mikko", "Rantanen", "FIN"),
            &table,
            ScoringWeights::default(),
        );
        assert_eq!((scored.goals, scored.assists, scored.points), (3, 1, 4));
    }

    #[test]
    fn test_unmatched_player_scores_zero() {
        let scored = reconcile(
            &[player("Nobody", "Scoresalot", "ITA")],
            &StatTable::new(),
            ScoringWeights { goal: 3, assist: 2 },
        );
        assert_eq!(scored.len(), 1);
        assert_eq!((scored[0].goals, scored[0].assists, scored[0].points), (0, 0, 0));
    }

    #[test]
    fn test_weighted_points() {
        let mut table = StatTable::new();
        table.record("ldraisaitl_ger", 2, 3);
        let scored = score_player(
            &player("Leon", "Draisaitl", "GER"),
            &table,
            ScoringWeights { goal: 3, assist: 2 },
        );
        assert_eq!(scored.points, 12);
    }

    #[test]
    fn test_totals_saturate_with_huge_weights() {
        let roster = RosterService::from_players(vec![
            player("Auston", "Matthews", "USA"),
            player("Jack", "Eichel", "USA"),
        ]);
        let mut table = StatTable::new();
        table.record("amatthews_usa", 3, 0);
        table.record("jeichel_usa", 1, 1);
        let weights = ScoringWeights {
            goal: u32::MAX / 2,
            assist: u32::MAX / 2,
        };

        let teams = vec![
            team("Big", "USA", &["amatthews_usa", "jeichel_usa"]),
            team("Bigger", "USA", &["amatthews_usa", "jeichel_usa"]),
        ];
        let standings = team_standings(&teams, &roster, &table, weights);
        assert!(standings.iter().all(|s| s.points == u32::MAX));
        assert_eq!(country_standings(&standings)[0].points, u32::MAX);
    }

    #[test]
    fn test_team_standings_ranking() {
        let roster = RosterService::from_players(vec![
            player("Auston", "Matthews", "USA"),
            player("Jack", "Eichel", "USA"),
            player("Cale", "Makar", "CAN"),
        ]);
        let mut table = StatTable::new();
        table.record("amatthews_usa", 3, 0);
        table.record("jeichel_usa", 1, 1);
        table.record("cmakar_can", 0, 2);

        let teams = vec![
            team("Zulu", "FIN", &["jeichel_usa"]),
            team("Alpha", "FIN", &["cmakar_can", "gone_swe"]),
            team("Bravo", "CAN", &["amatthews_usa"]),
        ];

        let standings = team_standings(&teams, &roster, &table, ScoringWeights::default());
        let order: Vec<(&str, u32, u32)> = standings
            .iter()
            .map(|s| (s.team_name.as_str(), s.points, s.rank))
            .collect();
        assert_eq!(order, vec![("Bravo", 3, 1), ("Alpha", 2, 2), ("Zulu", 2, 2)]);
        assert_eq!(standings[1].missing_players, vec!["gone_swe".to_string()]);
    }

    #[test]
    fn test_country_standings() {
        let roster = RosterService::from_players(vec![player("Auston", "Matthews", "USA")]);
        let mut table = StatTable::new();
        table.record("amatthews_usa", 2, 1);

        let teams = vec![
            team("A", "fin", &["amatthews_usa"]),
            team("B", "FIN", &[]),
            team("C", "", &["amatthews_usa"]),
            team("D", "CAN", &["amatthews_usa"]),
        ];
        let standings = team_standings(&teams, &roster, &table, ScoringWeights::default());
        let rows = country_standings(&standings);

        let summary: Vec<(&str, u32, u32, u32)> = rows
            .iter()
            .map(|r| (r.country.as_str(), r.teams, r.points, r.rank))
            .collect();
        assert_eq!(
            summary,
            vec![("???", 1, 3, 1), ("CAN", 1, 3, 1), ("FIN", 2, 3, 1)]
        );
        assert_eq!(rows[2].average_points, 1.5);
    }
}
