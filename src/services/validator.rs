// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Roster validation against a configurable ruleset.
//!
//! Every rule is evaluated and reported so the caller can render
//! per-rule feedback; nothing short-circuits on the first failure.

use crate::models::{CountryRule, Position, RuleCheck, RuleKind, Ruleset, ValidationReport};
use crate::services::RosterService;
use std::collections::{BTreeMap, HashSet};

/// Check a candidate selection of player keys.
pub fn validate(ruleset: &Ruleset, roster: &RosterService, selected: &[String]) -> ValidationReport {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    let mut unknown = Vec::new();
    let mut picks = Vec::new();

    for key in selected {
        if !seen.insert(key.as_str()) {
            duplicates.push(key.as_str());
            continue;
        }
        match roster.get(key) {
            Some(player) => picks.push(player),
            None => unknown.push(key.as_str()),
        }
    }

    let count_of = |position: Position| picks.iter().filter(|p| p.position == position).count() as u32;

    let mut per_country: BTreeMap<&str, u32> = BTreeMap::new();
    for player in &picks {
        *per_country.entry(player.country.as_str()).or_insert(0) += 1;
    }

    let checks = vec![
        RuleCheck {
            rule: RuleKind::KnownPlayers,
            passed: unknown.is_empty(),
            actual: unknown.len() as u32,
            expected: 0,
            detail: (!unknown.is_empty()).then(|| format!("unknown: {}", unknown.join(", "))),
        },
        RuleCheck {
            rule: RuleKind::UniquePlayers,
            passed: duplicates.is_empty(),
            actual: duplicates.len() as u32,
            expected: 0,
            detail: (!duplicates.is_empty())
                .then(|| format!("repeated: {}", duplicates.join(", "))),
        },
        count_check(RuleKind::Total, seen.len() as u32, ruleset.total),
        count_check(RuleKind::Forwards, count_of(Position::Forward), ruleset.forwards),
        count_check(RuleKind::Defense, count_of(Position::Defense), ruleset.defense),
        count_check(RuleKind::Goalies, count_of(Position::Goalie), ruleset.goalies),
        country_check(&ruleset.country_rule, &per_country),
    ];

    ValidationReport {
        ruleset: ruleset.name.clone(),
        checks,
    }
}

fn count_check(rule: RuleKind, actual: u32, expected: u32) -> RuleCheck {
    RuleCheck {
        rule,
        passed: actual == expected,
        actual,
        expected,
        detail: None,
    }
}

fn country_check(rule: &CountryRule, per_country: &BTreeMap<&str, u32>) -> RuleCheck {
    let repeated: Vec<&str> = per_country
        .iter()
        .filter(|&(_, &n)| n > 1)
        .map(|(&c, _)| c)
        .collect();

    match rule {
        CountryRule::Unrestricted => RuleCheck {
            rule: RuleKind::Countries,
            passed: true,
            actual: per_country.len() as u32,
            expected: per_country.len() as u32,
            detail: None,
        },
        CountryRule::AtMostOnePerCountry => RuleCheck {
            rule: RuleKind::Countries,
            passed: repeated.is_empty(),
            actual: per_country.values().copied().max().unwrap_or(0),
            expected: 1,
            detail: (!repeated.is_empty()).then(|| format!("repeated: {}", repeated.join(", "))),
        },
        CountryRule::ExactlyOnePerCountry { countries } => {
            let covered = countries
                .iter()
                .filter(|c| per_country.get(c.as_str()) == Some(&1))
                .count() as u32;
            let missing: Vec<&str> = countries
                .iter()
                .filter(|c| !per_country.contains_key(c.as_str()))
                .map(String::as_str)
                .collect();
            let ineligible: Vec<&str> = per_country
                .keys()
                .filter(|c| !countries.iter().any(|m| m == *c))
                .copied()
                .collect();

            let mut problems = Vec::new();
            if !missing.is_empty() {
                problems.push(format!("missing: {}", missing.join(", ")));
            }
            if !repeated.is_empty() {
                problems.push(format!("repeated: {}", repeated.join(", ")));
            }
            if !ineligible.is_empty() {
                problems.push(format!("not eligible: {}", ineligible.join(", ")));
            }

            RuleCheck {
                rule: RuleKind::Countries,
                passed: problems.is_empty(),
                actual: covered,
                expected: countries.len() as u32,
                detail: (!problems.is_empty()).then(|| problems.join("; ")),
            }
        }
    }
}
