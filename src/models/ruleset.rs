// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Game rules: roster composition, country policy and scoring weights.

use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// National teams in the 2026 Olympic men's tournament.
pub const OLYMPIC_2026_COUNTRIES: [&str; 12] = [
    "CAN", "CZE", "SUI", "FRA", "FIN", "SWE", "SVK", "ITA", "USA", "GER", "LAT", "DEN",
];

/// How a roster may draw players from national teams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CountryRule {
    /// Any number of players from any country.
    Unrestricted,
    /// No country may appear twice.
    AtMostOnePerCountry,
    /// Exactly one player from each listed country and none from elsewhere.
    ExactlyOnePerCountry { countries: Vec<String> },
}

/// Roster composition rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ruleset {
    pub name: String,
    pub total: u32,
    pub forwards: u32,
    pub defense: u32,
    pub goalies: u32,
    pub country_rule: CountryRule,
}

impl Ruleset {
    /// 12 players, 8 F + 4 D, one from each Olympic nation.
    pub fn olympic12() -> Self {
        Self {
            name: "olympic12".to_string(),
            total: 12,
            forwards: 8,
            defense: 4,
            goalies: 0,
            country_rule: CountryRule::ExactlyOnePerCountry {
                countries: OLYMPIC_2026_COUNTRIES.iter().map(|c| c.to_string()).collect(),
            },
        }
    }

    /// 10 players, 7 F + 3 D, no country twice.
    pub fn squad10() -> Self {
        Self {
            name: "squad10".to_string(),
            total: 10,
            forwards: 7,
            defense: 3,
            goalies: 0,
            country_rule: CountryRule::AtMostOnePerCountry,
        }
    }

    /// 6 players, 3 F + 2 D + 1 G.
    pub fn classic6() -> Self {
        Self {
            name: "classic6".to_string(),
            total: 6,
            forwards: 3,
            defense: 2,
            goalies: 1,
            country_rule: CountryRule::Unrestricted,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "olympic12" => Some(Self::olympic12()),
            "squad10" => Some(Self::squad10()),
            "classic6" => Some(Self::classic6()),
            _ => None,
        }
    }

    /// Countries a roster must cover, if the rule mandates any.
    pub fn mandated_countries(&self) -> &[String] {
        match &self.country_rule {
            CountryRule::ExactlyOnePerCountry { countries } => countries,
            _ => &[],
        }
    }
}

impl Default for Ruleset {
    fn default() -> Self {
        Self::olympic12()
    }
}

/// Fantasy points per goal and per assist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ScoringWeights {
    pub goal: u32,
    pub assist: u32,
}

impl ScoringWeights {
    /// Weighted points, saturating at `u32::MAX`.
    pub fn points(&self, goals: u32, assists: u32) -> u32 {
        self.goal
            .saturating_mul(goals)
            .saturating_add(self.assist.saturating_mul(assists))
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self { goal: 1, assist: 1 }
    }
}

/// Individual roster rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    KnownPlayers,
    UniquePlayers,
    Total,
    Forwards,
    Defense,
    Goalies,
    Countries,
}

/// Outcome of one rule, with enough detail to render feedback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleCheck {
    pub rule: RuleKind,
    pub passed: bool,
    pub actual: u32,
    pub expected: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Every rule check for a candidate roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub ruleset: String,
    pub checks: Vec<RuleCheck>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    pub fn check(&self, rule: RuleKind) -> Option<&RuleCheck> {
        self.checks.iter().find(|c| c.rule == rule)
    }

    pub fn failures(&self) -> impl Iterator<Item = &RuleCheck> {
        self.checks.iter().filter(|c| !c.passed)
    }
}
