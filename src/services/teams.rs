// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Team persistence gated by a per-team PIN.
//!
//! Saving is an upsert with an ownership check: the first save of a name
//! creates the team and sets its PIN; later saves must present the same
//! PIN. Two sessions editing one team race and the last write wins.

use crate::db::FirestoreDb;
use crate::error::{AppError, Result};
use crate::models::Team;
use crate::services::pin;
use crate::time_utils::format_utc_rfc3339;
use chrono::{DateTime, Utc};

const MAX_PIN_LENGTH: usize = 12;

/// A save request after the roster itself has been validated.
#[derive(Debug, Clone)]
pub struct SaveTeam {
    pub team_name: String,
    pub pin: String,
    pub player_ids: Vec<String>,
    pub manager_country: String,
}

/// Whether a save created a new team or updated an existing one.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    Created(Team),
    Updated(Team),
}

impl SaveOutcome {
    pub fn team(&self) -> &Team {
        match self {
            SaveOutcome::Created(team) | SaveOutcome::Updated(team) => team,
        }
    }
}

/// Reject edits once the draft deadline has passed.
pub fn ensure_unlocked(deadline: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Result<()> {
    match deadline {
        Some(deadline) if now >= deadline => Err(AppError::Locked(format_utc_rfc3339(deadline))),
        _ => Ok(()),
    }
}

/// Team CRUD with PIN checks.
#[derive(Clone)]
pub struct TeamService {
    db: FirestoreDb,
    min_pin_length: usize,
}

impl TeamService {
    pub fn new(db: FirestoreDb, min_pin_length: usize) -> Self {
        Self { db, min_pin_length }
    }

    /// PINs are short numeric codes.
    pub fn check_pin_format(&self, pin: &str) -> Result<()> {
        let len = pin.chars().count();
        if len < self.min_pin_length || len > MAX_PIN_LENGTH {
            return Err(AppError::BadRequest(format!(
                "PIN must be {} to {} digits",
                self.min_pin_length, MAX_PIN_LENGTH
            )));
        }
        if !pin.chars().all(|c| c.is_ascii_digit()) {
            return Err(AppError::BadRequest("PIN must contain only digits".to_string()));
        }
        Ok(())
    }

    /// Create the team, or update it if `pin` matches the stored PIN.
    ///
    /// On a PIN mismatch nothing is written.
    pub async fn save(&self, request: SaveTeam, now: DateTime<Utc>) -> Result<SaveOutcome> {
        let team_name = request.team_name.trim().to_string();
        if team_name.is_empty() {
            return Err(AppError::BadRequest("Team name is required".to_string()));
        }
        self.check_pin_format(&request.pin)?;
        let manager_country = normalize_manager_country(&request.manager_country)?;
        let timestamp = format_utc_rfc3339(now);

        match self.db.get_team(&team_name).await? {
            Some(existing) => {
                if !pin::verify_pin(&request.pin, &existing) {
                    tracing::warn!(team = %team_name, "Rejected team save: PIN mismatch");
                    return Err(AppError::InvalidPin);
                }

                let team = Team {
                    player_ids: request.player_ids,
                    manager_country,
                    updated_at: timestamp,
                    ..existing
                };
                self.db.set_team(&team).await?;
                tracing::info!(team = %team.team_name, "Team updated");
                Ok(SaveOutcome::Updated(team))
            }
            None => {
                let salt = pin::new_salt()?;
                let team = Team {
                    team_name,
                    pin_hash: pin::hash_pin(&request.pin, &salt)?,
                    pin_salt: Some(salt),
                    player_ids: request.player_ids,
                    manager_country,
                    created_at: timestamp.clone(),
                    updated_at: timestamp,
                };
                self.db.set_team(&team).await?;
                tracing::info!(team = %team.team_name, "Team created");
                Ok(SaveOutcome::Created(team))
            }
        }
    }

    pub async fn get(&self, team_name: &str) -> Result<Team> {
        self.db
            .get_team(team_name.trim())
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Team {} not found", team_name.trim())))
    }

    pub async fn list(&self) -> Result<Vec<Team>> {
        self.db.list_teams().await
    }

    /// Delete a team after verifying its PIN.
    pub async fn delete(&self, team_name: &str, pin: &str) -> Result<()> {
        let team = self.get(team_name).await?;
        if !pin::verify_pin(pin, &team) {
            tracing::warn!(team = %team.team_name, "Rejected team deletion: PIN mismatch");
            return Err(AppError::InvalidPin);
        }
        self.db.delete_team(&team.team_name).await?;
        tracing::info!(team = %team.team_name, "Team deleted");
        Ok(())
    }

    /// Delete a team without a PIN (admin only).
    pub async fn admin_delete(&self, team_name: &str) -> Result<()> {
        let team = self.get(team_name).await?;
        self.db.delete_team(&team.team_name).await?;
        tracing::info!(team = %team.team_name, "Team deleted by admin");
        Ok(())
    }
}

/// Manager country must be a three-letter code; stored uppercase.
fn normalize_manager_country(code: &str) -> Result<String> {
    let code = code.trim().to_ascii_uppercase();
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(AppError::BadRequest(
            "Manager country must be a three-letter code".to_string(),
        ));
    }
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TeamService {
        TeamService::new(FirestoreDb::new_in_memory(), 4)
    }

    fn request(pin: &str, players: &[&str]) -> SaveTeam {
        SaveTeam {
            team_name: "Leijonat".to_string(),
            pin: pin.to_string(),
            player_ids: players.iter().map(|s| s.to_string()).collect(),
            manager_country: "fin".to_string(),
        }
    }

    fn at(ts: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(ts).unwrap().with_timezone(&Utc)
    }

    #[tokio::test]
    async fn test_wrong_pin_does_not_mutate() {
        let teams = service();

        let created = teams
            .save(request("1234", &["saho_fin"]), at("2026-02-01T10:00:00Z"))
            .await
            .unwrap();
        assert!(matches!(created, SaveOutcome::Created(_)));
        assert_eq!(created.team().manager_country, "FIN");

        let err = teams
            .save(request("5678", &["mrantanen_fin"]), at("2026-02-02T10:00:00Z"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidPin));

        let stored = teams.get("Leijonat").await.unwrap();
        assert_eq!(&stored, created.team());
    }

    #[tokio::test]
    async fn test_correct_pin_updates_roster_only() {
        let teams = service();
        let created = teams
            .save(request("1234", &["saho_fin"]), at("2026-02-01T10:00:00Z"))
            .await
            .unwrap();

        let updated = teams
            .save(request("1234", &["mrantanen_fin"]), at("2026-02-02T10:00:00Z"))
            .await
            .unwrap();
        let SaveOutcome::Updated(team) = updated else {
            panic!("expected update");
        };

        assert_eq!(team.player_ids, vec!["mrantanen_fin".to_string()]);
        assert_eq!(team.created_at, created.team().created_at);
        assert_eq!(team.updated_at, "2026-02-02T10:00:00Z");
        assert_eq!(team.pin_hash, created.team().pin_hash);
    }

    #[tokio::test]
    async fn test_team_name_is_trimmed() {
        let teams = service();
        let mut req = request("1234", &[]);
        req.team_name = "  Leijonat ".to_string();
        teams.save(req, Utc::now()).await.unwrap();

        assert!(teams.get("Leijonat").await.is_ok());
    }

    #[tokio::test]
    async fn test_bad_input_rejected() {
        let teams = service();

        let err = teams.save(request("12", &[]), Utc::now()).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        let err = teams.save(request("12a4", &[]), Utc::now()).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        let mut req = request("1234", &[]);
        req.manager_country = "Finland".to_string();
        let err = teams.save(req, Utc::now()).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        let mut req = request("1234", &[]);
        req.team_name = "   ".to_string();
        assert!(teams.save(req, Utc::now()).await.is_err());
    }

    #[tokio::test]
    async fn test_names_are_stored_verbatim() {
        let teams = service();
        for name in ["Keeping Karlsson", "Kärpät"] {
            let mut req = request("1234", &[]);
            req.team_name = name.to_string();
            teams.save(req, Utc::now()).await.unwrap();
            assert_eq!(teams.get(name).await.unwrap().team_name, name);
        }
        assert_eq!(teams.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_unusable_names_rejected() {
        let teams = service();
        for name in ["..", "__stats__", "Leijonat/2026"] {
            let mut req = request("1234", &[]);
            req.team_name = name.to_string();
            let err = teams.save(req, Utc::now()).await.unwrap_err();
            assert!(matches!(err, AppError::BadRequest(_)), "{}", name);
        }
        assert!(teams.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_requires_pin() {
        let teams = service();
        teams.save(request("1234", &[]), Utc::now()).await.unwrap();

        assert!(matches!(
            teams.delete("Leijonat", "0000").await,
            Err(AppError::InvalidPin)
        ));
        assert!(teams.get("Leijonat").await.is_ok());

        teams.delete("Leijonat", "1234").await.unwrap();
        assert!(matches!(
            teams.get("Leijonat").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_admin_delete() {
        let teams = service();
        teams.save(request("1234", &[]), Utc::now()).await.unwrap();
        teams.admin_delete("Leijonat").await.unwrap();
        assert!(teams.list().await.unwrap().is_empty());
        assert!(matches!(
            teams.admin_delete("Leijonat").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_deadline_lock() {
        let deadline = at("2026-02-11T16:00:00Z");
        assert!(ensure_unlocked(None, deadline).is_ok());
        assert!(ensure_unlocked(Some(deadline), at("2026-02-11T15:59:59Z")).is_ok());
        assert!(matches!(
            ensure_unlocked(Some(deadline), deadline),
            Err(AppError::Locked(_))
        ));
    }
}
