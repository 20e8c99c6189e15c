// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed team operations.
//!
//! Teams are stored one document per team in the `teams` collection,
//! keyed by the raw team name. For local development and tests the same
//! operations can run against an in-process map instead.

use crate::db::collections;
use crate::error::AppError;
use crate::models::Team;
use dashmap::DashMap;
use std::sync::Arc;

#[derive(Clone)]
enum Backend {
    Firestore(firestore::FirestoreDb),
    Memory(Arc<DashMap<String, Team>>),
    Offline,
}

/// Team document store.
#[derive(Clone)]
pub struct FirestoreDb {
    backend: Backend,
}

const MAX_DOC_ID_BYTES: usize = 1500;

/// The team name is the document id, so it must be a legal Firestore id.
///
/// Names are used unescaped so documents written by earlier deployments
/// are found under the same id.
pub fn team_doc_id(team_name: &str) -> Result<&str, AppError> {
    let reserved = team_name == "."
        || team_name == ".."
        || (team_name.len() >= 4 && team_name.starts_with("__") && team_name.ends_with("__"));
    if team_name.is_empty() || reserved {
        return Err(AppError::BadRequest(format!(
            "Team name {:?} is not allowed",
            team_name
        )));
    }
    if team_name.contains('/') {
        return Err(AppError::BadRequest(
            "Team name must not contain '/'".to_string(),
        ));
    }
    if team_name.len() > MAX_DOC_ID_BYTES {
        return Err(AppError::BadRequest("Team name is too long".to_string()));
    }
    Ok(team_name)
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            backend: Backend::Firestore(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            backend: Backend::Firestore(client),
        })
    }

    /// In-process store; data lives as long as the process.
    pub fn new_in_memory() -> Self {
        tracing::info!("Using in-memory team store");
        Self {
            backend: Backend::Memory(Arc::new(DashMap::new())),
        }
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self {
            backend: Backend::Offline,
        }
    }

    /// Underlying Firestore client, if this store is backed by Firestore.
    pub fn firestore_client(&self) -> Option<&firestore::FirestoreDb> {
        match &self.backend {
            Backend::Firestore(client) => Some(client),
            _ => None,
        }
    }

    fn offline() -> AppError {
        AppError::Database("Database not connected (offline mode)".to_string())
    }

    // ─── Team Operations ─────────────────────────────────────────

    /// Get a team by name.
    pub async fn get_team(&self, team_name: &str) -> Result<Option<Team>, AppError> {
        let doc_id = team_doc_id(team_name)?;
        match &self.backend {
            Backend::Firestore(client) => client
                .fluent()
                .select()
                .by_id_in(collections::TEAMS)
                .obj()
                .one(doc_id)
                .await
                .map_err(|e| AppError::Database(e.to_string())),
            Backend::Memory(map) => Ok(map.get(doc_id).map(|t| t.value().clone())),
            Backend::Offline => Err(Self::offline()),
        }
    }

    /// Create or overwrite a team document.
    pub async fn set_team(&self, team: &Team) -> Result<(), AppError> {
        let doc_id = team_doc_id(&team.team_name)?;
        match &self.backend {
            Backend::Firestore(client) => {
                let _: () = client
                    .fluent()
                    .update()
                    .in_col(collections::TEAMS)
                    .document_id(doc_id)
                    .object(team)
                    .execute()
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
                Ok(())
            }
            Backend::Memory(map) => {
                map.insert(doc_id.to_string(), team.clone());
                Ok(())
            }
            Backend::Offline => Err(Self::offline()),
        }
    }

    /// Delete a team document. Deleting a missing team is not an error.
    pub async fn delete_team(&self, team_name: &str) -> Result<(), AppError> {
        let doc_id = team_doc_id(team_name)?;
        match &self.backend {
            Backend::Firestore(client) => {
                client
                    .fluent()
                    .delete()
                    .from(collections::TEAMS)
                    .document_id(doc_id)
                    .execute()
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
                Ok(())
            }
            Backend::Memory(map) => {
                map.remove(doc_id);
                Ok(())
            }
            Backend::Offline => Err(Self::offline()),
        }
    }

    /// List every team, ordered by name.
    pub async fn list_teams(&self) -> Result<Vec<Team>, AppError> {
        let mut teams: Vec<Team> = match &self.backend {
            Backend::Firestore(client) => client
                .fluent()
                .select()
                .from(collections::TEAMS)
                .obj::<Team>()
                .query()
                .await
                .map_err(|e| AppError::Database(e.to_string()))?,
            Backend::Memory(map) => map.iter().map(|entry| entry.value().clone()).collect(),
            Backend::Offline => return Err(Self::offline()),
        };
        teams.sort_by(|a, b| a.team_name.cmp(&b.team_name));
        Ok(teams)
    }
}
