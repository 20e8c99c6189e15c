//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

/// Collection names as constants.
pub mod collections {
    /// Fantasy teams (keyed by raw team name)
    pub const TEAMS: &str = "teams";
}
