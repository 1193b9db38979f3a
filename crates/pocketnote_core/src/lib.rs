//! Core domain logic for pocketnote.
//! This crate is the single source of truth for note business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod session;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{Note, NoteId, NoteValidationError};
pub use repo::snapshot_repo::{
    RepoError, RepoResult, SnapshotRepository, SqliteSnapshotRepository, SNAPSHOT_KEY,
};
pub use session::{login, LoginError, Session};
pub use store::note_store::{LoadReport, NoteStore, NoteUpdate, StoreError, StoreResult};
pub use store::subscription::{StoreEvent, SubscriptionId};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
