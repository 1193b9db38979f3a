//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the snapshot storage contract used by the note store.
//! - Isolate SQLite query details from store orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`MissingRequiredTable`) in
//!   addition to DB transport errors.

pub mod snapshot_repo;
