//! Domain model for notes.
//!
//! # Responsibility
//! - Define the canonical note record shared by store, persistence and
//!   calling UI layers.
//!
//! # Invariants
//! - Every note is identified by a stable `NoteId`.
//! - A note title must stay non-empty after trimming.

pub mod note;
