//! Note store and change notification plumbing.
//!
//! # Responsibility
//! - Own the canonical in-memory note collection and its durable mirror.
//! - Deliver change events to registered subscribers.
//!
//! # Invariants
//! - The in-memory collection is the source of truth; storage is a
//!   best-effort mirror refreshed after every mutation.

pub mod note_store;
pub mod subscription;
