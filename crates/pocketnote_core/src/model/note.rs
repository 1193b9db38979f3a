//! Note domain model.
//!
//! # Responsibility
//! - Define the note record persisted inside the snapshot blob.
//! - Own title validation shared by create and update paths.
//!
//! # Invariants
//! - `id` is stable and never reused for another note.
//! - `title` is non-empty after trimming for every persisted note.
//! - `content` is optional; `None` is omitted from the serialized form so
//!   both historical blob shapes (`{id,title}` and `{id,title,content}`)
//!   round-trip unchanged.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a note.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type NoteId = Uuid;

/// A single user-managed note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Stable global ID used for lookup, update and delete.
    pub id: NoteId,
    /// User-facing title. Never empty after trimming.
    pub title: String,
    /// Optional free-form body text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Validation error for note field constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteValidationError {
    /// Title is empty or whitespace-only.
    EmptyTitle,
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "note title must not be empty after trimming"),
        }
    }
}

impl Error for NoteValidationError {}

impl Note {
    /// Creates a new note with a generated stable ID.
    ///
    /// The constructor does not validate the title; write paths call
    /// [`Note::validate`] before any mutation is accepted.
    pub fn new(title: impl Into<String>, content: Option<String>) -> Self {
        Self::with_id(Uuid::new_v4(), title, content)
    }

    /// Creates a note with a caller-provided stable ID.
    ///
    /// Used by snapshot decode paths where identity already exists.
    pub fn with_id(id: NoteId, title: impl Into<String>, content: Option<String>) -> Self {
        Self {
            id,
            title: title.into(),
            content,
        }
    }

    /// Checks field constraints for this note.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        validate_title(&self.title)
    }
}

/// Validates one title value according to the note contract.
pub fn validate_title(title: &str) -> Result<(), NoteValidationError> {
    if title.trim().is_empty() {
        return Err(NoteValidationError::EmptyTitle);
    }
    Ok(())
}
