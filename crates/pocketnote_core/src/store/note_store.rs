//! Canonical note store with snapshot persistence.
//!
//! # Responsibility
//! - Own the ordered note collection and expose create/update/delete/list.
//! - Mirror every accepted mutation into the snapshot repository.
//! - Notify subscribers once the in-memory state is final.
//!
//! # Invariants
//! - The in-memory collection is authoritative; persistence failures are
//!   logged warnings and never roll back an accepted mutation.
//! - Insertion order is preserved; update replaces in place, create
//!   appends at the tail.
//! - No two notes in the collection share an id.
//! - A corrupt stored blob degrades to an empty collection at load time
//!   instead of failing the caller.

use crate::model::note::{validate_title, Note, NoteId, NoteValidationError};
use crate::repo::snapshot_repo::{RepoError, SnapshotRepository};
use crate::store::subscription::{StoreEvent, Subscriber, SubscriberRegistry, SubscriptionId};
use log::{info, warn};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level error taxonomy surfaced to calling UI layers.
#[derive(Debug)]
pub enum StoreError {
    /// Field constraint rejected the requested mutation.
    Validation(NoteValidationError),
    /// No note with the given id exists.
    NotFound(NoteId),
    /// Stored blob could not be decoded into a valid collection.
    Deserialization(String),
    /// Persistence-layer transport failure.
    Repo(RepoError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "note not found: {id}"),
            Self::Deserialization(message) => write!(f, "corrupt note snapshot: {message}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::NotFound(_) => None,
            Self::Deserialization(_) => None,
        }
    }
}

impl From<NoteValidationError> for StoreError {
    fn from(value: NoteValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Partial update for one note. `None` fields stay unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Outcome of a [`NoteStore::load`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    /// Number of notes now in the collection.
    pub loaded: usize,
    /// Whether a corrupt blob was discarded in favor of an empty
    /// collection.
    pub recovered_from_corrupt: bool,
}

/// Note store facade over a snapshot repository implementation.
pub struct NoteStore<R: SnapshotRepository> {
    repo: R,
    notes: Vec<Note>,
    subscribers: SubscriberRegistry,
}

impl<R: SnapshotRepository> NoteStore<R> {
    /// Creates an empty store over the provided repository.
    ///
    /// Call [`NoteStore::load`] before reading to pick up persisted state.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            notes: Vec::new(),
            subscribers: SubscriberRegistry::new(),
        }
    }

    /// Creates a store and loads the persisted snapshot in one step.
    pub fn open(repo: R) -> StoreResult<(Self, LoadReport)> {
        let mut store = Self::new(repo);
        let report = store.load()?;
        Ok((store, report))
    }

    /// Replaces the in-memory collection with the persisted snapshot.
    ///
    /// A missing blob yields an empty collection. A blob that fails to
    /// decode, or decodes into a collection violating note invariants, is
    /// discarded with a logged warning and an empty collection takes its
    /// place; only storage transport errors propagate.
    pub fn load(&mut self) -> StoreResult<LoadReport> {
        let report = match self.repo.read_snapshot()? {
            None => {
                self.notes.clear();
                info!("event=store_load module=store status=ok count=0 source=absent");
                LoadReport {
                    loaded: 0,
                    recovered_from_corrupt: false,
                }
            }
            Some(blob) => match decode_snapshot(&blob) {
                Ok(notes) => {
                    let count = notes.len();
                    self.notes = notes;
                    info!("event=store_load module=store status=ok count={count} source=blob");
                    LoadReport {
                        loaded: count,
                        recovered_from_corrupt: false,
                    }
                }
                Err(err) => {
                    warn!(
                        "event=store_load module=store status=recovered count=0 error_code=snapshot_corrupt error={err}"
                    );
                    self.notes.clear();
                    LoadReport {
                        loaded: 0,
                        recovered_from_corrupt: true,
                    }
                }
            },
        };

        self.subscribers.notify(&StoreEvent::Loaded {
            count: report.loaded,
        });
        Ok(report)
    }

    /// Returns the current collection in insertion order.
    pub fn list(&self) -> &[Note] {
        &self.notes
    }

    /// Gets one note by id.
    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Creates one note and appends it at the tail of the collection.
    ///
    /// # Errors
    /// - `Validation` when the title trims to empty; the collection stays
    ///   untouched.
    pub fn create(
        &mut self,
        title: impl Into<String>,
        content: Option<String>,
    ) -> StoreResult<Note> {
        let title = title.into();
        validate_title(&title)?;

        let note = Note::new(title, content);
        self.notes.push(note.clone());
        info!(
            "event=note_create module=store status=ok note_id={} count={}",
            note.id,
            self.notes.len()
        );

        self.persist_after_mutation("note_create");
        self.subscribers.notify(&StoreEvent::Created(note.clone()));
        Ok(note)
    }

    /// Applies a partial update to the note with `id`, keeping its
    /// position in the collection.
    ///
    /// # Errors
    /// - `NotFound` when no note carries `id`.
    /// - `Validation` when the resulting title would trim to empty; the
    ///   note stays unchanged.
    pub fn update(&mut self, id: NoteId, fields: NoteUpdate) -> StoreResult<Note> {
        let index = self
            .notes
            .iter()
            .position(|note| note.id == id)
            .ok_or(StoreError::NotFound(id))?;

        if let Some(title) = fields.title.as_deref() {
            validate_title(title)?;
        }

        let note = &mut self.notes[index];
        if let Some(title) = fields.title {
            note.title = title;
        }
        if let Some(content) = fields.content {
            note.content = Some(content);
        }
        let updated = note.clone();
        info!(
            "event=note_update module=store status=ok note_id={id} position={index}"
        );

        self.persist_after_mutation("note_update");
        self.subscribers
            .notify(&StoreEvent::Updated(updated.clone()));
        Ok(updated)
    }

    /// Removes the note with `id` when present.
    ///
    /// Unknown ids are a no-op, never an error. Returns whether a note
    /// was removed.
    pub fn delete(&mut self, id: NoteId) -> StoreResult<bool> {
        let before = self.notes.len();
        self.notes.retain(|note| note.id != id);
        if self.notes.len() == before {
            info!("event=note_delete module=store status=noop note_id={id}");
            return Ok(false);
        }

        info!(
            "event=note_delete module=store status=ok note_id={id} count={}",
            self.notes.len()
        );
        self.persist_after_mutation("note_delete");
        self.subscribers.notify(&StoreEvent::Deleted(id));
        Ok(true)
    }

    /// Serializes the full collection and overwrites the stored blob.
    ///
    /// Exposed so callers can retry after a failed best-effort persist.
    pub fn persist(&mut self) -> StoreResult<()> {
        let blob = encode_snapshot(&self.notes)?;
        self.repo.write_snapshot(&blob)?;
        info!(
            "event=store_persist module=store status=ok count={}",
            self.notes.len()
        );
        Ok(())
    }

    /// Registers a subscriber for store change events.
    pub fn subscribe(&mut self, subscriber: Subscriber) -> SubscriptionId {
        self.subscribers.subscribe(subscriber)
    }

    /// Removes one subscriber. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    // Storage is a best-effort mirror: a failed write keeps the mutation
    // and leaves repair to the next successful persist.
    fn persist_after_mutation(&mut self, operation: &str) {
        if let Err(err) = self.persist() {
            warn!(
                "event=store_persist module=store status=error operation={operation} error={err}"
            );
        }
    }
}

fn encode_snapshot(notes: &[Note]) -> StoreResult<String> {
    serde_json::to_string(notes).map_err(|err| StoreError::Deserialization(err.to_string()))
}

fn decode_snapshot(blob: &str) -> StoreResult<Vec<Note>> {
    let notes: Vec<Note> =
        serde_json::from_str(blob).map_err(|err| StoreError::Deserialization(err.to_string()))?;

    let mut seen = BTreeSet::new();
    for note in &notes {
        if note.validate().is_err() {
            return Err(StoreError::Deserialization(format!(
                "note {} has an empty title",
                note.id
            )));
        }
        if !seen.insert(note.id) {
            return Err(StoreError::Deserialization(format!(
                "duplicate note id {} in snapshot",
                note.id
            )));
        }
    }

    Ok(notes)
}
