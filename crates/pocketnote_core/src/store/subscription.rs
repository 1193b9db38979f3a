//! In-process change subscription registry.
//!
//! # Responsibility
//! - Track subscriber callbacks keyed by stable subscription ids.
//! - Deliver store events in registration order.
//!
//! # Invariants
//! - Subscription ids are assigned monotonically and never reused.
//! - Unsubscribing an unknown id is a no-op.

use crate::model::note::{Note, NoteId};
use std::collections::BTreeMap;

/// Stable handle for one registered subscriber.
pub type SubscriptionId = u64;

/// Change event emitted after store state is final.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// Collection was (re)loaded from storage with `count` notes.
    Loaded { count: usize },
    /// A note was created and appended to the collection.
    Created(Note),
    /// A note was replaced in place.
    Updated(Note),
    /// A note was removed from the collection.
    Deleted(NoteId),
}

/// Callback invoked with every store event.
pub type Subscriber = Box<dyn FnMut(&StoreEvent)>;

/// Registry of active subscribers.
#[derive(Default)]
pub struct SubscriberRegistry {
    next_id: SubscriptionId,
    subscribers: BTreeMap<SubscriptionId, Subscriber>,
}

impl SubscriberRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one subscriber and returns its handle.
    pub fn subscribe(&mut self, subscriber: Subscriber) -> SubscriptionId {
        let id = self.next_id;
        self.next_id += 1;
        self.subscribers.insert(id, subscriber);
        id
    }

    /// Removes one subscriber. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    /// Delivers one event to every subscriber in registration order.
    pub fn notify(&mut self, event: &StoreEvent) {
        for subscriber in self.subscribers.values_mut() {
            subscriber(event);
        }
    }
}
