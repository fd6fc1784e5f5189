//! The event store: sole owner of the event collection.
//!
//! Newest-created events come first. Every mutation writes the full
//! collection to the storage slot right after changing it in memory.

use std::collections::HashSet;

use thiserror::Error;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::models::{Event, EventDraft};

pub mod persistence;
pub mod seed;
pub mod shared;
pub mod validation;

pub use persistence::{JsonFileStorage, MemoryStorage, SnapshotStorage, StorageError};
pub use seed::SeedPolicy;
pub use shared::SharedEventStore;
pub use validation::{FieldError, FieldProblem, ValidationError};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("event '{0}' not found")]
    NotFound(String),

    #[error("event store has not been hydrated yet")]
    NotHydrated,

    #[error("event store is unavailable")]
    Unavailable,
}

pub struct EventStore {
    events: Vec<Event>,
    storage: Box<dyn SnapshotStorage>,
}

impl EventStore {
    /// Loads the persisted collection and applies `policy` when the slot is
    /// absent or empty. Storage failures here are logged and treated as no
    /// data.
    pub fn hydrate(storage: Box<dyn SnapshotStorage>, policy: SeedPolicy) -> Self {
        let loaded = match storage.load() {
            Ok(events) => events.unwrap_or_default(),
            Err(e) => {
                warn!(slot = %storage.slot(), error = %e, "failed to load event snapshot; treating as no data");
                Vec::new()
            }
        };

        let mut store = Self {
            events: dedupe_ids(loaded),
            storage,
        };

        if store.events.is_empty() && policy == SeedPolicy::SeedOnEmpty {
            store.events = seed::default_events();
            info!(
                slot = %store.storage.slot(),
                count = store.events.len(),
                "no persisted events; seeded demonstration events"
            );
            store.persist();
        } else {
            info!(
                slot = %store.storage.slot(),
                count = store.events.len(),
                policy = %policy,
                "hydrated event store"
            );
        }

        store
    }

    pub fn list(&self) -> &[Event] {
        &self.events
    }

    pub fn create(&mut self, draft: &EventDraft, creator_id: &str) -> Result<Event, StoreError> {
        let valid = validation::validate_draft(draft)?;
        validation::validate_creator(creator_id)?;

        let event = Event {
            id: Uuid::new_v4().to_string(),
            title: valid.title,
            description: valid.description,
            date: valid.date,
            location: valid.location,
            category: valid.category,
            creator_id: creator_id.to_string(),
            attendees: 0,
        };
        self.events.insert(0, event.clone());
        self.persist();

        debug!(event_id = %event.id, creator_id = %event.creator_id, "created event");
        Ok(event)
    }

    pub fn update(&mut self, id: &str, draft: &EventDraft) -> Result<Event, StoreError> {
        let index = self
            .events
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let valid = validation::validate_draft(draft)?;

        let event = &mut self.events[index];
        event.title = valid.title;
        event.description = valid.description;
        event.date = valid.date;
        event.location = valid.location;
        event.category = valid.category;
        let updated = event.clone();
        self.persist();

        debug!(event_id = %id, "updated event");
        Ok(updated)
    }

    /// Removes the event if present. An unknown id is a no-op, not an error.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.events.len();
        self.events.retain(|e| e.id != id);
        let removed = self.events.len() != before;
        if removed {
            self.persist();
            debug!(event_id = %id, "deleted event");
        }
        removed
    }

    pub fn rsvp(&mut self, id: &str) -> Result<Event, StoreError> {
        let event = self
            .events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        event.attendees = event.attendees.saturating_add(1);
        let updated = event.clone();
        self.persist();

        debug!(event_id = %id, attendees = updated.attendees, "recorded rsvp");
        Ok(updated)
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn get_by_creator(&self, creator_id: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.creator_id == creator_id)
            .collect()
    }

    /// Single attempt; a failed write is logged and the in-memory state kept.
    fn persist(&self) {
        if let Err(e) = self.storage.save(&self.events) {
            error!(slot = %self.storage.slot(), error = %e, "failed to persist events");
        }
    }
}

fn dedupe_ids(events: Vec<Event>) -> Vec<Event> {
    let mut seen = HashSet::new();
    events
        .into_iter()
        .filter(|e| {
            let fresh = seen.insert(e.id.clone());
            if !fresh {
                warn!(event_id = %e.id, "dropping duplicate event id from snapshot");
            }
            fresh
        })
        .collect()
}
