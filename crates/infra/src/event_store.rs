//! In-memory event store.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use memberbase_core::{EventId, StoreError};
use memberbase_events::{Event, EventRepository};

#[derive(Default)]
pub struct InMemoryEventStore {
    events: RwLock<HashMap<EventId, Event>>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventRepository for InMemoryEventStore {
    async fn save(&self, event: Event) -> Result<Event, StoreError> {
        self.events
            .write()
            .map_err(|_| StoreError::Unavailable("event store lock poisoned".to_string()))?
            .insert(event.id, event.clone());
        Ok(event)
    }

    async fn find_by_id(&self, id: &EventId) -> Result<Option<Event>, StoreError> {
        Ok(self
            .events
            .read()
            .map_err(|_| StoreError::Unavailable("event store lock poisoned".to_string()))?
            .get(id)
            .cloned())
    }

    async fn upcoming(&self, after: DateTime<Utc>) -> Result<Vec<Event>, StoreError> {
        let mut upcoming: Vec<Event> = self
            .events
            .read()
            .map_err(|_| StoreError::Unavailable("event store lock poisoned".to_string()))?
            .values()
            .filter(|event| event.datetime > after)
            .cloned()
            .collect();
        upcoming.sort_by_key(|event| event.datetime);
        Ok(upcoming)
    }

    async fn delete(&self, id: &EventId) -> Result<(), StoreError> {
        self.events
            .write()
            .map_err(|_| StoreError::Unavailable("event store lock poisoned".to_string()))?
            .remove(id);
        Ok(())
    }
}
