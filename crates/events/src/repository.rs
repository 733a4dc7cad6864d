//! Storage ports for events and news.

use async_trait::async_trait;

use chrono::{DateTime, Utc};

use memberbase_core::{EventId, NewsId, StoreError};

use crate::event::Event;
use crate::news::News;

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn save(&self, event: Event) -> Result<Event, StoreError>;
    async fn find_by_id(&self, id: &EventId) -> Result<Option<Event>, StoreError>;

    /// Events strictly after `after`, soonest first.
    async fn upcoming(&self, after: DateTime<Utc>) -> Result<Vec<Event>, StoreError>;

    async fn delete(&self, id: &EventId) -> Result<(), StoreError>;
}

#[async_trait]
pub trait NewsRepository: Send + Sync {
    async fn save(&self, news: News) -> Result<News, StoreError>;
    async fn find_by_id(&self, id: &NewsId) -> Result<Option<News>, StoreError>;

    /// Most recent items by date of occurrence, capped at `limit`.
    async fn latest(&self, limit: usize) -> Result<Vec<News>, StoreError>;

    async fn delete(&self, id: &NewsId) -> Result<(), StoreError>;
}
