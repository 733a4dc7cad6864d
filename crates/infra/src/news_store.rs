//! In-memory news store.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use memberbase_core::{NewsId, StoreError};
use memberbase_events::{News, NewsRepository};

#[derive(Default)]
pub struct InMemoryNewsStore {
    items: RwLock<HashMap<NewsId, News>>,
}

impl InMemoryNewsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NewsRepository for InMemoryNewsStore {
    async fn save(&self, news: News) -> Result<News, StoreError> {
        self.items
            .write()
            .map_err(|_| StoreError::Unavailable("news store lock poisoned".to_string()))?
            .insert(news.id, news.clone());
        Ok(news)
    }

    async fn find_by_id(&self, id: &NewsId) -> Result<Option<News>, StoreError> {
        Ok(self
            .items
            .read()
            .map_err(|_| StoreError::Unavailable("news store lock poisoned".to_string()))?
            .get(id)
            .cloned())
    }

    async fn latest(&self, limit: usize) -> Result<Vec<News>, StoreError> {
        let mut items: Vec<News> = self
            .items
            .read()
            .map_err(|_| StoreError::Unavailable("news store lock poisoned".to_string()))?
            .values()
            .cloned()
            .collect();
        items.sort_by(|a, b| b.date_of_occurrence.cmp(&a.date_of_occurrence));
        items.truncate(limit);
        Ok(items)
    }

    async fn delete(&self, id: &NewsId) -> Result<(), StoreError> {
        self.items
            .write()
            .map_err(|_| StoreError::Unavailable("news store lock poisoned".to_string()))?
            .remove(id);
        Ok(())
    }
}
