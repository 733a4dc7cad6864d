//! News item entity.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use memberbase_core::NewsId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct News {
    pub id: NewsId,
    pub title: String,
    pub content: String,
    pub date_of_occurrence: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsDraft {
    pub title: String,
    pub content: String,
    pub date_of_occurrence: NaiveDate,
}

impl News {
    pub fn create(draft: NewsDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: NewsId::new(),
            title: draft.title,
            content: draft.content,
            date_of_occurrence: draft.date_of_occurrence,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Feed tuning.
#[derive(Debug, Clone, Deserialize)]
pub struct NewsConfig {
    /// How many items the latest-news feed returns.
    pub retrieve_limit: usize,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self { retrieve_limit: 10 }
    }
}
