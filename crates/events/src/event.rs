//! Community event entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use memberbase_core::EventId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub description: String,
    /// When the event takes place.
    pub datetime: DateTime<Utc>,
    pub place: Place,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub datetime: DateTime<Utc>,
    pub place: Place,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub datetime: Option<DateTime<Utc>>,
    pub place: Option<Place>,
}

impl Event {
    pub fn create(new: NewEvent, now: DateTime<Utc>) -> Self {
        Self {
            id: EventId::new(),
            title: new.title,
            description: new.description,
            datetime: new.datetime,
            place: new.place,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, update: EventUpdate, now: DateTime<Utc>) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(datetime) = update.datetime {
            self.datetime = datetime;
        }
        if let Some(place) = update.place {
            self.place = place;
        }
        self.updated_at = now;
    }
}
