//! Event and news use-cases.
//!
//! Curation (create/update/delete, and event detail) is an admin action;
//! the member-facing feeds validate the caller's own record instead.

use std::sync::Arc;

use chrono::Utc;

use memberbase_auth::{EntitlementCheckRequest, EntitlementEngine, Identity};
use memberbase_core::{EventId, NewsId};

use crate::error::EventsError;
use crate::event::{Event, EventUpdate, NewEvent};
use crate::news::{News, NewsConfig, NewsDraft};
use crate::repository::{EventRepository, NewsRepository};

pub struct EventService {
    events: Arc<dyn EventRepository>,
    engine: Arc<EntitlementEngine>,
}

impl EventService {
    pub fn new(events: Arc<dyn EventRepository>, engine: Arc<EntitlementEngine>) -> Self {
        Self { events, engine }
    }

    pub async fn create(
        &self,
        identity: Option<&Identity>,
        new: NewEvent,
    ) -> Result<Event, EventsError> {
        tracing::info!(title = %new.title, "creating event");
        self.engine
            .validate(&EntitlementCheckRequest::AdminAction, identity)
            .await?;

        let event = self.events.save(Event::create(new, Utc::now())).await?;
        tracing::info!(event = %event.id, "event created");
        Ok(event)
    }

    /// Member-facing feed of events that have not happened yet.
    pub async fn upcoming(&self, identity: Option<&Identity>) -> Result<Vec<Event>, EventsError> {
        self.engine
            .validate(&EntitlementCheckRequest::BySubject, identity)
            .await?;

        Ok(self.events.upcoming(Utc::now()).await?)
    }

    pub async fn get(
        &self,
        identity: Option<&Identity>,
        id: EventId,
    ) -> Result<Event, EventsError> {
        self.engine
            .validate(&EntitlementCheckRequest::AdminAction, identity)
            .await?;

        self.events
            .find_by_id(&id)
            .await?
            .ok_or_else(|| EventsError::NotFound(id.to_string()))
    }

    pub async fn update(
        &self,
        identity: Option<&Identity>,
        id: EventId,
        update: EventUpdate,
    ) -> Result<Event, EventsError> {
        tracing::info!(event = %id, "updating event");
        self.engine
            .validate(&EntitlementCheckRequest::AdminAction, identity)
            .await?;

        let mut event = self
            .events
            .find_by_id(&id)
            .await?
            .ok_or_else(|| EventsError::NotFound(id.to_string()))?;

        event.apply(update, Utc::now());
        Ok(self.events.save(event).await?)
    }

    pub async fn delete(&self, identity: Option<&Identity>, id: EventId) -> Result<(), EventsError> {
        tracing::info!(event = %id, "deleting event");
        self.engine
            .validate(&EntitlementCheckRequest::AdminAction, identity)
            .await?;

        Ok(self.events.delete(&id).await?)
    }
}

pub struct NewsService {
    news: Arc<dyn NewsRepository>,
    engine: Arc<EntitlementEngine>,
    config: NewsConfig,
}

impl NewsService {
    pub fn new(
        news: Arc<dyn NewsRepository>,
        engine: Arc<EntitlementEngine>,
        config: NewsConfig,
    ) -> Self {
        Self {
            news,
            engine,
            config,
        }
    }

    pub async fn create(
        &self,
        identity: Option<&Identity>,
        draft: NewsDraft,
    ) -> Result<News, EventsError> {
        tracing::info!(title = %draft.title, "creating news item");
        self.engine
            .validate(&EntitlementCheckRequest::AdminAction, identity)
            .await?;

        let news = self.news.save(News::create(draft, Utc::now())).await?;
        tracing::info!(news = %news.id, "news item created");
        Ok(news)
    }

    /// Member-facing feed, capped by configuration.
    pub async fn latest(&self, identity: Option<&Identity>) -> Result<Vec<News>, EventsError> {
        self.engine
            .validate(&EntitlementCheckRequest::BySubject, identity)
            .await?;

        Ok(self.news.latest(self.config.retrieve_limit).await?)
    }

    pub async fn get(&self, identity: Option<&Identity>, id: NewsId) -> Result<News, EventsError> {
        self.engine
            .validate(&EntitlementCheckRequest::BySubject, identity)
            .await?;

        self.news
            .find_by_id(&id)
            .await?
            .ok_or_else(|| EventsError::NotFound(id.to_string()))
    }

    pub async fn delete(&self, identity: Option<&Identity>, id: NewsId) -> Result<(), EventsError> {
        tracing::info!(news = %id, "deleting news item");
        self.engine
            .validate(&EntitlementCheckRequest::AdminAction, identity)
            .await?;

        Ok(self.news.delete(&id).await?)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::RwLock;

    use async_trait::async_trait;
    use chrono::{DateTime, Duration, NaiveDate};

    use memberbase_auth::{AuthError, MemberDirectory, MemberRecord, Role};
    use memberbase_core::{EmailAddress, MemberId, MemberStatus, StoreError};

    use crate::event::Place;

    use super::*;

    #[derive(Default)]
    struct MemoryEvents {
        inner: RwLock<HashMap<EventId, Event>>,
    }

    #[async_trait]
    impl EventRepository for MemoryEvents {
        async fn save(&self, event: Event) -> Result<Event, StoreError> {
            self.inner.write().unwrap().insert(event.id, event.clone());
            Ok(event)
        }

        async fn find_by_id(&self, id: &EventId) -> Result<Option<Event>, StoreError> {
            Ok(self.inner.read().unwrap().get(id).cloned())
        }

        async fn upcoming(&self, after: DateTime<Utc>) -> Result<Vec<Event>, StoreError> {
            let mut events: Vec<Event> = self
                .inner
                .read()
                .unwrap()
                .values()
                .filter(|e| e.datetime > after)
                .cloned()
                .collect();
            events.sort_by_key(|e| e.datetime);
            Ok(events)
        }

        async fn delete(&self, id: &EventId) -> Result<(), StoreError> {
            self.inner.write().unwrap().remove(id);
            Ok(())
        }
    }

    #[derive(Default)]
    struct MemoryNews {
        inner: RwLock<HashMap<NewsId, News>>,
    }

    #[async_trait]
    impl NewsRepository for MemoryNews {
        async fn save(&self, news: News) -> Result<News, StoreError> {
            self.inner.write().unwrap().insert(news.id, news.clone());
            Ok(news)
        }

        async fn find_by_id(&self, id: &NewsId) -> Result<Option<News>, StoreError> {
            Ok(self.inner.read().unwrap().get(id).cloned())
        }

        async fn latest(&self, limit: usize) -> Result<Vec<News>, StoreError> {
            let mut items: Vec<News> = self.inner.read().unwrap().values().cloned().collect();
            items.sort_by(|a, b| b.date_of_occurrence.cmp(&a.date_of_occurrence));
            items.truncate(limit);
            Ok(items)
        }

        async fn delete(&self, id: &NewsId) -> Result<(), StoreError> {
            self.inner.write().unwrap().remove(id);
            Ok(())
        }
    }

    struct OneMemberDirectory {
        record: MemberRecord,
    }

    #[async_trait]
    impl MemberDirectory for OneMemberDirectory {
        async fn find_by_id(&self, id: &MemberId) -> Option<MemberRecord> {
            (self.record.id == *id).then(|| self.record.clone())
        }

        async fn find_by_email(&self, email: &str) -> Option<MemberRecord> {
            (self.record.email.as_str() == email).then(|| self.record.clone())
        }
    }

    fn engine_with_member(roles: Vec<Role>) -> (Identity, Arc<EntitlementEngine>) {
        let record = MemberRecord {
            id: MemberId::new(),
            email: EmailAddress::parse("caller@example.com").unwrap(),
            roles: roles.clone(),
            status: MemberStatus::Confirmed,
        };
        let identity = Identity::new(record.id, roles);
        let engine = Arc::new(EntitlementEngine::with_default_checks(Arc::new(
            OneMemberDirectory { record },
        )));
        (identity, engine)
    }

    fn new_event(title: &str, datetime: DateTime<Utc>) -> NewEvent {
        NewEvent {
            title: title.to_string(),
            description: "An event".to_string(),
            datetime,
            place: Place {
                name: "Clubhouse".to_string(),
                address: "1 Member Way".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn upcoming_feed_hides_past_events() {
        let (identity, engine) = engine_with_member(vec![Role::Member]);
        let store = Arc::new(MemoryEvents::default());
        let service = EventService::new(Arc::clone(&store) as _, engine);

        store
            .save(Event::create(
                new_event("past", Utc::now() - Duration::days(1)),
                Utc::now(),
            ))
            .await
            .unwrap();
        store
            .save(Event::create(
                new_event("future", Utc::now() + Duration::days(1)),
                Utc::now(),
            ))
            .await
            .unwrap();

        let upcoming = service.upcoming(Some(&identity)).await.unwrap();
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].title, "future");
    }

    #[tokio::test]
    async fn creation_requires_a_verifiable_caller() {
        let (_, engine) = engine_with_member(vec![Role::Member]);
        let service = EventService::new(Arc::new(MemoryEvents::default()) as _, engine);

        // Unknown caller: the admin check cannot match a stored record.
        let stranger = Identity::new(MemberId::new(), vec![Role::Member, Role::Admin]);
        let err = service
            .create(
                Some(&stranger),
                new_event("party", Utc::now() + Duration::days(2)),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, EventsError::Auth(AuthError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn event_update_round_trips() {
        let (identity, engine) = engine_with_member(vec![Role::Member, Role::Admin]);
        let service = EventService::new(Arc::new(MemoryEvents::default()) as _, engine);

        let event = service
            .create(
                Some(&identity),
                new_event("party", Utc::now() + Duration::days(2)),
            )
            .await
            .unwrap();

        let updated = service
            .update(
                Some(&identity),
                event.id,
                EventUpdate {
                    title: Some("bigger party".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "bigger party");
        assert_eq!(updated.datetime, event.datetime);
    }

    fn news_on(day: u32) -> NewsDraft {
        NewsDraft {
            title: format!("news {day}"),
            content: "content".to_string(),
            date_of_occurrence: NaiveDate::from_ymd_opt(2026, 1, day).unwrap(),
        }
    }

    #[tokio::test]
    async fn latest_news_respects_the_configured_cap_and_order() {
        let (identity, engine) = engine_with_member(vec![Role::Member, Role::Admin]);
        let store = Arc::new(MemoryNews::default());
        let service = NewsService::new(
            Arc::clone(&store) as _,
            engine,
            NewsConfig { retrieve_limit: 2 },
        );

        for day in 1..=4 {
            service.create(Some(&identity), news_on(day)).await.unwrap();
        }

        let latest = service.latest(Some(&identity)).await.unwrap();
        assert_eq!(latest.len(), 2);
        assert_eq!(latest[0].title, "news 4");
        assert_eq!(latest[1].title, "news 3");
    }
}
