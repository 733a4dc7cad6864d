//! `memberbase-events` — community events and news.
//!
//! Auxiliary domain around the membership core: admins curate events and
//! news items, confirmed members read them. All writes are entitlement-
//! guarded through the same engine as the member workflows.

pub mod error;
pub mod event;
pub mod news;
pub mod repository;
pub mod service;

pub use error::EventsError;
pub use event::{Event, EventUpdate, NewEvent, Place};
pub use news::{News, NewsConfig, NewsDraft};
pub use repository::{EventRepository, NewsRepository};
pub use service::{EventService, NewsService};
