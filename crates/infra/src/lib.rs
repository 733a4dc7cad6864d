//! `memberbase-infra` — adapters behind the storage and delivery ports.
//!
//! Everything here is in-memory: good for tests, dev servers, and demos.
//! Durable backends would implement the same ports without touching the
//! domain crates.

pub mod event_store;
pub mod mailer;
pub mod member_store;
pub mod news_store;

pub use event_store::InMemoryEventStore;
pub use mailer::{RecordingMailer, TracingMailer};
pub use member_store::InMemoryMemberStore;
pub use news_store::InMemoryNewsStore;
