//! `memberbase-comm` — outbound member communication.
//!
//! Resolves a stage-keyed template into a concrete outbound email and hands
//! it to a [`Mailer`]. Actual delivery transport lives behind the port;
//! adapters decide whether that means SMTP, a queue, or a test recorder.

pub mod error;
pub mod mailer;
pub mod provider;
pub mod service;
pub mod stage;
pub mod template;

pub use error::CommError;
pub use mailer::Mailer;
pub use provider::{CommunicationRequest, OutboundEmail, StageTemplateProvider, TemplateProvider};
pub use service::CommunicationService;
pub use stage::CommunicationStage;
pub use template::{CommunicationConfig, EmailTemplate};
