//! Mailer adapters.
//!
//! Real SMTP delivery sits outside this system's scope; these adapters keep
//! the sent-communication record observable instead.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use memberbase_comm::{CommError, Mailer, OutboundEmail};

/// Captures every message; doubles as the sent-communication log in tests.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<OutboundEmail>>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything sent so far, in order.
    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), CommError> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(email.clone());
        Ok(())
    }
}

/// Logs outbound mail instead of delivering it (dev servers).
#[derive(Default)]
pub struct TracingMailer;

impl TracingMailer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Mailer for TracingMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), CommError> {
        tracing::info!(to = %email.to, subject = %email.subject, "outbound email (not delivered)");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email() -> OutboundEmail {
        OutboundEmail {
            to: "a@example.com".to_string(),
            from: "no-reply@memberbase.local".to_string(),
            subject: "hello".to_string(),
            body: "body".to_string(),
        }
    }

    #[tokio::test]
    async fn recording_mailer_keeps_send_order() {
        let mailer = RecordingMailer::new();
        mailer.send(&email()).await.unwrap();
        mailer.send(&email()).await.unwrap();
        assert_eq!(mailer.sent().len(), 2);
    }
}
