//! Delivery port.

use async_trait::async_trait;

use crate::error::CommError;
use crate::provider::OutboundEmail;

/// Sends a resolved message. Implementations live in the infrastructure
/// layer; this crate never opens a connection itself.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<(), CommError>;
}
