//! Communication service: provider chain + delivery.

use std::sync::Arc;

use crate::error::CommError;
use crate::mailer::Mailer;
use crate::provider::{CommunicationRequest, TemplateProvider};

pub struct CommunicationService {
    providers: Vec<Arc<dyn TemplateProvider>>,
    mailer: Arc<dyn Mailer>,
}

impl CommunicationService {
    pub fn new(providers: Vec<Arc<dyn TemplateProvider>>, mailer: Arc<dyn Mailer>) -> Self {
        Self { providers, mailer }
    }

    /// Resolve the request through the first applicable provider and send it.
    pub async fn send(&self, request: &CommunicationRequest) -> Result<(), CommError> {
        let provider = self
            .providers
            .iter()
            .find(|p| p.is_applicable(request))
            .ok_or(CommError::NoProvider)?;

        let email = provider.resolve(request)?;
        tracing::info!(to = %email.to, stage = %request.stage, "sending communication");
        self.mailer.send(&email).await
    }
}
