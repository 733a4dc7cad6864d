//! Template provider chain.
//!
//! Providers are consulted in order; the first one that claims a request
//! resolves it into a ready-to-send [`OutboundEmail`].

use std::collections::HashMap;

use memberbase_core::EmailAddress;

use crate::error::CommError;
use crate::stage::CommunicationStage;
use crate::template::CommunicationConfig;

/// A request to notify one member about one lifecycle stage.
#[derive(Debug, Clone)]
pub struct CommunicationRequest {
    pub to: EmailAddress,
    pub stage: CommunicationStage,
    pub variables: HashMap<String, String>,
}

impl CommunicationRequest {
    pub fn new(to: EmailAddress, stage: CommunicationStage) -> Self {
        Self {
            to,
            stage,
            variables: HashMap::new(),
        }
    }

    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }
}

/// A fully resolved message, ready for a [`crate::Mailer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub to: String,
    pub from: String,
    pub subject: String,
    pub body: String,
}

/// One link of the provider chain.
pub trait TemplateProvider: Send + Sync {
    /// Whether this provider should handle the given request.
    fn is_applicable(&self, request: &CommunicationRequest) -> bool;

    /// Resolve the request into an outbound message.
    fn resolve(&self, request: &CommunicationRequest) -> Result<OutboundEmail, CommError>;
}

/// Default provider: resolves every stage from the configured template table.
pub struct StageTemplateProvider {
    config: CommunicationConfig,
}

impl StageTemplateProvider {
    pub fn new(config: CommunicationConfig) -> Self {
        Self { config }
    }
}

impl TemplateProvider for StageTemplateProvider {
    fn is_applicable(&self, request: &CommunicationRequest) -> bool {
        self.config.templates.contains_key(&request.stage)
    }

    fn resolve(&self, request: &CommunicationRequest) -> Result<OutboundEmail, CommError> {
        let template = self
            .config
            .templates
            .get(&request.stage)
            .ok_or_else(|| CommError::MissingTemplate(request.stage.to_string()))?;

        let (subject, body) = template.render(&request.variables)?;

        Ok(OutboundEmail {
            to: request.to.to_string(),
            from: self.config.from.clone(),
            subject,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_approval_with_username() {
        let provider = StageTemplateProvider::new(CommunicationConfig::default());
        let request = CommunicationRequest::new(
            EmailAddress::parse("ada@example.com").unwrap(),
            CommunicationStage::Approval,
        )
        .with_variable("username", "Ada");

        assert!(provider.is_applicable(&request));
        let email = provider.resolve(&request).unwrap();
        assert_eq!(email.to, "ada@example.com");
        assert!(email.subject.contains("Ada"));
        assert!(email.body.contains("approved"));
    }
}
