//! Stage-keyed email templates.
//!
//! Templates are plain tera strings (`{{ username }}` style) held in
//! configuration; rendering is one-off, no template directory on disk.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::CommError;
use crate::stage::CommunicationStage;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailTemplate {
    pub subject: String,
    pub body: String,
}

impl EmailTemplate {
    pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
        }
    }

    /// Render subject and body with the given variables.
    pub fn render(
        &self,
        variables: &HashMap<String, String>,
    ) -> Result<(String, String), CommError> {
        let mut context = tera::Context::new();
        for (key, value) in variables {
            context.insert(key, value);
        }

        let subject = tera::Tera::one_off(&self.subject, &context, false)
            .map_err(|e| CommError::Render(e.to_string()))?;
        let body = tera::Tera::one_off(&self.body, &context, false)
            .map_err(|e| CommError::Render(e.to_string()))?;

        Ok((subject, body))
    }
}

/// Sender identity plus the per-stage template table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommunicationConfig {
    /// Sender address for every outbound message.
    pub from: String,

    pub templates: HashMap<CommunicationStage, EmailTemplate>,
}

impl Default for CommunicationConfig {
    fn default() -> Self {
        let mut templates = HashMap::new();
        templates.insert(
            CommunicationStage::Approval,
            EmailTemplate::new(
                "Welcome aboard, {{ username }}!",
                "Hi {{ username }},\n\nYour membership has been approved. \
                 You can now log in and explore upcoming events.\n",
            ),
        );
        templates.insert(
            CommunicationStage::Rejection,
            EmailTemplate::new(
                "About your membership application",
                "Hi {{ username }},\n\nUnfortunately your membership application \
                 was not approved at this time.\n",
            ),
        );

        Self {
            from: "no-reply@memberbase.local".to_string(),
            templates,
        }
    }
}
