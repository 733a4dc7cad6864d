//! Ownership check keyed by the caller's own subject.

use std::sync::Arc;

use async_trait::async_trait;

use crate::directory::MemberDirectory;
use crate::error::AuthError;
use crate::identity::Identity;

use super::{EntitlementCheck, EntitlementCheckRequest};

/// Verifies the caller's claims against their own stored record.
pub struct BySubjectCheck {
    directory: Arc<dyn MemberDirectory>,
}

impl BySubjectCheck {
    pub fn new(directory: Arc<dyn MemberDirectory>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl EntitlementCheck for BySubjectCheck {
    fn is_applicable(&self, request: &EntitlementCheckRequest) -> bool {
        matches!(request, EntitlementCheckRequest::BySubject)
    }

    async fn apply(
        &self,
        request: &EntitlementCheckRequest,
        identity: &Identity,
    ) -> Result<(), AuthError> {
        if !matches!(request, EntitlementCheckRequest::BySubject) {
            return Err(AuthError::bad_request("invalid request type"));
        }

        let subject = identity.subject();
        let entitled = match self.directory.find_by_id(&subject).await {
            Some(member) => {
                let matches = member.id == subject && member.holds_all(identity.roles());
                tracing::debug!(member = %member.id, matches, "member retrieved for subject check");
                matches
            }
            None => false,
        };

        if !entitled {
            tracing::debug!(%subject, "entitlement denied for subject");
            return Err(AuthError::unauthorized("entitlement check failed"));
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "BySubjectCheck"
    }
}
