//! Admin-action entitlement check.

use std::sync::Arc;

use async_trait::async_trait;

use crate::directory::MemberDirectory;
use crate::error::AuthError;
use crate::identity::Identity;

use super::{EntitlementCheck, EntitlementCheckRequest};

/// Verifies the caller against their stored record before any admin action.
///
/// The stored member must exist under the claimed subject and hold every
/// role the token claims; anything less is a stale or forged token.
pub struct AdminActionCheck {
    directory: Arc<dyn MemberDirectory>,
}

impl AdminActionCheck {
    pub fn new(directory: Arc<dyn MemberDirectory>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl EntitlementCheck for AdminActionCheck {
    fn is_applicable(&self, request: &EntitlementCheckRequest) -> bool {
        matches!(request, EntitlementCheckRequest::AdminAction)
    }

    async fn apply(
        &self,
        request: &EntitlementCheckRequest,
        identity: &Identity,
    ) -> Result<(), AuthError> {
        if !matches!(request, EntitlementCheckRequest::AdminAction) {
            return Err(AuthError::bad_request("invalid request type"));
        }

        let subject = identity.subject();
        let entitled = match self.directory.find_by_id(&subject).await {
            Some(member) => {
                let matches = member.id == subject && member.holds_all(identity.roles());
                tracing::debug!(member = %member.id, matches, "member retrieved for admin check");
                matches
            }
            None => false,
        };

        if !entitled {
            return Err(AuthError::unauthorized("admin entitlement check failed"));
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "AdminActionCheck"
    }
}
