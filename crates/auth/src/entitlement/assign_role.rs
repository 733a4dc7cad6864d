//! Role-assignment entitlement check.

use std::sync::Arc;

use async_trait::async_trait;

use crate::directory::MemberDirectory;
use crate::error::AuthError;
use crate::identity::Identity;

use super::{EntitlementCheck, EntitlementCheckRequest};

/// Decides whether the caller may grant the requested role.
///
/// The caller must be a confirmed member and their *highest stored* role must
/// sit strictly above the candidate role in the hierarchy.
pub struct AssignRoleCheck {
    directory: Arc<dyn MemberDirectory>,
}

impl AssignRoleCheck {
    pub fn new(directory: Arc<dyn MemberDirectory>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl EntitlementCheck for AssignRoleCheck {
    fn is_applicable(&self, request: &EntitlementCheckRequest) -> bool {
        matches!(request, EntitlementCheckRequest::AssignRole { .. })
    }

    async fn apply(
        &self,
        request: &EntitlementCheckRequest,
        identity: &Identity,
    ) -> Result<(), AuthError> {
        let EntitlementCheckRequest::AssignRole { role } = request else {
            return Err(AuthError::bad_request("invalid request type"));
        };

        let subject = identity.subject();
        let member = self
            .directory
            .find_by_id(&subject)
            .await
            .filter(|member| member.status.is_confirmed())
            .ok_or_else(|| {
                tracing::info!(%subject, "caller not confirmed");
                AuthError::bad_request("member not confirmed")
            })?;

        let can_assign = member
            .highest_role()
            .is_some_and(|highest| highest.can_assign(*role));
        if !can_assign {
            tracing::info!(%subject, candidate = %role, "role not authorized");
            return Err(AuthError::bad_request("role not authorized for this operation"));
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "AssignRoleCheck"
    }
}
