//! Ownership check keyed by email address.

use std::sync::Arc;

use async_trait::async_trait;

use crate::directory::MemberDirectory;
use crate::error::AuthError;
use crate::identity::Identity;

use super::{EntitlementCheck, EntitlementCheckRequest};

/// Verifies that the targeted email belongs to the caller.
///
/// The record behind the email must carry the caller's subject id and hold
/// every claimed role (stale-token defense).
pub struct ByEmailCheck {
    directory: Arc<dyn MemberDirectory>,
}

impl ByEmailCheck {
    pub fn new(directory: Arc<dyn MemberDirectory>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl EntitlementCheck for ByEmailCheck {
    fn is_applicable(&self, request: &EntitlementCheckRequest) -> bool {
        matches!(request, EntitlementCheckRequest::ByEmail { .. })
    }

    async fn apply(
        &self,
        request: &EntitlementCheckRequest,
        identity: &Identity,
    ) -> Result<(), AuthError> {
        let EntitlementCheckRequest::ByEmail { email } = request else {
            return Err(AuthError::bad_request("invalid request type"));
        };

        let entitled = match self.directory.find_by_email(email).await {
            Some(member) => {
                let matches =
                    member.id == identity.subject() && member.holds_all(identity.roles());
                tracing::debug!(member = %member.id, matches, "member retrieved for email check");
                matches
            }
            None => false,
        };

        if !entitled {
            tracing::debug!(email, "entitlement denied for email");
            return Err(AuthError::unauthorized("entitlement check failed"));
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "ByEmailCheck"
    }
}

#[cfg(test)]
mod tests {
    use memberbase_core::MemberId;

    use crate::entitlement::testing::{StaticDirectory, confirmed_member};
    use crate::role::Role;

    use super::*;

    #[tokio::test]
    async fn caller_may_target_their_own_email() {
        let id = MemberId::new();
        let check = ByEmailCheck::new(Arc::new(StaticDirectory::with(vec![confirmed_member(
            id,
            "me@example.com",
            vec![Role::Member],
        )])));
        let identity = Identity::new(id, vec![Role::Member]);

        check
            .apply(
                &EntitlementCheckRequest::ByEmail {
                    email: "me@example.com".to_string(),
                },
                &identity,
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn caller_may_not_target_someone_elses_email() {
        let caller = MemberId::new();
        let other = MemberId::new();
        let check = ByEmailCheck::new(Arc::new(StaticDirectory::with(vec![
            confirmed_member(caller, "me@example.com", vec![Role::Member]),
            confirmed_member(other, "them@example.com", vec![Role::Member]),
        ])));
        let identity = Identity::new(caller, vec![Role::Member]);

        let err = check
            .apply(
                &EntitlementCheckRequest::ByEmail {
                    email: "them@example.com".to_string(),
                },
                &identity,
            )
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::unauthorized("entitlement check failed"));
    }

    #[tokio::test]
    async fn unknown_email_is_denied() {
        let id = MemberId::new();
        let check = ByEmailCheck::new(Arc::new(StaticDirectory::empty()));
        let identity = Identity::new(id, vec![Role::Member]);

        let err = check
            .apply(
                &EntitlementCheckRequest::ByEmail {
                    email: "ghost@example.com".to_string(),
                },
                &identity,
            )
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::unauthorized("entitlement check failed"));
    }
}
