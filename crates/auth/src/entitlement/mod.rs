//! Entitlement validation: an ordered chain of authorization checks.
//!
//! Each check owns one request shape. The engine runs the first applicable
//! check and stops; request shapes are mutually exclusive by construction,
//! so exactly one check executes per request — and a request no check claims
//! is a wiring bug surfaced as an error, never a silent pass.

mod admin;
mod assign_role;
mod by_email;
mod by_subject;

use std::sync::Arc;

use async_trait::async_trait;

pub use admin::AdminActionCheck;
pub use assign_role::AssignRoleCheck;
pub use by_email::ByEmailCheck;
pub use by_subject::BySubjectCheck;

use crate::directory::MemberDirectory;
use crate::error::AuthError;
use crate::identity::Identity;
use crate::role::Role;

/// Typed authorization request, created by a use-case right before
/// validation and discarded after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntitlementCheckRequest {
    /// "Is the caller really an admin?" — no payload.
    AdminAction,

    /// "May the caller grant `role`?"
    AssignRole { role: Role },

    /// "Does `email` belong to the caller?"
    ByEmail { email: String },

    /// "Does the caller's stored record match their claims?"
    BySubject,
}

/// One authorization rule, tied to one request shape.
#[async_trait]
pub trait EntitlementCheck: Send + Sync {
    /// Pure predicate on the request's shape.
    fn is_applicable(&self, request: &EntitlementCheckRequest) -> bool;

    /// Run the check. The identity is the gate-validated caller; checks read
    /// it rather than re-inspecting any token.
    async fn apply(
        &self,
        request: &EntitlementCheckRequest,
        identity: &Identity,
    ) -> Result<(), AuthError>;

    /// Name used in logs.
    fn name(&self) -> &'static str;
}

/// Ordered, read-only collection of checks, built once at startup and shared
/// across requests.
pub struct EntitlementEngine {
    checks: Vec<Arc<dyn EntitlementCheck>>,
}

impl EntitlementEngine {
    pub fn new(checks: Vec<Arc<dyn EntitlementCheck>>) -> Self {
        Self { checks }
    }

    /// Engine wired with the standard four checks over one directory.
    pub fn with_default_checks(directory: Arc<dyn MemberDirectory>) -> Self {
        Self::new(vec![
            Arc::new(AdminActionCheck::new(Arc::clone(&directory))),
            Arc::new(AssignRoleCheck::new(Arc::clone(&directory))),
            Arc::new(ByEmailCheck::new(Arc::clone(&directory))),
            Arc::new(BySubjectCheck::new(directory)),
        ])
    }

    /// Validate a request against the ambient identity.
    ///
    /// `identity` is `None` when nothing is bound to the request context;
    /// that fails fast — it should be unreachable downstream of the gate.
    pub async fn validate(
        &self,
        request: &EntitlementCheckRequest,
        identity: Option<&Identity>,
    ) -> Result<(), AuthError> {
        tracing::debug!(?request, "starting entitlement validation");

        let Some(identity) = identity else {
            tracing::warn!(?request, "entitlement validation without a bound identity");
            return Err(AuthError::unauthorized(
                "no authenticated identity bound to the request",
            ));
        };

        for check in &self.checks {
            if !check.is_applicable(request) {
                continue;
            }

            return match check.apply(request, identity).await {
                Ok(()) => {
                    tracing::debug!(check = check.name(), "entitlement check passed");
                    Ok(())
                }
                Err(err) => {
                    tracing::warn!(check = check.name(), error = %err, "entitlement check failed");
                    Err(err)
                }
            };
        }

        tracing::error!(?request, "no entitlement check claimed the request");
        Err(AuthError::NoApplicableCheck)
    }
}
