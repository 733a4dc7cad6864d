//! Request-scoped authenticated identity.

use memberbase_core::MemberId;

use crate::claims::AccessClaims;
use crate::role::{self, Role};

/// The validated "who is calling", derived 1:1 from inspected access claims.
///
/// Lives exactly as long as one request: the gate constructs it after a
/// successful inspection and binds it to the request context; nothing caches
/// it across requests. It is passed explicitly wherever it is needed — no
/// task-local ambient state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    subject: MemberId,
    roles: Vec<Role>,
}

impl Identity {
    pub fn new(subject: MemberId, roles: Vec<Role>) -> Self {
        Self { subject, roles }
    }

    pub fn subject(&self) -> MemberId {
        self.subject
    }

    /// Roles as claimed by the token. Advisory: entitlement checks compare
    /// them against the stored member record.
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn highest_role(&self) -> Option<Role> {
        role::highest_role(&self.roles)
    }
}

impl From<&AccessClaims> for Identity {
    fn from(claims: &AccessClaims) -> Self {
        Self::new(claims.sub, claims.roles.clone())
    }
}
