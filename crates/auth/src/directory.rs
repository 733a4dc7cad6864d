//! Member-lookup port consumed by the entitlement checks.
//!
//! The pipeline treats members as read-mostly external records; this crate
//! never mutates them. Storage adapters implement the trait.

use async_trait::async_trait;

use memberbase_core::{EmailAddress, MemberId, MemberStatus};

use crate::role::{self, Role};

/// Read-only projection of a stored member, as the checks need it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberRecord {
    pub id: MemberId,
    pub email: EmailAddress,
    pub roles: Vec<Role>,
    pub status: MemberStatus,
}

impl MemberRecord {
    pub fn highest_role(&self) -> Option<Role> {
        role::highest_role(&self.roles)
    }

    /// Whether the stored grants cover every claimed role.
    ///
    /// Token role claims are advisory; storage is authoritative. A claimed
    /// role missing here means the token is stale (e.g. a demotion since
    /// issuance).
    pub fn holds_all(&self, claimed: &[Role]) -> bool {
        claimed.iter().all(|role| self.roles.contains(role))
    }
}

/// Lookup capability over stored members.
///
/// Single-shot reads; retries, caching, and transactions belong to the
/// implementing adapter, not to the callers.
#[async_trait]
pub trait MemberDirectory: Send + Sync {
    async fn find_by_id(&self, id: &MemberId) -> Option<MemberRecord>;
    async fn find_by_email(&self, email: &str) -> Option<MemberRecord>;
}
