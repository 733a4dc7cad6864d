//! Member storage port.

use async_trait::async_trait;

use memberbase_auth::Role;
use memberbase_core::{MemberId, MemberStatus, StoreError};

use crate::member::Member;

/// Storage seam for members. Adapters own persistence details and retries;
/// callers issue single-shot operations.
#[async_trait]
pub trait MemberRepository: Send + Sync {
    async fn find_by_id(&self, id: &MemberId) -> Result<Option<Member>, StoreError>;

    /// Lookup by normalized email.
    async fn find_by_email(&self, email: &str) -> Result<Option<Member>, StoreError>;

    /// Insert or update; returns the stored state.
    async fn save(&self, member: Member) -> Result<Member, StoreError>;

    /// Page through members in one status, ordered by registration time.
    async fn find_by_status(
        &self,
        status: MemberStatus,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Member>, StoreError>;

    async fn count_by_status(&self, status: MemberStatus) -> Result<u64, StoreError>;

    async fn count_with_role(&self, role: Role) -> Result<u64, StoreError>;
}
