//! In-memory member store.
//!
//! Implements both the members-crate repository and the auth-crate lookup
//! port, so one instance backs the whole pipeline. Not optimized for
//! performance.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use memberbase_auth::{MemberDirectory, MemberRecord, Role};
use memberbase_core::{MemberId, MemberStatus, StoreError};
use memberbase_members::{Member, MemberRepository};

#[derive(Default)]
pub struct InMemoryMemberStore {
    members: RwLock<HashMap<MemberId, Member>>,
}

impl InMemoryMemberStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, HashMap<MemberId, Member>>, StoreError>
    {
        self.members
            .read()
            .map_err(|_| StoreError::Unavailable("member store lock poisoned".to_string()))
    }

    fn write(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<MemberId, Member>>, StoreError> {
        self.members
            .write()
            .map_err(|_| StoreError::Unavailable("member store lock poisoned".to_string()))
    }
}

#[async_trait]
impl MemberRepository for InMemoryMemberStore {
    async fn find_by_id(&self, id: &MemberId) -> Result<Option<Member>, StoreError> {
        Ok(self.read()?.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Member>, StoreError> {
        Ok(self
            .read()?
            .values()
            .find(|m| m.email.as_str() == email)
            .cloned())
    }

    async fn save(&self, member: Member) -> Result<Member, StoreError> {
        self.write()?.insert(member.id, member.clone());
        Ok(member)
    }

    async fn find_by_status(
        &self,
        status: MemberStatus,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Member>, StoreError> {
        let mut matching: Vec<Member> = self
            .read()?
            .values()
            .filter(|m| m.status == status)
            .cloned()
            .collect();
        matching.sort_by_key(|m| m.member_since);
        Ok(matching.into_iter().skip(offset).take(limit).collect())
    }

    async fn count_by_status(&self, status: MemberStatus) -> Result<u64, StoreError> {
        Ok(self.read()?.values().filter(|m| m.status == status).count() as u64)
    }

    async fn count_with_role(&self, role: Role) -> Result<u64, StoreError> {
        Ok(self.read()?.values().filter(|m| m.has_role(role)).count() as u64)
    }
}

#[async_trait]
impl MemberDirectory for InMemoryMemberStore {
    async fn find_by_id(&self, id: &MemberId) -> Option<MemberRecord> {
        self.members
            .read()
            .ok()?
            .get(id)
            .map(|member| member.record())
    }

    async fn find_by_email(&self, email: &str) -> Option<MemberRecord> {
        self.members
            .read()
            .ok()?
            .values()
            .find(|m| m.email.as_str() == email)
            .map(|member| member.record())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};

    use memberbase_core::EmailAddress;
    use memberbase_members::{NewMember, PasswordHash};

    use super::*;

    fn member(email: &str) -> Member {
        Member::register(
            NewMember {
                first_name: "Test".to_string(),
                last_name: "Member".to_string(),
                email: EmailAddress::parse(email).unwrap(),
                password: PasswordHash::from_hash("$argon2id$stub"),
                date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            },
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn save_then_lookup_by_id_and_email() {
        let store = InMemoryMemberStore::new();
        let saved = MemberRepository::save(&store, member("a@example.com"))
            .await
            .unwrap();

        let by_id = MemberRepository::find_by_id(&store, &saved.id)
            .await
            .unwrap();
        assert_eq!(by_id.as_ref().map(|m| m.id), Some(saved.id));

        let by_email = MemberRepository::find_by_email(&store, "a@example.com")
            .await
            .unwrap();
        assert_eq!(by_email.map(|m| m.id), Some(saved.id));
    }

    #[tokio::test]
    async fn directory_view_projects_records() {
        let store = InMemoryMemberStore::new();
        let saved = MemberRepository::save(&store, member("a@example.com"))
            .await
            .unwrap();

        let record = MemberDirectory::find_by_id(&store, &saved.id)
            .await
            .unwrap();
        assert_eq!(record.id, saved.id);
        assert_eq!(record.roles, saved.roles);
    }

    #[tokio::test]
    async fn status_pages_are_ordered_and_counted() {
        let store = InMemoryMemberStore::new();
        for i in 0..3 {
            MemberRepository::save(&store, member(&format!("m{i}@example.com")))
                .await
                .unwrap();
        }

        let page = store
            .find_by_status(MemberStatus::Pending, 1, 2)
            .await
            .unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(store.count_by_status(MemberStatus::Pending).await.unwrap(), 3);
        assert_eq!(store.count_with_role(Role::Member).await.unwrap(), 3);
    }
}
