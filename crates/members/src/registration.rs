//! Member registration.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use memberbase_core::EmailAddress;

use crate::error::MembersError;
use crate::member::{Member, NewMember};
use crate::password::PasswordHash;
use crate::repository::MemberRepository;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub date_of_birth: NaiveDate,
}

pub struct RegistrationService {
    members: Arc<dyn MemberRepository>,
}

impl RegistrationService {
    pub fn new(members: Arc<dyn MemberRepository>) -> Self {
        Self { members }
    }

    /// Register a new member: duplicate-email guarded, password hashed,
    /// stored as PENDING until an admin decides.
    pub async fn register(&self, request: RegistrationRequest) -> Result<Member, MembersError> {
        let email = EmailAddress::parse(&request.email)?;
        tracing::info!(email = %email, "registration attempt");

        if let Some(existing) = self.members.find_by_email(email.as_str()).await? {
            tracing::debug!(member = %existing.id, "email already registered");
            return Err(MembersError::EmailAlreadyRegistered(email.to_string()));
        }

        let password = {
            let plain = request.password;
            tokio::task::spawn_blocking(move || PasswordHash::from_plain(&plain))
                .await
                .map_err(|_| MembersError::Signing("password hashing task aborted".to_string()))??
        };

        let member = Member::register(
            NewMember {
                first_name: request.first_name,
                last_name: request.last_name,
                email,
                password,
                date_of_birth: request.date_of_birth,
            },
            Utc::now(),
        );

        let member = self.members.save(member).await?;
        tracing::info!(member = %member.id, "member registered");
        Ok(member)
    }
}

#[cfg(test)]
mod tests {
    use memberbase_auth::Role;
    use memberbase_core::MemberStatus;

    use crate::repository::testing::StubMembers;

    use super::*;

    fn request(email: &str) -> RegistrationRequest {
        RegistrationRequest {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: email.to_string(),
            password: "strong-enough".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1815, 12, 10).unwrap(),
        }
    }

    #[tokio::test]
    async fn registration_starts_the_approval_workflow() {
        let store = Arc::new(StubMembers::default());
        let service = RegistrationService::new(Arc::clone(&store) as _);

        let member = service.register(request("Ada@Example.com")).await.unwrap();

        assert_eq!(member.status, MemberStatus::Pending);
        assert_eq!(member.roles, vec![Role::Member]);
        assert_eq!(member.email.as_str(), "ada@example.com");
        assert!(member.password.verify("strong-enough"));
    }

    #[tokio::test]
    async fn duplicate_email_is_refused() {
        let store = Arc::new(StubMembers::default());
        let service = RegistrationService::new(Arc::clone(&store) as _);

        service.register(request("ada@example.com")).await.unwrap();
        let err = service.register(request("ada@example.com")).await.unwrap_err();

        assert!(matches!(err, MembersError::EmailAlreadyRegistered(_)));
    }

    #[tokio::test]
    async fn invalid_email_is_refused() {
        let service = RegistrationService::new(Arc::new(StubMembers::default()) as _);
        let err = service.register(request("not-an-email")).await.unwrap_err();
        assert!(matches!(err, MembersError::Domain(_)));
    }

    #[tokio::test]
    async fn weak_password_is_refused() {
        let service = RegistrationService::new(Arc::new(StubMembers::default()) as _);
        let mut req = request("ada@example.com");
        req.password = "short".to_string();

        let err = service.register(req).await.unwrap_err();
        assert!(matches!(err, MembersError::Password(_)));
    }
}
