//! Portfolio reads and profile updates (member-facing).

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use memberbase_auth::{AuthError, EntitlementCheckRequest, EntitlementEngine, Identity};

use crate::error::MembersError;
use crate::member::Member;
use crate::repository::MemberRepository;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMemberRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
}

pub struct PortfolioService {
    members: Arc<dyn MemberRepository>,
    engine: Arc<EntitlementEngine>,
}

impl PortfolioService {
    pub fn new(members: Arc<dyn MemberRepository>, engine: Arc<EntitlementEngine>) -> Self {
        Self { members, engine }
    }

    /// Fetch a member by email; the caller must own the address.
    pub async fn get_by_email(
        &self,
        identity: Option<&Identity>,
        email: &str,
    ) -> Result<Member, MembersError> {
        tracing::info!(email, "fetching member by email");
        self.engine
            .validate(
                &EntitlementCheckRequest::ByEmail {
                    email: email.to_string(),
                },
                identity,
            )
            .await?;

        self.members
            .find_by_email(email)
            .await?
            .ok_or_else(|| MembersError::MemberNotFound(email.to_string()))
    }

    /// Fetch the caller's own record.
    pub async fn me(&self, identity: Option<&Identity>) -> Result<Member, MembersError> {
        let caller = bound_identity(identity)?;
        self.engine
            .validate(&EntitlementCheckRequest::BySubject, identity)
            .await?;

        let subject = caller.subject();
        tracing::info!(%subject, "fetching own member record");
        self.members
            .find_by_id(&subject)
            .await?
            .ok_or_else(|| MembersError::MemberNotFound(subject.to_string()))
    }

    /// Update profile fields on an address the caller owns.
    pub async fn update_by_email(
        &self,
        identity: Option<&Identity>,
        email: &str,
        update: UpdateMemberRequest,
    ) -> Result<Member, MembersError> {
        tracing::info!(email, "updating member");
        self.engine
            .validate(
                &EntitlementCheckRequest::ByEmail {
                    email: email.to_string(),
                },
                identity,
            )
            .await?;

        let mut member = self
            .members
            .find_by_email(email)
            .await?
            .ok_or_else(|| MembersError::MemberNotFound(email.to_string()))?;

        if let Some(first_name) = update.first_name {
            member.first_name = first_name.trim().to_string();
        }
        if let Some(last_name) = update.last_name {
            member.last_name = last_name.trim().to_string();
        }
        if let Some(date_of_birth) = update.date_of_birth {
            member.date_of_birth = date_of_birth;
        }
        member.updated_at = Utc::now();

        Ok(self.members.save(member).await?)
    }
}

fn bound_identity(identity: Option<&Identity>) -> Result<&Identity, MembersError> {
    identity.ok_or_else(|| {
        AuthError::unauthorized("no authenticated identity bound to the request").into()
    })
}
