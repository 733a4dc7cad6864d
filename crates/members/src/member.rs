//! Member entity.
//!
//! # Invariants
//! - A freshly registered member is PENDING and holds exactly the MEMBER role.
//! - Status moves out of PENDING only through an admin decision.
//! - The role set never contains duplicates.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use memberbase_auth::{MemberRecord, Role, role};
use memberbase_core::{EmailAddress, MemberId, MemberStatus};

use crate::error::MembersError;
use crate::password::PasswordHash;

/// Input to [`Member::register`].
#[derive(Debug, Clone)]
pub struct NewMember {
    pub first_name: String,
    pub last_name: String,
    pub email: EmailAddress,
    pub password: PasswordHash,
    pub date_of_birth: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub first_name: String,
    pub last_name: String,
    pub email: EmailAddress,
    pub password: PasswordHash,
    pub date_of_birth: NaiveDate,
    pub roles: Vec<Role>,
    pub status: MemberStatus,

    /// When the registration request was accepted.
    pub member_since: DateTime<Utc>,

    /// Date of admin confirmation; absent while pending or rejected.
    pub registered_since: Option<NaiveDate>,

    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Member {
    /// A new registration: always PENDING with the default MEMBER role.
    pub fn register(new: NewMember, now: DateTime<Utc>) -> Self {
        Self {
            id: MemberId::new(),
            first_name: new.first_name.trim().to_string(),
            last_name: new.last_name.trim().to_string(),
            email: new.email,
            password: new.password,
            date_of_birth: new.date_of_birth,
            roles: vec![Role::Member],
            status: MemberStatus::Pending,
            member_since: now,
            registered_since: None,
            last_login: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_confirmed(&self) -> bool {
        self.status.is_confirmed()
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn highest_role(&self) -> Option<Role> {
        role::highest_role(&self.roles)
    }

    /// Add a role; returns `false` when it was already granted.
    pub fn add_role(&mut self, role: Role, now: DateTime<Utc>) -> bool {
        if self.has_role(role) {
            return false;
        }
        self.roles.push(role);
        self.updated_at = now;
        true
    }

    /// Admin approval. Only a PENDING member can be confirmed.
    pub fn confirm(&mut self, now: DateTime<Utc>) -> Result<(), MembersError> {
        if self.status != MemberStatus::Pending {
            return Err(MembersError::NotPending(self.email.to_string()));
        }
        self.status = MemberStatus::Confirmed;
        self.registered_since = Some(now.date_naive());
        self.updated_at = now;
        Ok(())
    }

    /// Admin rejection. Only a PENDING member can be rejected.
    pub fn reject(&mut self, now: DateTime<Utc>) -> Result<(), MembersError> {
        if self.status != MemberStatus::Pending {
            return Err(MembersError::NotPending(self.email.to_string()));
        }
        self.status = MemberStatus::Rejected;
        self.updated_at = now;
        Ok(())
    }

    pub fn record_login(&mut self, now: DateTime<Utc>) {
        self.last_login = Some(now);
    }

    /// Read-only projection for the entitlement checks.
    pub fn record(&self) -> MemberRecord {
        MemberRecord {
            id: self.id,
            email: self.email.clone(),
            roles: self.roles.clone(),
            status: self.status,
        }
    }
}
