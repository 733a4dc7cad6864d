//! Signed claim payloads (transport-agnostic).
//!
//! Two token shapes exist: access claims carry roles/status and are the only
//! input to authorization; ID claims carry profile data for display and are
//! never consulted by entitlement checks.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use memberbase_core::{EmailAddress, MemberId, MemberStatus};

use crate::role::Role;

/// Common surface of every claim payload the codec signs.
pub trait SignedClaims: Serialize + DeserializeOwned {
    fn issued_at(&self) -> DateTime<Utc>;
    fn expires_at(&self) -> DateTime<Utc>;
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClaimsError {
    /// Violates the `expiration > issued-at` invariant.
    #[error("invalid token time window (expires_at <= issued_at)")]
    InvalidTimeWindow,
}

/// Access token payload.
///
/// Created once from a member's persisted state at issuance time, never
/// mutated afterwards. `roles`/`status` are advisory snapshots; storage stays
/// authoritative (see the entitlement checks).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Member identifier (immutable once issued).
    pub sub: MemberId,

    /// Roles granted at issuance time.
    pub roles: Vec<Role>,

    /// Membership status at issuance time.
    pub status: MemberStatus,

    #[serde(with = "chrono::serde::ts_seconds")]
    pub iat: DateTime<Utc>,

    #[serde(with = "chrono::serde::ts_seconds")]
    pub exp: DateTime<Utc>,
}

impl AccessClaims {
    pub fn new(
        sub: MemberId,
        roles: Vec<Role>,
        status: MemberStatus,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, ClaimsError> {
        if ttl <= Duration::zero() {
            return Err(ClaimsError::InvalidTimeWindow);
        }

        Ok(Self {
            sub,
            roles,
            status,
            iat: issued_at,
            exp: issued_at + ttl,
        })
    }
}

impl SignedClaims for AccessClaims {
    fn issued_at(&self) -> DateTime<Utc> {
        self.iat
    }

    fn expires_at(&self) -> DateTime<Utc> {
        self.exp
    }
}

/// ID token payload: profile data for display, not authorization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdClaims {
    pub sub: MemberId,
    pub status: MemberStatus,
    pub first_name: String,
    pub last_name: String,
    pub email: EmailAddress,
    pub date_of_birth: NaiveDate,

    #[serde(with = "chrono::serde::ts_seconds")]
    pub iat: DateTime<Utc>,

    #[serde(with = "chrono::serde::ts_seconds")]
    pub exp: DateTime<Utc>,
}

impl IdClaims {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        sub: MemberId,
        status: MemberStatus,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: EmailAddress,
        date_of_birth: NaiveDate,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, ClaimsError> {
        if ttl <= Duration::zero() {
            return Err(ClaimsError::InvalidTimeWindow);
        }

        Ok(Self {
            sub,
            status,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email,
            date_of_birth,
            iat: issued_at,
            exp: issued_at + ttl,
        })
    }
}

impl SignedClaims for IdClaims {
    fn issued_at(&self) -> DateTime<Utc> {
        self.iat
    }

    fn expires_at(&self) -> DateTime<Utc> {
        self.exp
    }
}
