//! Claims inspection: from "cryptographically valid" to "authorized to act".
//!
//! The codec answers whether a token is genuine; the inspector answers
//! whether its bearer may act *now*. Keeping the two apart lets refresh
//! flows recover an expired-but-signed token's subject without granting
//! access.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use memberbase_core::MemberStatus;

use crate::claims::{AccessClaims, IdClaims};
use crate::codec::TokenCodec;
use crate::error::{AuthError, DecodeError};
use crate::role::Role;

#[derive(Clone)]
pub struct ClaimsInspector {
    codec: Arc<TokenCodec>,
}

impl ClaimsInspector {
    pub fn new(codec: Arc<TokenCodec>) -> Self {
        Self { codec }
    }

    /// Inspect an access token against an explicit clock.
    ///
    /// Three sequential invariants, short-circuiting at the first violation,
    /// each with its own reason: expiry strictly after `now`, MEMBER role
    /// present, status CONFIRMED.
    pub fn inspect_access_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<AccessClaims, AuthError> {
        let claims: AccessClaims = self.codec.decode_allow_expired(token).map_err(|err| {
            tracing::warn!(error = %err, "access token failed verification");
            AuthError::unauthorized("invalid token")
        })?;

        if claims.exp <= now {
            tracing::warn!(subject = %claims.sub, "access token has expired");
            return Err(AuthError::unauthorized("token has expired"));
        }
        if !claims.roles.contains(&Role::Member) {
            tracing::warn!(subject = %claims.sub, "access token carries no MEMBER role");
            return Err(AuthError::unauthorized("not a member"));
        }
        if claims.status != MemberStatus::Confirmed {
            tracing::warn!(subject = %claims.sub, status = %claims.status, "member not confirmed");
            return Err(AuthError::unauthorized("member not confirmed yet"));
        }

        Ok(claims)
    }

    /// Inspect an access token at the current time.
    ///
    /// Signature verification is CPU-bound, so it runs on the blocking pool
    /// rather than the I/O loop. If the surrounding request is dropped, the
    /// in-flight verification is simply abandoned.
    pub async fn inspect_access(&self, token: &str) -> Result<AccessClaims, AuthError> {
        let this = self.clone();
        let token = token.to_owned();

        tokio::task::spawn_blocking(move || this.inspect_access_at(&token, Utc::now()))
            .await
            .map_err(|_| AuthError::unauthorized("token inspection aborted"))?
    }

    /// Parse an ID token without expiry or role enforcement.
    ///
    /// ID claims are informational; gating on them would be a category error.
    pub fn parse_id(&self, token: &str) -> Result<IdClaims, DecodeError> {
        self.codec.decode_allow_expired(token)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use memberbase_core::MemberId;

    use super::*;

    fn setup() -> (Arc<TokenCodec>, ClaimsInspector) {
        let codec = Arc::new(TokenCodec::new(b"inspector-test-secret"));
        let inspector = ClaimsInspector::new(Arc::clone(&codec));
        (codec, inspector)
    }

    fn token(
        codec: &TokenCodec,
        roles: Vec<Role>,
        status: MemberStatus,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> String {
        let claims = AccessClaims::new(MemberId::new(), roles, status, issued_at, ttl).unwrap();
        codec.encode(&claims).unwrap()
    }

    #[test]
    fn accepts_confirmed_member_with_future_expiry() {
        let (codec, inspector) = setup();
        let now = Utc::now();
        let token = token(
            &codec,
            vec![Role::Member, Role::Admin],
            MemberStatus::Confirmed,
            now,
            Duration::hours(2),
        );

        let claims = inspector.inspect_access_at(&token, now).unwrap();
        assert_eq!(claims.roles, vec![Role::Member, Role::Admin]);
        assert_eq!(claims.status, MemberStatus::Confirmed);
    }

    #[test]
    fn expiry_boundary_is_exclusive() {
        let (codec, inspector) = setup();
        let issued = Utc::now();
        let ttl = Duration::minutes(30);
        let token = token(
            &codec,
            vec![Role::Member],
            MemberStatus::Confirmed,
            issued,
            ttl,
        );
        let exp = issued + ttl;

        // One second before expiry: authorized.
        assert!(inspector
            .inspect_access_at(&token, exp - Duration::seconds(1))
            .is_ok());

        // Exactly at expiry: rejected, with the expiry reason.
        let err = inspector.inspect_access_at(&token, exp).unwrap_err();
        assert_eq!(err, AuthError::unauthorized("token has expired"));
    }

    #[test]
    fn missing_member_role_is_rejected_with_its_own_reason() {
        let (codec, inspector) = setup();
        let now = Utc::now();
        let token = token(
            &codec,
            vec![Role::Finance],
            MemberStatus::Confirmed,
            now,
            Duration::hours(1),
        );

        let err = inspector.inspect_access_at(&token, now).unwrap_err();
        assert_eq!(err, AuthError::unauthorized("not a member"));
    }

    #[test]
    fn unconfirmed_status_is_rejected_with_its_own_reason() {
        let (codec, inspector) = setup();
        let now = Utc::now();
        let token = token(
            &codec,
            vec![Role::Member],
            MemberStatus::Pending,
            now,
            Duration::hours(1),
        );

        let err = inspector.inspect_access_at(&token, now).unwrap_err();
        assert_eq!(err, AuthError::unauthorized("member not confirmed yet"));
    }

    #[test]
    fn expiry_check_runs_before_role_and_status_checks() {
        // A token that violates all three invariants reports the first one.
        let (codec, inspector) = setup();
        let issued = Utc::now() - Duration::hours(3);
        let token = token(
            &codec,
            vec![Role::Finance],
            MemberStatus::Pending,
            issued,
            Duration::hours(1),
        );

        let err = inspector.inspect_access_at(&token, Utc::now()).unwrap_err();
        assert_eq!(err, AuthError::unauthorized("token has expired"));
    }

    #[test]
    fn garbage_tokens_map_to_invalid_token() {
        let (_, inspector) = setup();
        let err = inspector
            .inspect_access_at("nonsense", Utc::now())
            .unwrap_err();
        assert_eq!(err, AuthError::unauthorized("invalid token"));
    }

    #[tokio::test]
    async fn async_inspection_matches_the_sync_path() {
        let (codec, inspector) = setup();
        let token = token(
            &codec,
            vec![Role::Member],
            MemberStatus::Confirmed,
            Utc::now(),
            Duration::hours(1),
        );

        let claims = inspector.inspect_access(&token).await.unwrap();
        assert_eq!(claims.status, MemberStatus::Confirmed);
    }
}
