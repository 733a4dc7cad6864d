//! Token issuance and refresh.
//!
//! Claims are built from a member's persisted state at issuance time and
//! signed on the blocking pool (HMAC is CPU-bound). Refresh recovers the
//! subject from an expired-but-signed token and re-issues from *current*
//! stored state, so stale role claims never survive a refresh.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use memberbase_auth::{AccessClaims, AuthError, IdClaims, SignedClaims, TokenCodec};

use crate::error::MembersError;
use crate::member::Member;
use crate::repository::MemberRepository;

pub struct TokenService {
    codec: Arc<TokenCodec>,
    members: Arc<dyn MemberRepository>,
    token_ttl: Duration,
}

impl TokenService {
    pub fn new(
        codec: Arc<TokenCodec>,
        members: Arc<dyn MemberRepository>,
        token_ttl: Duration,
    ) -> Self {
        Self {
            codec,
            members,
            token_ttl,
        }
    }

    fn access_claims(
        &self,
        member: &Member,
        now: DateTime<Utc>,
    ) -> Result<AccessClaims, MembersError> {
        Ok(AccessClaims::new(
            member.id,
            member.roles.clone(),
            member.status,
            now,
            self.token_ttl,
        )?)
    }

    fn id_claims(&self, member: &Member, now: DateTime<Utc>) -> Result<IdClaims, MembersError> {
        Ok(IdClaims::new(
            member.id,
            member.status,
            member.first_name.clone(),
            member.last_name.clone(),
            member.email.clone(),
            member.date_of_birth,
            now,
            self.token_ttl,
        )?)
    }

    async fn sign<C>(&self, claims: C) -> Result<String, MembersError>
    where
        C: SignedClaims + Send + 'static,
    {
        let codec = Arc::clone(&self.codec);
        tokio::task::spawn_blocking(move || codec.encode(&claims))
            .await
            .map_err(|_| MembersError::Signing("signing task aborted".to_string()))?
            .map_err(|e| MembersError::Signing(e.to_string()))
    }

    /// Sign an access token for a member's current state.
    pub async fn sign_access(&self, member: &Member) -> Result<String, MembersError> {
        tracing::info!(member = %member.id, "generating access token");
        let claims = self.access_claims(member, Utc::now())?;
        self.sign(claims).await
    }

    /// Sign an ID token (profile data for display, not authorization).
    pub async fn sign_id(&self, member: &Member) -> Result<String, MembersError> {
        tracing::info!(member = %member.id, "generating ID token");
        let claims = self.id_claims(member, Utc::now())?;
        self.sign(claims).await
    }

    /// Exchange credentials for an access token.
    pub async fn issue(&self, email: &str, password: &str) -> Result<String, MembersError> {
        tracing::info!("access token issuance requested");

        let member = self
            .members
            .find_by_email(email)
            .await?
            .ok_or_else(|| MembersError::MemberNotFound(email.to_string()))?;

        if !member.is_confirmed() {
            tracing::warn!(member = %member.id, "token refused: member not confirmed");
            return Err(MembersError::NotConfirmed);
        }
        if !verify_password(&member, password).await {
            tracing::warn!(member = %member.id, "token refused: credential mismatch");
            return Err(MembersError::InvalidCredentials);
        }

        self.sign_access(&member).await
    }

    /// Re-issue an access token from an expired (or still-valid) one.
    ///
    /// Only the subject is trusted from the presented token; roles and
    /// status are re-read from storage.
    pub async fn refresh(&self, token: &str) -> Result<String, MembersError> {
        let stale: AccessClaims = self.codec.decode_allow_expired(token).map_err(|err| {
            tracing::warn!(error = %err, "refresh refused: token failed verification");
            AuthError::unauthorized("invalid token")
        })?;

        tracing::info!(subject = %stale.sub, "refreshing access token");

        let member = self
            .members
            .find_by_id(&stale.sub)
            .await?
            .ok_or_else(|| AuthError::unauthorized("invalid token"))?;

        if !member.is_confirmed() {
            return Err(MembersError::NotConfirmed);
        }

        self.sign_access(&member).await
    }
}

/// Argon2 verification on the blocking pool.
pub(crate) async fn verify_password(member: &Member, password: &str) -> bool {
    let hash = member.password.clone();
    let password = password.to_string();
    tokio::task::spawn_blocking(move || hash.verify(&password))
        .await
        .unwrap_or(false)
}
