//! Login: credentials in, access + ID token out.

use std::sync::Arc;

use chrono::Utc;

use crate::error::MembersError;
use crate::repository::MemberRepository;
use crate::tokens::{TokenService, verify_password};

/// The pair handed back on a successful login.
#[derive(Debug, Clone)]
pub struct LoginTokens {
    pub access_token: String,
    pub id_token: String,
}

pub struct LoginService {
    members: Arc<dyn MemberRepository>,
    tokens: Arc<TokenService>,
}

impl LoginService {
    pub fn new(members: Arc<dyn MemberRepository>, tokens: Arc<TokenService>) -> Self {
        Self { members, tokens }
    }

    /// Authenticate and issue both tokens.
    ///
    /// An unknown email and a wrong password produce the same failure, so
    /// login never confirms whether an address is registered.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginTokens, MembersError> {
        tracing::info!("login attempt");

        let Some(mut member) = self.members.find_by_email(email).await? else {
            tracing::warn!("login failed: unknown email");
            return Err(MembersError::InvalidCredentials);
        };

        if !member.is_confirmed() {
            tracing::warn!(member = %member.id, "login refused: member not confirmed");
            return Err(MembersError::NotConfirmed);
        }
        if !verify_password(&member, password).await {
            tracing::warn!(member = %member.id, "login failed: credential mismatch");
            return Err(MembersError::InvalidCredentials);
        }

        let (access_token, id_token) = tokio::try_join!(
            self.tokens.sign_access(&member),
            self.tokens.sign_id(&member),
        )?;

        member.record_login(Utc::now());
        let member = self.members.save(member).await?;
        tracing::info!(member = %member.id, "login successful");

        Ok(LoginTokens {
            access_token,
            id_token,
        })
    }
}
