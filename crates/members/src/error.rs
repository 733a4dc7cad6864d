//! Use-case error model for the members crate.

use thiserror::Error;

use memberbase_auth::{AuthError, ClaimsError};
use memberbase_core::{DomainError, StoreError};

use crate::password::PasswordError;

#[derive(Debug, Error)]
pub enum MembersError {
    #[error("{0} is already registered, try to log in or reset your password")]
    EmailAlreadyRegistered(String),

    #[error("member not found: {0}")]
    MemberNotFound(String),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("member not confirmed")]
    NotConfirmed,

    #[error("member {0} is not in pending status")]
    NotPending(String),

    #[error("member already has the ADMIN role")]
    AlreadyAdmin,

    #[error("maximum {0} admin members allowed")]
    AdminThreshold(usize),

    #[error("token signing failed: {0}")]
    Signing(String),

    #[error(transparent)]
    Claims(#[from] ClaimsError),

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
