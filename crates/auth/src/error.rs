//! Error taxonomy for the authentication/entitlement pipeline.
//!
//! [`DecodeError`] covers cryptographic/structural token failures,
//! [`AuthError`] covers business-rule outcomes surfaced to callers. The HTTP
//! layer maps `Unauthorized` to 401 and `BadRequest` to 400; reasons are
//! human-readable strings and never carry internals.

use thiserror::Error;

/// Failure while verifying or parsing a signed token.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Structurally broken token (bad segments, base64, or payload shape).
    #[error("malformed token")]
    Malformed,

    /// Signature does not verify under the configured key.
    #[error("invalid token signature")]
    InvalidSignature,

    /// Header names an algorithm other than the fixed HS256.
    #[error("unsupported token algorithm")]
    UnsupportedAlgorithm,

    /// A required claim is absent from the payload.
    #[error("missing required claim: {0}")]
    MissingClaim(String),

    /// Signature verifies but the validity window has elapsed. Recoverable
    /// only through the explicit allow-expired path.
    #[error("token has expired")]
    Expired,
}

impl From<jsonwebtoken::errors::Error> for DecodeError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::InvalidSignature => DecodeError::InvalidSignature,
            ErrorKind::InvalidAlgorithm
            | ErrorKind::InvalidAlgorithmName
            | ErrorKind::MissingAlgorithm => DecodeError::UnsupportedAlgorithm,
            ErrorKind::MissingRequiredClaim(claim) => DecodeError::MissingClaim(claim.clone()),
            ErrorKind::ExpiredSignature => DecodeError::Expired,
            _ => DecodeError::Malformed,
        }
    }
}

/// Failure while signing claims.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("failed to sign claims: {0}")]
    Sign(#[from] jsonwebtoken::errors::Error),

    /// The claim set itself is unusable (e.g. exp <= iat).
    #[error("invalid claims: {0}")]
    InvalidClaims(String),
}

/// Business-rule outcome of an inspection or entitlement check.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The caller is not allowed to act; the payload is the reason shown to
    /// the boundary (401-equivalent).
    #[error("{0}")]
    Unauthorized(String),

    /// The request itself is invalid for the target check (400-equivalent).
    #[error("{0}")]
    BadRequest(String),

    /// No registered check matches the request shape. This is a wiring bug,
    /// not a policy decision; it must never read as "allowed".
    #[error("no entitlement check matches the request")]
    NoApplicableCheck,
}

impl AuthError {
    pub fn unauthorized(reason: impl Into<String>) -> Self {
        Self::Unauthorized(reason.into())
    }

    pub fn bad_request(reason: impl Into<String>) -> Self {
        Self::BadRequest(reason.into())
    }
}
