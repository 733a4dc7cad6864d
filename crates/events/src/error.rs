//! Use-case error model for the events crate.

use thiserror::Error;

use memberbase_auth::AuthError;
use memberbase_core::StoreError;

#[derive(Debug, Error)]
pub enum EventsError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
