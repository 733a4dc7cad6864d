//! Route-level role guard.
//!
//! The admin surface additionally requires the ADMIN role on the *claimed*
//! identity before any service runs; the entitlement checks then verify the
//! claims against storage. Keeping the coarse gate here leaves the domain
//! services auth-agnostic about routing.

use axum::http::StatusCode;
use axum::response::Response;

use memberbase_auth::{Identity, Role};

use crate::app::errors;

pub fn require_role(identity: Option<&Identity>, role: Role) -> Result<(), Response> {
    match identity {
        Some(identity) if identity.has_role(role) => Ok(()),
        Some(identity) => {
            tracing::warn!(subject = %identity.subject(), %role, "role guard refused request");
            Err(errors::json_error(
                StatusCode::FORBIDDEN,
                "forbidden",
                format!("requires {role} role"),
            ))
        }
        None => Err(errors::json_error(
            StatusCode::UNAUTHORIZED,
            "unauthorized",
            "no authenticated identity bound to the request",
        )),
    }
}
