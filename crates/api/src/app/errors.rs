//! Consistent JSON error responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use memberbase_auth::AuthError;
use memberbase_core::DomainError;
use memberbase_events::EventsError;
use memberbase_members::{MembersError, PasswordError};

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> Response {
    (
        status,
        Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn auth_error_to_response(err: AuthError) -> Response {
    match err {
        AuthError::Unauthorized(reason) => {
            json_error(StatusCode::UNAUTHORIZED, "unauthorized", reason)
        }
        AuthError::BadRequest(reason) => json_error(StatusCode::BAD_REQUEST, "bad_request", reason),
        AuthError::NoApplicableCheck => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "entitlement_wiring",
            err.to_string(),
        ),
    }
}

pub fn members_error_to_response(err: MembersError) -> Response {
    match err {
        MembersError::EmailAlreadyRegistered(_) => {
            json_error(StatusCode::CONFLICT, "email_already_registered", err.to_string())
        }
        MembersError::MemberNotFound(_) => {
            json_error(StatusCode::NOT_FOUND, "member_not_found", err.to_string())
        }
        MembersError::InvalidCredentials => {
            json_error(StatusCode::UNAUTHORIZED, "invalid_credentials", err.to_string())
        }
        MembersError::NotConfirmed => {
            json_error(StatusCode::UNAUTHORIZED, "not_confirmed", err.to_string())
        }
        MembersError::NotPending(_) => {
            json_error(StatusCode::CONFLICT, "not_pending", err.to_string())
        }
        MembersError::AlreadyAdmin => {
            json_error(StatusCode::CONFLICT, "already_admin", err.to_string())
        }
        MembersError::AdminThreshold(_) => {
            json_error(StatusCode::CONFLICT, "admin_threshold", err.to_string())
        }
        MembersError::Password(PasswordError::TooShort) => {
            json_error(StatusCode::BAD_REQUEST, "weak_password", err.to_string())
        }
        MembersError::Password(PasswordError::Hash)
        | MembersError::Signing(_)
        | MembersError::Claims(_) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal", "internal error")
        }
        MembersError::Auth(inner) => auth_error_to_response(inner),
        MembersError::Domain(inner) => domain_error_to_response(inner),
        MembersError::Store(_) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", "storage failure")
        }
    }
}

pub fn events_error_to_response(err: EventsError) -> Response {
    match err {
        EventsError::NotFound(_) => json_error(StatusCode::NOT_FOUND, "not_found", err.to_string()),
        EventsError::Auth(inner) => auth_error_to_response(inner),
        EventsError::Store(_) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", "storage failure")
        }
    }
}

pub fn domain_error_to_response(err: DomainError) -> Response {
    match err {
        DomainError::Validation(_) | DomainError::InvalidId(_) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", err.to_string())
        }
        DomainError::InvariantViolation(_) => json_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "invariant_violation",
            err.to_string(),
        ),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", err.to_string()),
        DomainError::Conflict(_) => json_error(StatusCode::CONFLICT, "conflict", err.to_string()),
    }
}
