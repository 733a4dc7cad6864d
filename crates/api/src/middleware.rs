//! Authentication gate.
//!
//! Per request: consult the rule table (bypass if the path+method pair is
//! anonymous-accessible), extract the bearer credential, run exactly one
//! inspection, and bind the resulting [`Identity`] into the request
//! extensions for everything downstream. Any failure terminates the request
//! with 401 and the inspector's reason — never silently anonymous.

use std::sync::Arc;

use axum::{
    Extension,
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};

use memberbase_auth::{ClaimsInspector, Identity, SecurityRules};

use crate::app::errors;

#[derive(Clone)]
pub struct AuthState {
    pub inspector: ClaimsInspector,
    pub rules: Arc<SecurityRules>,
}

pub async fn authentication_gate(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, Response> {
    if state
        .rules
        .is_anonymous(req.uri().path(), req.method().as_str())
    {
        return Ok(next.run(req).await);
    }

    let token = extract_bearer(req.headers())?.to_owned();

    let claims = state.inspector.inspect_access(&token).await.map_err(|err| {
        tracing::warn!(path = req.uri().path(), error = %err, "authentication failed");
        errors::auth_error_to_response(err)
    })?;

    req.extensions_mut().insert(Identity::from(&claims));
    Ok(next.run(req).await)
}

fn extract_bearer(headers: &HeaderMap) -> Result<&str, Response> {
    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| {
            errors::json_error(
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                "missing or empty Authorization header",
            )
        })?;

    let token = header.strip_prefix("Bearer ").ok_or_else(|| {
        errors::json_error(
            StatusCode::UNAUTHORIZED,
            "unauthorized",
            "not a Bearer Authorization header",
        )
    })?;

    let token = token.trim();
    if token.is_empty() {
        return Err(errors::json_error(
            StatusCode::UNAUTHORIZED,
            "unauthorized",
            "missing or empty Authorization header",
        ));
    }

    Ok(token)
}

/// Borrow the gate-bound identity out of the optional extension.
pub fn ambient_identity(ext: &Option<Extension<Identity>>) -> Option<&Identity> {
    ext.as_ref().map(|Extension(identity)| identity)
}
