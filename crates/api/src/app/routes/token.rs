//! Token issuance and refresh (public routes).

use std::sync::Arc;

use axum::Json;
use axum::extract::Extension;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::app::dto::{RefreshRequest, TokenRequest, TokenResponse};
use crate::app::{AppServices, errors};

pub fn router() -> axum::Router {
    axum::Router::new()
        .route("/", axum::routing::post(issue))
        .route("/refresh", axum::routing::post(refresh))
}

/// POST /api/v1/token - exchange credentials for an access token
pub async fn issue(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<TokenRequest>,
) -> Response {
    match services.tokens.issue(&body.username, &body.password).await {
        Ok(access_token) => (
            StatusCode::CREATED,
            Json(TokenResponse { access_token }),
        )
            .into_response(),
        Err(err) => errors::members_error_to_response(err),
    }
}

/// POST /api/v1/token/refresh - re-issue from an expired-but-signed token
pub async fn refresh(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<RefreshRequest>,
) -> Response {
    match services.tokens.refresh(&body.token).await {
        Ok(access_token) => (
            StatusCode::CREATED,
            Json(TokenResponse { access_token }),
        )
            .into_response(),
        Err(err) => errors::members_error_to_response(err),
    }
}
