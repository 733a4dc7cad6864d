//! Member-facing routes: registration, login, portfolio.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Extension, Path};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use memberbase_auth::Identity;
use memberbase_members::{RegistrationRequest, UpdateMemberRequest};

use crate::app::dto::{LoginRequest, LoginResponse, MemberResponse};
use crate::app::{AppServices, errors};
use crate::middleware::ambient_identity;

pub fn router() -> axum::Router {
    axum::Router::new()
        .route("/register", axum::routing::post(register))
        .route("/auth/login", axum::routing::post(login))
        .route("/me", axum::routing::get(me))
        .route("/:email", axum::routing::get(get_member).put(update_member))
}

/// POST /api/v1/members/register - public registration
pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<RegistrationRequest>,
) -> Response {
    match services.registration.register(body).await {
        Ok(member) => (
            StatusCode::CREATED,
            Json(MemberResponse::from_member(&member)),
        )
            .into_response(),
        Err(err) => errors::members_error_to_response(err),
    }
}

/// POST /api/v1/members/auth/login - public login
pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<LoginRequest>,
) -> Response {
    match services.login.login(&body.email, &body.password).await {
        Ok(tokens) => (
            StatusCode::CREATED,
            Json(LoginResponse {
                access_token: tokens.access_token,
                id_token: tokens.id_token,
            }),
        )
            .into_response(),
        Err(err) => errors::members_error_to_response(err),
    }
}

/// GET /api/v1/members/me - the caller's own record
pub async fn me(
    Extension(services): Extension<Arc<AppServices>>,
    identity: Option<Extension<Identity>>,
) -> Response {
    match services.portfolio.me(ambient_identity(&identity)).await {
        Ok(member) => Json(MemberResponse::from_member(&member)).into_response(),
        Err(err) => errors::members_error_to_response(err),
    }
}

/// GET /api/v1/members/{email} - a record the caller owns
pub async fn get_member(
    Extension(services): Extension<Arc<AppServices>>,
    identity: Option<Extension<Identity>>,
    Path(email): Path<String>,
) -> Response {
    match services
        .portfolio
        .get_by_email(ambient_identity(&identity), &email)
        .await
    {
        Ok(member) => Json(MemberResponse::from_member(&member)).into_response(),
        Err(err) => errors::members_error_to_response(err),
    }
}

/// PUT /api/v1/members/{email} - update a record the caller owns
pub async fn update_member(
    Extension(services): Extension<Arc<AppServices>>,
    identity: Option<Extension<Identity>>,
    Path(email): Path<String>,
    Json(body): Json<UpdateMemberRequest>,
) -> Response {
    match services
        .portfolio
        .update_by_email(ambient_identity(&identity), &email, body)
        .await
    {
        Ok(member) => Json(MemberResponse::from_member(&member)).into_response(),
        Err(err) => errors::members_error_to_response(err),
    }
}
