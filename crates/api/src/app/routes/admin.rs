//! Admin routes: approval workflow and role management.
//!
//! Coarse ADMIN role guard first (claimed identity), then the entitlement
//! engine verifies the claims against storage inside each service call.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Extension, Path, Query};
use axum::response::{IntoResponse, Response};

use memberbase_auth::{Identity, Role};

use crate::app::dto::{
    AddRoleRequest, AdminCreationRequest, MemberResponse, PageResponse, StatusQuery,
};
use crate::app::{AppServices, errors};
use crate::authz::require_role;
use crate::middleware::ambient_identity;

pub fn router() -> axum::Router {
    axum::Router::new()
        .route("/members", axum::routing::get(members_by_status))
        .route("/members/:email/confirm", axum::routing::post(confirm_member))
        .route("/members/:email/reject", axum::routing::post(reject_member))
        .route("/members/roles", axum::routing::post(add_role))
        .route("/admins", axum::routing::post(create_admin))
}

/// POST /api/v1/admin/members/{email}/confirm
pub async fn confirm_member(
    Extension(services): Extension<Arc<AppServices>>,
    identity: Option<Extension<Identity>>,
    Path(email): Path<String>,
) -> Response {
    let caller = ambient_identity(&identity);
    if let Err(response) = require_role(caller, Role::Admin) {
        return response;
    }

    match services.admin.confirm_member(caller, &email).await {
        Ok(member) => Json(MemberResponse::from_member(&member)).into_response(),
        Err(err) => errors::members_error_to_response(err),
    }
}

/// POST /api/v1/admin/members/{email}/reject
pub async fn reject_member(
    Extension(services): Extension<Arc<AppServices>>,
    identity: Option<Extension<Identity>>,
    Path(email): Path<String>,
) -> Response {
    let caller = ambient_identity(&identity);
    if let Err(response) = require_role(caller, Role::Admin) {
        return response;
    }

    match services.admin.reject_member(caller, &email).await {
        Ok(member) => Json(MemberResponse::from_member(&member)).into_response(),
        Err(err) => errors::members_error_to_response(err),
    }
}

/// POST /api/v1/admin/members/roles
pub async fn add_role(
    Extension(services): Extension<Arc<AppServices>>,
    identity: Option<Extension<Identity>>,
    Json(body): Json<AddRoleRequest>,
) -> Response {
    let caller = ambient_identity(&identity);
    if let Err(response) = require_role(caller, Role::Admin) {
        return response;
    }

    match services.admin.add_role(caller, &body.email, body.role).await {
        Ok(member) => Json(MemberResponse::from_member(&member)).into_response(),
        Err(err) => errors::members_error_to_response(err),
    }
}

/// POST /api/v1/admin/admins - promote a member to ADMIN
pub async fn create_admin(
    Extension(services): Extension<Arc<AppServices>>,
    identity: Option<Extension<Identity>>,
    Json(body): Json<AdminCreationRequest>,
) -> Response {
    let caller = ambient_identity(&identity);
    if let Err(response) = require_role(caller, Role::Admin) {
        return response;
    }

    match services.admin.grant_admin(caller, body.member_id).await {
        Ok(member) => Json(MemberResponse::from_member(&member)).into_response(),
        Err(err) => errors::members_error_to_response(err),
    }
}

/// GET /api/v1/admin/members?status=&page=&size=
pub async fn members_by_status(
    Extension(services): Extension<Arc<AppServices>>,
    identity: Option<Extension<Identity>>,
    Query(query): Query<StatusQuery>,
) -> Response {
    let caller = ambient_identity(&identity);
    if let Err(response) = require_role(caller, Role::Admin) {
        return response;
    }

    let offset = query.page * query.size;
    match services
        .admin
        .members_by_status(caller, query.status, offset, query.size)
        .await
    {
        Ok((members, total)) => {
            let content = members.iter().map(MemberResponse::from_member).collect();
            Json(PageResponse::new(content, query.page, query.size, total)).into_response()
        }
        Err(err) => errors::members_error_to_response(err),
    }
}
