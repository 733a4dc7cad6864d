//! News routes: admin curation + the member-facing latest feed.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Extension, Path};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use memberbase_auth::Identity;
use memberbase_core::NewsId;
use memberbase_events::NewsDraft;

use crate::app::{AppServices, errors};
use crate::middleware::ambient_identity;

pub fn router() -> axum::Router {
    axum::Router::new()
        .route("/", axum::routing::post(create_news))
        .route("/latest", axum::routing::get(latest_news))
        .route("/:id", axum::routing::get(get_news).delete(delete_news))
}

/// POST /api/v1/news
pub async fn create_news(
    Extension(services): Extension<Arc<AppServices>>,
    identity: Option<Extension<Identity>>,
    Json(body): Json<NewsDraft>,
) -> Response {
    match services.news.create(ambient_identity(&identity), body).await {
        Ok(news) => (StatusCode::CREATED, Json(news)).into_response(),
        Err(err) => errors::events_error_to_response(err),
    }
}

/// GET /api/v1/news/latest
pub async fn latest_news(
    Extension(services): Extension<Arc<AppServices>>,
    identity: Option<Extension<Identity>>,
) -> Response {
    match services.news.latest(ambient_identity(&identity)).await {
        Ok(items) => Json(items).into_response(),
        Err(err) => errors::events_error_to_response(err),
    }
}

/// GET /api/v1/news/{id}
pub async fn get_news(
    Extension(services): Extension<Arc<AppServices>>,
    identity: Option<Extension<Identity>>,
    Path(id): Path<NewsId>,
) -> Response {
    match services.news.get(ambient_identity(&identity), id).await {
        Ok(news) => Json(news).into_response(),
        Err(err) => errors::events_error_to_response(err),
    }
}

/// DELETE /api/v1/news/{id}
pub async fn delete_news(
    Extension(services): Extension<Arc<AppServices>>,
    identity: Option<Extension<Identity>>,
    Path(id): Path<NewsId>,
) -> Response {
    match services.news.delete(ambient_identity(&identity), id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => errors::events_error_to_response(err),
    }
}
