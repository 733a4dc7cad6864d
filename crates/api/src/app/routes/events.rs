//! Event routes: admin curation + the member-facing upcoming feed.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Extension, Path};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use memberbase_auth::Identity;
use memberbase_core::EventId;
use memberbase_events::{EventUpdate, NewEvent};

use crate::app::{AppServices, errors};
use crate::middleware::ambient_identity;

pub fn router() -> axum::Router {
    axum::Router::new()
        .route("/", axum::routing::post(create_event))
        .route("/upcoming", axum::routing::get(upcoming_events))
        .route(
            "/:id",
            axum::routing::get(get_event)
                .put(update_event)
                .delete(delete_event),
        )
}

/// POST /api/v1/events
pub async fn create_event(
    Extension(services): Extension<Arc<AppServices>>,
    identity: Option<Extension<Identity>>,
    Json(body): Json<NewEvent>,
) -> Response {
    match services
        .events
        .create(ambient_identity(&identity), body)
        .await
    {
        Ok(event) => (StatusCode::CREATED, Json(event)).into_response(),
        Err(err) => errors::events_error_to_response(err),
    }
}

/// GET /api/v1/events/upcoming
pub async fn upcoming_events(
    Extension(services): Extension<Arc<AppServices>>,
    identity: Option<Extension<Identity>>,
) -> Response {
    match services.events.upcoming(ambient_identity(&identity)).await {
        Ok(events) => Json(events).into_response(),
        Err(err) => errors::events_error_to_response(err),
    }
}

/// GET /api/v1/events/{id}
pub async fn get_event(
    Extension(services): Extension<Arc<AppServices>>,
    identity: Option<Extension<Identity>>,
    Path(id): Path<EventId>,
) -> Response {
    match services.events.get(ambient_identity(&identity), id).await {
        Ok(event) => Json(event).into_response(),
        Err(err) => errors::events_error_to_response(err),
    }
}

/// PUT /api/v1/events/{id}
pub async fn update_event(
    Extension(services): Extension<Arc<AppServices>>,
    identity: Option<Extension<Identity>>,
    Path(id): Path<EventId>,
    Json(body): Json<EventUpdate>,
) -> Response {
    match services
        .events
        .update(ambient_identity(&identity), id, body)
        .await
    {
        Ok(event) => Json(event).into_response(),
        Err(err) => errors::events_error_to_response(err),
    }
}

/// DELETE /api/v1/events/{id}
pub async fn delete_event(
    Extension(services): Extension<Arc<AppServices>>,
    identity: Option<Extension<Identity>>,
    Path(id): Path<EventId>,
) -> Response {
    match services.events.delete(ambient_identity(&identity), id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => errors::events_error_to_response(err),
    }
}
