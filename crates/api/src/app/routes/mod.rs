//! Routing tree.

use axum::Router;
use axum::routing::get;

pub mod admin;
pub mod events;
pub mod members;
pub mod news;
pub mod system;
pub mod token;

pub fn router() -> Router {
    Router::new()
        .nest("/api/v1/members", members::router())
        .nest("/api/v1/token", token::router())
        .nest("/api/v1/admin", admin::router())
        .nest("/api/v1/events", events::router())
        .nest("/api/v1/news", news::router())
        .route("/health", get(system::health))
}
