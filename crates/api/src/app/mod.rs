//! HTTP application wiring (axum router + service wiring).
//!
//! Folder layout:
//! - `services.rs`: infrastructure wiring (stores, codec, engine, services)
//! - `routes/`: HTTP routes + handlers (one file per domain area)
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router};

use memberbase_auth::rules::{ALL_METHODS, MethodRule, SecurityRule, SecurityRules};

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

pub use services::{AppConfig, AppServices, BootstrapAdmin, build_services};

/// The rule table the deployment ships with: registration, login, token
/// issuance/refresh, and health stay anonymous; everything else goes through
/// the gate.
pub fn default_security_rules() -> SecurityRules {
    SecurityRules::new(vec![
        SecurityRule::new(
            "/api/v1/members/register",
            vec![MethodRule::anonymous("POST")],
        ),
        SecurityRule::new(
            "/api/v1/members/auth/login",
            vec![MethodRule::anonymous("POST")],
        ),
        SecurityRule::new("/api/v1/token", vec![MethodRule::anonymous(ALL_METHODS)]),
        SecurityRule::new("/health", vec![MethodRule::anonymous(ALL_METHODS)]),
    ])
}

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub async fn build_app(config: AppConfig) -> Router {
    let services = Arc::new(build_services(&config).await);
    build_app_with(&config, services)
}

/// Router over pre-built services; test harnesses use this to seed state.
pub fn build_app_with(config: &AppConfig, services: Arc<AppServices>) -> Router {
    let auth_state = middleware::AuthState {
        inspector: services.inspector.clone(),
        rules: Arc::new(config.security.rules.clone()),
    };

    routes::router()
        .layer(Extension(services))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::authentication_gate,
        ))
}
