use memberbase_api::app::{AppConfig, BootstrapAdmin};

#[tokio::main]
async fn main() {
    memberbase_observability::init();

    let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
        tracing::warn!("JWT_SECRET not set; using insecure dev default");
        "dev-secret".to_string()
    });

    let mut config = AppConfig::new(jwt_secret);
    if let (Ok(email), Ok(password)) = (
        std::env::var("BOOTSTRAP_ADMIN_EMAIL"),
        std::env::var("BOOTSTRAP_ADMIN_PASSWORD"),
    ) {
        config.bootstrap_admin = Some(BootstrapAdmin {
            first_name: "Bootstrap".to_string(),
            last_name: "Admin".to_string(),
            email,
            password,
        });
    }

    let app = memberbase_api::app::build_app(config).await;

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8080")
        .await
        .expect("failed to bind 0.0.0.0:8080");

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
