//! # Keel Demo Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize tracing
//! - Compose the application and its documentation endpoints
//! - Start the HTTP server

mod config;

use axum::{Json, response::IntoResponse, routing::get};
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use keel_http::App;
use keel_types::{AppConfig, RouteMeta, ServerMeta, TagMeta};

/// Health check endpoint.
async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,keel_app=debug,keel_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = config::Config::from_env()?;

    tracing::info!("Starting {} on port {}", config.title, config.port);

    let app_config = AppConfig::new(&config.title)
        .version(env!("CARGO_PKG_VERSION"))
        .description("Demo application composed with keel")
        .tag(TagMeta::new("ops").description("Operational endpoints"))
        .server(ServerMeta::new(format!("http://localhost:{}", config.port)))
        .debug(config.debug);

    let app = App::new(app_config)
        .route(
            RouteMeta::get("/health")
                .summary("Health check")
                .tag("ops"),
            get(health),
        )
        .middleware(|router| router.layer(CorsLayer::permissive()));

    let addr = format!("0.0.0.0:{}", config.port);
    app.serve(&addr).await
}
