//! Composer tests covering memoization, endpoint disabling, lifecycle, and
//! handler precedence against the assembled router.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::{
    Json, Router,
    body::Body,
    http::{Request, StatusCode},
    response::IntoResponse,
    routing::get,
};
use http_body_util::BodyExt;
use tower::ServiceExt;
use utoipa::openapi::OpenApi;

use keel_types::{AppConfig, AppError, RouteMeta, SchemaContext, SchemaGenerator};

use crate::app::{App, Lifecycle};
use crate::exception::ErrorClass;
use crate::openapi::OpenApiGenerator;

/// Generator stub that counts invocations of the real algorithm.
struct CountingGenerator {
    calls: Arc<AtomicUsize>,
}

impl SchemaGenerator for CountingGenerator {
    fn generate(&self, ctx: SchemaContext<'_>) -> OpenApi {
        self.calls.fetch_add(1, Ordering::SeqCst);
        OpenApiGenerator.generate(ctx)
    }
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

async fn get_json(router: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    (status, body)
}

async fn get_status(router: Router, uri: &str) -> StatusCode {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    response.status()
}

#[test]
fn test_construction_reaches_setup_complete_synchronously() {
    let app = App::new(AppConfig::default());
    assert_eq!(app.lifecycle(), Lifecycle::SetupComplete);
}

#[test]
fn test_setup_registers_one_route_per_enabled_endpoint() {
    let app = App::new(AppConfig::default());
    for path in ["/openapi.json", "/docs", "/redoc", "/docs/oauth2-redirect"] {
        let count = app.routes().iter().filter(|r| r.path == path).count();
        assert_eq!(count, 1, "expected exactly one route for {path}");
    }
    assert!(app.routes().iter().all(|r| !r.include_in_schema));
}

#[test]
fn test_disabled_endpoints_register_no_routes() {
    let app = App::new(
        AppConfig::new("Bare")
            .disable_openapi()
            .disable_docs()
            .disable_redoc()
            .disable_oauth2_redirect(),
    );
    assert!(app.routes().is_empty());
}

#[test]
fn test_empty_path_disables_like_absent() {
    let mut config = AppConfig::default();
    config.docs_path = Some(String::new());
    let app = App::new(config);
    assert_eq!(app.routes().iter().filter(|r| r.path.is_empty()).count(), 0);
    assert_eq!(
        app.routes().iter().filter(|r| r.path == "/docs").count(),
        0
    );
}

#[test]
fn test_schema_generation_is_memoized() {
    let calls = Arc::new(AtomicUsize::new(0));
    let app = App::with_generator(
        AppConfig::new("Memo"),
        CountingGenerator {
            calls: calls.clone(),
        },
    );

    let first = app.openapi();
    let second = app.openapi();
    let third = app.openapi();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(Arc::ptr_eq(&first, &second));
    assert!(Arc::ptr_eq(&second, &third));
}

#[tokio::test]
async fn test_memoization_survives_router_assembly() {
    let calls = Arc::new(AtomicUsize::new(0));
    let app = App::with_generator(
        AppConfig::new("Memo"),
        CountingGenerator {
            calls: calls.clone(),
        },
    );
    let router = app.into_router();

    for _ in 0..3 {
        let (status, _) = get_json(router.clone(), "/openapi.json").await;
        assert_eq!(status, StatusCode::OK);
    }

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_openapi_endpoint_serves_document() {
    let app = App::new(
        AppConfig::new("Inventory API")
            .version("2.0.0")
            .description("Warehouse inventory"),
    )
    .route(
        RouteMeta::get("/health").summary("Health check").tag("ops"),
        get(health),
    );

    let (status, body) = get_json(app.into_router(), "/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["info"]["title"], "Inventory API");
    assert_eq!(body["info"]["version"], "2.0.0");
    assert_eq!(body["paths"]["/health"]["get"]["summary"], "Health check");
}

#[tokio::test]
async fn test_auxiliary_routes_hidden_from_document() {
    let app = App::new(AppConfig::default());
    let (_, body) = get_json(app.into_router(), "/openapi.json").await;

    let paths = body["paths"].as_object().cloned().unwrap_or_default();
    assert!(!paths.contains_key("/openapi.json"));
    assert!(!paths.contains_key("/docs"));
    assert!(!paths.contains_key("/redoc"));
}

#[tokio::test]
async fn test_docs_pages_served() {
    let app = App::new(AppConfig::new("Docs Test"));
    let router = app.into_router();

    for uri in ["/docs", "/redoc", "/docs/oauth2-redirect"] {
        let status = get_status(router.clone(), uri).await;
        assert_eq!(status, StatusCode::OK, "expected 200 from {uri}");
    }
}

#[tokio::test]
async fn test_disabled_endpoint_returns_404() {
    let app = App::new(AppConfig::new("No Docs").disable_docs());
    let router = app.into_router();

    assert_eq!(get_status(router.clone(), "/docs").await, StatusCode::NOT_FOUND);
    assert_eq!(get_status(router, "/redoc").await, StatusCode::OK);
}

#[tokio::test]
async fn test_user_route_dispatch() {
    let app = App::new(AppConfig::default()).route(RouteMeta::get("/health"), get(health));
    let (status, body) = get_json(app.into_router(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_middleware_applied_to_router() {
    let app = App::new(AppConfig::default())
        .route(RouteMeta::get("/health"), get(health))
        .middleware(|router| {
            router.layer(tower_http::cors::CorsLayer::permissive())
        });

    let status = get_status(app.into_router(), "/health").await;
    assert_eq!(status, StatusCode::OK);
}

#[test]
fn test_validation_error_routed_past_catch_all() {
    let app = App::new(AppConfig::default());
    let response = app.handle_error(&AppError::Validation("name required".into()));
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[test]
fn test_typed_http_error_echoes_status() {
    let app = App::new(AppConfig::default());
    let response = app.handle_error(&AppError::http(409, "conflict"));
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[test]
fn test_custom_handler_override_keeps_precedence() {
    let app = App::new(AppConfig::default()).exception_handler(ErrorClass::Any, |_| {
        StatusCode::IM_A_TEAPOT.into_response()
    });

    // The more specific validation handler still wins.
    let response = app.handle_error(&AppError::Validation("bad".into()));
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // Everything else reaches the replaced catch-all.
    let response = app.handle_error(&AppError::internal("boom"));
    assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);
}

#[tokio::test]
async fn test_catch_all_hides_details_without_debug() {
    let app = App::new(AppConfig::default());
    let response = app.handle_error(&AppError::internal("secret connection string"));
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "Internal Server Error");

    let app = App::new(AppConfig::default().debug(true));
    let response = app.handle_error(&AppError::internal("secret connection string"));
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .contains("secret connection string")
    );
}
