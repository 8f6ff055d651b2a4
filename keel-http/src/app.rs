//! The application composer.
//!
//! `App` assembles a route table, middleware list, and exception-handler
//! table from an `AppConfig`, registers the auxiliary documentation
//! endpoints, and exposes a memoized OpenAPI generation operation. Request
//! dispatch itself is delegated to axum: `into_router` hands the external
//! transport a plain `Router`.

use std::sync::{Arc, OnceLock};

use axum::{
    Json,
    Router,
    extract::State,
    response::{Html, IntoResponse, Response},
    routing::{MethodRouter, get},
};
use tower_http::trace::TraceLayer;
use utoipa::openapi::OpenApi;

use keel_types::config::DEFAULT_OPENAPI_PATH;
use keel_types::{AppConfig, AppError, RouteMeta, SchemaContext, SchemaGenerator};

use crate::docs;
use crate::exception::{ErrorClass, ExceptionHandler, ExceptionTable};
use crate::openapi::OpenApiGenerator;

/// Lifecycle of an application instance.
///
/// Construction configures and sets up in one step, so `Configured` is only
/// observable from inside `setup()`; there is no transition back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Configuration stored, auxiliary endpoints not yet registered.
    Configured,
    /// Setup ran; the sole steady state. Only here may the schema cache
    /// move from empty to populated.
    SetupComplete,
}

/// Deferred router transformation, applied in registration order when the
/// router is assembled.
type Middleware = Box<dyn FnOnce(Router) -> Router + Send>;

/// Composer state shared with the auxiliary endpoint handlers.
///
/// Owned exclusively by one `App` until `into_router` wraps it in an `Arc`;
/// there is no ambient global state.
pub(crate) struct AppState<G> {
    config: AppConfig,
    generator: G,
    routes: Vec<RouteMeta>,
    exceptions: ExceptionTable,
    schema: OnceLock<Arc<OpenApi>>,
}

impl<G: SchemaGenerator> AppState<G> {
    /// Returns the OpenAPI document, generating it on first call.
    ///
    /// The generator runs at most once per application instance; later
    /// calls return the same cached document even if the route table
    /// changed in the meantime.
    fn openapi(&self) -> Arc<OpenApi> {
        self.schema
            .get_or_init(|| {
                tracing::debug!(title = %self.config.title, "generating OpenAPI document");
                Arc::new(self.generator.generate(SchemaContext {
                    title: &self.config.title,
                    version: &self.config.version,
                    description: &self.config.description,
                    openapi_version: &self.config.openapi_version,
                    routes: &self.routes,
                    tags: &self.config.tags,
                    servers: &self.config.servers,
                }))
            })
            .clone()
    }
}

/// The application composer.
pub struct App<G = OpenApiGenerator> {
    state: AppState<G>,
    handlers: Vec<(String, MethodRouter)>,
    middleware: Vec<Middleware>,
    lifecycle: Lifecycle,
}

impl App<OpenApiGenerator> {
    /// Creates an application with the default utoipa-based generator.
    pub fn new(config: AppConfig) -> Self {
        Self::with_generator(config, OpenApiGenerator)
    }
}

impl<G: SchemaGenerator> App<G> {
    /// Creates an application with a custom schema generator.
    ///
    /// Stores the configuration verbatim, initializes the empty route
    /// table, middleware list, exception table, and schema cache, then runs
    /// setup synchronously. No network or file IO happens here.
    pub fn with_generator(config: AppConfig, generator: G) -> Self {
        let mut app = Self {
            state: AppState {
                config,
                generator,
                routes: Vec::new(),
                exceptions: ExceptionTable::new(),
                schema: OnceLock::new(),
            },
            handlers: Vec::new(),
            middleware: Vec::new(),
            lifecycle: Lifecycle::Configured,
        };
        app.setup();
        app
    }

    /// Registers the auxiliary endpoints and default exception handlers.
    ///
    /// Runs exactly once, at the end of construction. Each auxiliary
    /// endpoint with a non-empty configured path contributes one route
    /// table entry, excluded from the generated document.
    fn setup(&mut self) {
        debug_assert_eq!(self.lifecycle, Lifecycle::Configured);

        let aux_paths = [
            enabled(&self.state.config.openapi_path),
            enabled(&self.state.config.docs_path),
            enabled(&self.state.config.redoc_path),
            enabled(&self.state.config.oauth2_redirect_path),
        ];
        for path in aux_paths.into_iter().flatten() {
            self.state
                .routes
                .push(RouteMeta::get(path).include_in_schema(false));
        }

        self.state.exceptions = ExceptionTable::with_defaults(self.state.config.debug);
        self.lifecycle = Lifecycle::SetupComplete;
    }

    /// Registers a user route: schema metadata plus the axum handler.
    pub fn route(mut self, meta: RouteMeta, handler: MethodRouter) -> Self {
        self.handlers.push((meta.path.clone(), handler));
        self.state.routes.push(meta);
        self
    }

    /// Appends a middleware to the stack.
    ///
    /// Middleware are applied in registration order when the router is
    /// assembled, so later registrations wrap earlier ones.
    pub fn middleware(mut self, apply: impl FnOnce(Router) -> Router + Send + 'static) -> Self {
        self.middleware.push(Box::new(apply));
        self
    }

    /// Registers or replaces the exception handler for an error class.
    ///
    /// Replacing a handler keeps its precedence slot; the catch-all stays
    /// the backstop.
    pub fn exception_handler(
        mut self,
        class: ErrorClass,
        handler: impl Fn(&AppError) -> Response + Send + Sync + 'static,
    ) -> Self {
        self.state
            .exceptions
            .insert(class, Box::new(handler) as ExceptionHandler);
        self
    }

    /// Dispatches an error through the exception table.
    pub fn handle_error(&self, err: &AppError) -> Response {
        self.state.exceptions.dispatch(err)
    }

    /// Returns the OpenAPI document, generating it on first call.
    pub fn openapi(&self) -> Arc<OpenApi> {
        self.state.openapi()
    }

    /// Current lifecycle state; `SetupComplete` from construction onward.
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn config(&self) -> &AppConfig {
        &self.state.config
    }

    /// Route table in registration order, auxiliary endpoints included.
    pub fn routes(&self) -> &[RouteMeta] {
        &self.state.routes
    }

    /// Assembles the axum router: auxiliary endpoints, user routes, then
    /// the trace layer and registered middleware.
    pub fn into_router(self) -> Router {
        let App {
            state,
            handlers,
            middleware,
            ..
        } = self;

        let mut user = Router::new();
        for (path, handler) in handlers {
            user = user.route(&path, handler);
        }

        let mut aux: Router<Arc<AppState<G>>> = Router::new();
        if let Some(path) = enabled(&state.config.openapi_path) {
            aux = aux.route(path, get(serve_openapi::<G>));
        }
        if let Some(path) = enabled(&state.config.docs_path) {
            aux = aux.route(path, get(serve_swagger_ui::<G>));
        }
        if let Some(path) = enabled(&state.config.redoc_path) {
            aux = aux.route(path, get(serve_redoc::<G>));
        }
        if let Some(path) = enabled(&state.config.oauth2_redirect_path) {
            aux = aux.route(path, get(serve_oauth2_redirect));
        }

        let router = user
            .merge(aux.with_state(Arc::new(state)))
            .layer(TraceLayer::new_for_http());

        middleware.into_iter().fold(router, |router, apply| apply(router))
    }

    /// Runs the application on the given address with graceful shutdown.
    pub async fn serve(self, addr: &str) -> anyhow::Result<()> {
        let title = self.state.config.title.clone();
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("{} listening on {}", title, listener.local_addr()?);

        axum::serve(listener, self.into_router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

/// A configured path counts only if non-empty; empty and absent both
/// disable the endpoint.
fn enabled(path: &Option<String>) -> Option<&str> {
    path.as_deref().filter(|p| !p.is_empty())
}

#[tracing::instrument(skip(state))]
async fn serve_openapi<G: SchemaGenerator>(
    State(state): State<Arc<AppState<G>>>,
) -> impl IntoResponse {
    Json((*state.openapi()).clone())
}

#[tracing::instrument(skip(state))]
async fn serve_swagger_ui<G: SchemaGenerator>(
    State(state): State<Arc<AppState<G>>>,
) -> Html<String> {
    let config = &state.config;
    Html(docs::swagger_ui_html(
        enabled(&config.openapi_path).unwrap_or(DEFAULT_OPENAPI_PATH),
        &config.title,
        enabled(&config.oauth2_redirect_path),
        config.swagger_init_oauth.as_ref(),
    ))
}

#[tracing::instrument(skip(state))]
async fn serve_redoc<G: SchemaGenerator>(State(state): State<Arc<AppState<G>>>) -> Html<String> {
    let config = &state.config;
    Html(docs::redoc_html(
        enabled(&config.openapi_path).unwrap_or(DEFAULT_OPENAPI_PATH),
        &config.title,
    ))
}

async fn serve_oauth2_redirect() -> Html<&'static str> {
    Html(docs::oauth2_redirect_html())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
