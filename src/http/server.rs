//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, access log, limits, CORS)
//! - Serve an optional bundled front-end for unmatched paths
//! - Bind server to listener and shut down gracefully

use axum::{
    handler::HandlerWithoutStateExt,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, MethodRouter},
    Router,
};
use std::any::Any;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::PhonebookConfig;
use crate::http::error::ApiError;
use crate::http::handlers::{
    create_person, delete_person, get_person, info, list_persons, unknown_endpoint,
    update_person,
};
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::observability::logging::{access_log, AccessLogSettings};
use crate::store::PersonStore;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PersonStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn PersonStore>) -> Self {
        Self { store }
    }
}

/// HTTP server for the phonebook API.
pub struct HttpServer {
    router: Router,
    config: PhonebookConfig,
}

impl HttpServer {
    /// Create a new HTTP server over the given store.
    pub fn new(config: PhonebookConfig, store: Arc<dyn PersonStore>) -> Self {
        let router = build_router(&config, AppState::new(store));
        Self { router, config }
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            backend = %self.config.storage.backend,
            "Server running on port {}",
            addr.port()
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &PhonebookConfig {
        &self.config
    }

    /// Consume the server, returning its router (for in-process testing).
    pub fn into_router(self) -> Router {
        self.router
    }
}

fn collection_routes() -> MethodRouter<AppState> {
    get(list_persons)
        .post(create_person)
        .fallback(unknown_endpoint)
}

fn item_routes() -> MethodRouter<AppState> {
    get(get_person)
        .put(update_person)
        .delete(delete_person)
        .fallback(unknown_endpoint)
}

/// The person resource mounted under `prefix`.
fn person_routes(prefix: &str) -> Router<AppState> {
    Router::new()
        .route(prefix, collection_routes())
        .route(&format!("{}/", prefix), collection_routes())
        .route(&format!("{}/{{id}}", prefix), item_routes())
}

/// Build the Axum router with all middleware layers.
pub fn build_router(config: &PhonebookConfig, state: AppState) -> Router {
    let router = Router::new()
        .route("/info", get(info).fallback(unknown_endpoint))
        .merge(person_routes("/api/persons"))
        .merge(person_routes("/persons"));

    let router = match &config.http.static_dir {
        Some(dir) => router.fallback_service(
            ServeDir::new(dir)
                .call_fallback_on_method_not_allowed(true)
                .not_found_service(unknown_endpoint.into_service()),
        ),
        None => router.fallback(unknown_endpoint),
    };

    let access = AccessLogSettings {
        enabled: config.observability.access_log,
        max_body_size: config.http.max_body_size,
    };

    let mut router = router
        .with_state(state)
        .layer(middleware::from_fn_with_state(access, access_log))
        .layer(RequestBodyLimitLayer::new(config.http.max_body_size))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.timeouts.request_secs),
        ))
        .layer(CatchPanicLayer::custom(handle_panic));

    if config.http.cors_enabled {
        router = router.layer(CorsLayer::permissive());
    }

    router
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(set_request_id_layer())
}

/// Turn a handler panic into the generic 500 body.
pub(crate) fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    tracing::error!(panic = %detail, "Handler panicked");
    ApiError::Internal.into_response()
}
