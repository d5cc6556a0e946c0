use axum::{Router, routing::{get, post}};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::config::{CONFIG, FailurePolicy};
use crate::lookup::WikiTreeClient;

pub mod handlers;
pub mod models;

/// Shared by every handler. Widget state itself is per request: each page
/// load starts from an empty form.
#[derive(Clone)]
pub struct AppState {
    pub lookup: WikiTreeClient,
    pub host_page: Arc<str>,
    pub container_id: Arc<str>,
    pub failure_policy: FailurePolicy,
}

impl AppState {
    pub fn new(
        lookup: WikiTreeClient,
        host_page: impl Into<Arc<str>>,
        container_id: impl Into<Arc<str>>,
        failure_policy: FailurePolicy,
    ) -> Self {
        Self {
            lookup,
            host_page: host_page.into(),
            container_id: container_id.into(),
            failure_policy,
        }
    }

    pub fn from_config(host_page: impl Into<Arc<str>>) -> Self {
        Self::new(
            WikiTreeClient::from_config(),
            host_page,
            CONFIG.container_id.as_str(),
            CONFIG.failure_policy,
        )
    }
}

pub fn create_router(state: AppState, static_dir: &str) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Widget page
        .route("/", get(handlers::page_handler).post(handlers::form_submit_handler))
        // API routes
        .route("/api/submit", post(handlers::submit_handler))
        .with_state(state)
        // Static assets for the host page
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
