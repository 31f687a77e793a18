//! Same-origin content proxy: forwards typed content requests to the delivery source.

pub mod error;
mod handlers;
mod middleware;

use std::sync::Arc;

use axum::{Router, middleware as axum_middleware, routing::get};

use crate::application::source::ContentSource;
use crate::config::HEALTH_PATH;

pub use error::{ErrorReport, ProxyError};
pub use middleware::RequestContext;

#[derive(Clone)]
pub struct ProxyState {
    pub source: Arc<dyn ContentSource>,
}

impl ProxyState {
    pub fn new(source: Arc<dyn ContentSource>) -> Self {
        Self { source }
    }
}

/// Router answering `GET {proxy_path}` with `{ "data": <collection> }` plus a health probe.
pub fn build_router(state: ProxyState, proxy_path: &str) -> Router {
    Router::new()
        .route(proxy_path, get(handlers::content))
        .route(HEALTH_PATH, get(handlers::health))
        .with_state(state)
        .layer(axum_middleware::from_fn(middleware::log_responses))
        .layer(axum_middleware::from_fn(middleware::set_request_context))
}
