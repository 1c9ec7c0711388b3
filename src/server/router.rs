use std::sync::Arc;
use std::time::Instant;

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::{Router, routing::get};

use super::admin::admin_router;
use super::public::public_router;
use crate::auth::SessionGate;
use crate::resolver::UrlResolver;
use crate::store::{AdminStore, ReadStore};

pub struct AppState {
    /// Restricted handle: public handlers can only read through this.
    pub read_store: Arc<dyn ReadStore>,
    /// Privileged handle, held only by handlers behind `RequireAdmin`.
    pub admin_store: Arc<dyn AdminStore>,
    pub sessions: SessionGate,
    pub resolver: UrlResolver,
}

async fn health() -> &'static str {
    "OK"
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let response = next.run(request).await;

    let latency = start.elapsed();
    let status = response.status();

    tracing::info!(
        "{} {} {} {}ms",
        method,
        uri.path(),
        status.as_u16(),
        latency.as_millis()
    );

    response
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/v1/admin", admin_router())
        .nest("/api/v1", public_router())
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}
