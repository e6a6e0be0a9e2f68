//! HTTP application assembly.
//!
//! Builds the full Axum router from the shared state and server config:
//! API routes, uploaded-file serving, request tracing, CORS, and timeouts.

use std::time::Duration;

use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::adapters::http::{appointment_routes, availability_routes, payment_routes, ApiState};
use crate::config::{ServerConfig, StorageConfig};

async fn health() -> &'static str {
    "ok"
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    match server.cors_origins_list() {
        origins if origins.is_empty() => layer.allow_origin(Any),
        origins => {
            let parsed: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|o| o.parse().ok())
                .collect();
            layer.allow_origin(AllowOrigin::list(parsed))
        }
    }
}

/// Builds the application router.
///
/// Attachment URLs returned by the API resolve under the storage config's
/// public base, served straight from the upload directory.
pub fn build_router(state: ApiState, server: &ServerConfig, storage: &StorageConfig) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/appointments", appointment_routes())
        .nest("/api/availability", availability_routes())
        .nest("/api/payments", payment_routes())
        .with_state(state)
        .nest_service(
            storage.public_base.as_str(),
            ServeDir::new(&storage.upload_dir),
        )
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(server))
                .layer(TimeoutLayer::new(Duration::from_secs(
                    server.request_timeout_secs,
                ))),
        )
}
