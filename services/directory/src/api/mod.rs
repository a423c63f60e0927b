//! HTTP API handlers and routing.

pub mod error;
mod health;
mod request_context;
mod v1;

use axum::{
    http::{header, Method},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::state::AppState;

/// Create the main API router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration; the query surface is read-only.
    let cors = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE])
        .allow_origin(Any);

    Router::new()
        // Health endpoints live at the root; axum 0.8 rejects nesting there
        .merge(health::routes())
        // API v1 routes
        .nest("/v1", v1::routes())
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Application state
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::directory::EndpointDirectory;
    use crate::registry::CustomEndpointRegistry;
    use crate::store::MemoryStateStore;

    // Router construction must not panic: axum 0.8 rejects `.nest("/", ...)`
    // and requires root-level routes to be merged.
    #[tokio::test]
    async fn test_root_health_routes_are_served() {
        let state = AppState::new(
            Arc::new(MemoryStateStore::new()),
            Arc::new(CustomEndpointRegistry::new()),
            EndpointDirectory::new("kafka"),
        );
        let app = create_router(state);

        for path in ["/healthz", "/readyz", "/livez"] {
            let response = app
                .clone()
                .oneshot(
                    Request::get(path)
                        .body(axum::body::Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{path}");
        }
    }
}
