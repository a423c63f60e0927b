//! Endpoint query API.
//!
//! The read surface of the directory: list all endpoint names, or fetch one
//! entry. Custom endpoints always win over discovered groups of the same
//! name and are served as plain text; discovered groups are JSON objects.

use std::collections::BTreeSet;

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tracing::error;

use crate::api::error::ApiError;
use crate::api::request_context::RequestContext;
use crate::state::AppState;

/// Create endpoint routes: /v1/endpoints
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_endpoints))
        .route("/{name}", get(get_endpoint))
}

/// GET /v1/endpoints
///
/// The sorted union of custom endpoint names and discovered group names.
/// Any internal failure yields a 500 with no partial results.
async fn list_endpoints(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<Json<Vec<String>>, ApiError> {
    let groups = state
        .directory()
        .resolve(state.store())
        .await
        .map_err(|e| {
            error!(request_id = %ctx.request_id, error = %e, "Failed to resolve the endpoint directory");
            ApiError::internal(
                "endpoint_discovery_failed",
                "Failed to resolve the endpoint directory",
            )
            .with_request_id(ctx.request_id.clone())
        })?;

    let names: BTreeSet<String> = state
        .registry()
        .names()
        .into_iter()
        .chain(groups.into_keys())
        .collect();

    Ok(Json(names.into_iter().collect()))
}

/// GET /v1/endpoints/{name}
///
/// A custom endpoint's produced value as plain text, or a discovered group
/// as JSON; 404 when the name matches neither.
async fn get_endpoint(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(name): Path<String>,
) -> Result<Response, ApiError> {
    if let Some(produced) = state.registry().produce(&name) {
        return match produced {
            Ok(value) => Ok(value.into_response()),
            Err(e) => {
                error!(request_id = %ctx.request_id, endpoint = %name, error = %e, "Custom endpoint producer failed");
                Err(ApiError::internal(
                    "custom_endpoint_failed",
                    format!("Custom endpoint '{name}' failed to produce a value"),
                )
                .with_request_id(ctx.request_id))
            }
        };
    }

    let mut groups = state
        .directory()
        .resolve(state.store())
        .await
        .map_err(|e| {
            error!(request_id = %ctx.request_id, endpoint = %name, error = %e, "Failed to resolve the endpoint directory");
            ApiError::internal(
                "endpoint_discovery_failed",
                "Failed to resolve the endpoint directory",
            )
            .with_request_id(ctx.request_id.clone())
        })?;

    match groups.remove(&name) {
        Some(group) => Ok(Json(group).into_response()),
        None => Err(ApiError::not_found(
            "endpoint_not_found",
            format!("No endpoint named '{name}'"),
        )
        .with_request_id(ctx.request_id)),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::to_bytes;
    use axum::http::{header::CONTENT_TYPE, Request, StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::directory::EndpointDirectory;
    use crate::registry::CustomEndpointRegistry;
    use crate::store::MemoryStateStore;

    fn test_app() -> (axum::Router, Arc<CustomEndpointRegistry>) {
        let registry = Arc::new(CustomEndpointRegistry::new());
        let state = AppState::new(
            Arc::new(MemoryStateStore::new()),
            registry.clone(),
            EndpointDirectory::new("kafka"),
        );
        (crate::api::create_router(state), registry)
    }

    #[tokio::test]
    async fn test_unknown_name_is_problem_json_404() {
        let (app, _registry) = test_app();
        let response = app
            .oneshot(
                Request::get("/v1/endpoints/nope")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers().get(CONTENT_TYPE).unwrap(),
            "application/problem+json"
        );

        let body = to_bytes(response.into_body(), 64 * 1024).await.unwrap();
        let problem: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(problem["code"], "endpoint_not_found");
        assert_eq!(problem["retryable"], false);
    }

    #[tokio::test]
    async fn test_custom_endpoint_is_plain_text() {
        let (app, registry) = test_app();
        registry.register("leader", || Ok("node-1:2181".to_string()));

        let response = app
            .oneshot(
                Request::get("/v1/endpoints/leader")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers().get(CONTENT_TYPE).unwrap();
        assert!(content_type.to_str().unwrap().starts_with("text/plain"));

        let body = to_bytes(response.into_body(), 64 * 1024).await.unwrap();
        assert_eq!(&body[..], b"node-1:2181");
    }

    #[tokio::test]
    async fn test_empty_store_lists_nothing() {
        let (app, _registry) = test_app();
        let response = app
            .oneshot(
                Request::get("/v1/endpoints")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), 64 * 1024).await.unwrap();
        let names: Vec<String> = serde_json::from_slice(&body).unwrap();
        assert!(names.is_empty());
    }
}
