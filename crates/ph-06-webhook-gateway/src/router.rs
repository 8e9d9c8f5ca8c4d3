//! HTTP routes.

use crate::gateway::WebhookGateway;
use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::{HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::{info_span, warn, Instrument};
use uuid::Uuid;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Application state shared across handlers
#[derive(Clone)]
struct AppState {
    gateway: Arc<WebhookGateway>,
}

/// `POST /webhook` and `GET /health`.
///
/// Bodies larger than `max_body_bytes` are answered with 413 before the
/// pipeline runs.
pub fn build_router(gateway: Arc<WebhookGateway>, max_body_bytes: usize) -> Router {
    let state = AppState { gateway };

    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_body_bytes));

    Router::new()
        .route("/webhook", post(handle_webhook))
        .route("/health", get(health_check))
        .layer(middleware)
        .with_state(state)
}

async fn handle_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let signature = headers
        .get(state.gateway.signature_header())
        .and_then(|value| value.to_str().ok());

    let span = info_span!("webhook", request_id = %request_id);
    let result = state.gateway.handle(&body, signature).instrument(span).await;

    let mut response = match result {
        Ok(outcome) => (state.gateway.status_for(&outcome), Json(outcome)).into_response(),
        Err(e) => {
            warn!(request_id = %request_id, error = %e, "Webhook rejected");
            e.into_response()
        }
    };

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let registry = state.gateway.dispatcher().registry();
    Json(serde_json::json!({
        "status": "healthy",
        "handlers": registry.handler_count(),
        "providers": registry.provider_count(),
    }))
}
