use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Query, State},
    http::{HeaderMap, Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{any, get},
    Router,
};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::handler::{self, Context, Event, HandlerResponse};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Shared by every request. Holds settings only; connections are opened per
/// request by the handler.
#[derive(Clone)]
pub struct AppState {
    database_url: Arc<str>,
    requests: Arc<AtomicU64>,
}

impl AppState {
    pub fn new(database_url: impl Into<Arc<str>>) -> Self {
        Self {
            database_url: database_url.into(),
            requests: Arc::new(AtomicU64::new(0)),
        }
    }

    fn next_request_id(&self) -> String {
        format!("req-{}", self.requests.fetch_add(1, Ordering::Relaxed) + 1)
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", any(invoke))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// ANY / - hand the request to the dispatch function as an event
async fn invoke(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
    body: String,
) -> Result<Response, ApiError> {
    let request_id = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| state.next_request_id());

    let event = Event {
        http_method: Some(method.as_str().to_string()),
        query_string_parameters: (!params.is_empty()).then_some(params),
        body: (!body.is_empty()).then_some(body),
    };

    let response = handler::handle(event, Context { request_id }, &state.database_url).await?;
    Ok(to_http(response))
}

fn to_http(response: HandlerResponse) -> Response {
    let mut builder = axum::http::Response::builder().status(response.status_code);
    for (name, value) in &response.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }

    match builder.body(Body::from(response.body)) {
        Ok(response) => response,
        Err(e) => {
            tracing::error!("Failed to build response: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    timestamp: i64,
}

pub async fn health_check() -> (StatusCode, Json<HealthResponse>) {
    let response = HealthResponse {
        status: "ok".to_string(),
        timestamp: chrono::Utc::now().timestamp(),
    };

    (StatusCode::OK, Json(response))
}
