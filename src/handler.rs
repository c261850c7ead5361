//! The dispatch function: one event in, one HTTP-shaped response out.
//!
//! `handle` is stateless. A connection is opened only for a recognised
//! route and is closed before returning, whether the route succeeded or not.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use sqlx::Connection;
use tracing::Instrument;

use crate::db;
use crate::error::ApiError;
use crate::models::ErrorBody;
use crate::routes::{Route, DEFAULT_ENDPOINT};

pub const ALLOWED_METHODS: &str = "GET, POST, PUT, OPTIONS";
pub const ALLOWED_HEADERS: &str = "Content-Type";
/// Preflight cache lifetime, 24 hours.
pub const PREFLIGHT_MAX_AGE: &str = "86400";

/// Incoming request descriptor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Event {
    pub http_method: Option<String>,
    pub query_string_parameters: Option<HashMap<String, String>>,
    pub body: Option<String>,
}

impl Event {
    pub fn method(&self) -> &str {
        self.http_method.as_deref().unwrap_or("GET")
    }

    pub fn endpoint(&self) -> &str {
        self.query_string_parameters
            .as_ref()
            .and_then(|params| params.get("endpoint"))
            .map(String::as_str)
            .unwrap_or(DEFAULT_ENDPOINT)
    }
}

/// Invocation metadata; only used to tag logs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Context {
    pub request_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
    pub is_base64_encoded: bool,
}

impl HandlerResponse {
    fn json<T: Serialize>(status_code: u16, body: &T) -> Result<Self, ApiError> {
        let body = serde_json::to_string(body).map_err(ApiError::Serialize)?;
        let headers = BTreeMap::from([
            ("Content-Type".to_string(), "application/json".to_string()),
            ("Access-Control-Allow-Origin".to_string(), "*".to_string()),
        ]);

        Ok(Self {
            status_code,
            headers,
            body,
            is_base64_encoded: false,
        })
    }

    fn preflight() -> Self {
        let headers = BTreeMap::from([
            ("Access-Control-Allow-Origin".to_string(), "*".to_string()),
            ("Access-Control-Allow-Methods".to_string(), ALLOWED_METHODS.to_string()),
            ("Access-Control-Allow-Headers".to_string(), ALLOWED_HEADERS.to_string()),
            ("Access-Control-Max-Age".to_string(), PREFLIGHT_MAX_AGE.to_string()),
        ]);

        Self {
            status_code: 200,
            headers,
            body: String::new(),
            is_base64_encoded: false,
        }
    }

    fn not_found() -> Result<Self, ApiError> {
        Self::json(
            404,
            &ErrorBody {
                error: "Endpoint not found".to_string(),
            },
        )
    }
}

/// Serve one request.
///
/// Returns `Err` only for faults with no designed response (database
/// failures, unreadable bodies); those are logged here before propagating.
pub async fn handle(
    event: Event,
    context: Context,
    database_url: &str,
) -> Result<HandlerResponse, ApiError> {
    let span = tracing::info_span!(
        "invoke",
        request_id = %context.request_id,
        method = %event.method(),
        endpoint = %event.endpoint(),
    );

    async move {
        let result = dispatch(&event, database_url).await;
        if let Err(err) = &result {
            tracing::error!(kind = err.kind(), error = %err, "internal fault, uncaught");
        }
        result
    }
    .instrument(span)
    .await
}

async fn dispatch(event: &Event, database_url: &str) -> Result<HandlerResponse, ApiError> {
    if event.method() == "OPTIONS" {
        return Ok(HandlerResponse::preflight());
    }

    let Some(route) = Route::resolve(event.endpoint(), event.method()) else {
        tracing::warn!("no route for request");
        return HandlerResponse::not_found();
    };
    tracing::debug!(?route, mutation = route.is_mutation(), "resolved route");

    let mut conn = db::connect(database_url).await?;
    let outcome = route.run(&mut conn, event.body.as_deref()).await;
    if let Err(err) = conn.close().await {
        tracing::warn!(error = %err, "failed to close database connection");
    }

    HandlerResponse::json(200, &outcome?)
}
