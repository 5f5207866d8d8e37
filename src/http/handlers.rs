//! The origin's fixed routes.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::HeaderMap,
    Json,
};
use serde::Serialize;
use serde_json::{Map, Value};
use time::{macros::format_description, OffsetDateTime};

use crate::http::error::ApiError;
use crate::http::request::ReceivedHeaders;

/// Shared, read-only state injected into handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Identifier reported by `GET /`.
    pub origin_name: Arc<str>,
    /// How long `GET /slow` waits before answering.
    pub slow_delay: Duration,
}

#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub status: &'static str,
    pub origin: String,
    pub hostname: String,
    pub time: String,
}

#[derive(Debug, Serialize)]
pub struct HeadersReport {
    pub client: Option<String>,
    pub headers: Map<String, Value>,
}

#[derive(Debug, Serialize)]
pub struct SlowReport {
    pub status: String,
}

/// `GET /`
pub async fn status(State(state): State<AppState>) -> Result<Json<StatusReport>, ApiError> {
    let hostname = hostname::get()
        .map_err(|e| ApiError::Internal(format!("hostname lookup failed: {}", e)))?
        .to_string_lossy()
        .into_owned();

    Ok(Json(StatusReport {
        status: "ok",
        origin: state.origin_name.to_string(),
        hostname,
        time: utc_timestamp(OffsetDateTime::now_utc())?,
    }))
}

/// `GET /headers`
///
/// The client address is only known when the server was started with
/// connect info; otherwise it is reported as `null`. Headers come from the
/// snapshot taken before the request ID was assigned, so a generated ID is
/// never reported as received.
pub async fn headers(request: Request) -> Json<HeadersReport> {
    let client = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip().to_string());

    let received = request
        .extensions()
        .get::<ReceivedHeaders>()
        .map_or(request.headers(), |snapshot| &snapshot.0);

    Json(HeadersReport {
        client,
        headers: header_map(received),
    })
}

/// `GET /slow`
pub async fn slow(State(state): State<AppState>) -> Json<SlowReport> {
    tokio::time::sleep(state.slow_delay).await;

    Json(SlowReport {
        status: format!("slow response ({}s)", state.slow_delay.as_secs()),
    })
}

/// `GET /error`
pub async fn error() -> ApiError {
    tracing::warn!("Serving simulated failure");
    ApiError::Simulated
}

/// Fallback for every unmatched path.
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// ISO-8601 UTC with microseconds and a literal `Z`.
fn utc_timestamp(now: OffsetDateTime) -> Result<String, ApiError> {
    let format = format_description!(
        "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:6]Z"
    );
    now.format(&format)
        .map_err(|e| ApiError::Internal(format!("timestamp formatting failed: {}", e)))
}

/// Flatten headers into name → value, in arrival order.
///
/// Repeated names keep their first value. Values that are not valid UTF-8
/// are decoded lossily rather than dropped.
fn header_map(headers: &HeaderMap) -> Map<String, Value> {
    let mut map = Map::new();
    for (name, value) in headers {
        map.entry(name.as_str())
            .or_insert_with(|| Value::String(String::from_utf8_lossy(value.as_bytes()).into_owned()));
    }
    map
}
