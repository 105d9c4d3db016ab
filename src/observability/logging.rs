//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the `tracing` subscriber (pretty or JSON)
//! - Emit one access log line per request:
//!   `METHOD URL STATUS CONTENT-LENGTH - LATENCY ms [BODY]`
//!   where BODY is the JSON payload of POST requests
//! - Feed request metrics from the same measurement

use axum::{
    body::{to_bytes, Body, HttpBody},
    extract::{MatchedPath, Request, State},
    http::{header, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;
use crate::http::request::RequestIdExt;
use crate::observability::metrics;

/// Install the global subscriber. `RUST_LOG` wins over the configured filter.
pub fn init_logging(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    let json = config.json_logs;
    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(|| tracing_subscriber::fmt::layer()))
        .init();
}

/// Settings for [`access_log`].
#[derive(Debug, Clone, Copy)]
pub struct AccessLogSettings {
    /// Emit the log line (metrics are recorded regardless).
    pub enabled: bool,
    /// Upper bound when buffering POST bodies for the log line.
    pub max_body_size: usize,
}

/// Access log and request metrics middleware.
pub async fn access_log(
    State(settings): State<AccessLogSettings>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let uri = request.uri().clone();
    let request_id = request.request_id().to_string();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let (request, logged_body) = if settings.enabled && method == Method::POST {
        let (parts, body) = request.into_parts();
        let bytes = match to_bytes(body, settings.max_body_size).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(request_id = %request_id, error = %e, "Request body rejected");
                metrics::record_request(method.as_str(), 413, &route, start);
                return (
                    StatusCode::PAYLOAD_TOO_LARGE,
                    Json(json!({ "error": "request body too large" })),
                )
                    .into_response();
            }
        };
        let logged = String::from_utf8_lossy(&bytes).into_owned();
        (Request::from_parts(parts, Body::from(bytes)), Some(logged))
    } else {
        (request, None)
    };

    let response = next.run(request).await;

    let status = response.status().as_u16();
    metrics::record_request(method.as_str(), status, &route, start);

    if settings.enabled {
        let content_length = response
            .headers()
            .get(header::CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .or_else(|| response.body().size_hint().exact().map(|n| n.to_string()))
            .unwrap_or_else(|| "-".to_string());
        let latency_ms = start.elapsed().as_secs_f64() * 1000.0;

        let mut line = format!(
            "{} {} {} {} - {:.3} ms",
            method, uri, status, content_length, latency_ms
        );
        if let Some(body) = logged_body {
            line.push(' ');
            line.push_str(&body);
        }

        tracing::info!(request_id = %request_id, route = %route, "{}", line);
    }

    response
}
