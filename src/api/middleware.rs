use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use tracing::{info, info_span, Instrument};

use crate::observability::{get_metrics, LatencyTimer};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Access logging with request id and latency; also feeds the HTTP metrics.
///
/// Paths are recorded by route template so account ids do not explode label
/// cardinality.
pub async fn request_logging_middleware(request: Request, next: Next) -> Response {
    let timer = LatencyTimer::new();

    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();
    let method = request.method().clone();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let span = info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        route = %route,
    );

    let response = next.run(request).instrument(span).await;

    let latency_ms = timer.elapsed_ms();
    let status = response.status().as_u16();

    info!(
        request_id = %request_id,
        method = %method,
        route = %route,
        status = status,
        latency_ms = latency_ms,
        "request completed"
    );
    get_metrics().record_http_request(method.as_str(), &route, status, latency_ms);

    response
}
