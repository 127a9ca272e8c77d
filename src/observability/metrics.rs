//! Metrics collection and exposition.
//!
//! # Metrics
//! - `tap_relay_requests_total` (counter): requests by route, status
//! - `tap_relay_request_duration_seconds` (histogram): handler latency by route
//! - `tap_relay_upstream_requests_total` (counter): upstream calls by outcome
//! - `tap_relay_upstream_duration_seconds` (histogram): upstream latency
//!
//! Without an installed recorder every call here is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one handled request.
pub fn record_request(route: String, status: u16, start: Instant) {
    let elapsed = start.elapsed().as_secs_f64();
    counter!(
        "tap_relay_requests_total",
        "route" => route.clone(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("tap_relay_request_duration_seconds", "route" => route).record(elapsed);
}

/// Record one upstream round trip.
pub fn record_upstream(ok: bool, start: Instant) {
    let outcome = if ok { "ok" } else { "error" };
    counter!("tap_relay_upstream_requests_total", "outcome" => outcome).increment(1);
    histogram!("tap_relay_upstream_duration_seconds").record(start.elapsed().as_secs_f64());
}

/// Route-level middleware that counts requests per matched path.
pub async fn track_requests(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());

    let response = next.run(request).await;
    record_request(route, response.status().as_u16(), start);
    response
}
