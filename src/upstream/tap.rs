//! Client for the upstream TAP `sync` endpoint.

use std::time::{Duration, Instant};

use axum::body::Bytes;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use url::Url;

use crate::config::{ObservabilityConfig, UpstreamConfig};
use crate::observability::metrics;
use crate::upstream::UpstreamError;

/// Content type assumed when the upstream does not declare one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Output format requested when the caller does not name one.
pub const DEFAULT_FORMAT: &str = "json";

/// A validated synchronous TAP query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TapRequest {
    pub query: String,
    pub format: String,
}

impl TapRequest {
    /// Build a request with the default `json` format.
    pub fn json(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            format: DEFAULT_FORMAT.to_string(),
        }
    }
}

/// The upstream payload, kept opaque.
#[derive(Debug, Clone)]
pub struct TapResponse {
    /// Raw upstream value, or `application/json` when absent.
    pub content_type: HeaderValue,
    pub body: Bytes,
}

/// Shared handle to the upstream TAP service.
///
/// Cloning is cheap; the inner `reqwest::Client` is reference counted.
#[derive(Debug, Clone)]
pub struct TapClient {
    http: reqwest::Client,
    base_url: Url,
    log_urls: bool,
}

impl TapClient {
    /// Create a client from the upstream and observability settings.
    pub fn new(
        upstream: &UpstreamConfig,
        observability: &ObservabilityConfig,
    ) -> Result<Self, UpstreamError> {
        let base_url = Url::parse(&upstream.base_url)?;

        let mut builder = reqwest::Client::builder().user_agent(upstream.user_agent.clone());
        if let Some(secs) = upstream.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().map_err(UpstreamError::Client)?;

        Ok(Self {
            http,
            base_url,
            log_urls: observability.log_upstream_urls,
        })
    }

    /// Build the upstream URL with `query` and `format` form-encoded.
    pub fn sync_url(&self, request: &TapRequest) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("query", &request.query)
            .append_pair("format", &request.format);
        url
    }

    /// Run one synchronous query against the upstream.
    ///
    /// Transport failures, non-2xx statuses and body read errors all surface
    /// as [`UpstreamError::Transport`]. Nothing is retried. With URL logging
    /// off, the error carries no URL, so neither logs nor the 500 body see
    /// the query text.
    pub async fn sync_query(&self, request: &TapRequest) -> Result<TapResponse, UpstreamError> {
        let url = self.sync_url(request);

        if self.log_urls {
            tracing::info!(url = %url, "Proxying request to upstream");
        } else {
            tracing::info!(
                upstream = %self.base_url,
                format = %request.format,
                query_len = request.query.len(),
                "Proxying request to upstream"
            );
        }

        let start = Instant::now();
        let result = self.fetch(url).await;
        metrics::record_upstream(result.is_ok(), start);
        result
    }

    fn redact(&self, error: reqwest::Error) -> UpstreamError {
        if self.log_urls {
            UpstreamError::Transport(error)
        } else {
            UpstreamError::Transport(error.without_url())
        }
    }

    async fn fetch(&self, url: Url) -> Result<TapResponse, UpstreamError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| self.redact(e))?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .cloned()
            .unwrap_or_else(|| HeaderValue::from_static(DEFAULT_CONTENT_TYPE));
        let body = response.bytes().await.map_err(|e| self.redact(e))?;

        tracing::debug!(
            content_type = ?content_type,
            bytes = body.len(),
            "Upstream response received"
        );

        Ok(TapResponse { content_type, body })
    }
}
