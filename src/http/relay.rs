//! The `/tap/sync` relay.
//!
//! # Flow
//! ```text
//! ?query=..&format=..
//!     → QueryPairs (decoded, first value wins)
//!     → TapParams (raw, all optional)
//!     → TapRequest (query required, format defaults to json)
//!     → TapClient::sync_query (one GET, no retry)
//!     → 200 + upstream bytes + content type
//! ```
//!
//! Any upstream failure becomes a 500 carrying the error text.

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

use crate::error::RelayError;
use crate::http::params::QueryPairs;
use crate::http::request::request_id_of;
use crate::http::server::AppState;
use crate::upstream::{TapRequest, TapResponse, DEFAULT_CONTENT_TYPE, DEFAULT_FORMAT};

/// Query-string parameters as received.
#[derive(Debug, Default)]
pub struct TapParams {
    pub query: Option<String>,
    pub format: Option<String>,
}

impl From<&QueryPairs> for TapParams {
    fn from(pairs: &QueryPairs) -> Self {
        Self {
            query: pairs.first("query").map(str::to_owned),
            format: pairs.first("format").map(str::to_owned),
        }
    }
}

impl TryFrom<TapParams> for TapRequest {
    type Error = RelayError;

    fn try_from(params: TapParams) -> Result<Self, Self::Error> {
        let query = params
            .query
            .filter(|q| !q.is_empty())
            .ok_or(RelayError::MissingQuery)?;
        let format = params
            .format
            .filter(|f| !f.is_empty())
            .unwrap_or_else(|| DEFAULT_FORMAT.to_string());

        Ok(TapRequest { query, format })
    }
}

/// `GET /tap/sync`
pub async fn tap_sync(
    State(state): State<AppState>,
    headers: HeaderMap,
    pairs: QueryPairs,
) -> Result<Response, RelayError> {
    let request_id = request_id_of(&headers);

    let request = TapRequest::try_from(TapParams::from(&pairs)).inspect_err(|e| {
        tracing::warn!(request_id = %request_id, error = %e, "Rejected relay request");
    })?;

    relay(&state, &request, &request_id).await
}

/// Run a validated request upstream and shape the reply.
pub async fn relay(
    state: &AppState,
    request: &TapRequest,
    request_id: &str,
) -> Result<Response, RelayError> {
    match state.tap.sync_query(request).await {
        Ok(upstream) => Ok(passthrough(upstream)),
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Error proxying request");
            Err(e.into())
        }
    }
}

/// Pick the outgoing content type for an upstream one.
///
/// Any `application/json` variant (e.g. with a charset) is normalized to the
/// bare media type; everything else passes through byte for byte.
pub fn response_content_type(upstream: &HeaderValue) -> HeaderValue {
    if upstream.as_bytes().starts_with(DEFAULT_CONTENT_TYPE.as_bytes()) {
        HeaderValue::from_static(DEFAULT_CONTENT_TYPE)
    } else {
        upstream.clone()
    }
}

fn passthrough(upstream: TapResponse) -> Response {
    let content_type = response_content_type(&upstream.content_type);

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, content_type)],
        upstream.body,
    )
        .into_response()
}
