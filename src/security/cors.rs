//! Cross-origin policy.
//!
//! Every response, errors included, allows any origin. Browsers may read the
//! body and all response headers from script. Preflight requests are answered
//! by the layer without reaching a handler.

use std::time::Duration;

use axum::http::Method;
use tower_http::cors::{Any, CorsLayer};

/// How long browsers may cache a preflight result.
pub const PREFLIGHT_MAX_AGE: Duration = Duration::from_secs(600);

/// Permissive CORS layer applied to the whole router.
///
/// Never combine this with `allow_credentials(true)`; a wildcard origin
/// with credentials is rejected by browsers.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::HEAD, Method::OPTIONS])
        .allow_headers(Any)
        .expose_headers(Any)
        .max_age(PREFLIGHT_MAX_AGE)
}
