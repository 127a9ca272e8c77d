//! Upstream TAP service access.
//!
//! # Data Flow
//! ```text
//! TapRequest (validated query + format)
//!     → tap.rs (build URL, single GET, no retry)
//!     → TapResponse (opaque bytes + content type)
//! ```

pub mod tap;

use thiserror::Error;

pub use tap::{TapClient, TapRequest, TapResponse, DEFAULT_CONTENT_TYPE, DEFAULT_FORMAT};

/// Failure while talking to the upstream service.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("invalid upstream base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    #[error("failed to build upstream client: {0}")]
    Client(reqwest::Error),

    #[error("{0}")]
    Transport(reqwest::Error),
}
