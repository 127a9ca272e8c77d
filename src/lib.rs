//! CORS relay for the NASA Exoplanet Archive TAP service.
//!
//! Browser clients cannot read the archive's `TAP/sync` responses directly
//! because the archive sends no cross-origin headers. This crate forwards
//! `GET /tap/sync?query=..&format=..` upstream and returns the body untouched,
//! with permissive CORS headers added.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod security;
pub mod upstream;

pub use config::schema::RelayConfig;
pub use error::RelayError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use upstream::{TapClient, TapRequest};
