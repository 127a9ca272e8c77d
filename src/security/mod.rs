//! Security-related response policy.
//!
//! The relay has no authentication and no rate limiting. Its only policy is
//! the cross-origin header set in [`cors`].

pub mod cors;

pub use cors::cors_layer;
