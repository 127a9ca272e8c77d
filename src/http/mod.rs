//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (assign and propagate request ID)
//!     → params.rs (decode query pairs, first value wins)
//!     → relay.rs / presets.rs (validate, call upstream)
//!     → health.rs (static liveness payload)
//!     → CORS headers added on the way out
//! ```

pub mod health;
pub mod params;
pub mod presets;
pub mod relay;
pub mod request;
pub mod server;

pub use request::X_REQUEST_ID;
pub use server::{AppState, HttpServer};
