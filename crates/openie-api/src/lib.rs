//! OpenIE API - HTTP server
//!
//! Exposes open information extraction over a single HTTP endpoint:
//! `GET /?text=...` returns the extracted facts as a JSON array.

pub mod error;
pub mod handlers;
pub mod query;
pub mod routes;
pub mod state;
pub mod telemetry;

pub use routes::create_router;
pub use state::AppState;
