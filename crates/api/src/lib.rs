//! HTTP API layer for places-rs.
//!
//! - **Endpoints**: places, reviews, scorecards, sign-up and sign-in
//! - **Extractors**: authentication and pagination
//! - **Middleware**: bearer token authentication
//!
//! Built on Axum 0.8.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use endpoints::router;
pub use middleware::AppState;
