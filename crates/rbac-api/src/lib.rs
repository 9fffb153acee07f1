//! # RBAC API
//!
//! HTTP handlers, bearer-token extraction, rate limiting and audit
//! emission for the group administration endpoints.

pub mod audit;
pub mod auth;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::router;
pub use state::AppState;
