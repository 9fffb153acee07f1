//! # RBAC Shared
//!
//! Shared configuration, telemetry, constants and string helpers for the
//! RBAC administration crates.

pub mod constants;
pub mod utils;
pub mod telemetry;
pub mod config;
pub mod error;

pub use config::AppConfig;
pub use error::AppError;
