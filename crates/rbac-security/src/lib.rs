//! # RBAC Security
//!
//! Bearer token handling and the permission claim names that gate the
//! administration endpoints.

pub mod jwt;
pub mod permissions;

pub use jwt::{AccessClaims, JwtError, JwtService};
