//! # RBAC Core
//!
//! Domain entities, repository traits (ports), the shared list-query
//! pipeline, and the group / group-permission / group-user managers.

pub mod domain;
pub mod error;
pub mod memory;
pub mod messages;
pub mod models;
pub mod query;
pub mod repositories;
pub mod response;
pub mod services;

// Re-export domain entities
pub use domain::*;
pub use error::DomainError;
pub use response::{AuditDetail, ResponseEnvelope};
pub use services::{GroupManager, GroupPermissionManager, GroupUserManager};
