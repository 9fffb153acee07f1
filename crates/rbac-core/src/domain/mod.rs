//! # RBAC Core - Domain Module
//!
//! Domain entities for group, permission and user-mapping administration.

pub mod audit_trail;
pub mod group;
pub mod group_permission;
pub mod group_user_mapping;
pub mod organization;
pub mod permission;
pub mod user;

pub use audit_trail::{AuditAction, AuditSection, AuditTrailRecord};
pub use group::Group;
pub use group_permission::GroupPermission;
pub use group_user_mapping::GroupUserMapping;
pub use organization::Organization;
pub use permission::Permission;
pub use user::User;
