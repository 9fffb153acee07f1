//! Repository traits (ports)

pub mod audit_trail_sink;
pub mod group_permission_repository;
pub mod group_repository;
pub mod group_user_repository;
pub mod organization_repository;
pub mod permission_repository;
pub mod unit_of_work;
pub mod user_repository;

pub use audit_trail_sink::AuditTrailSink;
pub use group_permission_repository::GroupPermissionRepository;
pub use group_repository::GroupRepository;
pub use group_user_repository::GroupUserRepository;
pub use organization_repository::OrganizationRepository;
pub use permission_repository::PermissionRepository;
pub use unit_of_work::UnitOfWork;
pub use user_repository::UserRepository;

#[cfg(any(test, feature = "mocks"))]
pub use audit_trail_sink::MockAuditTrailSink;
#[cfg(any(test, feature = "mocks"))]
pub use group_permission_repository::MockGroupPermissionRepository;
#[cfg(any(test, feature = "mocks"))]
pub use group_repository::MockGroupRepository;
#[cfg(any(test, feature = "mocks"))]
pub use group_user_repository::MockGroupUserRepository;
#[cfg(any(test, feature = "mocks"))]
pub use organization_repository::MockOrganizationRepository;
#[cfg(any(test, feature = "mocks"))]
pub use permission_repository::MockPermissionRepository;
#[cfg(any(test, feature = "mocks"))]
pub use user_repository::MockUserRepository;
