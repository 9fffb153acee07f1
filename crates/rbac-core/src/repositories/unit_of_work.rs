//! Unit of work: one repository per entity.

use super::{
    GroupPermissionRepository, GroupRepository, GroupUserRepository, OrganizationRepository,
    PermissionRepository, UserRepository,
};

/// Each write is committed when the call returns.
pub trait UnitOfWork: Send + Sync {
    fn groups(&self) -> &dyn GroupRepository;
    fn organizations(&self) -> &dyn OrganizationRepository;
    fn permissions(&self) -> &dyn PermissionRepository;
    fn group_permissions(&self) -> &dyn GroupPermissionRepository;
    fn users(&self) -> &dyn UserRepository;
    fn group_users(&self) -> &dyn GroupUserRepository;
}
