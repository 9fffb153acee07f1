//! PostgreSQL unit of work

use sqlx::PgPool;

use rbac_core::repositories::{
    GroupPermissionRepository, GroupRepository, GroupUserRepository, OrganizationRepository,
    PermissionRepository, UnitOfWork, UserRepository,
};

use super::{
    PgGroupPermissionRepository, PgGroupRepository, PgGroupUserRepository,
    PgOrganizationRepository, PgPermissionRepository, PgUserRepository,
};

/// Bundles one repository per entity over a shared pool. Every write is a
/// single auto-committed statement.
pub struct PgUnitOfWork {
    groups: PgGroupRepository,
    organizations: PgOrganizationRepository,
    permissions: PgPermissionRepository,
    group_permissions: PgGroupPermissionRepository,
    users: PgUserRepository,
    group_users: PgGroupUserRepository,
}

impl PgUnitOfWork {
    pub fn new(pool: PgPool) -> Self {
        Self {
            groups: PgGroupRepository::new(pool.clone()),
            organizations: PgOrganizationRepository::new(pool.clone()),
            permissions: PgPermissionRepository::new(pool.clone()),
            group_permissions: PgGroupPermissionRepository::new(pool.clone()),
            users: PgUserRepository::new(pool.clone()),
            group_users: PgGroupUserRepository::new(pool),
        }
    }
}

impl UnitOfWork for PgUnitOfWork {
    fn groups(&self) -> &dyn GroupRepository {
        &self.groups
    }

    fn organizations(&self) -> &dyn OrganizationRepository {
        &self.organizations
    }

    fn permissions(&self) -> &dyn PermissionRepository {
        &self.permissions
    }

    fn group_permissions(&self) -> &dyn GroupPermissionRepository {
        &self.group_permissions
    }

    fn users(&self) -> &dyn UserRepository {
        &self.users
    }

    fn group_users(&self) -> &dyn GroupUserRepository {
        &self.group_users
    }
}
