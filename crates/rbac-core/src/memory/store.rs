// ============================================================================
// RBAC Core - In-Memory Store
// File: crates/rbac-core/src/memory/store.rs
// Description: Unit of work over process-local tables
// ============================================================================

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use rbac_shared::utils::equals_ignore_case;

use crate::domain::{Group, GroupPermission, GroupUserMapping, Organization, Permission, User};
use crate::error::DomainError;
use crate::repositories::{
    GroupPermissionRepository, GroupRepository, GroupUserRepository, OrganizationRepository,
    PermissionRepository, UnitOfWork, UserRepository,
};

/// Read-only reference data loaded at construction.
#[derive(Debug, Clone, Default)]
pub struct Seed {
    pub organizations: Vec<Organization>,
    pub permissions: Vec<Permission>,
    pub users: Vec<User>,
}

#[derive(Debug, Default)]
struct Tables {
    organizations: BTreeMap<String, Organization>,
    permissions: BTreeMap<String, Permission>,
    users: BTreeMap<String, User>,
    groups: BTreeMap<String, Group>,
    group_permissions: BTreeMap<String, GroupPermission>,
    group_users: BTreeMap<String, GroupUserMapping>,
    group_sequence: i64,
    group_permission_sequence: i64,
    group_user_sequence: i64,
}

impl Tables {
    fn group_name_taken(&self, candidate: &Group) -> bool {
        self.groups.values().any(|g| {
            g.group_id != candidate.group_id
                && g.organization_id == candidate.organization_id
                && equals_ignore_case(&g.group_name, &candidate.group_name)
        })
    }
}

/// Implements every repository over one lock, so each check-and-write is
/// atomic with respect to other callers.
#[derive(Debug, Default)]
pub struct InMemoryUnitOfWork {
    tables: RwLock<Tables>,
}

impl InMemoryUnitOfWork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(seed: Seed) -> Self {
        let tables = Tables {
            organizations: seed
                .organizations
                .into_iter()
                .map(|o| (o.organization_id.clone(), o))
                .collect(),
            permissions: seed
                .permissions
                .into_iter()
                .map(|p| (p.permission_id.clone(), p))
                .collect(),
            users: seed.users.into_iter().map(|u| (u.user_id.clone(), u)).collect(),
            ..Tables::default()
        };
        Self {
            tables: RwLock::new(tables),
        }
    }
}

fn missing(entity: &str, id: &str) -> DomainError {
    DomainError::InternalError(format!("{} {} does not exist", entity, id))
}

#[async_trait]
impl GroupRepository for InMemoryUnitOfWork {
    async fn next_sequence(&self) -> Result<i64, DomainError> {
        let mut tables = self.tables.write().await;
        tables.group_sequence += 1;
        Ok(tables.group_sequence)
    }

    async fn find_by_id(&self, group_id: &str) -> Result<Option<Group>, DomainError> {
        Ok(self.tables.read().await.groups.get(group_id).cloned())
    }

    async fn find_by_name(
        &self,
        organization_id: &str,
        group_name: &str,
    ) -> Result<Option<Group>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .groups
            .values()
            .find(|g| {
                g.organization_id == organization_id
                    && equals_ignore_case(&g.group_name, group_name.trim())
            })
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<Group>, DomainError> {
        Ok(self.tables.read().await.groups.values().cloned().collect())
    }

    async fn list_by_organization(&self, organization_id: &str) -> Result<Vec<Group>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .groups
            .values()
            .filter(|g| g.organization_id == organization_id)
            .cloned()
            .collect())
    }

    async fn create(&self, group: &Group) -> Result<Group, DomainError> {
        let mut tables = self.tables.write().await;
        if tables.groups.contains_key(&group.group_id) || tables.group_name_taken(group) {
            return Err(DomainError::Conflict(format!("group {}", group.group_name)));
        }
        tables.groups.insert(group.group_id.clone(), group.clone());
        Ok(group.clone())
    }

    async fn update(&self, group: &Group) -> Result<Group, DomainError> {
        let mut tables = self.tables.write().await;
        if !tables.groups.contains_key(&group.group_id) {
            return Err(missing("group", &group.group_id));
        }
        if tables.group_name_taken(group) {
            return Err(DomainError::Conflict(format!("group {}", group.group_name)));
        }
        tables.groups.insert(group.group_id.clone(), group.clone());
        Ok(group.clone())
    }

    async fn delete(&self, group_id: &str) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        tables.groups.remove(group_id);
        tables.group_permissions.retain(|_, row| row.group_id != group_id);
        tables.group_users.retain(|_, row| row.group_id != group_id);
        Ok(())
    }
}

#[async_trait]
impl OrganizationRepository for InMemoryUnitOfWork {
    async fn find_by_id(&self, organization_id: &str) -> Result<Option<Organization>, DomainError> {
        Ok(self.tables.read().await.organizations.get(organization_id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Organization>, DomainError> {
        Ok(self.tables.read().await.organizations.values().cloned().collect())
    }
}

#[async_trait]
impl PermissionRepository for InMemoryUnitOfWork {
    async fn find_by_id(&self, permission_id: &str) -> Result<Option<Permission>, DomainError> {
        Ok(self.tables.read().await.permissions.get(permission_id).cloned())
    }

    async fn list_active(&self) -> Result<Vec<Permission>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.permissions.values().filter(|p| p.is_active).cloned().collect())
    }

    async fn list_actions(&self) -> Result<Vec<String>, DomainError> {
        let tables = self.tables.read().await;
        let mut actions: Vec<String> = tables.permissions.values().map(|p| p.action.clone()).collect();
        actions.sort();
        actions.dedup();
        Ok(actions)
    }
}

#[async_trait]
impl GroupPermissionRepository for InMemoryUnitOfWork {
    async fn next_sequence(&self) -> Result<i64, DomainError> {
        let mut tables = self.tables.write().await;
        tables.group_permission_sequence += 1;
        Ok(tables.group_permission_sequence)
    }

    async fn find(
        &self,
        group_id: &str,
        permission_id: &str,
    ) -> Result<Option<GroupPermission>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .group_permissions
            .values()
            .find(|row| row.group_id == group_id && row.permission_id == permission_id)
            .cloned())
    }

    async fn list_by_group(&self, group_id: &str) -> Result<Vec<GroupPermission>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .group_permissions
            .values()
            .filter(|row| row.group_id == group_id)
            .cloned()
            .collect())
    }

    async fn create(&self, row: &GroupPermission) -> Result<GroupPermission, DomainError> {
        let mut tables = self.tables.write().await;
        let duplicate = tables.group_permissions.values().any(|existing| {
            existing.group_permission_id == row.group_permission_id
                || (existing.group_id == row.group_id && existing.permission_id == row.permission_id)
        });
        if duplicate {
            return Err(DomainError::Conflict(format!(
                "group permission {} -> {}",
                row.group_id, row.permission_id
            )));
        }
        tables
            .group_permissions
            .insert(row.group_permission_id.clone(), row.clone());
        Ok(row.clone())
    }

    async fn update(&self, row: &GroupPermission) -> Result<GroupPermission, DomainError> {
        let mut tables = self.tables.write().await;
        match tables.group_permissions.get_mut(&row.group_permission_id) {
            Some(existing) => {
                *existing = row.clone();
                Ok(row.clone())
            }
            None => Err(missing("group permission", &row.group_permission_id)),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUnitOfWork {
    async fn find_by_id(&self, user_id: &str) -> Result<Option<User>, DomainError> {
        Ok(self.tables.read().await.users.get(user_id).cloned())
    }

    async fn list_by_organization(&self, organization_id: &str) -> Result<Vec<User>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .filter(|u| u.organization_id == organization_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl GroupUserRepository for InMemoryUnitOfWork {
    async fn next_sequence(&self) -> Result<i64, DomainError> {
        let mut tables = self.tables.write().await;
        tables.group_user_sequence += 1;
        Ok(tables.group_user_sequence)
    }

    async fn find(
        &self,
        group_id: &str,
        user_id: &str,
    ) -> Result<Option<GroupUserMapping>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .group_users
            .values()
            .find(|row| row.group_id == group_id && row.user_id == user_id)
            .cloned())
    }

    async fn list_by_group(&self, group_id: &str) -> Result<Vec<GroupUserMapping>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .group_users
            .values()
            .filter(|row| row.group_id == group_id)
            .cloned()
            .collect())
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<GroupUserMapping>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .group_users
            .values()
            .filter(|row| row.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn list_by_organization(
        &self,
        organization_id: &str,
    ) -> Result<Vec<GroupUserMapping>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .group_users
            .values()
            .filter(|row| row.organization_id == organization_id)
            .cloned()
            .collect())
    }

    async fn create(&self, row: &GroupUserMapping) -> Result<GroupUserMapping, DomainError> {
        let mut tables = self.tables.write().await;
        let duplicate = tables.group_users.values().any(|existing| {
            existing.group_user_mapping_id == row.group_user_mapping_id
                || (existing.group_id == row.group_id && existing.user_id == row.user_id)
        });
        if duplicate {
            return Err(DomainError::Conflict(format!(
                "group user {} -> {}",
                row.user_id, row.group_id
            )));
        }
        tables
            .group_users
            .insert(row.group_user_mapping_id.clone(), row.clone());
        Ok(row.clone())
    }

    async fn update(&self, row: &GroupUserMapping) -> Result<GroupUserMapping, DomainError> {
        let mut tables = self.tables.write().await;
        match tables.group_users.get_mut(&row.group_user_mapping_id) {
            Some(existing) => {
                *existing = row.clone();
                Ok(row.clone())
            }
            None => Err(missing("group user mapping", &row.group_user_mapping_id)),
        }
    }
}

impl UnitOfWork for InMemoryUnitOfWork {
    fn groups(&self) -> &dyn GroupRepository {
        self
    }

    fn organizations(&self) -> &dyn OrganizationRepository {
        self
    }

    fn permissions(&self) -> &dyn PermissionRepository {
        self
    }

    fn group_permissions(&self) -> &dyn GroupPermissionRepository {
        self
    }

    fn users(&self) -> &dyn UserRepository {
        self
    }

    fn group_users(&self) -> &dyn GroupUserRepository {
        self
    }
}
