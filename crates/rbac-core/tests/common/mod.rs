#![allow(dead_code)]

use std::sync::Arc;

use rbac_core::memory::{InMemoryUnitOfWork, Seed};
use rbac_core::models::GroupCreateModel;
use rbac_core::{GroupManager, GroupPermissionManager, GroupUserManager, Organization, Permission, User};

pub const ORG: &str = "ORG1";
pub const OTHER_ORG: &str = "ORG2";
pub const ADMIN: &str = "USR000";

pub struct Fixture {
    pub store: Arc<InMemoryUnitOfWork>,
    pub groups: GroupManager,
    pub group_permissions: GroupPermissionManager,
    pub group_users: GroupUserManager,
}

pub fn user(user_id: &str, organization_id: &str, first: &str, last: &str) -> User {
    User {
        user_id: user_id.to_string(),
        organization_id: organization_id.to_string(),
        first_name: first.to_string(),
        last_name: last.to_string(),
        email_address: format!("{}.{}@example.com", first.to_lowercase(), last.to_lowercase()),
        is_active: true,
        is_deleted: false,
        is_first_login: true,
        is_email_verified: true,
    }
}

pub fn seed() -> Seed {
    Seed {
        organizations: vec![Organization::new(ORG, "Acme"), Organization::new(OTHER_ORG, "Globex")],
        permissions: vec![
            Permission::new("PRM1", "Group", "Read", "View groups"),
            Permission::new("PRM2", "Group", "Create", "Create groups"),
            Permission::new("PRM3", "GroupUser", "Read", "View group members"),
            Permission::new("PRM4", "Dashboard", "AdminPanel", "Open the admin panel"),
            Permission {
                is_active: false,
                ..Permission::new("PRM5", "Legacy", "Export", "Retired export")
            },
        ],
        users: vec![
            user("USR1", ORG, "Ana", "Silva"),
            user("USR2", ORG, "Budi", "Santoso"),
            user("USR3", ORG, "Citra", "Lestari"),
            User {
                is_first_login: false,
                ..user("USR4", ORG, "Dewi", "Pending")
            },
            User {
                is_deleted: true,
                ..user("USR5", ORG, "Eko", "Removed")
            },
            User {
                is_active: false,
                ..user("USR6", ORG, "Fajar", "Inactive")
            },
            user("USR7", OTHER_ORG, "Gita", "Outside"),
        ],
    }
}

pub fn fixture() -> Fixture {
    let store = Arc::new(InMemoryUnitOfWork::seeded(seed()));
    Fixture {
        groups: GroupManager::new(store.clone()),
        group_permissions: GroupPermissionManager::new(store.clone()),
        group_users: GroupUserManager::new(store.clone()),
        store,
    }
}

impl Fixture {
    /// Creates a group and returns its id.
    pub async fn group(&self, name: &str, organization_id: &str) -> String {
        let envelope = self
            .groups
            .create_group(
                Some(GroupCreateModel {
                    group_name: Some(name.to_string()),
                    organization_id: Some(organization_id.to_string()),
                }),
                ADMIN,
            )
            .await
            .unwrap();
        assert!(envelope.success, "creating {} failed: {:?}", name, envelope);
        envelope.data.unwrap().group_id
    }
}
