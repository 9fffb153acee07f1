//! Fixture data for `storage.backend = "memory"`.

use rbac_core::memory::Seed;
use rbac_core::{Organization, Permission, User};

pub const DEMO_ORGANIZATION: &str = "ORG000001";

fn user(user_id: &str, first_name: &str, last_name: &str) -> User {
    User {
        user_id: user_id.to_string(),
        organization_id: DEMO_ORGANIZATION.to_string(),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email_address: format!("{}@sfcore.local", first_name.to_lowercase()),
        is_active: true,
        is_deleted: false,
        is_first_login: true,
        is_email_verified: true,
    }
}

pub fn seed() -> Seed {
    let permissions = [
        ("PRM000001", "Dashboard", "AdminPanel", "Open the administration panel"),
        ("PRM000002", "Group", "Read", "View groups"),
        ("PRM000003", "Group", "Create", "Create groups"),
        ("PRM000004", "Group", "Update", "Edit groups"),
        ("PRM000005", "Group", "Delete", "Delete groups"),
        ("PRM000006", "GroupPermission", "Read", "View group permissions"),
        ("PRM000007", "GroupPermission", "Create", "Grant permissions to groups"),
        ("PRM000008", "GroupPermission", "Delete", "Revoke permissions from groups"),
        ("PRM000009", "GroupUser", "Read", "View group members"),
        ("PRM000010", "GroupUser", "Create", "Add users to groups"),
        ("PRM000011", "GroupUser", "Delete", "Remove users from groups"),
    ];

    Seed {
        organizations: vec![Organization::new(DEMO_ORGANIZATION, "SFCore Demo")],
        permissions: permissions
            .iter()
            .map(|(id, name, action, description)| Permission::new(*id, *name, *action, *description))
            .collect(),
        users: vec![
            user("USR000001", "Admin", "Demo"),
            user("USR000002", "Rina", "Wijaya"),
            user("USR000003", "Tono", "Hartono"),
        ],
    }
}
