//! Permission claim names.
//!
//! A claim is spelled `Name.Action`, matching `Permission::permission_name`
//! in the core crate.

pub mod dashboard {
    pub const ADMIN_PANEL: &str = "Dashboard.AdminPanel";
}

pub mod group {
    pub const READ: &str = "Group.Read";
    pub const CREATE: &str = "Group.Create";
    pub const UPDATE: &str = "Group.Update";
    pub const DELETE: &str = "Group.Delete";
}

pub mod group_permission {
    pub const READ: &str = "GroupPermission.Read";
    pub const CREATE: &str = "GroupPermission.Create";
    pub const DELETE: &str = "GroupPermission.Delete";
}

pub mod group_user {
    pub const READ: &str = "GroupUser.Read";
    pub const CREATE: &str = "GroupUser.Create";
    pub const DELETE: &str = "GroupUser.Delete";
}
