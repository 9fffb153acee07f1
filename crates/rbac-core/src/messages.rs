//! User-facing response messages.

use std::fmt;

use rbac_shared::constants::RESERVED_GROUP_NAME;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    NoRecordsFound,
    InvalidRequest,
    OrganizationRequired,
    GroupRequired,
    UserRequired,
    GroupNameRequired,
    ReservedGroupName,
    ReservedGroupLocked,
    DuplicateGroupName,
    GroupNotFound,
    GroupCreated(String),
    GroupUpdated(String),
    GroupDeleted(String),
    PermissionRequired,
    PermissionNotFound,
    GroupPermissionSaved,
    GroupPermissionRemoved,
    GroupPermissionNotFound,
    NoUsersFound,
    UserNotFound,
    GroupUserSaved,
    GroupUserRemoved,
    GroupUserNotFound,
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::NoRecordsFound => write!(f, "No records found."),
            Message::InvalidRequest => write!(f, "Invalid request."),
            Message::OrganizationRequired => write!(f, "Organization is required."),
            Message::GroupRequired => write!(f, "Group is required."),
            Message::UserRequired => write!(f, "User is required."),
            Message::GroupNameRequired => write!(f, "Group name is required."),
            Message::ReservedGroupName => {
                write!(f, "'{}' is a reserved group name.", RESERVED_GROUP_NAME)
            }
            Message::ReservedGroupLocked => {
                write!(f, "The '{}' group cannot be changed.", RESERVED_GROUP_NAME)
            }
            Message::DuplicateGroupName => {
                write!(f, "A group with this name already exists in the organization.")
            }
            Message::GroupNotFound => write!(f, "Group not found."),
            Message::GroupCreated(name) => write!(f, "Group '{}' created successfully.", name),
            Message::GroupUpdated(name) => write!(f, "Group '{}' updated successfully.", name),
            Message::GroupDeleted(name) => write!(f, "Group '{}' deleted successfully.", name),
            Message::PermissionRequired => write!(f, "Permission is required."),
            Message::PermissionNotFound => write!(f, "Permission not found."),
            Message::GroupPermissionSaved => write!(f, "Group permission saved successfully."),
            Message::GroupPermissionRemoved => write!(f, "Group permission removed successfully."),
            Message::GroupPermissionNotFound => write!(f, "Group permission not found."),
            Message::NoUsersFound => write!(f, "No users found."),
            Message::UserNotFound => write!(f, "User not found."),
            Message::GroupUserSaved => write!(f, "User added to group successfully."),
            Message::GroupUserRemoved => write!(f, "User removed from group successfully."),
            Message::GroupUserNotFound => write!(f, "Group user mapping not found."),
        }
    }
}
