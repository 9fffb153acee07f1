//! Business services

pub mod group_manager;
pub mod group_permission_manager;
pub mod group_user_manager;

pub use group_manager::GroupManager;
pub use group_permission_manager::GroupPermissionManager;
pub use group_user_manager::GroupUserManager;

use rbac_shared::utils::is_blank;

use crate::messages::Message;

/// Pushes `message` when the value is missing or blank.
fn require(errors: &mut Vec<Message>, value: &Option<String>, message: Message) {
    if is_blank(value.as_deref()) {
        errors.push(message);
    }
}
