//! Request filters, commands and view models.

pub mod common;
pub mod group;
pub mod group_permission;
pub mod group_user;

pub use common::KeyValue;
pub use group::{GroupCreateModel, GroupDetail, GroupFilter, GroupUpdateModel, GroupUserSummary, GroupView};
pub use group_permission::{
    GroupPermissionSaveDeleteModel, GroupPermissionView, GroupPermissionsByGroupFilter,
    PermissionView,
};
pub use group_user::{
    GroupUserListItem, GroupUserMappingSaveDeleteModel, GroupUserMappingView, GroupUserModel,
    GroupUsersByOrganizationFilter, GroupsByUserFilter, OrganizationUserView, UserGroupModel,
    UsersByGroupFilter,
};
