//! Group user request and view models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::{GroupUserMapping, User};
use crate::models::KeyValue;
use crate::query::PageRequest;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct GroupUsersByOrganizationFilter {
    pub organization_id: Option<String>,
    pub group_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email_address: Option<String>,
    pub search: Option<String>,
    pub is_group_user: Option<bool>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    #[validate(range(min = 1, message = "Page number must be at least 1"))]
    pub page_no: Option<u32>,
    #[validate(range(min = 1, max = 500, message = "Page size must be between 1 and 500"))]
    pub page_size: Option<u32>,
}

impl GroupUsersByOrganizationFilter {
    pub fn page(&self) -> PageRequest {
        PageRequest::new(self.page_no, self.page_size)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct UsersByGroupFilter {
    pub group_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email_address: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    #[validate(range(min = 1, message = "Page number must be at least 1"))]
    pub page_no: Option<u32>,
    #[validate(range(min = 1, max = 500, message = "Page size must be between 1 and 500"))]
    pub page_size: Option<u32>,
}

impl UsersByGroupFilter {
    pub fn page(&self) -> PageRequest {
        PageRequest::new(self.page_no, self.page_size)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct GroupsByUserFilter {
    #[validate(length(min = 1, message = "User is required"))]
    pub user_id: String,
    pub organization_id: Option<String>,
    pub is_active: Option<bool>,
}

/// Used for both save and delete.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct GroupUserMappingSaveDeleteModel {
    pub organization_id: Option<String>,
    pub group_id: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupUserListItem {
    pub user_id: String,
    pub organization_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub is_group_user: bool,
    pub is_active: bool,
}

impl GroupUserListItem {
    pub fn new(user: &User, is_group_user: bool) -> Self {
        Self {
            user_id: user.user_id.clone(),
            organization_id: user.organization_id.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email_address: user.email_address.clone(),
            is_group_user,
            is_active: user.is_active,
        }
    }
}

/// Members of one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupUserModel {
    pub group_id: String,
    pub group_name: String,
    pub group_status: bool,
    pub group_users: Vec<GroupUserListItem>,
}

/// Groups of one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserGroupModel {
    pub user_id: String,
    pub user_name: String,
    pub groups: Vec<KeyValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupUserMappingView {
    pub group_user_mapping_id: String,
    pub organization_id: String,
    pub group_id: String,
    pub user_id: String,
    pub is_active: bool,
    pub created_by: String,
    pub created_on: DateTime<Utc>,
    pub modified_by: Option<String>,
    pub modified_on: Option<DateTime<Utc>>,
}

impl From<&GroupUserMapping> for GroupUserMappingView {
    fn from(row: &GroupUserMapping) -> Self {
        Self {
            group_user_mapping_id: row.group_user_mapping_id.clone(),
            organization_id: row.organization_id.clone(),
            group_id: row.group_id.clone(),
            user_id: row.user_id.clone(),
            is_active: row.is_active,
            created_by: row.created_by.clone(),
            created_on: row.created_on,
            modified_by: row.modified_by.clone(),
            modified_on: row.modified_on,
        }
    }
}

/// Available-users dropdown entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationUserView {
    pub user_id: String,
    pub user_name: String,
    pub email_address: String,
}

impl From<&User> for OrganizationUserView {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.user_id.clone(),
            user_name: user.full_name(),
            email_address: user.email_address.clone(),
        }
    }
}
