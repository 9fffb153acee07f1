//! Group permission request and view models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::GroupPermission;
use crate::query::PageRequest;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct GroupPermissionsByGroupFilter {
    pub group_id: Option<String>,
    /// Exact match against `name` or `name.action`.
    pub permission_name: Option<String>,
    pub search: Option<String>,
    pub is_group_permission: Option<bool>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    #[validate(range(min = 1, message = "Page number must be at least 1"))]
    pub page_no: Option<u32>,
    #[validate(range(min = 1, max = 500, message = "Page size must be between 1 and 500"))]
    pub page_size: Option<u32>,
}

impl GroupPermissionsByGroupFilter {
    pub fn page(&self) -> PageRequest {
        PageRequest::new(self.page_no, self.page_size)
    }
}

/// Used for both save and delete.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct GroupPermissionSaveDeleteModel {
    pub organization_id: Option<String>,
    pub group_id: Option<String>,
    pub permission_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionView {
    pub permission_id: String,
    pub permission_name: String,
    pub description: String,
    pub is_group_permission: bool,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupPermissionView {
    pub group_permission_id: String,
    pub organization_id: String,
    pub group_id: String,
    pub permission_id: String,
    pub is_active: bool,
    pub created_by: String,
    pub created_on: DateTime<Utc>,
    pub modified_by: Option<String>,
    pub modified_on: Option<DateTime<Utc>>,
}

impl From<&GroupPermission> for GroupPermissionView {
    fn from(row: &GroupPermission) -> Self {
        Self {
            group_permission_id: row.group_permission_id.clone(),
            organization_id: row.organization_id.clone(),
            group_id: row.group_id.clone(),
            permission_id: row.permission_id.clone(),
            is_active: row.is_active,
            created_by: row.created_by.clone(),
            created_on: row.created_on,
            modified_by: row.modified_by.clone(),
            modified_on: row.modified_on,
        }
    }
}
