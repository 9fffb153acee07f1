//! Group request and view models

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::Group;
use crate::query::PageRequest;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct GroupFilter {
    #[validate(length(max = 100, message = "Group name too long"))]
    pub group_name: Option<String>,
    pub organization_id: Option<String>,
    pub is_active: Option<bool>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    #[validate(range(min = 1, message = "Page number must be at least 1"))]
    pub page_no: Option<u32>,
    #[validate(range(min = 1, max = 500, message = "Page size must be between 1 and 500"))]
    pub page_size: Option<u32>,
}

impl GroupFilter {
    pub fn page(&self) -> PageRequest {
        PageRequest::new(self.page_no, self.page_size)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct GroupCreateModel {
    #[validate(length(max = 100, message = "Group name too long"))]
    pub group_name: Option<String>,
    pub organization_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct GroupUpdateModel {
    pub group_id: Option<String>,
    #[validate(length(max = 100, message = "Group name too long"))]
    pub group_name: Option<String>,
    pub organization_id: Option<String>,
    pub is_active: Option<bool>,
}

/// Listing row; `is_active` is the textual status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupView {
    pub group_id: String,
    pub group_name: String,
    pub is_active: String,
    pub organization_name: String,
    pub organization_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupUserSummary {
    pub user_id: String,
    pub user_name: String,
}

/// Group with its linked permission ids and eligible members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupDetail {
    pub group_id: String,
    pub group_name: String,
    pub is_active: bool,
    pub organization_id: String,
    pub group_users: Vec<GroupUserSummary>,
    pub permissions: Vec<String>,
}

impl GroupDetail {
    pub fn new(group: &Group, group_users: Vec<GroupUserSummary>, permissions: Vec<String>) -> Self {
        Self {
            group_id: group.group_id.clone(),
            group_name: group.group_name.clone(),
            is_active: group.is_active,
            organization_id: group.organization_id.clone(),
            group_users,
            permissions,
        }
    }
}
