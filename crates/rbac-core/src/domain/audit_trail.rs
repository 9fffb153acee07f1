//! Audit trail record written by the HTTP layer after each audited call.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditAction {
    Add,
    Update,
    Delete,
    Get,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Add => "Add",
            AuditAction::Update => "Update",
            AuditAction::Delete => "Delete",
            AuditAction::Get => "Get",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditSection {
    Group,
    GroupPermission,
    GroupUserMapping,
}

impl AuditSection {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditSection::Group => "Group",
            AuditSection::GroupPermission => "GroupPermission",
            AuditSection::GroupUserMapping => "GroupUserMapping",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditTrailRecord {
    pub user_type: String,
    pub organization_id: String,
    pub key_type: String,
    pub key_id: Option<String>,
    pub url: String,
    pub request_parameters_json: String,
    pub action: AuditAction,
    pub section: AuditSection,
    pub old_values_json: Option<String>,
    pub new_values_json: Option<String>,
    pub system_remarks: String,
    pub created_by: String,
    pub ip_address: String,
}
