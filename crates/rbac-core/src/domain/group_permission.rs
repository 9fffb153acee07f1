// ============================================================================
// RBAC Core - Group Permission Entity
// File: crates/rbac-core/src/domain/group_permission.rs
// Description: Grant of one permission to one group
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// At most one row exists per `(group_id, permission_id)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupPermission {
    pub group_permission_id: String,
    pub organization_id: String,
    pub group_id: String,
    pub permission_id: String,
    pub is_active: bool,

    // Audit fields
    pub created_by: String,
    pub created_on: DateTime<Utc>,
    pub modified_by: Option<String>,
    pub modified_on: Option<DateTime<Utc>>,
}

impl GroupPermission {
    pub fn new(
        group_permission_id: String,
        organization_id: &str,
        group_id: &str,
        permission_id: &str,
        created_by: &str,
    ) -> Self {
        Self {
            group_permission_id,
            organization_id: organization_id.to_string(),
            group_id: group_id.to_string(),
            permission_id: permission_id.to_string(),
            is_active: true,
            created_by: created_by.to_string(),
            created_on: Utc::now(),
            modified_by: None,
            modified_on: None,
        }
    }

    pub fn activate(&mut self, modified_by: &str) {
        self.is_active = true;
        self.stamp(modified_by);
    }

    pub fn deactivate(&mut self, modified_by: &str) {
        self.is_active = false;
        self.stamp(modified_by);
    }

    fn stamp(&mut self, modified_by: &str) {
        self.modified_by = Some(modified_by.to_string());
        self.modified_on = Some(Utc::now());
    }
}
