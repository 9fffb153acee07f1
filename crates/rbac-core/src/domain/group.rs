// ============================================================================
// RBAC Core - Group Entity
// File: crates/rbac-core/src/domain/group.rs
// Description: Organization-scoped bucket of permissions and users
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rbac_shared::constants::RESERVED_GROUP_NAME;
use rbac_shared::utils::equals_ignore_case;

/// Group entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub group_id: String,
    pub group_name: String,
    pub organization_id: String,
    pub is_active: bool,

    // Audit fields
    pub created_by: String,
    pub created_on: DateTime<Utc>,
    pub modified_by: Option<String>,
    pub modified_on: Option<DateTime<Utc>>,
}

impl Group {
    pub fn new(
        group_id: String,
        group_name: &str,
        organization_id: &str,
        created_by: &str,
    ) -> Self {
        Self {
            group_id,
            group_name: group_name.trim().to_string(),
            organization_id: organization_id.trim().to_string(),
            is_active: true,
            created_by: created_by.to_string(),
            created_on: Utc::now(),
            modified_by: None,
            modified_on: None,
        }
    }

    /// True for the built-in `AllPermission` group, in any case.
    pub fn is_reserved(&self) -> bool {
        is_reserved_name(&self.group_name)
    }

    pub fn belongs_to(&self, organization_id: &str) -> bool {
        self.organization_id == organization_id
    }

    pub fn rename(&mut self, group_name: &str) {
        self.group_name = group_name.trim().to_string();
    }

    pub fn touch(&mut self, modified_by: &str) {
        self.modified_by = Some(modified_by.to_string());
        self.modified_on = Some(Utc::now());
    }

    pub fn status_label(&self) -> &'static str {
        if self.is_active {
            "Active"
        } else {
            "Inactive"
        }
    }
}

pub fn is_reserved_name(name: &str) -> bool {
    equals_ignore_case(name.trim(), RESERVED_GROUP_NAME)
}
