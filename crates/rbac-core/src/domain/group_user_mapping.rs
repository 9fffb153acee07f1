//! Group membership record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// At most one row exists per `(group_id, user_id)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupUserMapping {
    pub group_user_mapping_id: String,
    pub group_id: String,
    pub user_id: String,
    pub organization_id: String,
    pub is_active: bool,

    // Audit fields
    pub created_by: String,
    pub created_on: DateTime<Utc>,
    pub modified_by: Option<String>,
    pub modified_on: Option<DateTime<Utc>>,
}

impl GroupUserMapping {
    pub fn new(
        group_user_mapping_id: String,
        organization_id: &str,
        group_id: &str,
        user_id: &str,
        created_by: &str,
    ) -> Self {
        Self {
            group_user_mapping_id,
            group_id: group_id.to_string(),
            user_id: user_id.to_string(),
            organization_id: organization_id.to_string(),
            is_active: true,
            created_by: created_by.to_string(),
            created_on: Utc::now(),
            modified_by: None,
            modified_on: None,
        }
    }

    pub fn activate(&mut self, modified_by: &str) {
        self.is_active = true;
        self.modified_by = Some(modified_by.to_string());
        self.modified_on = Some(Utc::now());
    }

    pub fn deactivate(&mut self, modified_by: &str) {
        self.is_active = false;
        self.modified_by = Some(modified_by.to_string());
        self.modified_on = Some(Utc::now());
    }
}
