//! Organization entity (read-only here)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub organization_id: String,
    pub organization_name: String,
    pub is_active: bool,
}

impl Organization {
    pub fn new(organization_id: impl Into<String>, organization_name: impl Into<String>) -> Self {
        Self {
            organization_id: organization_id.into(),
            organization_name: organization_name.into(),
            is_active: true,
        }
    }
}
