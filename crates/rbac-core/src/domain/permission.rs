//! Permission entity (read-only catalog)

use serde::{Deserialize, Serialize};

use rbac_shared::utils::{contains_ignore_case, equals_ignore_case};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub permission_id: String,
    pub name: String,
    pub action: String,
    pub description: String,
    pub is_active: bool,
}

impl Permission {
    pub fn new(
        permission_id: impl Into<String>,
        name: impl Into<String>,
        action: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            permission_id: permission_id.into(),
            name: name.into(),
            action: action.into(),
            description: description.into(),
            is_active: true,
        }
    }

    /// Claim name, e.g. `Group.Read`.
    pub fn permission_name(&self) -> String {
        format!("{}.{}", self.name, self.action)
    }

    /// Name and action with no separator, e.g. `GroupRead`.
    pub fn compact_name(&self) -> String {
        format!("{}{}", self.name, self.action)
    }

    /// Exact match against the bare name, the compact name or the claim name.
    pub fn matches_name(&self, value: &str) -> bool {
        equals_ignore_case(&self.name, value)
            || equals_ignore_case(&self.compact_name(), value)
            || equals_ignore_case(&self.permission_name(), value)
    }

    pub fn matches_search(&self, search: &str) -> bool {
        contains_ignore_case(&self.name, search)
            || contains_ignore_case(&self.action, search)
            || contains_ignore_case(&self.compact_name(), search)
            || contains_ignore_case(&self.permission_name(), search)
            || contains_ignore_case(&self.description, search)
    }
}
