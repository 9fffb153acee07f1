//! User domain entity (read-only here)

use serde::{Deserialize, Serialize};

use rbac_shared::utils::contains_ignore_case;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
    pub organization_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,

    pub is_active: bool,
    pub is_deleted: bool,
    pub is_first_login: bool,
    pub is_email_verified: bool,
}

impl User {
    /// `"first last"`, trimmed when either part is empty.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }

    /// Completed onboarding. `is_first_login` is set once the first login has happened.
    pub fn is_onboarded(&self) -> bool {
        !self.is_deleted && self.is_first_login && self.is_email_verified
    }

    /// Can be shown as a member of a group.
    pub fn is_eligible_for_group(&self) -> bool {
        self.is_active && self.is_onboarded()
    }

    pub fn matches_search(&self, search: &str) -> bool {
        contains_ignore_case(&self.first_name, search)
            || contains_ignore_case(&self.last_name, search)
            || contains_ignore_case(&self.email_address, search)
    }
}
