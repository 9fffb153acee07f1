// ============================================================================
// RBAC API - Audit Emission
// File: crates/rbac-api/src/audit.rs
// ============================================================================
//! Builds `AuditTrailRecord`s from handler outcomes and writes them to the
//! configured sink. A failed write is logged and never fails the request.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use rbac_core::domain::{AuditAction, AuditSection, AuditTrailRecord};
use rbac_core::AuditDetail;

use crate::auth::AuthUser;
use crate::state::AppState;

/// System remarks stored with each audit record.
pub mod remarks {
    pub const VIEW_GROUP_LIST: &str = "Viewed group list";
    pub const VIEW_GROUP_DETAIL: &str = "Viewed group detail";
    pub const ADD_GROUP: &str = "Added group";
    pub const UPDATE_GROUP: &str = "Updated group";
    pub const DELETE_GROUP: &str = "Deleted group";
    pub const ADD_GROUP_PERMISSION: &str = "Added group permission";
    pub const REMOVE_GROUP_PERMISSION: &str = "Removed group permission";
    pub const ADD_GROUP_USER: &str = "Added user to group";
    pub const REMOVE_GROUP_USER: &str = "Removed user from group";
}

fn strip_nulls(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, strip_nulls(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(strip_nulls).collect()),
        other => other,
    }
}

/// Serializes `value` with every `null` object member removed.
pub fn to_json_ignore_nulls<T: Serialize + ?Sized>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(v) => strip_nulls(v).to_string(),
        Err(e) => {
            warn!("Audit payload serialization failed: {}", e);
            String::new()
        }
    }
}

#[derive(Debug, Clone)]
pub struct AuditEvent {
    section: AuditSection,
    action: AuditAction,
    url: String,
    system_remarks: &'static str,
    key_id: Option<String>,
    request_parameters_json: String,
    detail: AuditDetail,
}

impl AuditEvent {
    pub fn new(section: AuditSection, action: AuditAction, url: &str, system_remarks: &'static str) -> Self {
        Self {
            section,
            action,
            url: url.to_string(),
            system_remarks,
            key_id: None,
            request_parameters_json: String::new(),
            detail: AuditDetail::default(),
        }
    }

    pub fn key_id(mut self, key_id: impl Into<String>) -> Self {
        self.key_id = Some(key_id.into());
        self
    }

    pub fn request<T: Serialize + ?Sized>(mut self, request: &T) -> Self {
        self.request_parameters_json = to_json_ignore_nulls(request);
        self
    }

    /// Stores a path parameter as-is.
    pub fn raw_request(mut self, request: &str) -> Self {
        self.request_parameters_json = request.to_string();
        self
    }

    pub fn detail(mut self, detail: AuditDetail) -> Self {
        self.detail = detail;
        self
    }

    pub fn into_record(self, user: &AuthUser) -> AuditTrailRecord {
        AuditTrailRecord {
            user_type: user.user_type.clone(),
            organization_id: user.organization_id.clone(),
            key_type: self.section.as_str().to_string(),
            key_id: self.key_id,
            url: self.url,
            request_parameters_json: self.request_parameters_json,
            action: self.action,
            section: self.section,
            old_values_json: self.detail.old_values.as_ref().map(to_json_ignore_nulls),
            new_values_json: self.detail.new_values.map(|v| v.to_string()),
            system_remarks: self.system_remarks.to_string(),
            created_by: user.user_id.clone(),
            ip_address: user.ip_address.clone(),
        }
    }
}

pub async fn emit(state: &AppState, user: &AuthUser, event: AuditEvent) {
    let record = event.into_record(user);
    match state.audit.create_audit_trail(&record).await {
        Ok(()) => debug!(
            "Audit trail written: {} {} by {}",
            record.section.as_str(),
            record.action.as_str(),
            record.created_by
        ),
        Err(e) => warn!(
            "Audit trail write failed for {} {}: {}",
            record.section.as_str(),
            record.action.as_str(),
            e
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user() -> AuthUser {
        AuthUser {
            user_id: "USR1".into(),
            organization_id: "ORG1".into(),
            user_type: "Admin".into(),
            permissions: vec![],
            ip_address: "10.0.0.1".into(),
        }
    }

    #[test]
    fn test_to_json_ignore_nulls_drops_nested_nulls() {
        let value = json!({"group_id": "GRP000001", "group_name": null, "inner": {"a": null, "b": 1}});
        assert_eq!(to_json_ignore_nulls(&value), r#"{"group_id":"GRP000001","inner":{"b":1}}"#);
    }

    #[test]
    fn test_record_carries_caller_and_snapshots() {
        let detail = AuditDetail {
            old_values: Some(json!({"is_active": true, "modified_by": null})),
            new_values: Some(json!({"is_active": false, "modified_by": "USR1"})),
        };
        let record = AuditEvent::new(
            AuditSection::GroupPermission,
            AuditAction::Delete,
            "/grouppermission/delete",
            remarks::REMOVE_GROUP_PERMISSION,
        )
        .request(&json!({"group_id": "GRP000001", "permission_id": null}))
        .detail(detail)
        .into_record(&user());

        assert_eq!(record.key_type, "GroupPermission");
        assert_eq!(record.created_by, "USR1");
        assert_eq!(record.ip_address, "10.0.0.1");
        assert_eq!(record.request_parameters_json, r#"{"group_id":"GRP000001"}"#);
        assert_eq!(record.old_values_json.as_deref(), Some(r#"{"is_active":true}"#));
        assert_eq!(
            record.new_values_json.as_deref(),
            Some(r#"{"is_active":false,"modified_by":"USR1"}"#)
        );
    }
}
