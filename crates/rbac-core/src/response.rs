//! Response envelope shared by every manager operation.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DomainError;

/// Metadata keys.
pub mod meta {
    pub const TOTAL_RECORDS: &str = "total_records";
    pub const PERMISSION_ACTIONS: &str = "permission_actions";
    pub const OLD_VALUES: &str = "old_values";
    pub const NEW_VALUES: &str = "new_values";
}

pub type MetaData = BTreeMap<String, Value>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResponseEnvelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub meta_data: MetaData,
}

impl<T> ResponseEnvelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            error_message: None,
            meta_data: MetaData::new(),
        }
    }

    pub fn ok_with_message(data: T, message: impl fmt::Display) -> Self {
        Self {
            message: Some(message.to_string()),
            ..Self::ok(data)
        }
    }

    pub fn fail(message: impl fmt::Display) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.to_string()),
            error_message: None,
            meta_data: MetaData::new(),
        }
    }

    /// Failed envelope listing every accumulated error.
    pub fn fail_with_errors<M: fmt::Display>(errors: Vec<M>) -> Self {
        Self {
            success: false,
            data: None,
            message: None,
            error_message: Some(errors.iter().map(ToString::to_string).collect()),
            meta_data: MetaData::new(),
        }
    }

    pub fn with_meta(mut self, key: &str, value: Value) -> Self {
        self.meta_data.insert(key.to_string(), value);
        self
    }

    pub fn with_total_records(self, total: usize) -> Self {
        self.with_meta(meta::TOTAL_RECORDS, Value::from(total as u64))
    }

    pub fn with_audit(mut self, audit: AuditDetail) -> Self {
        self.meta_data
            .insert(meta::OLD_VALUES.to_string(), audit.old_values.unwrap_or(Value::Null));
        self.meta_data
            .insert(meta::NEW_VALUES.to_string(), audit.new_values.unwrap_or(Value::Null));
        self
    }

    pub fn total_records(&self) -> Option<u64> {
        self.meta_data.get(meta::TOTAL_RECORDS).and_then(Value::as_u64)
    }

    /// Removes the audit snapshot from the metadata, leaving other keys
    /// untouched. Controllers call this before responding.
    pub fn take_audit(&mut self) -> AuditDetail {
        let non_null = |v: Option<Value>| v.filter(|v| !v.is_null());
        AuditDetail {
            old_values: non_null(self.meta_data.remove(meta::OLD_VALUES)),
            new_values: non_null(self.meta_data.remove(meta::NEW_VALUES)),
        }
    }
}

/// Before/after snapshot of one mutation, computed by the mutation itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuditDetail {
    pub old_values: Option<Value>,
    pub new_values: Option<Value>,
}

impl AuditDetail {
    pub fn created<T: Serialize>(new: &T) -> Result<Self, DomainError> {
        Ok(Self {
            old_values: None,
            new_values: Some(serde_json::to_value(new)?),
        })
    }

    pub fn updated<T: Serialize>(old: &T, new: &T) -> Result<Self, DomainError> {
        Ok(Self {
            old_values: Some(serde_json::to_value(old)?),
            new_values: Some(serde_json::to_value(new)?),
        })
    }

    pub fn deleted<T: Serialize>(old: &T) -> Result<Self, DomainError> {
        Ok(Self {
            old_values: Some(serde_json::to_value(old)?),
            new_values: None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.old_values.is_none() && self.new_values.is_none()
    }
}
