use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::info;

use crate::domain::AuditTrailRecord;
use crate::error::DomainError;
use crate::repositories::AuditTrailSink;

/// Keeps every record in memory.
#[derive(Debug, Default)]
pub struct InMemoryAuditTrail {
    records: Mutex<Vec<AuditTrailRecord>>,
}

impl InMemoryAuditTrail {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn records(&self) -> Vec<AuditTrailRecord> {
        self.records.lock().await.clone()
    }
}

#[async_trait]
impl AuditTrailSink for InMemoryAuditTrail {
    async fn create_audit_trail(&self, record: &AuditTrailRecord) -> Result<(), DomainError> {
        self.records.lock().await.push(record.clone());
        Ok(())
    }
}

/// Writes audit records to the log under the `audit` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAuditTrailSink;

#[async_trait]
impl AuditTrailSink for TracingAuditTrailSink {
    async fn create_audit_trail(&self, record: &AuditTrailRecord) -> Result<(), DomainError> {
        let payload = serde_json::to_string(record)?;
        info!(
            target: "audit",
            section = record.section.as_str(),
            action = record.action.as_str(),
            created_by = %record.created_by,
            "{}",
            payload
        );
        Ok(())
    }
}
