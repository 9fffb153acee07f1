//! Audit trail sink (port)

use async_trait::async_trait;

use crate::domain::AuditTrailRecord;
use crate::error::DomainError;

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait AuditTrailSink: Send + Sync {
    async fn create_audit_trail(&self, record: &AuditTrailRecord) -> Result<(), DomainError>;
}
