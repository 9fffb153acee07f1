//! PostgreSQL audit trail sink

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use rbac_core::domain::AuditTrailRecord;
use rbac_core::error::DomainError;
use rbac_core::repositories::AuditTrailSink;

use super::db_error;

pub struct PgAuditTrailSink {
    pool: PgPool,
}

impl PgAuditTrailSink {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditTrailSink for PgAuditTrailSink {
    async fn create_audit_trail(&self, record: &AuditTrailRecord) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO audit_trails (
                user_type, organization_id, key_type, key_id, url,
                request_parameters_json, action, section, old_values_json,
                new_values_json, system_remarks, created_by, ip_address
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(&record.user_type)
        .bind(&record.organization_id)
        .bind(&record.key_type)
        .bind(&record.key_id)
        .bind(&record.url)
        .bind(&record.request_parameters_json)
        .bind(record.action.as_str())
        .bind(record.section.as_str())
        .bind(&record.old_values_json)
        .bind(&record.new_values_json)
        .bind(&record.system_remarks)
        .bind(&record.created_by)
        .bind(&record.ip_address)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("writing audit trail", e))?;

        debug!(
            "Audit trail written: {} {} by {}",
            record.section.as_str(),
            record.action.as_str(),
            record.created_by
        );
        Ok(())
    }
}
