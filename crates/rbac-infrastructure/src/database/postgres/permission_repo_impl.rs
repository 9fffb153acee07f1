//! PostgreSQL permission repository

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use rbac_core::domain::Permission;
use rbac_core::error::DomainError;
use rbac_core::repositories::PermissionRepository;

use super::db_error;

pub struct PgPermissionRepository {
    pool: PgPool,
}

impl PgPermissionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PermissionRepository for PgPermissionRepository {
    async fn find_by_id(&self, permission_id: &str) -> Result<Option<Permission>, DomainError> {
        let row: Option<PermissionRow> = sqlx::query_as(
            r#"
            SELECT permission_id, name, action, description, is_active
            FROM permissions
            WHERE permission_id = $1
            "#,
        )
        .bind(permission_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("finding permission by id", e))?;

        Ok(row.map(Into::into))
    }

    async fn list_active(&self) -> Result<Vec<Permission>, DomainError> {
        let rows: Vec<PermissionRow> = sqlx::query_as(
            r#"
            SELECT permission_id, name, action, description, is_active
            FROM permissions
            WHERE is_active = TRUE
            ORDER BY permission_id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("listing permissions", e))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_actions(&self) -> Result<Vec<String>, DomainError> {
        sqlx::query_scalar::<_, String>("SELECT DISTINCT action FROM permissions ORDER BY action")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("listing permission actions", e))
    }
}

#[derive(Debug, FromRow)]
struct PermissionRow {
    permission_id: String,
    name: String,
    action: String,
    description: String,
    is_active: bool,
}

impl From<PermissionRow> for Permission {
    fn from(row: PermissionRow) -> Self {
        Permission {
            permission_id: row.permission_id,
            name: row.name,
            action: row.action,
            description: row.description,
            is_active: row.is_active,
        }
    }
}
