// ============================================================================
// RBAC Infrastructure - PostgreSQL Group Permission Repository
// File: crates/rbac-infrastructure/src/database/postgres/group_permission_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use rbac_core::domain::GroupPermission;
use rbac_core::error::DomainError;
use rbac_core::repositories::GroupPermissionRepository;

use super::{db_error, next_value};

pub struct PgGroupPermissionRepository {
    pool: PgPool,
}

impl PgGroupPermissionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GroupPermissionRepository for PgGroupPermissionRepository {
    async fn next_sequence(&self) -> Result<i64, DomainError> {
        next_value(&self.pool, "group_permission_id_seq").await
    }

    async fn find(
        &self,
        group_id: &str,
        permission_id: &str,
    ) -> Result<Option<GroupPermission>, DomainError> {
        let row: Option<GroupPermissionRow> = sqlx::query_as(
            r#"
            SELECT group_permission_id, organization_id, group_id, permission_id, is_active,
                   created_by, created_on, modified_by, modified_on
            FROM group_permissions
            WHERE group_id = $1 AND permission_id = $2
            "#,
        )
        .bind(group_id)
        .bind(permission_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("finding group permission", e))?;

        Ok(row.map(Into::into))
    }

    async fn list_by_group(&self, group_id: &str) -> Result<Vec<GroupPermission>, DomainError> {
        let rows: Vec<GroupPermissionRow> = sqlx::query_as(
            r#"
            SELECT group_permission_id, organization_id, group_id, permission_id, is_active,
                   created_by, created_on, modified_by, modified_on
            FROM group_permissions
            WHERE group_id = $1
            "#,
        )
        .bind(group_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("listing group permissions", e))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create(&self, row: &GroupPermission) -> Result<GroupPermission, DomainError> {
        let inserted: GroupPermissionRow = sqlx::query_as(
            r#"
            INSERT INTO group_permissions (
                group_permission_id, organization_id, group_id, permission_id, is_active,
                created_by, created_on, modified_by, modified_on
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING group_permission_id, organization_id, group_id, permission_id, is_active,
                      created_by, created_on, modified_by, modified_on
            "#,
        )
        .bind(&row.group_permission_id)
        .bind(&row.organization_id)
        .bind(&row.group_id)
        .bind(&row.permission_id)
        .bind(row.is_active)
        .bind(&row.created_by)
        .bind(row.created_on)
        .bind(&row.modified_by)
        .bind(row.modified_on)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("creating group permission", e))?;

        Ok(inserted.into())
    }

    async fn update(&self, row: &GroupPermission) -> Result<GroupPermission, DomainError> {
        let updated: GroupPermissionRow = sqlx::query_as(
            r#"
            UPDATE group_permissions
            SET is_active = $2, modified_by = $3, modified_on = $4
            WHERE group_permission_id = $1
            RETURNING group_permission_id, organization_id, group_id, permission_id, is_active,
                      created_by, created_on, modified_by, modified_on
            "#,
        )
        .bind(&row.group_permission_id)
        .bind(row.is_active)
        .bind(&row.modified_by)
        .bind(row.modified_on)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("updating group permission", e))?;

        Ok(updated.into())
    }
}

#[derive(Debug, FromRow)]
struct GroupPermissionRow {
    group_permission_id: String,
    organization_id: String,
    group_id: String,
    permission_id: String,
    is_active: bool,
    created_by: String,
    created_on: DateTime<Utc>,
    modified_by: Option<String>,
    modified_on: Option<DateTime<Utc>>,
}

impl From<GroupPermissionRow> for GroupPermission {
    fn from(row: GroupPermissionRow) -> Self {
        GroupPermission {
            group_permission_id: row.group_permission_id,
            organization_id: row.organization_id,
            group_id: row.group_id,
            permission_id: row.permission_id,
            is_active: row.is_active,
            created_by: row.created_by,
            created_on: row.created_on,
            modified_by: row.modified_by,
            modified_on: row.modified_on,
        }
    }
}
