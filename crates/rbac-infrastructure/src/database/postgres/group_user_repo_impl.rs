// ============================================================================
// RBAC Infrastructure - PostgreSQL Group User Repository
// File: crates/rbac-infrastructure/src/database/postgres/group_user_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use rbac_core::domain::GroupUserMapping;
use rbac_core::error::DomainError;
use rbac_core::repositories::GroupUserRepository;

use super::{db_error, next_value};

const SELECT_COLUMNS: &str = r#"
    SELECT group_user_mapping_id, group_id, user_id, organization_id, is_active,
           created_by, created_on, modified_by, modified_on
    FROM group_user_mappings
"#;

pub struct PgGroupUserRepository {
    pool: PgPool,
}

impl PgGroupUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn list_where(
        &self,
        condition: &str,
        value: &str,
        operation: &str,
    ) -> Result<Vec<GroupUserMapping>, DomainError> {
        let sql = format!("{} WHERE {} = $1", SELECT_COLUMNS, condition);
        let rows: Vec<GroupUserRow> = sqlx::query_as(&sql)
            .bind(value)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error(operation, e))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl GroupUserRepository for PgGroupUserRepository {
    async fn next_sequence(&self) -> Result<i64, DomainError> {
        next_value(&self.pool, "group_user_mapping_id_seq").await
    }

    async fn find(
        &self,
        group_id: &str,
        user_id: &str,
    ) -> Result<Option<GroupUserMapping>, DomainError> {
        let sql = format!("{} WHERE group_id = $1 AND user_id = $2", SELECT_COLUMNS);
        let row: Option<GroupUserRow> = sqlx::query_as(&sql)
            .bind(group_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("finding group user mapping", e))?;

        Ok(row.map(Into::into))
    }

    async fn list_by_group(&self, group_id: &str) -> Result<Vec<GroupUserMapping>, DomainError> {
        self.list_where("group_id", group_id, "listing group users by group").await
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<GroupUserMapping>, DomainError> {
        self.list_where("user_id", user_id, "listing group users by user").await
    }

    async fn list_by_organization(
        &self,
        organization_id: &str,
    ) -> Result<Vec<GroupUserMapping>, DomainError> {
        self.list_where("organization_id", organization_id, "listing group users by organization")
            .await
    }

    async fn create(&self, row: &GroupUserMapping) -> Result<GroupUserMapping, DomainError> {
        let inserted: GroupUserRow = sqlx::query_as(
            r#"
            INSERT INTO group_user_mappings (
                group_user_mapping_id, group_id, user_id, organization_id, is_active,
                created_by, created_on, modified_by, modified_on
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING group_user_mapping_id, group_id, user_id, organization_id, is_active,
                      created_by, created_on, modified_by, modified_on
            "#,
        )
        .bind(&row.group_user_mapping_id)
        .bind(&row.group_id)
        .bind(&row.user_id)
        .bind(&row.organization_id)
        .bind(row.is_active)
        .bind(&row.created_by)
        .bind(row.created_on)
        .bind(&row.modified_by)
        .bind(row.modified_on)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("creating group user mapping", e))?;

        Ok(inserted.into())
    }

    async fn update(&self, row: &GroupUserMapping) -> Result<GroupUserMapping, DomainError> {
        let updated: GroupUserRow = sqlx::query_as(
            r#"
            UPDATE group_user_mappings
            SET is_active = $2, modified_by = $3, modified_on = $4
            WHERE group_user_mapping_id = $1
            RETURNING group_user_mapping_id, group_id, user_id, organization_id, is_active,
                      created_by, created_on, modified_by, modified_on
            "#,
        )
        .bind(&row.group_user_mapping_id)
        .bind(row.is_active)
        .bind(&row.modified_by)
        .bind(row.modified_on)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("updating group user mapping", e))?;

        Ok(updated.into())
    }
}

#[derive(Debug, FromRow)]
struct GroupUserRow {
    group_user_mapping_id: String,
    group_id: String,
    user_id: String,
    organization_id: String,
    is_active: bool,
    created_by: String,
    created_on: DateTime<Utc>,
    modified_by: Option<String>,
    modified_on: Option<DateTime<Utc>>,
}

impl From<GroupUserRow> for GroupUserMapping {
    fn from(row: GroupUserRow) -> Self {
        GroupUserMapping {
            group_user_mapping_id: row.group_user_mapping_id,
            group_id: row.group_id,
            user_id: row.user_id,
            organization_id: row.organization_id,
            is_active: row.is_active,
            created_by: row.created_by,
            created_on: row.created_on,
            modified_by: row.modified_by,
            modified_on: row.modified_on,
        }
    }
}
