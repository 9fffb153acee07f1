// ============================================================================
// RBAC Infrastructure - PostgreSQL Group Repository
// File: crates/rbac-infrastructure/src/database/postgres/group_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::info;

use rbac_core::domain::Group;
use rbac_core::error::DomainError;
use rbac_core::repositories::GroupRepository;

use super::{db_error, next_value};

pub struct PgGroupRepository {
    pool: PgPool,
}

impl PgGroupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GroupRepository for PgGroupRepository {
    async fn next_sequence(&self) -> Result<i64, DomainError> {
        next_value(&self.pool, "group_id_seq").await
    }

    async fn find_by_id(&self, group_id: &str) -> Result<Option<Group>, DomainError> {
        let row: Option<GroupRow> = sqlx::query_as(
            r#"
            SELECT group_id, group_name, organization_id, is_active,
                   created_by, created_on, modified_by, modified_on
            FROM access_groups
            WHERE group_id = $1
            "#,
        )
        .bind(group_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("finding group by id", e))?;

        Ok(row.map(Into::into))
    }

    async fn find_by_name(
        &self,
        organization_id: &str,
        group_name: &str,
    ) -> Result<Option<Group>, DomainError> {
        let row: Option<GroupRow> = sqlx::query_as(
            r#"
            SELECT group_id, group_name, organization_id, is_active,
                   created_by, created_on, modified_by, modified_on
            FROM access_groups
            WHERE organization_id = $1 AND LOWER(group_name) = LOWER(TRIM($2))
            "#,
        )
        .bind(organization_id)
        .bind(group_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("finding group by name", e))?;

        Ok(row.map(Into::into))
    }

    async fn list_all(&self) -> Result<Vec<Group>, DomainError> {
        let rows: Vec<GroupRow> = sqlx::query_as(
            r#"
            SELECT group_id, group_name, organization_id, is_active,
                   created_by, created_on, modified_by, modified_on
            FROM access_groups
            ORDER BY group_id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("listing groups", e))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_by_organization(&self, organization_id: &str) -> Result<Vec<Group>, DomainError> {
        let rows: Vec<GroupRow> = sqlx::query_as(
            r#"
            SELECT group_id, group_name, organization_id, is_active,
                   created_by, created_on, modified_by, modified_on
            FROM access_groups
            WHERE organization_id = $1
            ORDER BY group_id
            "#,
        )
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("listing groups by organization", e))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create(&self, group: &Group) -> Result<Group, DomainError> {
        let row: GroupRow = sqlx::query_as(
            r#"
            INSERT INTO access_groups (
                group_id, group_name, organization_id, is_active,
                created_by, created_on, modified_by, modified_on
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING group_id, group_name, organization_id, is_active,
                      created_by, created_on, modified_by, modified_on
            "#,
        )
        .bind(&group.group_id)
        .bind(&group.group_name)
        .bind(&group.organization_id)
        .bind(group.is_active)
        .bind(&group.created_by)
        .bind(group.created_on)
        .bind(&group.modified_by)
        .bind(group.modified_on)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("creating group", e))?;

        info!("Group row inserted: {}", row.group_id);
        Ok(row.into())
    }

    async fn update(&self, group: &Group) -> Result<Group, DomainError> {
        let row: GroupRow = sqlx::query_as(
            r#"
            UPDATE access_groups
            SET group_name = $2, is_active = $3, modified_by = $4, modified_on = $5
            WHERE group_id = $1
            RETURNING group_id, group_name, organization_id, is_active,
                      created_by, created_on, modified_by, modified_on
            "#,
        )
        .bind(&group.group_id)
        .bind(&group.group_name)
        .bind(group.is_active)
        .bind(&group.modified_by)
        .bind(group.modified_on)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("updating group", e))?;

        Ok(row.into())
    }

    async fn delete(&self, group_id: &str) -> Result<(), DomainError> {
        // Join rows go through ON DELETE CASCADE.
        sqlx::query("DELETE FROM access_groups WHERE group_id = $1")
            .bind(group_id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("deleting group", e))?;

        info!("Group row deleted: {}", group_id);
        Ok(())
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct GroupRow {
    group_id: String,
    group_name: String,
    organization_id: String,
    is_active: bool,
    created_by: String,
    created_on: DateTime<Utc>,
    modified_by: Option<String>,
    modified_on: Option<DateTime<Utc>>,
}

impl From<GroupRow> for Group {
    fn from(row: GroupRow) -> Self {
        Group {
            group_id: row.group_id,
            group_name: row.group_name,
            organization_id: row.organization_id,
            is_active: row.is_active,
            created_by: row.created_by,
            created_on: row.created_on,
            modified_by: row.modified_by,
            modified_on: row.modified_on,
        }
    }
}
