//! PostgreSQL organization repository

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use rbac_core::domain::Organization;
use rbac_core::error::DomainError;
use rbac_core::repositories::OrganizationRepository;

use super::db_error;

pub struct PgOrganizationRepository {
    pool: PgPool,
}

impl PgOrganizationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrganizationRepository for PgOrganizationRepository {
    async fn find_by_id(&self, organization_id: &str) -> Result<Option<Organization>, DomainError> {
        let row: Option<OrganizationRow> = sqlx::query_as(
            "SELECT organization_id, organization_name, is_active FROM organizations WHERE organization_id = $1",
        )
        .bind(organization_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("finding organization by id", e))?;

        Ok(row.map(Into::into))
    }

    async fn list_all(&self) -> Result<Vec<Organization>, DomainError> {
        let rows: Vec<OrganizationRow> = sqlx::query_as(
            "SELECT organization_id, organization_name, is_active FROM organizations",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("listing organizations", e))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[derive(Debug, FromRow)]
struct OrganizationRow {
    organization_id: String,
    organization_name: String,
    is_active: bool,
}

impl From<OrganizationRow> for Organization {
    fn from(row: OrganizationRow) -> Self {
        Organization {
            organization_id: row.organization_id,
            organization_name: row.organization_name,
            is_active: row.is_active,
        }
    }
}
