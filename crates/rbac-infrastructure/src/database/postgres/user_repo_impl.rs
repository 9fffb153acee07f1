//! PostgreSQL user repository (read-only)

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use rbac_core::domain::User;
use rbac_core::error::DomainError;
use rbac_core::repositories::UserRepository;

use super::db_error;

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, user_id: &str) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT user_id, organization_id, first_name, last_name, email_address,
                   is_active, is_deleted, is_first_login, is_email_verified
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("finding user by id", e))?;

        Ok(row.map(Into::into))
    }

    async fn list_by_organization(&self, organization_id: &str) -> Result<Vec<User>, DomainError> {
        let rows: Vec<UserRow> = sqlx::query_as(
            r#"
            SELECT user_id, organization_id, first_name, last_name, email_address,
                   is_active, is_deleted, is_first_login, is_email_verified
            FROM users
            WHERE organization_id = $1
            ORDER BY user_id
            "#,
        )
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("listing users by organization", e))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    user_id: String,
    organization_id: String,
    first_name: String,
    last_name: String,
    email_address: String,
    is_active: bool,
    is_deleted: bool,
    is_first_login: bool,
    is_email_verified: bool,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            user_id: row.user_id,
            organization_id: row.organization_id,
            first_name: row.first_name,
            last_name: row.last_name,
            email_address: row.email_address,
            is_active: row.is_active,
            is_deleted: row.is_deleted,
            is_first_login: row.is_first_login,
            is_email_verified: row.is_email_verified,
        }
    }
}
