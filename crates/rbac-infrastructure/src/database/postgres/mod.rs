//! PostgreSQL implementations

pub mod audit_trail_repo_impl;
pub mod group_permission_repo_impl;
pub mod group_repo_impl;
pub mod group_user_repo_impl;
pub mod organization_repo_impl;
pub mod permission_repo_impl;
pub mod unit_of_work;
pub mod user_repo_impl;

pub use audit_trail_repo_impl::PgAuditTrailSink;
pub use group_permission_repo_impl::PgGroupPermissionRepository;
pub use group_repo_impl::PgGroupRepository;
pub use group_user_repo_impl::PgGroupUserRepository;
pub use organization_repo_impl::PgOrganizationRepository;
pub use permission_repo_impl::PgPermissionRepository;
pub use unit_of_work::PgUnitOfWork;
pub use user_repo_impl::PgUserRepository;

use rbac_core::error::DomainError;
use tracing::{error, warn};

const UNIQUE_VIOLATION: &str = "23505";

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err
            .code()
            .is_some_and(|code| code.as_ref() == UNIQUE_VIOLATION),
        _ => false,
    }
}

/// Maps a driver error, logging it with the failed operation.
pub(crate) fn db_error(operation: &str, err: sqlx::Error) -> DomainError {
    if is_unique_violation(&err) {
        warn!("Unique constraint violated while {}: {}", operation, err);
        return DomainError::Conflict(err.to_string());
    }
    error!("Database error {}: {}", operation, err);
    DomainError::DatabaseError(err.to_string())
}

/// Next value of a named sequence.
pub(crate) async fn next_value(pool: &sqlx::PgPool, sequence: &str) -> Result<i64, DomainError> {
    sqlx::query_scalar::<_, i64>("SELECT nextval($1::regclass)")
        .bind(sequence)
        .fetch_one(pool)
        .await
        .map_err(|e| db_error("reading sequence", e))
}
