//! Permission repository trait (port)

use async_trait::async_trait;

use crate::domain::Permission;
use crate::error::DomainError;

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait PermissionRepository: Send + Sync {
    async fn find_by_id(&self, permission_id: &str) -> Result<Option<Permission>, DomainError>;
    async fn list_active(&self) -> Result<Vec<Permission>, DomainError>;
    /// Distinct actions across the catalog, sorted.
    async fn list_actions(&self) -> Result<Vec<String>, DomainError>;
}
