//! Group permission repository trait (port)

use async_trait::async_trait;

use crate::domain::GroupPermission;
use crate::error::DomainError;

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait GroupPermissionRepository: Send + Sync {
    async fn next_sequence(&self) -> Result<i64, DomainError>;
    /// The row for `(group_id, permission_id)`, active or not.
    async fn find(
        &self,
        group_id: &str,
        permission_id: &str,
    ) -> Result<Option<GroupPermission>, DomainError>;
    async fn list_by_group(&self, group_id: &str) -> Result<Vec<GroupPermission>, DomainError>;
    async fn create(&self, row: &GroupPermission) -> Result<GroupPermission, DomainError>;
    async fn update(&self, row: &GroupPermission) -> Result<GroupPermission, DomainError>;
}
