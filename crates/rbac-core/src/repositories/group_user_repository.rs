//! Group user mapping repository trait (port)

use async_trait::async_trait;

use crate::domain::GroupUserMapping;
use crate::error::DomainError;

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait GroupUserRepository: Send + Sync {
    async fn next_sequence(&self) -> Result<i64, DomainError>;
    /// The row for `(group_id, user_id)`, active or not.
    async fn find(
        &self,
        group_id: &str,
        user_id: &str,
    ) -> Result<Option<GroupUserMapping>, DomainError>;
    async fn list_by_group(&self, group_id: &str) -> Result<Vec<GroupUserMapping>, DomainError>;
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<GroupUserMapping>, DomainError>;
    async fn list_by_organization(
        &self,
        organization_id: &str,
    ) -> Result<Vec<GroupUserMapping>, DomainError>;
    async fn create(&self, row: &GroupUserMapping) -> Result<GroupUserMapping, DomainError>;
    async fn update(&self, row: &GroupUserMapping) -> Result<GroupUserMapping, DomainError>;
}
