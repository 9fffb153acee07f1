//! Group repository trait (port)

use async_trait::async_trait;

use crate::domain::Group;
use crate::error::DomainError;

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait GroupRepository: Send + Sync {
    /// Next value of the group id sequence.
    async fn next_sequence(&self) -> Result<i64, DomainError>;
    async fn find_by_id(&self, group_id: &str) -> Result<Option<Group>, DomainError>;
    /// Case-insensitive name lookup within one organization.
    async fn find_by_name(
        &self,
        organization_id: &str,
        group_name: &str,
    ) -> Result<Option<Group>, DomainError>;
    async fn list_all(&self) -> Result<Vec<Group>, DomainError>;
    async fn list_by_organization(&self, organization_id: &str) -> Result<Vec<Group>, DomainError>;
    async fn create(&self, group: &Group) -> Result<Group, DomainError>;
    async fn update(&self, group: &Group) -> Result<Group, DomainError>;
    /// Removes the group together with its permission and user rows.
    async fn delete(&self, group_id: &str) -> Result<(), DomainError>;
}
