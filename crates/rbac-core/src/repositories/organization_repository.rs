//! Organization repository trait (port)

use async_trait::async_trait;

use crate::domain::Organization;
use crate::error::DomainError;

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait OrganizationRepository: Send + Sync {
    async fn find_by_id(&self, organization_id: &str) -> Result<Option<Organization>, DomainError>;
    async fn list_all(&self) -> Result<Vec<Organization>, DomainError>;
}
