//! User repository trait (port)

use async_trait::async_trait;

use crate::domain::User;
use crate::error::DomainError;

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, user_id: &str) -> Result<Option<User>, DomainError>;
    async fn list_by_organization(&self, organization_id: &str) -> Result<Vec<User>, DomainError>;
}
