use std::num::NonZeroU32;
use std::sync::Arc;

use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};

use rbac_core::repositories::{AuditTrailSink, UnitOfWork};
use rbac_core::{GroupManager, GroupPermissionManager, GroupUserManager};
use rbac_security::JwtService;

#[derive(Clone)]
pub struct AppState {
    pub groups: Arc<GroupManager>,
    pub group_permissions: Arc<GroupPermissionManager>,
    pub group_users: Arc<GroupUserManager>,
    pub audit: Arc<dyn AuditTrailSink>,
    pub jwt: Arc<JwtService>,
    pub rate_limiter: Arc<DefaultDirectRateLimiter>,
}

impl AppState {
    /// Builds every manager over the same unit of work. A zero rate is
    /// raised to one request per second.
    pub fn new(
        uow: Arc<dyn UnitOfWork>,
        audit: Arc<dyn AuditTrailSink>,
        jwt: JwtService,
        rate_limit_per_second: u32,
    ) -> Self {
        let rate = NonZeroU32::new(rate_limit_per_second).unwrap_or(NonZeroU32::MIN);
        Self {
            groups: Arc::new(GroupManager::new(uow.clone())),
            group_permissions: Arc::new(GroupPermissionManager::new(uow.clone())),
            group_users: Arc::new(GroupUserManager::new(uow)),
            audit,
            jwt: Arc::new(jwt),
            rate_limiter: Arc::new(RateLimiter::direct(Quota::per_second(rate))),
        }
    }
}
