// ============================================================================
// RBAC Core - Group User Manager
// File: crates/rbac-core/src/services/group_user_manager.rs
// ============================================================================
//! Group membership listings and mapping upserts

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use rbac_shared::constants::GROUP_USER_MAPPING_ID_PREFIX;
use rbac_shared::utils::{contains_ignore_case, format_sequence};

use crate::domain::{GroupUserMapping, User};
use crate::error::DomainError;
use crate::messages::Message;
use crate::models::{
    GroupUserListItem, GroupUserMappingSaveDeleteModel, GroupUserMappingView, GroupUserModel,
    GroupUsersByOrganizationFilter, GroupsByUserFilter, KeyValue, OrganizationUserView,
    UserGroupModel, UsersByGroupFilter,
};
use crate::query::{compare_text, non_blank, ListQuery, SortKey, SortSpec};
use crate::repositories::UnitOfWork;
use crate::response::{AuditDetail, ResponseEnvelope};

use super::require;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UserSortKey {
    FirstName,
    LastName,
    EmailAddress,
}

impl SortKey for UserSortKey {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "firstname" => Some(UserSortKey::FirstName),
            "lastname" => Some(UserSortKey::LastName),
            "emailaddress" => Some(UserSortKey::EmailAddress),
            _ => None,
        }
    }
}

impl UserSortKey {
    fn compare(self, a: &User, b: &User) -> std::cmp::Ordering {
        match self {
            UserSortKey::FirstName => compare_text(&a.first_name, &b.first_name),
            UserSortKey::LastName => compare_text(&a.last_name, &b.last_name),
            UserSortKey::EmailAddress => compare_text(&a.email_address, &b.email_address),
        }
    }
}

/// Validated `(organization, group, user)` triple.
struct MembershipKey<'a> {
    organization_id: &'a str,
    group_id: &'a str,
    user_id: &'a str,
}

impl<'a> MembershipKey<'a> {
    fn parse(model: &'a GroupUserMappingSaveDeleteModel) -> Result<Self, Vec<Message>> {
        let mut errors = Vec::new();
        require(&mut errors, &model.organization_id, Message::OrganizationRequired);
        require(&mut errors, &model.group_id, Message::GroupRequired);
        require(&mut errors, &model.user_id, Message::UserRequired);

        match (
            non_blank(&model.organization_id),
            non_blank(&model.group_id),
            non_blank(&model.user_id),
        ) {
            (Some(organization_id), Some(group_id), Some(user_id)) => Ok(Self {
                organization_id,
                group_id,
                user_id,
            }),
            _ => Err(errors),
        }
    }
}

pub struct GroupUserManager {
    uow: Arc<dyn UnitOfWork>,
}

impl GroupUserManager {
    pub fn new(uow: Arc<dyn UnitOfWork>) -> Self {
        Self { uow }
    }

    /// Users of an organization who are either unassigned or members of
    /// `filter.group_id`, over their full set of active mappings.
    pub async fn get_users_by_organization(
        &self,
        filter: &GroupUsersByOrganizationFilter,
    ) -> Result<ResponseEnvelope<Vec<GroupUserListItem>>, DomainError> {
        let Some(organization_id) = non_blank(&filter.organization_id) else {
            return Ok(ResponseEnvelope::fail_with_errors(vec![Message::OrganizationRequired]));
        };
        let group_id = non_blank(&filter.group_id);

        let mut memberships: HashMap<String, Vec<String>> = HashMap::new();
        for mapping in self
            .uow
            .group_users()
            .list_by_organization(organization_id)
            .await?
            .into_iter()
            .filter(|m| m.is_active)
        {
            memberships.entry(mapping.user_id).or_default().push(mapping.group_id);
        }

        let rows: Vec<(User, bool)> = self
            .uow
            .users()
            .list_by_organization(organization_id)
            .await?
            .into_iter()
            .filter(|u| !u.is_deleted && u.is_active)
            .filter_map(|u| {
                let groups = memberships.get(&u.user_id).map(Vec::as_slice).unwrap_or(&[]);
                let is_member = group_id.is_some_and(|g| groups.iter().any(|m| m == g));
                (groups.is_empty() || is_member).then_some((u, is_member))
            })
            .collect();

        let first_name = non_blank(&filter.first_name);
        let last_name = non_blank(&filter.last_name);
        let email_address = non_blank(&filter.email_address);
        let search = non_blank(&filter.search);
        let sort = SortSpec::resolve(
            filter.sort_by.as_deref(),
            filter.sort_order.as_deref(),
            UserSortKey::FirstName,
        );
        let members_first = first_name.is_none()
            && last_name.is_none()
            && email_address.is_none()
            && search.is_none()
            && filter.is_group_user.is_none()
            && !sort.explicit;

        let query = ListQuery::new(rows)
            .filter_when(first_name, |(u, _), v| contains_ignore_case(&u.first_name, v))
            .filter_when(last_name, |(u, _), v| contains_ignore_case(&u.last_name, v))
            .filter_when(email_address, |(u, _), v| contains_ignore_case(&u.email_address, v))
            .filter_when(search, |(u, _), v| u.matches_search(v))
            .filter_when(filter.is_group_user, |(_, member), wanted| member == wanted);

        let query = if members_first {
            query.sort_by(|(a, a_member), (b, b_member)| {
                b_member
                    .cmp(a_member)
                    .then_with(|| UserSortKey::FirstName.compare(a, b))
            })
        } else {
            query.sort_by(|(a, _), (b, _)| sort.direction.apply(sort.key.compare(a, b)))
        };

        let page = query.paginate(&filter.page());
        debug!("Organization users: {} of {} rows", page.items.len(), page.total_records);

        let total = page.total_records;
        if page.is_empty() {
            return Ok(ResponseEnvelope::fail(Message::NoUsersFound).with_total_records(total));
        }

        let page = page.map(|(u, is_member)| GroupUserListItem::new(&u, is_member));
        Ok(ResponseEnvelope::ok(page.items).with_total_records(total))
    }

    /// Active members of one group. A group outside `organization_id` is
    /// reported as not found.
    pub async fn get_users_by_group(
        &self,
        filter: &UsersByGroupFilter,
        organization_id: &str,
    ) -> Result<ResponseEnvelope<GroupUserModel>, DomainError> {
        let Some(group_id) = non_blank(&filter.group_id) else {
            return Ok(ResponseEnvelope::fail_with_errors(vec![Message::GroupRequired]));
        };

        let group = match self.uow.groups().find_by_id(group_id).await? {
            Some(group) if group.belongs_to(organization_id) => group,
            _ => {
                warn!(
                    "Users by group rejected: group {} not found in {}",
                    group_id, organization_id
                );
                return Ok(ResponseEnvelope::fail(Message::GroupNotFound));
            }
        };

        let users: HashMap<String, User> = self
            .uow
            .users()
            .list_by_organization(&group.organization_id)
            .await?
            .into_iter()
            .map(|u| (u.user_id.clone(), u))
            .collect();

        let rows: Vec<User> = self
            .uow
            .group_users()
            .list_by_group(group_id)
            .await?
            .into_iter()
            .filter(|m| m.is_active)
            .filter_map(|m| users.get(&m.user_id).cloned())
            .collect();

        let sort = SortSpec::resolve(
            filter.sort_by.as_deref(),
            filter.sort_order.as_deref(),
            UserSortKey::FirstName,
        );

        let page = ListQuery::new(rows)
            .filter_when(non_blank(&filter.first_name), |u, v| contains_ignore_case(&u.first_name, v))
            .filter_when(non_blank(&filter.last_name), |u, v| contains_ignore_case(&u.last_name, v))
            .filter_when(non_blank(&filter.email_address), |u, v| {
                contains_ignore_case(&u.email_address, v)
            })
            .sort_by(|a, b| sort.direction.apply(sort.key.compare(a, b)))
            .paginate(&filter.page());

        debug!("Group {} users: {} of {} rows", group_id, page.items.len(), page.total_records);

        let total = page.total_records;
        if page.is_empty() {
            return Ok(ResponseEnvelope::fail(Message::NoRecordsFound).with_total_records(total));
        }

        let model = GroupUserModel {
            group_id: group.group_id,
            group_name: group.group_name,
            group_status: group.is_active,
            group_users: page.items.iter().map(|u| GroupUserListItem::new(u, true)).collect(),
        };
        Ok(ResponseEnvelope::ok(model).with_total_records(total))
    }

    /// Groups a user actively belongs to, sorted by name. When
    /// `filter.organization_id` is set the user must belong to it.
    pub async fn get_groups_by_user(
        &self,
        filter: &GroupsByUserFilter,
    ) -> Result<ResponseEnvelope<UserGroupModel>, DomainError> {
        let user_id = filter.user_id.trim();
        if user_id.is_empty() {
            return Ok(ResponseEnvelope::fail_with_errors(vec![Message::UserRequired]));
        }

        let organization_id = non_blank(&filter.organization_id);
        let user = match self.uow.users().find_by_id(user_id).await? {
            Some(user) if organization_id.map_or(true, |org| user.organization_id == org) => user,
            _ => {
                warn!("Groups by user rejected: user {} not found", user_id);
                return Ok(ResponseEnvelope::fail(Message::UserNotFound));
            }
        };

        let mappings: Vec<GroupUserMapping> = self
            .uow
            .group_users()
            .list_by_user(user_id)
            .await?
            .into_iter()
            .filter(|m| m.is_active)
            .filter(|m| organization_id.map_or(true, |org| m.organization_id == org))
            .collect();

        let mut groups = Vec::with_capacity(mappings.len());
        for mapping in &mappings {
            if let Some(group) = self.uow.groups().find_by_id(&mapping.group_id).await? {
                groups.push(group);
            }
        }

        let page = ListQuery::new(groups)
            .filter_when(filter.is_active, |g, active| g.is_active == *active)
            .sort_by(|a, b| compare_text(&a.group_name, &b.group_name))
            .paginate(&Default::default());

        let total = page.total_records;
        let model = UserGroupModel {
            user_name: user.full_name(),
            user_id: user.user_id,
            groups: page
                .items
                .into_iter()
                .map(|g| KeyValue::new(g.group_id, g.group_name))
                .collect(),
        };
        Ok(ResponseEnvelope::ok(model).with_total_records(total))
    }

    pub async fn save_group_user_mapping(
        &self,
        model: &GroupUserMappingSaveDeleteModel,
        logged_in_user_id: &str,
    ) -> Result<ResponseEnvelope<GroupUserMappingView>, DomainError> {
        let key = match MembershipKey::parse(model) {
            Ok(key) => key,
            Err(errors) => {
                warn!("Save group user rejected: {} validation error(s)", errors.len());
                return Ok(ResponseEnvelope::fail_with_errors(errors));
            }
        };

        let group_exists = self
            .uow
            .groups()
            .find_by_id(key.group_id)
            .await?
            .is_some_and(|g| g.belongs_to(key.organization_id));
        if !group_exists {
            warn!("Save group user rejected: group {} not found", key.group_id);
            return Ok(ResponseEnvelope::fail(Message::GroupNotFound));
        }

        let user_exists = self
            .uow
            .users()
            .find_by_id(key.user_id)
            .await?
            .is_some_and(|u| !u.is_deleted && u.organization_id == key.organization_id);
        if !user_exists {
            warn!("Save group user rejected: user {} not found", key.user_id);
            return Ok(ResponseEnvelope::fail(Message::UserNotFound));
        }

        let repo = self.uow.group_users();
        let (saved, audit) = match repo.find(key.group_id, key.user_id).await? {
            Some(mut row) => {
                let old = row.clone();
                row.activate(logged_in_user_id);
                let saved = repo.update(&row).await?;
                let audit = AuditDetail::updated(&old, &saved)?;
                (saved, audit)
            }
            None => {
                let sequence = repo.next_sequence().await?;
                let row = GroupUserMapping::new(
                    format_sequence(GROUP_USER_MAPPING_ID_PREFIX, sequence),
                    key.organization_id,
                    key.group_id,
                    key.user_id,
                    logged_in_user_id,
                );
                let saved = repo.create(&row).await?;
                let audit = AuditDetail::created(&saved)?;
                (saved, audit)
            }
        };

        info!(
            "Group user saved: {} -> {} ({})",
            saved.user_id, saved.group_id, saved.group_user_mapping_id
        );

        Ok(ResponseEnvelope::ok_with_message(
            GroupUserMappingView::from(&saved),
            Message::GroupUserSaved,
        )
        .with_audit(audit))
    }

    pub async fn delete_group_user_mapping(
        &self,
        model: &GroupUserMappingSaveDeleteModel,
        logged_in_user_id: &str,
    ) -> Result<ResponseEnvelope<String>, DomainError> {
        let key = match MembershipKey::parse(model) {
            Ok(key) => key,
            Err(errors) => {
                warn!("Delete group user rejected: {} validation error(s)", errors.len());
                return Ok(ResponseEnvelope::fail_with_errors(errors));
            }
        };

        let repo = self.uow.group_users();
        let mut row = match repo.find(key.group_id, key.user_id).await? {
            Some(row) if row.is_active && row.organization_id == key.organization_id => row,
            _ => {
                warn!(
                    "Delete group user rejected: no active mapping {} -> {}",
                    key.user_id, key.group_id
                );
                return Ok(ResponseEnvelope::fail(Message::GroupUserNotFound));
            }
        };

        let old = row.clone();
        row.deactivate(logged_in_user_id);
        let saved = repo.update(&row).await?;

        info!("Group user removed: {} -> {}", saved.user_id, saved.group_id);

        let audit = AuditDetail::updated(&old, &saved)?;
        let message = Message::GroupUserRemoved;
        Ok(ResponseEnvelope::ok_with_message(message.to_string(), message).with_audit(audit))
    }

    /// Onboarded users of an organization who can be added to groups.
    pub async fn get_all_available_group_users(
        &self,
        organization_id: &str,
        is_active: Option<bool>,
    ) -> Result<ResponseEnvelope<Vec<OrganizationUserView>>, DomainError> {
        let users = self.uow.users().list_by_organization(organization_id).await?;

        let page = ListQuery::new(users)
            .filter(User::is_onboarded)
            .filter_when(is_active, |u, active| u.is_active == *active)
            .sort_by(|a, b| compare_text(&a.full_name(), &b.full_name()))
            .paginate(&Default::default());

        let total = page.total_records;
        let page = page.map(|u| OrganizationUserView::from(&u));
        Ok(ResponseEnvelope::ok(page.items).with_total_records(total))
    }
}
