// ============================================================================
// RBAC Core - Group Manager
// File: crates/rbac-core/src/services/group_manager.rs
// ============================================================================
//! Group listing, lookup and lifecycle

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info, warn};

use rbac_shared::constants::GROUP_ID_PREFIX;
use rbac_shared::utils::{contains_ignore_case, format_sequence};

use crate::domain::group::is_reserved_name;
use crate::domain::{Group, Organization, User};
use crate::error::DomainError;
use crate::messages::Message;
use crate::models::{
    GroupCreateModel, GroupDetail, GroupFilter, GroupUpdateModel, GroupUserSummary, GroupView,
    KeyValue,
};
use crate::query::{compare_text, non_blank, ListQuery, SortKey, SortSpec};
use crate::repositories::UnitOfWork;
use crate::response::{meta, AuditDetail, ResponseEnvelope};

use super::require;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GroupSortKey {
    GroupName,
}

impl SortKey for GroupSortKey {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "groupname" => Some(GroupSortKey::GroupName),
            _ => None,
        }
    }
}

pub struct GroupManager {
    uow: Arc<dyn UnitOfWork>,
}

impl GroupManager {
    pub fn new(uow: Arc<dyn UnitOfWork>) -> Self {
        Self { uow }
    }

    /// Groups joined to their organization, reserved group excluded.
    pub async fn get_group_list(
        &self,
        filter: &GroupFilter,
    ) -> Result<ResponseEnvelope<Vec<GroupView>>, DomainError> {
        let organizations: HashMap<String, Organization> = self
            .uow
            .organizations()
            .list_all()
            .await?
            .into_iter()
            .map(|o| (o.organization_id.clone(), o))
            .collect();

        // Inner join: groups without an organization are dropped.
        let rows: Vec<(Group, String)> = self
            .uow
            .groups()
            .list_all()
            .await?
            .into_iter()
            .filter_map(|g| {
                let name = organizations.get(&g.organization_id)?.organization_name.clone();
                Some((g, name))
            })
            .collect();

        let sort = SortSpec::resolve(
            filter.sort_by.as_deref(),
            filter.sort_order.as_deref(),
            GroupSortKey::GroupName,
        );

        let page = ListQuery::new(rows)
            .filter(|(g, _)| !g.is_reserved())
            .filter_when(non_blank(&filter.group_name), |(g, _), name| {
                contains_ignore_case(&g.group_name, name)
            })
            .filter_when(non_blank(&filter.organization_id), |(g, _), org| {
                g.organization_id == *org
            })
            .filter_when(filter.is_active, |(g, _), active| g.is_active == *active)
            .sort_by(|(a, _), (b, _)| match sort.key {
                GroupSortKey::GroupName => {
                    sort.direction.apply(compare_text(&a.group_name, &b.group_name))
                }
            })
            .paginate(&filter.page());

        debug!("Group list: {} of {} rows", page.items.len(), page.total_records);

        let total = page.total_records;
        let page = page.map(|(g, organization_name)| GroupView {
            is_active: g.status_label().to_string(),
            group_id: g.group_id,
            group_name: g.group_name,
            organization_name,
            organization_id: g.organization_id,
        });

        Ok(ResponseEnvelope::ok(page.items).with_total_records(total))
    }

    /// Active groups of one organization for dropdowns.
    pub async fn get_group_key_values(
        &self,
        search: Option<&str>,
        organization_id: &str,
    ) -> Result<ResponseEnvelope<Vec<KeyValue>>, DomainError> {
        let search = search.map(str::trim).filter(|s| !s.is_empty());
        let groups = self.uow.groups().list_by_organization(organization_id).await?;

        let page = ListQuery::new(groups)
            .filter(|g| g.is_active && !g.is_reserved())
            .filter_when(search, |g, s| contains_ignore_case(&g.group_name, s))
            .sort_by(|a, b| compare_text(&a.group_name, &b.group_name))
            .paginate(&Default::default())
            .map(|g| KeyValue::new(g.group_id, g.group_name));

        Ok(ResponseEnvelope::ok(page.items))
    }

    /// The group with its linked permission ids and eligible members.
    pub async fn get_group(
        &self,
        group_id: &str,
        organization_id: &str,
    ) -> Result<ResponseEnvelope<GroupDetail>, DomainError> {
        let group = match self.uow.groups().find_by_id(group_id).await? {
            Some(g) if g.belongs_to(organization_id) => g,
            _ => {
                warn!("Group {} not found in organization {}", group_id, organization_id);
                return Ok(ResponseEnvelope::fail(Message::GroupNotFound));
            }
        };

        let mut permissions: Vec<String> = self
            .uow
            .group_permissions()
            .list_by_group(group_id)
            .await?
            .into_iter()
            .filter(|row| row.is_active)
            .map(|row| row.permission_id)
            .collect();
        permissions.sort();

        let users: HashMap<String, User> = self
            .uow
            .users()
            .list_by_organization(organization_id)
            .await?
            .into_iter()
            .map(|u| (u.user_id.clone(), u))
            .collect();

        let mut group_users: Vec<GroupUserSummary> = self
            .uow
            .group_users()
            .list_by_group(group_id)
            .await?
            .into_iter()
            .filter(|m| m.is_active && m.organization_id == organization_id)
            .filter_map(|m| users.get(&m.user_id))
            .filter(|u| u.is_eligible_for_group())
            .map(|u| GroupUserSummary {
                user_id: u.user_id.clone(),
                user_name: u.full_name(),
            })
            .collect();
        group_users.sort_by(|a, b| compare_text(&a.user_name, &b.user_name));

        let actions = self.uow.permissions().list_actions().await?;

        Ok(ResponseEnvelope::ok(GroupDetail::new(&group, group_users, permissions))
            .with_meta(meta::PERMISSION_ACTIONS, json!(actions)))
    }

    pub async fn create_group(
        &self,
        model: Option<GroupCreateModel>,
        logged_in_user_id: &str,
    ) -> Result<ResponseEnvelope<Group>, DomainError> {
        let Some(model) = model else {
            warn!("Create group rejected: empty request");
            return Ok(ResponseEnvelope::fail(Message::InvalidRequest));
        };

        let mut errors = Vec::new();
        match non_blank(&model.group_name) {
            None => errors.push(Message::GroupNameRequired),
            Some(name) if is_reserved_name(name) => errors.push(Message::ReservedGroupName),
            Some(_) => {}
        }
        require(&mut errors, &model.organization_id, Message::OrganizationRequired);

        let (Some(group_name), Some(organization_id), true) = (
            non_blank(&model.group_name),
            non_blank(&model.organization_id),
            errors.is_empty(),
        ) else {
            warn!("Create group rejected: {} validation error(s)", errors.len());
            return Ok(ResponseEnvelope::fail_with_errors(errors));
        };

        if self
            .uow
            .groups()
            .find_by_name(organization_id, group_name)
            .await?
            .is_some()
        {
            warn!("Create group rejected: '{}' already exists in {}", group_name, organization_id);
            return Ok(ResponseEnvelope::fail(Message::DuplicateGroupName));
        }

        let sequence = self.uow.groups().next_sequence().await?;
        let group = Group::new(
            format_sequence(GROUP_ID_PREFIX, sequence),
            group_name,
            organization_id,
            logged_in_user_id,
        );

        let created = match self.uow.groups().create(&group).await {
            Ok(g) => g,
            Err(DomainError::Conflict(_)) => {
                warn!("Create group lost a race on name '{}'", group_name);
                return Ok(ResponseEnvelope::fail(Message::DuplicateGroupName));
            }
            Err(e) => return Err(e),
        };

        info!("Group created: {} ({})", created.group_id, created.group_name);

        let audit = AuditDetail::created(&created)?;
        let message = Message::GroupCreated(created.group_name.clone());
        Ok(ResponseEnvelope::ok_with_message(created, message).with_audit(audit))
    }

    pub async fn update_group(
        &self,
        model: &GroupUpdateModel,
        logged_in_user_id: &str,
    ) -> Result<ResponseEnvelope<Group>, DomainError> {
        let mut errors = Vec::new();
        require(&mut errors, &model.group_id, Message::GroupRequired);
        match non_blank(&model.group_name) {
            None => errors.push(Message::GroupNameRequired),
            Some(name) if is_reserved_name(name) => errors.push(Message::ReservedGroupName),
            Some(_) => {}
        }
        require(&mut errors, &model.organization_id, Message::OrganizationRequired);

        let (Some(group_id), Some(group_name), Some(organization_id), true) = (
            non_blank(&model.group_id),
            non_blank(&model.group_name),
            non_blank(&model.organization_id),
            errors.is_empty(),
        ) else {
            warn!("Update group rejected: {} validation error(s)", errors.len());
            return Ok(ResponseEnvelope::fail_with_errors(errors));
        };

        let mut group = match self.uow.groups().find_by_id(group_id).await? {
            Some(g) if g.belongs_to(organization_id) => g,
            _ => {
                warn!("Update group rejected: {} not found in {}", group_id, organization_id);
                return Ok(ResponseEnvelope::fail(Message::GroupNotFound));
            }
        };

        if group.is_reserved() {
            warn!("Update group rejected: {} is the reserved group", group_id);
            return Ok(ResponseEnvelope::fail(Message::ReservedGroupLocked));
        }

        let clash = self
            .uow
            .groups()
            .find_by_name(organization_id, group_name)
            .await?
            .filter(|other| other.group_id != group.group_id);
        if clash.is_some() {
            warn!("Update group rejected: '{}' already exists in {}", group_name, organization_id);
            return Ok(ResponseEnvelope::fail(Message::DuplicateGroupName));
        }

        let old = group.clone();
        group.rename(group_name);
        if let Some(is_active) = model.is_active {
            group.is_active = is_active;
        }
        group.touch(logged_in_user_id);

        let updated = match self.uow.groups().update(&group).await {
            Ok(g) => g,
            Err(DomainError::Conflict(_)) => {
                return Ok(ResponseEnvelope::fail(Message::DuplicateGroupName));
            }
            Err(e) => return Err(e),
        };

        info!("Group updated: {} ({})", updated.group_id, updated.group_name);

        let audit = AuditDetail::updated(&old, &updated)?;
        let message = Message::GroupUpdated(updated.group_name.clone());
        Ok(ResponseEnvelope::ok_with_message(updated, message).with_audit(audit))
    }

    /// Hard delete; permission grants and memberships go with the group.
    pub async fn delete_group(
        &self,
        group_id: &str,
        organization_id: &str,
    ) -> Result<ResponseEnvelope<String>, DomainError> {
        if group_id.trim().is_empty() {
            return Ok(ResponseEnvelope::fail_with_errors(vec![Message::GroupRequired]));
        }

        let group = match self.uow.groups().find_by_id(group_id).await? {
            Some(g) if g.belongs_to(organization_id) => g,
            _ => {
                warn!("Delete group rejected: {} not found in {}", group_id, organization_id);
                return Ok(ResponseEnvelope::fail(Message::GroupNotFound));
            }
        };

        if group.is_reserved() {
            warn!("Delete group rejected: {} is the reserved group", group_id);
            return Ok(ResponseEnvelope::fail(Message::ReservedGroupLocked));
        }

        self.uow.groups().delete(&group.group_id).await?;

        info!("Group deleted: {} ({})", group.group_id, group.group_name);

        let audit = AuditDetail::deleted(&group)?;
        let message = Message::GroupDeleted(group.group_name.clone());
        Ok(ResponseEnvelope::ok_with_message(message.to_string(), message).with_audit(audit))
    }
}
