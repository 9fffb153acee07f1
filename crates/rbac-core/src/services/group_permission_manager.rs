// ============================================================================
// RBAC Core - Group Permission Manager
// File: crates/rbac-core/src/services/group_permission_manager.rs
// ============================================================================
//! Permission catalog per group and grant upserts

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, warn};

use rbac_shared::constants::GROUP_PERMISSION_ID_PREFIX;
use rbac_shared::utils::format_sequence;

use crate::domain::{GroupPermission, Permission};
use crate::error::DomainError;
use crate::messages::Message;
use crate::models::{
    GroupPermissionSaveDeleteModel, GroupPermissionView, GroupPermissionsByGroupFilter, KeyValue,
    PermissionView,
};
use crate::query::{compare_text, non_blank, ListQuery, SortKey, SortSpec};
use crate::repositories::UnitOfWork;
use crate::response::{AuditDetail, ResponseEnvelope};

use super::require;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PermissionSortKey {
    PermissionName,
    Description,
}

impl SortKey for PermissionSortKey {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "permissionname" => Some(PermissionSortKey::PermissionName),
            "description" => Some(PermissionSortKey::Description),
            _ => None,
        }
    }
}

/// Validated `(organization, group, permission)` triple.
struct GrantKey<'a> {
    organization_id: &'a str,
    group_id: &'a str,
    permission_id: &'a str,
}

impl<'a> GrantKey<'a> {
    fn parse(model: &'a GroupPermissionSaveDeleteModel) -> Result<Self, Vec<Message>> {
        let mut errors = Vec::new();
        require(&mut errors, &model.organization_id, Message::OrganizationRequired);
        require(&mut errors, &model.group_id, Message::GroupRequired);
        require(&mut errors, &model.permission_id, Message::PermissionRequired);

        match (
            non_blank(&model.organization_id),
            non_blank(&model.group_id),
            non_blank(&model.permission_id),
        ) {
            (Some(organization_id), Some(group_id), Some(permission_id)) => Ok(Self {
                organization_id,
                group_id,
                permission_id,
            }),
            _ => Err(errors),
        }
    }
}

pub struct GroupPermissionManager {
    uow: Arc<dyn UnitOfWork>,
}

impl GroupPermissionManager {
    pub fn new(uow: Arc<dyn UnitOfWork>) -> Self {
        Self { uow }
    }

    /// Active permissions flagged with whether the group holds them.
    pub async fn get_group_permissions_by_group(
        &self,
        filter: &GroupPermissionsByGroupFilter,
    ) -> Result<ResponseEnvelope<Vec<PermissionView>>, DomainError> {
        let linked: HashSet<String> = match non_blank(&filter.group_id) {
            Some(group_id) => self
                .uow
                .group_permissions()
                .list_by_group(group_id)
                .await?
                .into_iter()
                .filter(|row| row.is_active)
                .map(|row| row.permission_id)
                .collect(),
            None => HashSet::new(),
        };

        let rows: Vec<(Permission, bool)> = self
            .uow
            .permissions()
            .list_active()
            .await?
            .into_iter()
            .filter(|p| p.is_active)
            .map(|p| {
                let is_linked = linked.contains(&p.permission_id);
                (p, is_linked)
            })
            .collect();

        let permission_name = non_blank(&filter.permission_name);
        let search = non_blank(&filter.search);
        let sort = SortSpec::resolve(
            filter.sort_by.as_deref(),
            filter.sort_order.as_deref(),
            PermissionSortKey::PermissionName,
        );
        let linked_first = permission_name.is_none()
            && search.is_none()
            && filter.is_group_permission.is_none()
            && !sort.explicit;

        let query = ListQuery::new(rows)
            .filter_when(permission_name, |(p, _), name| p.matches_name(name))
            .filter_when(search, |(p, _), s| p.matches_search(s))
            .filter_when(filter.is_group_permission, |(_, linked), wanted| linked == wanted);

        let query = if linked_first {
            query.sort_by(|(a, a_linked), (b, b_linked)| {
                b_linked
                    .cmp(a_linked)
                    .then_with(|| compare_text(&a.permission_name(), &b.permission_name()))
            })
        } else {
            query.sort_by(|(a, _), (b, _)| {
                let ordering = match sort.key {
                    PermissionSortKey::PermissionName => {
                        compare_text(&a.permission_name(), &b.permission_name())
                    }
                    PermissionSortKey::Description => compare_text(&a.description, &b.description),
                };
                sort.direction.apply(ordering)
            })
        };

        let page = query.paginate(&filter.page());
        debug!("Group permission list: {} of {} rows", page.items.len(), page.total_records);

        let total = page.total_records;
        if page.is_empty() {
            return Ok(ResponseEnvelope::fail(Message::NoRecordsFound).with_total_records(total));
        }

        let page = page.map(|(p, is_group_permission)| PermissionView {
            permission_name: p.permission_name(),
            permission_id: p.permission_id,
            description: p.description,
            is_group_permission,
            is_active: p.is_active,
        });

        Ok(ResponseEnvelope::ok(page.items).with_total_records(total))
    }

    /// Every active permission as `{permission_id, permission_name}`. The
    /// catalog is shared, so the organization must be present but does not
    /// narrow the result.
    pub async fn get_all_permissions(
        &self,
        organization_id: &str,
    ) -> Result<ResponseEnvelope<Vec<KeyValue>>, DomainError> {
        if organization_id.trim().is_empty() {
            return Ok(ResponseEnvelope::fail_with_errors(vec![Message::OrganizationRequired]));
        }
        debug!("Permission catalog requested for organization {}", organization_id);

        let permissions = self.uow.permissions().list_active().await?;
        let page = ListQuery::new(permissions)
            .filter(|p| p.is_active)
            .sort_by(|a, b| compare_text(&a.permission_name(), &b.permission_name()))
            .paginate(&Default::default());

        let total = page.total_records;
        let page = page.map(|p| KeyValue::new(p.permission_id.clone(), p.permission_name()));
        Ok(ResponseEnvelope::ok(page.items).with_total_records(total))
    }

    /// Grants the permission, reactivating an existing row when present.
    pub async fn save_group_permission(
        &self,
        model: &GroupPermissionSaveDeleteModel,
        logged_in_user_id: &str,
    ) -> Result<ResponseEnvelope<GroupPermissionView>, DomainError> {
        let key = match GrantKey::parse(model) {
            Ok(key) => key,
            Err(errors) => {
                warn!("Save group permission rejected: {} validation error(s)", errors.len());
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
            warn!("Save group permission rejected: group {} not found", key.group_id);
            return Ok(ResponseEnvelope::fail(Message::GroupNotFound));
        }

        if self.uow.permissions().find_by_id(key.permission_id).await?.is_none() {
            warn!("Save group permission rejected: permission {} not found", key.permission_id);
            return Ok(ResponseEnvelope::fail(Message::PermissionNotFound));
        }

        let repo = self.uow.group_permissions();
        let (saved, audit) = match repo.find(key.group_id, key.permission_id).await? {
            Some(mut row) => {
                let old = row.clone();
                row.activate(logged_in_user_id);
                let saved = repo.update(&row).await?;
                let audit = AuditDetail::updated(&old, &saved)?;
                (saved, audit)
            }
            None => {
                let sequence = repo.next_sequence().await?;
                let row = GroupPermission::new(
                    format_sequence(GROUP_PERMISSION_ID_PREFIX, sequence),
                    key.organization_id,
                    key.group_id,
                    key.permission_id,
                    logged_in_user_id,
                );
                let saved = repo.create(&row).await?;
                let audit = AuditDetail::created(&saved)?;
                (saved, audit)
            }
        };

        info!(
            "Group permission saved: {} -> {} ({})",
            saved.group_id, saved.permission_id, saved.group_permission_id
        );

        Ok(ResponseEnvelope::ok_with_message(
            GroupPermissionView::from(&saved),
            Message::GroupPermissionSaved,
        )
        .with_audit(audit))
    }

    /// Revokes the grant by deactivating its row.
    pub async fn delete_group_permission(
        &self,
        model: &GroupPermissionSaveDeleteModel,
        logged_in_user_id: &str,
    ) -> Result<ResponseEnvelope<String>, DomainError> {
        let key = match GrantKey::parse(model) {
            Ok(key) => key,
            Err(errors) => {
                warn!("Delete group permission rejected: {} validation error(s)", errors.len());
                return Ok(ResponseEnvelope::fail_with_errors(errors));
            }
        };

        let repo = self.uow.group_permissions();
        let mut row = match repo.find(key.group_id, key.permission_id).await? {
            Some(row) if row.is_active && row.organization_id == key.organization_id => row,
            _ => {
                warn!(
                    "Delete group permission rejected: no active grant {} -> {}",
                    key.group_id, key.permission_id
                );
                return Ok(ResponseEnvelope::fail(Message::GroupPermissionNotFound));
            }
        };

        let old = row.clone();
        row.deactivate(logged_in_user_id);
        let saved = repo.update(&row).await?;

        info!("Group permission removed: {} -> {}", saved.group_id, saved.permission_id);

        let audit = AuditDetail::updated(&old, &saved)?;
        let message = Message::GroupPermissionRemoved;
        Ok(ResponseEnvelope::ok_with_message(message.to_string(), message).with_audit(audit))
    }
}
