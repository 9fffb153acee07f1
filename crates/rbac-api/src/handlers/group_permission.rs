//! Group permission endpoints

use axum::{extract::State, http::Uri, Json};
use validator::Validate;

use rbac_core::domain::{AuditAction, AuditSection};
use rbac_core::models::{GroupPermissionSaveDeleteModel, GroupPermissionView, GroupPermissionsByGroupFilter, PermissionView};
use rbac_core::ResponseEnvelope;
use rbac_security::permissions::group_permission;

use crate::audit::{emit, remarks, AuditEvent};
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

/// POST /grouppermission/list
pub async fn get_group_permissions_by_group(
    State(state): State<AppState>,
    user: AuthUser,
    Json(filter): Json<GroupPermissionsByGroupFilter>,
) -> Result<Json<ResponseEnvelope<Vec<PermissionView>>>, ApiError> {
    user.require(group_permission::READ)?;
    filter.validate()?;
    Ok(Json(state.group_permissions.get_group_permissions_by_group(&filter).await?))
}

/// POST /grouppermission/create
pub async fn save_group_permission(
    State(state): State<AppState>,
    user: AuthUser,
    uri: Uri,
    Json(model): Json<GroupPermissionSaveDeleteModel>,
) -> Result<Json<ResponseEnvelope<GroupPermissionView>>, ApiError> {
    user.require(group_permission::CREATE)?;
    model.validate()?;

    let mut result = state
        .group_permissions
        .save_group_permission(&model, &user.user_id)
        .await?;
    let detail = result.take_audit();

    let mut event = AuditEvent::new(
        AuditSection::GroupPermission,
        AuditAction::Add,
        uri.path(),
        remarks::ADD_GROUP_PERMISSION,
    )
    .request(&model)
    .detail(detail);
    if let Some(saved) = &result.data {
        event = event.key_id(saved.group_permission_id.clone());
    }
    emit(&state, &user, event).await;

    Ok(Json(result))
}

/// DELETE /grouppermission/delete
pub async fn delete_group_permission(
    State(state): State<AppState>,
    user: AuthUser,
    uri: Uri,
    Json(model): Json<GroupPermissionSaveDeleteModel>,
) -> Result<Json<ResponseEnvelope<String>>, ApiError> {
    user.require(group_permission::DELETE)?;
    model.validate()?;

    let mut result = state
        .group_permissions
        .delete_group_permission(&model, &user.user_id)
        .await?;
    let detail = result.take_audit();

    let event = AuditEvent::new(
        AuditSection::GroupPermission,
        AuditAction::Delete,
        uri.path(),
        remarks::REMOVE_GROUP_PERMISSION,
    )
    .request(&model)
    .detail(detail);
    emit(&state, &user, event).await;

    Ok(Json(result))
}
