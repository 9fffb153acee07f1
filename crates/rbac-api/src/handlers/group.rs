// ============================================================================
// RBAC API - Group Handlers
// File: crates/rbac-api/src/handlers/group.rs
// ============================================================================
//! Group listing, detail and CRUD endpoints

use axum::{
    extract::{Path, Query, State},
    http::Uri,
    Json,
};
use serde::Deserialize;
use validator::Validate;

use rbac_core::domain::{AuditAction, AuditSection, Group};
use rbac_core::models::{
    GroupCreateModel, GroupDetail, GroupFilter, GroupUpdateModel, GroupView, KeyValue,
    OrganizationUserView,
};
use rbac_core::query::non_blank;
use rbac_core::ResponseEnvelope;
use rbac_security::permissions::{dashboard, group};

use crate::audit::{emit, remarks, AuditEvent};
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

type ApiResult<T> = Result<Json<ResponseEnvelope<T>>, ApiError>;

#[derive(Debug, Default, Deserialize)]
pub struct KeyValueQuery {
    pub search: Option<String>,
}

/// GET /group/key-value?search=
pub async fn get_group_key_values(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<KeyValueQuery>,
) -> ApiResult<Vec<KeyValue>> {
    user.require(dashboard::ADMIN_PANEL)?;
    let result = state
        .groups
        .get_group_key_values(non_blank(&query.search), &user.organization_id)
        .await?;
    Ok(Json(result))
}

/// POST /group/list
///
/// Organization defaults to the caller's, `is_active` to `true`.
pub async fn get_group_list(
    State(state): State<AppState>,
    user: AuthUser,
    uri: Uri,
    Json(mut filter): Json<GroupFilter>,
) -> ApiResult<Vec<GroupView>> {
    user.require(group::READ)?;
    filter.validate()?;

    if non_blank(&filter.organization_id).is_none() {
        filter.organization_id = Some(user.organization_id.clone());
    }
    filter.is_active.get_or_insert(true);

    let result = state.groups.get_group_list(&filter).await?;

    let event = AuditEvent::new(AuditSection::Group, AuditAction::Get, uri.path(), remarks::VIEW_GROUP_LIST)
        .request(&filter);
    emit(&state, &user, event).await;

    Ok(Json(result))
}

/// POST /group/create
pub async fn create_group(
    State(state): State<AppState>,
    user: AuthUser,
    uri: Uri,
    Json(mut model): Json<GroupCreateModel>,
) -> ApiResult<Group> {
    user.require(group::CREATE)?;
    model.validate()?;

    if non_blank(&model.organization_id).is_none() {
        model.organization_id = Some(user.organization_id.clone());
    }

    let mut result = state.groups.create_group(Some(model.clone()), &user.user_id).await?;
    let detail = result.take_audit();

    let mut event = AuditEvent::new(AuditSection::Group, AuditAction::Add, uri.path(), remarks::ADD_GROUP)
        .request(&model)
        .detail(detail);
    if let Some(created) = &result.data {
        event = event.key_id(created.group_id.clone());
    }
    emit(&state, &user, event).await;

    Ok(Json(result))
}

/// GET /group/{group_id}
pub async fn get_group(
    State(state): State<AppState>,
    user: AuthUser,
    uri: Uri,
    Path(group_id): Path<String>,
) -> ApiResult<GroupDetail> {
    user.require(group::READ)?;

    let result = state.groups.get_group(&group_id, &user.organization_id).await?;

    let event = AuditEvent::new(AuditSection::Group, AuditAction::Get, uri.path(), remarks::VIEW_GROUP_DETAIL)
        .raw_request(&group_id);
    emit(&state, &user, event).await;

    Ok(Json(result))
}

/// DELETE /group/delete/{group_id}
pub async fn delete_group(
    State(state): State<AppState>,
    user: AuthUser,
    uri: Uri,
    Path(group_id): Path<String>,
) -> ApiResult<String> {
    user.require(group::DELETE)?;

    let mut result = state.groups.delete_group(&group_id, &user.organization_id).await?;
    let detail = result.take_audit();

    let event = AuditEvent::new(AuditSection::Group, AuditAction::Delete, uri.path(), remarks::DELETE_GROUP)
        .key_id(group_id.clone())
        .raw_request(&group_id)
        .detail(detail);
    emit(&state, &user, event).await;

    Ok(Json(result))
}

/// PUT /group/update
///
/// The organization always comes from the token.
pub async fn update_group(
    State(state): State<AppState>,
    user: AuthUser,
    uri: Uri,
    Json(mut model): Json<GroupUpdateModel>,
) -> ApiResult<Group> {
    user.require(group::UPDATE)?;
    model.validate()?;
    model.organization_id = Some(user.organization_id.clone());

    let mut result = state.groups.update_group(&model, &user.user_id).await?;
    let detail = result.take_audit();

    let mut event = AuditEvent::new(AuditSection::Group, AuditAction::Update, uri.path(), remarks::UPDATE_GROUP)
        .request(&model)
        .detail(detail);
    if let Some(group_id) = &model.group_id {
        event = event.key_id(group_id.clone());
    }
    emit(&state, &user, event).await;

    Ok(Json(result))
}

/// GET /group/group-user/available-users
pub async fn get_available_group_users(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Vec<OrganizationUserView>> {
    let result = state
        .group_users
        .get_all_available_group_users(&user.organization_id, Some(true))
        .await?;
    Ok(Json(result))
}

/// GET /group/permission/list
pub async fn get_all_permissions(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Vec<KeyValue>> {
    let result = state
        .group_permissions
        .get_all_permissions(&user.organization_id)
        .await?;
    Ok(Json(result))
}
