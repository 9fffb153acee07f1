//! Group membership endpoints

use axum::{extract::State, http::Uri, Json};
use validator::Validate;

use rbac_core::domain::{AuditAction, AuditSection};
use rbac_core::models::{
    GroupUserListItem, GroupUserMappingSaveDeleteModel, GroupUserMappingView, GroupUserModel,
    GroupUsersByOrganizationFilter, GroupsByUserFilter, UserGroupModel, UsersByGroupFilter,
};
use rbac_core::ResponseEnvelope;
use rbac_security::permissions::group_user;

use crate::audit::{emit, remarks, AuditEvent};
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

/// POST /groupuser/list
pub async fn get_users_by_organization(
    State(state): State<AppState>,
    user: AuthUser,
    Json(filter): Json<GroupUsersByOrganizationFilter>,
) -> Result<Json<ResponseEnvelope<Vec<GroupUserListItem>>>, ApiError> {
    user.require(group_user::READ)?;
    filter.validate()?;
    Ok(Json(state.group_users.get_users_by_organization(&filter).await?))
}

/// POST /groupuser/users-by-group
pub async fn get_users_by_group(
    State(state): State<AppState>,
    user: AuthUser,
    Json(filter): Json<UsersByGroupFilter>,
) -> Result<Json<ResponseEnvelope<GroupUserModel>>, ApiError> {
    user.require(group_user::READ)?;
    filter.validate()?;
    let result = state
        .group_users
        .get_users_by_group(&filter, &user.organization_id)
        .await?;
    Ok(Json(result))
}

/// POST /groupuser/groups-by-user
pub async fn get_groups_by_user(
    State(state): State<AppState>,
    user: AuthUser,
    Json(mut filter): Json<GroupsByUserFilter>,
) -> Result<Json<ResponseEnvelope<UserGroupModel>>, ApiError> {
    filter.validate()?;
    filter.organization_id = Some(user.organization_id.clone());
    Ok(Json(state.group_users.get_groups_by_user(&filter).await?))
}

/// POST /groupuser/create
pub async fn save_group_user_mapping(
    State(state): State<AppState>,
    user: AuthUser,
    uri: Uri,
    Json(model): Json<GroupUserMappingSaveDeleteModel>,
) -> Result<Json<ResponseEnvelope<GroupUserMappingView>>, ApiError> {
    user.require(group_user::CREATE)?;
    model.validate()?;

    let mut result = state
        .group_users
        .save_group_user_mapping(&model, &user.user_id)
        .await?;
    let detail = result.take_audit();

    let mut event = AuditEvent::new(
        AuditSection::GroupUserMapping,
        AuditAction::Add,
        uri.path(),
        remarks::ADD_GROUP_USER,
    )
    .request(&model)
    .detail(detail);
    if let Some(saved) = &result.data {
        event = event.key_id(saved.group_user_mapping_id.clone());
    }
    emit(&state, &user, event).await;

    Ok(Json(result))
}

/// DELETE /groupuser/delete
pub async fn delete_group_user_mapping(
    State(state): State<AppState>,
    user: AuthUser,
    uri: Uri,
    Json(model): Json<GroupUserMappingSaveDeleteModel>,
) -> Result<Json<ResponseEnvelope<String>>, ApiError> {
    user.require(group_user::DELETE)?;
    model.validate()?;

    let mut result = state
        .group_users
        .delete_group_user_mapping(&model, &user.user_id)
        .await?;
    let detail = result.take_audit();

    let event = AuditEvent::new(
        AuditSection::GroupUserMapping,
        AuditAction::Delete,
        uri.path(),
        remarks::REMOVE_GROUP_USER,
    )
    .request(&model)
    .detail(detail);
    emit(&state, &user, event).await;

    Ok(Json(result))
}
