//! Router assembly

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers::{group, group_permission, group_user, health};
use crate::middleware::rate_limit;
use crate::state::AppState;

/// Every administration route behind the rate limiter. `/health` stays
/// outside it.
pub fn router(state: AppState) -> Router {
    let groups = Router::new()
        .route("/group/key-value", get(group::get_group_key_values))
        .route("/group/list", post(group::get_group_list))
        .route("/group/create", post(group::create_group))
        .route("/group/update", put(group::update_group))
        .route("/group/delete/{group_id}", delete(group::delete_group))
        .route("/group/group-user/available-users", get(group::get_available_group_users))
        .route("/group/permission/list", get(group::get_all_permissions))
        .route("/group/{group_id}", get(group::get_group));

    let group_permissions = Router::new()
        .route("/grouppermission/list", post(group_permission::get_group_permissions_by_group))
        .route("/grouppermission/create", post(group_permission::save_group_permission))
        .route("/grouppermission/delete", delete(group_permission::delete_group_permission));

    let group_users = Router::new()
        .route("/groupuser/list", post(group_user::get_users_by_organization))
        .route("/groupuser/users-by-group", post(group_user::get_users_by_group))
        .route("/groupuser/groups-by-user", post(group_user::get_groups_by_user))
        .route("/groupuser/create", post(group_user::save_group_user_mapping))
        .route("/groupuser/delete", delete(group_user::delete_group_user_mapping));

    let api = groups
        .merge(group_permissions)
        .merge(group_users)
        .route_layer(middleware::from_fn_with_state(state.clone(), rate_limit));

    Router::new()
        .route("/health", get(health::health_check))
        .merge(api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
