mod common;

use rbac_core::messages::Message;
use rbac_core::models::{
    GroupCreateModel, GroupFilter, GroupPermissionSaveDeleteModel, GroupUpdateModel,
    GroupUserMappingSaveDeleteModel,
};
use rbac_core::repositories::UnitOfWork;
use rbac_core::response::meta;
use rbac_core::Group;
use serde_json::json;

use common::{fixture, ADMIN, ORG, OTHER_ORG};

fn create(name: &str, organization_id: &str) -> Option<GroupCreateModel> {
    Some(GroupCreateModel {
        group_name: Some(name.to_string()),
        organization_id: Some(organization_id.to_string()),
    })
}

#[tokio::test]
async fn duplicate_name_fails_within_organization_only() {
    let fx = fixture();
    fx.group("Admin", ORG).await;

    let same_org = fx.groups.create_group(create("admin", ORG), ADMIN).await.unwrap();
    assert!(!same_org.success);
    assert_eq!(same_org.message, Some(Message::DuplicateGroupName.to_string()));

    let other_org = fx.groups.create_group(create("Admin", OTHER_ORG), ADMIN).await.unwrap();
    assert!(other_org.success);
}

#[tokio::test]
async fn reserved_name_is_rejected_and_never_listed() {
    let fx = fixture();
    let envelope = fx
        .groups
        .create_group(create("AllPermission", ORG), ADMIN)
        .await
        .unwrap();
    assert!(!envelope.success);
    assert_eq!(
        envelope.error_message,
        Some(vec![Message::ReservedGroupName.to_string()])
    );

    // A reserved row that exists in the store is still hidden.
    fx.store
        .groups()
        .create(&Group::new("GRP999999".into(), "AllPermission", ORG, ADMIN))
        .await
        .unwrap();
    fx.group("Ops", ORG).await;

    let list = fx.groups.get_group_list(&GroupFilter::default()).await.unwrap();
    let names: Vec<_> = list.data.unwrap().into_iter().map(|g| g.group_name).collect();
    assert_eq!(names, vec!["Ops"]);

    let dropdown = fx.groups.get_group_key_values(None, ORG).await.unwrap();
    assert_eq!(dropdown.data.map(|d| d.len()), Some(1));
}

#[tokio::test]
async fn create_accumulates_required_field_errors() {
    let fx = fixture();
    let envelope = fx
        .groups
        .create_group(Some(GroupCreateModel::default()), ADMIN)
        .await
        .unwrap();
    assert_eq!(
        envelope.error_message,
        Some(vec![
            Message::GroupNameRequired.to_string(),
            Message::OrganizationRequired.to_string(),
        ])
    );

    let empty = fx.groups.create_group(None, ADMIN).await.unwrap();
    assert_eq!(empty.message, Some(Message::InvalidRequest.to_string()));
}

#[tokio::test]
async fn create_returns_new_values_snapshot() {
    let fx = fixture();
    let mut envelope = fx.groups.create_group(create("Ops", ORG), ADMIN).await.unwrap();

    let audit = envelope.take_audit();
    assert!(audit.old_values.is_none());
    let new_values = audit.new_values.unwrap();
    assert_eq!(new_values["group_id"], json!("GRP000001"));
    assert_eq!(new_values["is_active"], json!(true));
    assert!(envelope.meta_data.is_empty());
}

#[tokio::test]
async fn name_filter_with_active_flag_counts_matches() {
    let fx = fixture();
    fx.group("Admin A", ORG).await;
    fx.group("Admin B", ORG).await;
    fx.group("Ops", ORG).await;

    let filter = GroupFilter {
        group_name: Some("Admin".into()),
        is_active: Some(true),
        ..GroupFilter::default()
    };
    let envelope = fx.groups.get_group_list(&filter).await.unwrap();

    assert!(envelope.success);
    assert_eq!(envelope.data.as_ref().map(Vec::len), Some(2));
    assert_eq!(envelope.total_records(), Some(2));
}

#[tokio::test]
async fn listing_defaults_to_ascending_name_and_counts_before_paging() {
    let fx = fixture();
    for name in ["delta", "Bravo", "alpha", "Charlie"] {
        fx.group(name, ORG).await;
    }

    let all = fx.groups.get_group_list(&GroupFilter::default()).await.unwrap();
    let names: Vec<_> = all.data.unwrap().into_iter().map(|g| g.group_name).collect();
    assert_eq!(names, vec!["alpha", "Bravo", "Charlie", "delta"]);

    let paged = fx
        .groups
        .get_group_list(&GroupFilter {
            sort_by: Some("GroupName".into()),
            sort_order: Some("desc".into()),
            page_no: Some(2),
            page_size: Some(3),
            ..GroupFilter::default()
        })
        .await
        .unwrap();
    assert_eq!(paged.total_records(), Some(4));
    let names: Vec<_> = paged.data.unwrap().into_iter().map(|g| g.group_name).collect();
    assert_eq!(names, vec!["alpha"]);
}

#[tokio::test]
async fn empty_group_list_still_succeeds() {
    let fx = fixture();
    let envelope = fx.groups.get_group_list(&GroupFilter::default()).await.unwrap();
    assert!(envelope.success);
    assert_eq!(envelope.data, Some(vec![]));
    assert_eq!(envelope.total_records(), Some(0));
}

#[tokio::test]
async fn listing_shows_textual_status_and_organization_name() {
    let fx = fixture();
    let id = fx.group("Ops", ORG).await;
    fx.groups
        .update_group(
            &GroupUpdateModel {
                group_id: Some(id),
                group_name: Some("Ops".into()),
                organization_id: Some(ORG.into()),
                is_active: Some(false),
            },
            ADMIN,
        )
        .await
        .unwrap();

    let envelope = fx.groups.get_group_list(&GroupFilter::default()).await.unwrap();
    let row = &envelope.data.unwrap()[0];
    assert_eq!(row.is_active, "Inactive");
    assert_eq!(row.organization_name, "Acme");
}

#[tokio::test]
async fn get_group_reports_links_members_and_actions() {
    let fx = fixture();
    let id = fx.group("Ops", ORG).await;

    for permission_id in ["PRM2", "PRM1"] {
        fx.group_permissions
            .save_group_permission(
                &GroupPermissionSaveDeleteModel {
                    organization_id: Some(ORG.into()),
                    group_id: Some(id.clone()),
                    permission_id: Some(permission_id.into()),
                },
                ADMIN,
            )
            .await
            .unwrap();
    }
    for user_id in ["USR1", "USR4"] {
        fx.group_users
            .save_group_user_mapping(
                &GroupUserMappingSaveDeleteModel {
                    organization_id: Some(ORG.into()),
                    group_id: Some(id.clone()),
                    user_id: Some(user_id.into()),
                },
                ADMIN,
            )
            .await
            .unwrap();
    }

    let envelope = fx.groups.get_group(&id, ORG).await.unwrap();
    let detail = envelope.data.clone().unwrap();
    assert_eq!(detail.permissions, vec!["PRM1", "PRM2"]);
    // USR4 has not completed first login.
    assert_eq!(detail.group_users.len(), 1);
    assert_eq!(detail.group_users[0].user_name, "Ana Silva");
    assert_eq!(
        envelope.meta_data.get(meta::PERMISSION_ACTIONS),
        Some(&json!(["AdminPanel", "Create", "Export", "Read"]))
    );

    let foreign = fx.groups.get_group(&id, OTHER_ORG).await.unwrap();
    assert_eq!(foreign.message, Some(Message::GroupNotFound.to_string()));
}

#[tokio::test]
async fn update_rejects_collisions_and_stamps_modification() {
    let fx = fixture();
    let ops = fx.group("Ops", ORG).await;
    fx.group("Sales", ORG).await;

    let clash = fx
        .groups
        .update_group(
            &GroupUpdateModel {
                group_id: Some(ops.clone()),
                group_name: Some("SALES".into()),
                organization_id: Some(ORG.into()),
                is_active: None,
            },
            ADMIN,
        )
        .await
        .unwrap();
    assert_eq!(clash.message, Some(Message::DuplicateGroupName.to_string()));

    let mut renamed = fx
        .groups
        .update_group(
            &GroupUpdateModel {
                group_id: Some(ops.clone()),
                group_name: Some("Operations".into()),
                organization_id: Some(ORG.into()),
                is_active: None,
            },
            "USR9",
        )
        .await
        .unwrap();
    assert!(renamed.success);
    let audit = renamed.take_audit();
    assert_eq!(audit.old_values.unwrap()["group_name"], json!("Ops"));
    let updated = renamed.data.unwrap();
    assert_eq!(updated.group_name, "Operations");
    assert_eq!(updated.modified_by.as_deref(), Some("USR9"));
    assert!(updated.modified_on.is_some());
}

#[tokio::test]
async fn update_requires_fields_and_ownership() {
    let fx = fixture();
    let ops = fx.group("Ops", ORG).await;

    let invalid = fx
        .groups
        .update_group(
            &GroupUpdateModel {
                group_name: Some("allpermission".into()),
                organization_id: Some(ORG.into()),
                ..GroupUpdateModel::default()
            },
            ADMIN,
        )
        .await
        .unwrap();
    assert_eq!(
        invalid.error_message,
        Some(vec![
            Message::GroupRequired.to_string(),
            Message::ReservedGroupName.to_string(),
        ])
    );

    let foreign = fx
        .groups
        .update_group(
            &GroupUpdateModel {
                group_id: Some(ops),
                group_name: Some("Ops".into()),
                organization_id: Some(OTHER_ORG.into()),
                is_active: None,
            },
            ADMIN,
        )
        .await
        .unwrap();
    assert_eq!(foreign.message, Some(Message::GroupNotFound.to_string()));
}

#[tokio::test]
async fn reserved_group_cannot_be_edited_or_deleted() {
    let fx = fixture();
    fx.store
        .groups()
        .create(&Group::new("GRP999999".into(), "AllPermission", ORG, ADMIN))
        .await
        .unwrap();

    let update = fx
        .groups
        .update_group(
            &GroupUpdateModel {
                group_id: Some("GRP999999".into()),
                group_name: Some("Everything".into()),
                organization_id: Some(ORG.into()),
                is_active: None,
            },
            ADMIN,
        )
        .await
        .unwrap();
    assert_eq!(update.message, Some(Message::ReservedGroupLocked.to_string()));

    let delete = fx.groups.delete_group("GRP999999", ORG).await.unwrap();
    assert_eq!(delete.message, Some(Message::ReservedGroupLocked.to_string()));
}

#[tokio::test]
async fn delete_removes_group_and_join_rows() {
    let fx = fixture();
    let id = fx.group("Ops", ORG).await;
    fx.group_permissions
        .save_group_permission(
            &GroupPermissionSaveDeleteModel {
                organization_id: Some(ORG.into()),
                group_id: Some(id.clone()),
                permission_id: Some("PRM1".into()),
            },
            ADMIN,
        )
        .await
        .unwrap();

    let mut envelope = fx.groups.delete_group(&id, ORG).await.unwrap();
    assert!(envelope.success);
    let audit = envelope.take_audit();
    assert_eq!(audit.old_values.unwrap()["group_id"], json!(id.clone()));
    assert!(audit.new_values.is_none());

    assert!(fx.store.groups().find_by_id(&id).await.unwrap().is_none());
    assert!(fx.store.group_permissions().list_by_group(&id).await.unwrap().is_empty());

    let again = fx.groups.delete_group(&id, ORG).await.unwrap();
    assert_eq!(again.message, Some(Message::GroupNotFound.to_string()));
}
