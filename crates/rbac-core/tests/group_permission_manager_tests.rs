mod common;

use rbac_core::messages::Message;
use rbac_core::models::{GroupPermissionSaveDeleteModel, GroupPermissionsByGroupFilter};
use rbac_core::repositories::UnitOfWork;
use serde_json::json;

use common::{fixture, Fixture, ADMIN, ORG, OTHER_ORG};

fn grant(group_id: &str, permission_id: &str) -> GroupPermissionSaveDeleteModel {
    GroupPermissionSaveDeleteModel {
        organization_id: Some(ORG.into()),
        group_id: Some(group_id.into()),
        permission_id: Some(permission_id.into()),
    }
}

async fn group_with_grants(fx: &Fixture, permission_ids: &[&str]) -> String {
    let id = fx.group("Ops", ORG).await;
    for permission_id in permission_ids {
        let envelope = fx
            .group_permissions
            .save_group_permission(&grant(&id, permission_id), ADMIN)
            .await
            .unwrap();
        assert!(envelope.success);
    }
    id
}

fn by_group(group_id: &str) -> GroupPermissionsByGroupFilter {
    GroupPermissionsByGroupFilter {
        group_id: Some(group_id.into()),
        ..GroupPermissionsByGroupFilter::default()
    }
}

#[tokio::test]
async fn saving_twice_keeps_one_active_row() {
    let fx = fixture();
    let id = group_with_grants(&fx, &["PRM1"]).await;

    let first = fx.store.group_permissions().find(&id, "PRM1").await.unwrap().unwrap();
    assert!(first.modified_on.is_none());

    let mut second = fx
        .group_permissions
        .save_group_permission(&grant(&id, "PRM1"), "USR9")
        .await
        .unwrap();
    assert!(second.success);

    let rows = fx.store.group_permissions().list_by_group(&id).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert!(rows[0].is_active);
    assert!(rows[0].modified_on.is_some());
    assert_eq!(rows[0].modified_by.as_deref(), Some("USR9"));
    assert_eq!(rows[0].group_permission_id, first.group_permission_id);

    let audit = second.take_audit();
    assert!(audit.old_values.is_some());
    assert_eq!(audit.new_values.unwrap()["modified_by"], json!("USR9"));
}

#[tokio::test]
async fn empty_permission_id_is_rejected_without_writing() {
    let fx = fixture();
    let id = fx.group("Ops", ORG).await;

    let envelope = fx
        .group_permissions
        .save_group_permission(
            &GroupPermissionSaveDeleteModel {
                permission_id: Some("  ".into()),
                ..grant(&id, "")
            },
            ADMIN,
        )
        .await
        .unwrap();

    assert!(!envelope.success);
    assert!(envelope
        .error_message
        .unwrap()
        .contains(&Message::PermissionRequired.to_string()));
    assert!(fx.store.group_permissions().list_by_group(&id).await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_fields_are_all_reported() {
    let fx = fixture();
    let envelope = fx
        .group_permissions
        .save_group_permission(&GroupPermissionSaveDeleteModel::default(), ADMIN)
        .await
        .unwrap();
    assert_eq!(
        envelope.error_message,
        Some(vec![
            Message::OrganizationRequired.to_string(),
            Message::GroupRequired.to_string(),
            Message::PermissionRequired.to_string(),
        ])
    );
}

#[tokio::test]
async fn unknown_group_or_permission_is_not_found() {
    let fx = fixture();
    let id = fx.group("Ops", ORG).await;

    let foreign = fx
        .group_permissions
        .save_group_permission(
            &GroupPermissionSaveDeleteModel {
                organization_id: Some(OTHER_ORG.into()),
                ..grant(&id, "PRM1")
            },
            ADMIN,
        )
        .await
        .unwrap();
    assert_eq!(foreign.message, Some(Message::GroupNotFound.to_string()));

    let unknown = fx
        .group_permissions
        .save_group_permission(&grant(&id, "PRM404"), ADMIN)
        .await
        .unwrap();
    assert_eq!(unknown.message, Some(Message::PermissionNotFound.to_string()));
}

#[tokio::test]
async fn default_listing_puts_linked_permissions_first() {
    let fx = fixture();
    let id = group_with_grants(&fx, &["PRM3", "PRM4"]).await;

    let envelope = fx
        .group_permissions
        .get_group_permissions_by_group(&by_group(&id))
        .await
        .unwrap();

    assert!(envelope.success);
    assert_eq!(envelope.total_records(), Some(4));
    let names: Vec<_> = envelope
        .data
        .unwrap()
        .into_iter()
        .map(|p| (p.permission_name, p.is_group_permission))
        .collect();
    assert_eq!(
        names,
        vec![
            ("Dashboard.AdminPanel".to_string(), true),
            ("GroupUser.Read".to_string(), true),
            ("Group.Create".to_string(), false),
            ("Group.Read".to_string(), false),
        ]
    );
}

#[tokio::test]
async fn explicit_sort_drops_linked_first_ordering() {
    let fx = fixture();
    let id = group_with_grants(&fx, &["PRM4"]).await;

    let envelope = fx
        .group_permissions
        .get_group_permissions_by_group(&GroupPermissionsByGroupFilter {
            sort_by: Some("description".into()),
            sort_order: Some("DESC".into()),
            ..by_group(&id)
        })
        .await
        .unwrap();

    let descriptions: Vec<_> = envelope.data.unwrap().into_iter().map(|p| p.description).collect();
    assert_eq!(
        descriptions,
        vec!["View groups", "View group members", "Open the admin panel", "Create groups"]
    );
}

#[tokio::test]
async fn filters_match_names_search_and_link_state() {
    let fx = fixture();
    let id = group_with_grants(&fx, &["PRM1"]).await;

    let exact = fx
        .group_permissions
        .get_group_permissions_by_group(&GroupPermissionsByGroupFilter {
            permission_name: Some("group".into()),
            ..by_group(&id)
        })
        .await
        .unwrap();
    assert_eq!(exact.total_records(), Some(2));

    let dotted = fx
        .group_permissions
        .get_group_permissions_by_group(&GroupPermissionsByGroupFilter {
            permission_name: Some("Group.Read".into()),
            ..by_group(&id)
        })
        .await
        .unwrap();
    assert_eq!(dotted.total_records(), Some(1));

    let search = fx
        .group_permissions
        .get_group_permissions_by_group(&GroupPermissionsByGroupFilter {
            search: Some("members".into()),
            ..by_group(&id)
        })
        .await
        .unwrap();
    assert_eq!(search.total_records(), Some(1));

    let unlinked = fx
        .group_permissions
        .get_group_permissions_by_group(&GroupPermissionsByGroupFilter {
            is_group_permission: Some(false),
            ..by_group(&id)
        })
        .await
        .unwrap();
    assert_eq!(unlinked.total_records(), Some(3));
}

#[tokio::test]
async fn compact_name_matches_filter_and_search() {
    let fx = fixture();
    let id = group_with_grants(&fx, &["PRM1"]).await;

    let compact = fx
        .group_permissions
        .get_group_permissions_by_group(&GroupPermissionsByGroupFilter {
            permission_name: Some("GroupRead".into()),
            ..by_group(&id)
        })
        .await
        .unwrap();
    assert!(compact.success);
    let rows = compact.data.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].permission_id, "PRM1");
    assert!(rows[0].is_group_permission);

    let search = fx
        .group_permissions
        .get_group_permissions_by_group(&GroupPermissionsByGroupFilter {
            search: Some("pRe".into()),
            ..by_group(&id)
        })
        .await
        .unwrap();
    assert_eq!(search.total_records(), Some(1));
    assert_eq!(search.data.unwrap()[0].permission_name, "Group.Read");
}

#[tokio::test]
async fn empty_page_fails_but_reports_total() {
    let fx = fixture();
    let id = fx.group("Ops", ORG).await;

    let envelope = fx
        .group_permissions
        .get_group_permissions_by_group(&GroupPermissionsByGroupFilter {
            page_no: Some(3),
            page_size: Some(10),
            ..by_group(&id)
        })
        .await
        .unwrap();

    assert!(!envelope.success);
    assert_eq!(envelope.message, Some(Message::NoRecordsFound.to_string()));
    assert_eq!(envelope.total_records(), Some(4));
}

#[tokio::test]
async fn delete_deactivates_and_hides_link() {
    let fx = fixture();
    let id = group_with_grants(&fx, &["PRM1"]).await;

    let mut removed = fx
        .group_permissions
        .delete_group_permission(&grant(&id, "PRM1"), ADMIN)
        .await
        .unwrap();
    assert!(removed.success);
    assert_eq!(removed.data, Some(Message::GroupPermissionRemoved.to_string()));
    let audit = removed.take_audit();
    assert_eq!(audit.old_values.unwrap()["is_active"], json!(true));
    assert_eq!(audit.new_values.unwrap()["is_active"], json!(false));

    let row = fx.store.group_permissions().find(&id, "PRM1").await.unwrap().unwrap();
    assert!(!row.is_active);

    let listing = fx
        .group_permissions
        .get_group_permissions_by_group(&GroupPermissionsByGroupFilter {
            is_group_permission: Some(true),
            ..by_group(&id)
        })
        .await
        .unwrap();
    assert!(!listing.success);

    let again = fx
        .group_permissions
        .delete_group_permission(&grant(&id, "PRM1"), ADMIN)
        .await
        .unwrap();
    assert_eq!(again.message, Some(Message::GroupPermissionNotFound.to_string()));
}

#[tokio::test]
async fn all_permissions_are_sorted_key_values() {
    let fx = fixture();
    let envelope = fx.group_permissions.get_all_permissions(ORG).await.unwrap();
    let values: Vec<_> = envelope.data.unwrap().into_iter().map(|kv| kv.value).collect();
    assert_eq!(
        values,
        vec!["Dashboard.AdminPanel", "Group.Create", "Group.Read", "GroupUser.Read"]
    );
}

#[tokio::test]
async fn all_permissions_require_an_organization() {
    let fx = fixture();

    let blank = fx.group_permissions.get_all_permissions("  ").await.unwrap();
    assert!(!blank.success);
    assert!(blank.data.is_none());
    assert_eq!(
        blank.error_message,
        Some(vec![Message::OrganizationRequired.to_string()])
    );

    // The catalog is shared, so every organization sees the same entries.
    let other = fx.group_permissions.get_all_permissions(OTHER_ORG).await.unwrap();
    assert_eq!(other.total_records(), Some(4));
}
