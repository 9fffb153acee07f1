use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use rbac_api::{router, AppState};
use rbac_core::domain::{AuditAction, AuditSection};
use rbac_core::memory::{InMemoryAuditTrail, InMemoryUnitOfWork, Seed};
use rbac_core::repositories::{AuditTrailSink, MockAuditTrailSink};
use rbac_core::{DomainError, Organization, Permission, User};
use rbac_security::permissions::{dashboard, group, group_permission, group_user};
use rbac_security::JwtService;

const SECRET: &str = "api-test-secret";
const ORG: &str = "ORG1";

fn seed() -> Seed {
    let user = |id: &str, first: &str, last: &str| User {
        user_id: id.to_string(),
        organization_id: ORG.to_string(),
        first_name: first.to_string(),
        last_name: last.to_string(),
        email_address: format!("{}@example.com", first.to_lowercase()),
        is_active: true,
        is_deleted: false,
        is_first_login: true,
        is_email_verified: true,
    };
    Seed {
        organizations: vec![Organization::new(ORG, "Acme")],
        permissions: vec![
            Permission::new("PRM1", "Group", "Read", "View groups"),
            Permission::new("PRM2", "Group", "Create", "Create groups"),
        ],
        users: vec![user("USR1", "Ana", "Silva"), user("USR2", "Budi", "Santoso")],
    }
}

fn app(audit: Arc<dyn AuditTrailSink>, rate_limit_per_second: u32) -> Router {
    let uow = Arc::new(InMemoryUnitOfWork::seeded(seed()));
    let jwt = JwtService::new(SECRET.to_string(), None);
    router(AppState::new(uow, audit, jwt, rate_limit_per_second))
}

fn token(permissions: &[&str]) -> String {
    token_for(ORG, permissions)
}

fn token_for(organization_id: &str, permissions: &[&str]) -> String {
    JwtService::new(SECRET.to_string(), None)
        .generate_access_token(
            "USR1",
            organization_id,
            "Admin",
            permissions.iter().map(|p| p.to_string()).collect(),
            3600,
        )
        .unwrap()
}

fn admin_token() -> String {
    token(&[
        dashboard::ADMIN_PANEL,
        group::READ,
        group::CREATE,
        group::UPDATE,
        group::DELETE,
        group_permission::READ,
        group_permission::CREATE,
        group_permission::DELETE,
        group_user::READ,
        group_user::CREATE,
        group_user::DELETE,
    ])
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("x-forwarded-for", "10.1.1.1");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create_group(app: &Router, token: &str, name: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/group/create",
        Some(token),
        Some(json!({"group_name": name})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true, "{}", body);
    body["data"]["group_id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health_needs_no_token() {
    let app = app(Arc::new(InMemoryAuditTrail::new()), 100);
    let (status, body) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let app = app(Arc::new(InMemoryAuditTrail::new()), 100);
    let (status, body) = send(&app, Method::POST, "/group/list", None, Some(json!({}))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_invalid_token_is_unauthorized() {
    let app = app(Arc::new(InMemoryAuditTrail::new()), 100);
    let (status, _) = send(&app, Method::GET, "/group/permission/list", Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_missing_claim_is_forbidden() {
    let app = app(Arc::new(InMemoryAuditTrail::new()), 100);
    let reader = token(&[group::READ]);
    let (status, body) = send(
        &app,
        Method::POST,
        "/group/create",
        Some(&reader),
        Some(json!({"group_name": "Ops"})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_create_and_list_groups_writes_audit_trail() {
    let audit = Arc::new(InMemoryAuditTrail::new());
    let app = app(audit.clone(), 100);
    let token = admin_token();

    let (status, body) = send(
        &app,
        Method::POST,
        "/group/create",
        Some(&token),
        Some(json!({"group_name": "Ops"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["organization_id"], ORG);
    assert!(body.get("meta_data").is_none(), "audit snapshot leaked: {}", body);
    let group_id = body["data"]["group_id"].as_str().unwrap().to_string();

    let (status, body) = send(&app, Method::POST, "/group/list", Some(&token), Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["group_name"], "Ops");
    assert_eq!(body["data"][0]["organization_name"], "Acme");
    assert_eq!(body["meta_data"]["total_records"], 1);

    let records = audit.records().await;
    assert_eq!(records.len(), 2);

    let created = &records[0];
    assert_eq!(created.section, AuditSection::Group);
    assert_eq!(created.action, AuditAction::Add);
    assert_eq!(created.key_id.as_deref(), Some(group_id.as_str()));
    assert_eq!(created.url, "/group/create");
    assert_eq!(created.created_by, "USR1");
    assert_eq!(created.ip_address, "10.1.1.1");
    assert!(created.old_values_json.is_none());
    assert!(created.new_values_json.as_deref().unwrap_or_default().contains("Ops"));

    let listed = &records[1];
    assert_eq!(listed.action, AuditAction::Get);
    assert!(listed.request_parameters_json.contains("\"is_active\":true"));
    assert!(listed.request_parameters_json.contains(ORG));
}

#[tokio::test]
async fn test_model_validation_failure_is_a_failed_envelope() {
    let app = app(Arc::new(InMemoryAuditTrail::new()), 100);
    let token = admin_token();
    let (status, body) = send(
        &app,
        Method::POST,
        "/group/list",
        Some(&token),
        Some(json!({"page_no": 1, "page_size": 0})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert_eq!(body["error_message"][0], "Page size must be between 1 and 500");
}

#[tokio::test]
async fn test_group_detail_update_and_delete() {
    let audit = Arc::new(InMemoryAuditTrail::new());
    let app = app(audit.clone(), 100);
    let token = admin_token();
    let group_id = create_group(&app, &token, "Ops").await;

    let (_, body) = send(&app, Method::GET, &format!("/group/{}", group_id), Some(&token), None).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["group_name"], "Ops");

    let (_, body) = send(
        &app,
        Method::PUT,
        "/group/update",
        Some(&token),
        Some(json!({"group_id": group_id, "group_name": "Operations", "is_active": true})),
    )
    .await;
    assert_eq!(body["success"], true, "{}", body);
    assert_eq!(body["data"]["group_name"], "Operations");

    let (_, body) = send(
        &app,
        Method::DELETE,
        &format!("/group/delete/{}", group_id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(body["success"], true);

    let (_, body) = send(&app, Method::GET, &format!("/group/{}", group_id), Some(&token), None).await;
    assert_eq!(body["success"], false);

    let records = audit.records().await;
    let update = records
        .iter()
        .find(|r| r.action == AuditAction::Update)
        .unwrap();
    assert!(update.old_values_json.as_deref().unwrap_or_default().contains("\"Ops\""));
    assert!(update.new_values_json.as_deref().unwrap_or_default().contains("Operations"));

    let delete = records
        .iter()
        .find(|r| r.action == AuditAction::Delete)
        .unwrap();
    assert_eq!(delete.key_id.as_deref(), Some(group_id.as_str()));
    assert_eq!(delete.request_parameters_json, group_id);
    assert!(delete.old_values_json.is_some());
}

#[tokio::test]
async fn test_grant_and_revoke_group_permission() {
    let audit = Arc::new(InMemoryAuditTrail::new());
    let app = app(audit.clone(), 100);
    let token = admin_token();
    let group_id = create_group(&app, &token, "Ops").await;
    let grant = json!({"organization_id": ORG, "group_id": group_id, "permission_id": "PRM2"});

    let (_, body) = send(&app, Method::POST, "/grouppermission/create", Some(&token), Some(grant.clone())).await;
    assert_eq!(body["success"], true, "{}", body);
    assert_eq!(body["data"]["permission_id"], "PRM2");

    let (_, body) = send(
        &app,
        Method::POST,
        "/grouppermission/list",
        Some(&token),
        Some(json!({"group_id": group_id})),
    )
    .await;
    assert_eq!(body["data"][0]["permission_name"], "Group.Create");
    assert_eq!(body["data"][0]["is_group_permission"], true);

    let (_, body) = send(&app, Method::DELETE, "/grouppermission/delete", Some(&token), Some(grant)).await;
    assert_eq!(body["success"], true);

    let sections: Vec<_> = audit
        .records()
        .await
        .into_iter()
        .filter(|r| r.section == AuditSection::GroupPermission)
        .map(|r| r.action)
        .collect();
    assert_eq!(sections, vec![AuditAction::Add, AuditAction::Delete]);
}

#[tokio::test]
async fn test_group_membership_endpoints() {
    let app = app(Arc::new(InMemoryAuditTrail::new()), 100);
    let token = admin_token();
    let group_id = create_group(&app, &token, "Ops").await;

    let (_, body) = send(
        &app,
        Method::POST,
        "/groupuser/create",
        Some(&token),
        Some(json!({"organization_id": ORG, "group_id": group_id, "user_id": "USR2"})),
    )
    .await;
    assert_eq!(body["success"], true, "{}", body);

    let (_, body) = send(
        &app,
        Method::POST,
        "/groupuser/users-by-group",
        Some(&token),
        Some(json!({"group_id": group_id})),
    )
    .await;
    assert_eq!(body["data"]["group_users"][0]["user_id"], "USR2");

    let plain = token_without_claims();
    let (status, body) = send(
        &app,
        Method::POST,
        "/groupuser/groups-by-user",
        Some(&plain),
        Some(json!({"user_id": "USR2"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["groups"][0]["value"], "Ops");
}

#[tokio::test]
async fn test_membership_reads_are_scoped_to_token_organization() {
    let app = app(Arc::new(InMemoryAuditTrail::new()), 100);
    let token = admin_token();
    let group_id = create_group(&app, &token, "Ops").await;
    send(
        &app,
        Method::POST,
        "/groupuser/create",
        Some(&token),
        Some(json!({"organization_id": ORG, "group_id": group_id, "user_id": "USR2"})),
    )
    .await;

    let outsider = token_for("ORG2", &[group_user::READ]);
    let (status, body) = send(
        &app,
        Method::POST,
        "/groupuser/users-by-group",
        Some(&outsider),
        Some(json!({"group_id": group_id})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Group not found.");
    assert!(body["data"].is_null());

    // The body cannot widen the token's organization.
    let (status, body) = send(
        &app,
        Method::POST,
        "/groupuser/groups-by-user",
        Some(&outsider),
        Some(json!({"user_id": "USR2", "organization_id": ORG})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "User not found.");
}

fn token_without_claims() -> String {
    token(&[])
}

#[tokio::test]
async fn test_dropdown_helpers_need_only_authentication() {
    let app = app(Arc::new(InMemoryAuditTrail::new()), 100);
    let plain = token_without_claims();

    let (status, body) = send(&app, Method::GET, "/group/permission/list", Some(&plain), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta_data"]["total_records"], 2);

    let (status, body) = send(&app, Method::GET, "/group/group-user/available-users", Some(&plain), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, _) = send(&app, Method::GET, "/group/key-value", Some(&plain), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_audit_failure_does_not_fail_the_request() {
    let mut sink = MockAuditTrailSink::new();
    sink.expect_create_audit_trail()
        .times(1)
        .returning(|_| Err(DomainError::DatabaseError("audit store down".into())));
    let app = app(Arc::new(sink), 100);

    let (status, body) = send(
        &app,
        Method::POST,
        "/group/create",
        Some(&admin_token()),
        Some(json!({"group_name": "Ops"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn test_rate_limit_rejects_burst() {
    let app = app(Arc::new(InMemoryAuditTrail::new()), 1);
    let token = admin_token();

    let (first, _) = send(&app, Method::GET, "/group/permission/list", Some(&token), None).await;
    let (second, body) = send(&app, Method::GET, "/group/permission/list", Some(&token), None).await;
    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["success"], false);

    let (health, _) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(health, StatusCode::OK);
}
