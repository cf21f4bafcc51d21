//! Testes de integração do router: cabeçalhos do chamador + fonte de organizações em memória

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use firma_access::{
    build_router,
    client::{OrganizationSource, StaticOrganizationSource},
    common::error::AppError,
    config::{AppConfig, AppState},
    models::organization::Organization,
};

fn test_config() -> AppConfig {
    AppConfig {
        backend_url: "http://backend.test".into(),
        bind_addr: "127.0.0.1:0".into(),
        backend_timeout: Duration::from_secs(1),
    }
}

fn org(id: &str, name: &str, code: &str, parent: Option<&str>) -> Organization {
    Organization {
        id: id.into(),
        name: name.into(),
        code: code.into(),
        parent_organization_id: parent.map(str::to_string),
        ..Default::default()
    }
}

/// A, B (filho de A), C (filho de B), D (raiz)
fn sample_organizations() -> Vec<Organization> {
    vec![
        org("A", "Agência Central", "AGC", None),
        org("B", "Diretoria Regional", "DR1", Some("A")),
        org("C", "Protocolo", "PRT", Some("B")),
        org("D", "Outra Agência", "OAG", None),
    ]
}

fn test_app() -> Router {
    let source = Arc::new(StaticOrganizationSource::new(sample_organizations()));
    build_router(AppState::with_source(test_config(), source))
}

fn app_with_source(source: Arc<dyn OrganizationSource>) -> Router {
    build_router(AppState::with_source(test_config(), source))
}

fn request(uri: &str, role: Option<&str>, organization_id: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(role) = role {
        builder = builder.header("x-caller-role", role);
    }
    if let Some(org) = organization_id {
        builder = builder.header("x-organization-id", org);
    }
    builder.body(Body::empty()).unwrap()
}

async fn response_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn ids_and_levels(json: &Value) -> Vec<(String, u64)> {
    json.as_array()
        .unwrap()
        .iter()
        .map(|e| (e["id"].as_str().unwrap().to_string(), e["level"].as_u64().unwrap()))
        .collect()
}

fn pairs(expected: &[(&str, u64)]) -> Vec<(String, u64)> {
    expected.iter().map(|(id, level)| (id.to_string(), *level)).collect()
}

struct FailingSource(u16);

#[async_trait]
impl OrganizationSource for FailingSource {
    async fn fetch_organizations(
        &self,
        _auth: Option<&str>,
    ) -> Result<Vec<Organization>, AppError> {
        Err(AppError::UpstreamStatus(self.0))
    }
}

// Confere que o Authorization do chamador chega na fonte
struct RequireTokenSource;

#[async_trait]
impl OrganizationSource for RequireTokenSource {
    async fn fetch_organizations(&self, auth: Option<&str>) -> Result<Vec<Organization>, AppError> {
        match auth {
            Some("Bearer secret") => Ok(sample_organizations()),
            _ => Err(AppError::UpstreamStatus(401)),
        }
    }
}

// =============================================================================
// Organizações
// =============================================================================

#[tokio::test]
async fn test_health() {
    let response = test_app().oneshot(request("/api/health", None, None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_super_admin_sees_full_forest() {
    let response = test_app()
        .oneshot(request("/api/organizations", Some("SUPER_ADMIN"), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    assert_eq!(ids_and_levels(&json), pairs(&[("A", 0), ("B", 1), ("C", 2), ("D", 0)]));
    assert_eq!(json[1]["parentOrganizationId"], "A");
    assert_eq!(json[1]["code"], "DR1");
}

#[tokio::test]
async fn test_org_admin_sees_own_subtree() {
    let response = test_app()
        .oneshot(request("/api/organizations", Some("ORG_ADMIN"), Some("A")))
        .await
        .unwrap();
    let json = response_json(response).await;
    assert_eq!(ids_and_levels(&json), pairs(&[("A", 0), ("B", 1), ("C", 2)]));
}

#[tokio::test]
async fn test_levels_are_relative_to_scope() {
    let response = test_app()
        .oneshot(request("/api/organizations", Some("OFFICER"), Some("B")))
        .await
        .unwrap();
    let json = response_json(response).await;
    assert_eq!(ids_and_levels(&json), pairs(&[("B", 0), ("C", 1)]));
}

#[tokio::test]
async fn test_search_by_code() {
    let response = test_app()
        .oneshot(request("/api/organizations?search=prt", Some("SUPER_ADMIN"), None))
        .await
        .unwrap();
    let json = response_json(response).await;
    assert_eq!(ids_and_levels(&json), pairs(&[("C", 2)]));
}

#[tokio::test]
async fn test_search_too_long_is_rejected() {
    let uri = format!("/api/organizations?search={}", "x".repeat(101));
    let response = test_app()
        .oneshot(request(&uri, Some("SUPER_ADMIN"), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = response_json(response).await;
    assert!(json["details"]["search"].is_array());
}

#[tokio::test]
async fn test_undecodable_search_is_localized_json() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/api/organizations?search=a&search=b")
                .header("x-caller-role", "SUPER_ADMIN")
                .header(header::ACCEPT_LANGUAGE, "en")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = response_json(response).await;
    assert_eq!(json["error"], "Invalid query parameters.");
    assert!(json["details"].is_string());
}

#[tokio::test]
async fn test_missing_role_header() {
    let response = test_app()
        .oneshot(request("/api/organizations", None, Some("A")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = response_json(response).await;
    assert_eq!(json["error"], "O cabeçalho x-caller-role é obrigatório.");
}

#[tokio::test]
async fn test_unknown_role_sees_only_scope() {
    // cargo desconhecido: não é super-admin, então vê só o escopo
    let response = test_app()
        .oneshot(request("/api/organizations", Some("JANITOR"), Some("D")))
        .await
        .unwrap();
    let json = response_json(response).await;
    assert_eq!(ids_and_levels(&json), pairs(&[("D", 0)]));
}

#[tokio::test]
async fn test_tree_is_scoped_for_any_role() {
    let response = test_app()
        .oneshot(request("/api/organizations/tree", Some("STAFF"), Some("B")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["id"], "B");
    assert_eq!(json[0]["level"], 0);
    assert_eq!(json[0]["children"][0]["id"], "C");

    let response = test_app()
        .oneshot(request("/api/organizations/tree", Some("ORG_ADMIN"), Some("A")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["id"], "A");
    assert_eq!(json[0]["children"][0]["id"], "B");
    assert_eq!(json[0]["children"][0]["children"][0]["id"], "C");
    assert_eq!(json[0]["children"][0]["children"][0]["level"], 2);
}

#[tokio::test]
async fn test_tree_requires_role_header() {
    let response = test_app()
        .oneshot(request("/api/organizations/tree", None, Some("A")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_options_for_employee_form() {
    let response = test_app()
        .oneshot(request("/api/organizations/options", Some("HR"), Some("A")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    let labels: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["label"].as_str().unwrap())
        .collect();
    assert_eq!(
        labels,
        vec![
            "Agência Central (AGC)",
            "— Diretoria Regional (DR1)",
            "— — Protocolo (PRT)",
        ]
    );
}

#[tokio::test]
async fn test_options_denied_in_english() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/api/organizations/options")
                .header("x-caller-role", "STAFF")
                .header(header::ACCEPT_LANGUAGE, "en-US")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let json = response_json(response).await;
    assert_eq!(json["error"], "You need the 'manage_employees' permission to perform this action.");
}

#[tokio::test]
async fn test_upstream_failure_is_bad_gateway() {
    let app = app_with_source(Arc::new(FailingSource(500)));
    let response = app
        .oneshot(request("/api/organizations", Some("SUPER_ADMIN"), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_authorization_is_forwarded() {
    let app = app_with_source(Arc::new(RequireTokenSource));

    let response = app
        .clone()
        .oneshot(request("/api/organizations", Some("SUPER_ADMIN"), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/organizations")
                .header("x-caller-role", "SUPER_ADMIN")
                .header(header::AUTHORIZATION, "Bearer secret")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// =============================================================================
// RBAC e navegação
// =============================================================================

#[tokio::test]
async fn test_permission_check_examples() {
    let response = test_app()
        .oneshot(request(
            "/api/permissions/check?role=REVIEWER&permission=manage_organizations",
            None,
            None,
        ))
        .await
        .unwrap();
    let json = response_json(response).await;
    assert_eq!(json["allowed"], false);

    let response = test_app()
        .oneshot(request(
            "/api/permissions/check?role=SUPER_ADMIN&permission=manage_organizations",
            None,
            None,
        ))
        .await
        .unwrap();
    let json = response_json(response).await;
    assert_eq!(json["allowed"], true);
}

#[tokio::test]
async fn test_permission_check_unknown_values_fail_closed() {
    let response = test_app()
        .oneshot(request("/api/permissions/check?role=GHOST&permission=anything", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["allowed"], false);
}

#[tokio::test]
async fn test_permission_check_undecodable_query() {
    let response = test_app()
        .oneshot(request(
            "/api/permissions/check?role=STAFF&role=HR&permission=view_hr",
            None,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = response_json(response).await;
    assert_eq!(json["error"], "Parâmetros de consulta inválidos.");
}

#[tokio::test]
async fn test_list_permissions() {
    let response = test_app().oneshot(request("/api/permissions", None, None)).await.unwrap();
    let json = response_json(response).await;
    let permissions = json.as_array().unwrap();
    assert_eq!(permissions.len(), 16);
    assert_eq!(permissions[0]["slug"], "view_dashboard");
    assert_eq!(permissions[0]["module"], "DASHBOARD");
}

#[tokio::test]
async fn test_roles_matrix() {
    let response = test_app()
        .oneshot(request("/api/roles", Some("REVIEWER"), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = test_app()
        .oneshot(request("/api/roles", Some("ORG_ADMIN"), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 6);
    assert_eq!(json[0]["role"], "SUPER_ADMIN");
}

#[tokio::test]
async fn test_my_permissions() {
    let response = test_app()
        .oneshot(request("/api/me/permissions", Some("STAFF"), Some("C")))
        .await
        .unwrap();
    let json = response_json(response).await;
    assert_eq!(json["role"], "STAFF");
    assert_eq!(json["organizationId"], "C");
    assert_eq!(json["isSuperAdmin"], false);
    assert_eq!(
        json["permissions"],
        serde_json::json!(["view_dashboard", "view_letters", "view_templates"])
    );
}

#[tokio::test]
async fn test_navigation_for_officer() {
    let response = test_app()
        .oneshot(request("/api/navigation", Some("OFFICER"), Some("A")))
        .await
        .unwrap();
    let json = response_json(response).await;
    let keys: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["key"].as_str().unwrap())
        .collect();
    assert_eq!(keys, vec!["dashboard", "letters", "templates", "reports", "stamps"]);
}

#[tokio::test]
async fn test_resource_actions() {
    let response = test_app()
        .oneshot(request("/api/navigation/actions/letters", Some("REVIEWER"), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["resource"], "LETTERS");
    assert_eq!(json["view"], true);
    assert_eq!(json["edit"], true);
    assert_eq!(json["create"], false);
    assert_eq!(json["delete"], false);

    let response = test_app()
        .oneshot(request("/api/navigation/actions/stamps", Some("REVIEWER"), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
