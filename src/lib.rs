// src/lib.rs

use axum::{routing::get, Router};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod client;
pub mod common;
pub mod config;
pub mod docs;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

use crate::config::AppState;
use crate::docs::ApiDoc;

/// Monta o router principal. Separado do `main` para os testes de integração.
pub fn build_router(app_state: AppState) -> Router {
    let organization_routes = Router::new()
        .route("/", get(handlers::organizations::list_organizations))
        .route("/tree", get(handlers::organizations::organization_tree))
        .route("/options", get(handlers::organizations::organization_options));

    let navigation_routes = Router::new()
        .route("/", get(handlers::navigation::get_navigation))
        .route("/actions/{resource}", get(handlers::navigation::get_resource_actions));

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/organizations", organization_routes)
        .nest("/api/navigation", navigation_routes)
        .route("/api/permissions", get(handlers::rbac::list_permissions))
        .route("/api/permissions/check", get(handlers::rbac::check_permission))
        .route("/api/roles", get(handlers::rbac::list_roles))
        .route("/api/me/permissions", get(handlers::rbac::my_permissions))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state)
}
