// src/handlers/organizations.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{
        caller::{Caller, ForwardedAuth},
        i18n::Locale,
        query::ValidatedQuery,
        rbac::{PermManageEmployees, RequirePermission},
    },
    models::organization::{LeveledOrganization, OrganizationNode, OrganizationOption},
};

// ---
// 1. Parâmetros de busca
// ---
#[derive(Debug, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OrganizationQuery {
    /// Filtra por nome ou código
    #[validate(length(
        max = 100,
        message = "A busca deve ter no máximo 100 caracteres."
    ))]
    pub search: Option<String>,
}

// GET /api/organizations
#[utoipa::path(
    get,
    path = "/api/organizations",
    tag = "Organizations",
    params(
        OrganizationQuery,
        ("x-caller-role" = String, Header, description = "Cargo do chamador"),
        ("x-organization-id" = Option<String>, Header, description = "Organização do chamador")
    ),
    responses(
        (
            status = 200,
            description = "Organizações visíveis, em pré-ordem e com nível",
            body = Vec<LeveledOrganization>
        ),
        (status = 400, description = "Cabeçalho ou parâmetro inválido"),
        (status = 502, description = "Falha ao consultar o backend")
    )
)]
pub async fn list_organizations(
    State(app_state): State<AppState>,
    locale: Locale,
    Caller(caller): Caller,
    auth: ForwardedAuth,
    ValidatedQuery(query): ValidatedQuery<OrganizationQuery>,
) -> Result<impl IntoResponse, ApiError> {
    // Buscar, filtrar pelo escopo e nivelar
    let organizations = app_state
        .hierarchy_service
        .visible_organizations(&caller, auth.as_deref(), query.search.as_deref())
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(organizations)))
}

// GET /api/organizations/tree
#[utoipa::path(
    get,
    path = "/api/organizations/tree",
    tag = "Organizations",
    params(
        ("x-caller-role" = String, Header, description = "Cargo do chamador"),
        ("x-organization-id" = Option<String>, Header, description = "Organização do chamador")
    ),
    responses(
        (
            status = 200,
            description = "Árvore de organizações visíveis",
            body = Vec<OrganizationNode>
        ),
        (status = 400, description = "Cabeçalho inválido"),
        (status = 502, description = "Falha ao consultar o backend")
    )
)]
pub async fn organization_tree(
    State(app_state): State<AppState>,
    locale: Locale,
    Caller(caller): Caller,
    auth: ForwardedAuth,
) -> Result<impl IntoResponse, ApiError> {
    let tree = app_state
        .hierarchy_service
        .visible_tree(&caller, auth.as_deref())
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(tree)))
}

// GET /api/organizations/options (select do cadastro de funcionário)
#[utoipa::path(
    get,
    path = "/api/organizations/options",
    tag = "Organizations",
    params(
        ("x-caller-role" = String, Header, description = "Cargo do chamador"),
        ("x-organization-id" = Option<String>, Header, description = "Organização do chamador")
    ),
    responses(
        (
            status = 200,
            description = "Opções indentadas para formulários",
            body = Vec<OrganizationOption>
        ),
        (status = 403, description = "Sem a permissão manage_employees")
    )
)]
pub async fn organization_options(
    State(app_state): State<AppState>,
    locale: Locale,
    guard: RequirePermission<PermManageEmployees>,
    auth: ForwardedAuth,
) -> Result<impl IntoResponse, ApiError> {
    let options = app_state
        .hierarchy_service
        .organization_options(&guard.caller, auth.as_deref())
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(options)))
}
