// src/handlers/rbac.rs

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use crate::{
    common::error::ApiError,
    middleware::{
        caller::Caller,
        query::ValidatedQuery,
        rbac::{PermViewRoles, RequirePermission},
    },
    models::rbac::{
        CallerPermissions, Permission, PermissionCheckResponse, PermissionInfo, RolePermissions,
    },
    services::permission_service,
};

// GET /api/permissions (Para o frontend saber o que existe)
#[utoipa::path(
    get,
    path = "/api/permissions",
    tag = "RBAC",
    responses(
        (status = 200, description = "Todas as permissões do sistema", body = Vec<PermissionInfo>)
    )
)]
pub async fn list_permissions() -> impl IntoResponse {
    let permissions: Vec<PermissionInfo> = Permission::ALL
        .into_iter()
        .map(PermissionInfo::from)
        .collect();
    Json(permissions)
}

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PermissionCheckQuery {
    /// Cargo, como vem da sessão (ex: REVIEWER)
    #[serde(default)]
    pub role: String,
    /// Slug da permissão (ex: manage_organizations)
    #[serde(default)]
    pub permission: String,
}

// GET /api/permissions/check?role=...&permission=...
// Valores desconhecidos respondem `allowed: false`, nunca erro.
#[utoipa::path(
    get,
    path = "/api/permissions/check",
    tag = "RBAC",
    params(PermissionCheckQuery),
    responses(
        (status = 200, description = "Resultado da verificação", body = PermissionCheckResponse),
        (status = 400, description = "Query string inválida")
    )
)]
pub async fn check_permission(
    ValidatedQuery(query): ValidatedQuery<PermissionCheckQuery>,
) -> impl IntoResponse {
    let allowed = permission_service::has_permission_str(&query.role, &query.permission);

    Json(PermissionCheckResponse {
        role: query.role,
        permission: query.permission,
        allowed,
    })
}

// GET /api/roles (tela de cargos, somente leitura)
#[utoipa::path(
    get,
    path = "/api/roles",
    tag = "RBAC",
    params(
        ("x-caller-role" = String, Header, description = "Cargo do chamador")
    ),
    responses(
        (status = 200, description = "Matriz cargo x permissões", body = Vec<RolePermissions>),
        (status = 403, description = "Sem a permissão view_roles")
    )
)]
pub async fn list_roles(
    _guard: RequirePermission<PermViewRoles>,
) -> Result<impl IntoResponse, ApiError> {
    Ok((StatusCode::OK, Json(permission_service::role_matrix())))
}

// GET /api/me/permissions
#[utoipa::path(
    get,
    path = "/api/me/permissions",
    tag = "RBAC",
    params(
        ("x-caller-role" = String, Header, description = "Cargo do chamador"),
        ("x-organization-id" = Option<String>, Header, description = "Organização do chamador")
    ),
    responses(
        (status = 200, description = "Permissões efetivas do chamador", body = CallerPermissions)
    )
)]
pub async fn my_permissions(Caller(caller): Caller) -> impl IntoResponse {
    Json(CallerPermissions {
        permissions: permission_service::caller_permissions(&caller),
        is_super_admin: caller.is_super_admin(),
        role: caller.role,
        organization_id: caller.organization_id,
    })
}
