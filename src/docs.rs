// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;
use crate::services::navigation_service;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Organizations ---
        handlers::organizations::list_organizations,
        handlers::organizations::organization_tree,
        handlers::organizations::organization_options,

        // --- RBAC ---
        handlers::rbac::list_permissions,
        handlers::rbac::check_permission,
        handlers::rbac::list_roles,
        handlers::rbac::my_permissions,

        // --- Navigation ---
        handlers::navigation::get_navigation,
        handlers::navigation::get_resource_actions,
    ),
    components(
        schemas(
            // --- Organizations ---
            models::organization::OrganizationType,
            models::organization::Organization,
            models::organization::LeveledOrganization,
            models::organization::OrganizationNode,
            models::organization::OrganizationOption,

            // --- RBAC ---
            models::rbac::Role,
            models::rbac::Permission,
            models::rbac::PermissionInfo,
            models::rbac::RolePermissions,
            models::rbac::CallerPermissions,
            models::rbac::PermissionCheckResponse,

            // --- Navigation ---
            navigation_service::NavigationEntry,
            navigation_service::Resource,
            navigation_service::ResourceActions,
        )
    ),
    tags(
        (name = "Organizations", description = "Hierarquia de organizações visível ao chamador"),
        (name = "RBAC", description = "Controle de Acesso (Cargos e Permissões)"),
        (name = "Navigation", description = "Menu lateral e botões de ação")
    )
)]
pub struct ApiDoc;
