// src/models/rbac.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

// ---
// 1. Role (os cargos fixos da plataforma)
// ---
// Não existem cargos dinâmicos: a tela de cargos é somente leitura.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    SuperAdmin,
    OrgAdmin,
    Hr,
    Officer,
    Reviewer,
    Staff,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::SuperAdmin,
        Role::OrgAdmin,
        Role::Hr,
        Role::Officer,
        Role::Reviewer,
        Role::Staff,
    ];

    /// Lê o cargo vindo da sessão. Desconhecido = `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().replace(['-', ' '], "_").as_str() {
            "SUPER_ADMIN" | "SUPERADMIN" => Some(Self::SuperAdmin),
            "ORG_ADMIN" | "ORGANIZATION_ADMIN" | "ADMIN" => Some(Self::OrgAdmin),
            "HR" => Some(Self::Hr),
            "OFFICER" => Some(Self::Officer),
            "REVIEWER" => Some(Self::Reviewer),
            "STAFF" => Some(Self::Staff),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "SUPER_ADMIN",
            Self::OrgAdmin => "ORG_ADMIN",
            Self::Hr => "HR",
            Self::Officer => "OFFICER",
            Self::Reviewer => "REVIEWER",
            Self::Staff => "STAFF",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---
// 2. Permission (as capacidades)
// ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ViewDashboard,
    ViewLetters,
    CreateLetters,
    EditLetters,
    DeleteLetters,
    ViewTemplates,
    CreateTemplates,
    EditTemplates,
    DeleteTemplates,
    ViewHr,
    ManageEmployees,
    ManageOrganizations,
    ViewReports,
    ManageStamps,
    ViewRoles,
    ViewBilling,
}

impl Permission {
    // Ordem de exibição
    pub const ALL: [Permission; 16] = [
        Permission::ViewDashboard,
        Permission::ViewLetters,
        Permission::CreateLetters,
        Permission::EditLetters,
        Permission::DeleteLetters,
        Permission::ViewTemplates,
        Permission::CreateTemplates,
        Permission::EditTemplates,
        Permission::DeleteTemplates,
        Permission::ViewHr,
        Permission::ManageEmployees,
        Permission::ManageOrganizations,
        Permission::ViewReports,
        Permission::ManageStamps,
        Permission::ViewRoles,
        Permission::ViewBilling,
    ];

    pub fn parse(s: &str) -> Option<Self> {
        let normalized = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|p| p.as_str() == normalized)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ViewDashboard => "view_dashboard",
            Self::ViewLetters => "view_letters",
            Self::CreateLetters => "create_letters",
            Self::EditLetters => "edit_letters",
            Self::DeleteLetters => "delete_letters",
            Self::ViewTemplates => "view_templates",
            Self::CreateTemplates => "create_templates",
            Self::EditTemplates => "edit_templates",
            Self::DeleteTemplates => "delete_templates",
            Self::ViewHr => "view_hr",
            Self::ManageEmployees => "manage_employees",
            Self::ManageOrganizations => "manage_organizations",
            Self::ViewReports => "view_reports",
            Self::ManageStamps => "manage_stamps",
            Self::ViewRoles => "view_roles",
            Self::ViewBilling => "view_billing",
        }
    }

    /// Módulo ao qual a permissão pertence (agrupamento na tela de cargos)
    pub fn module(&self) -> &'static str {
        match self {
            Self::ViewDashboard => "DASHBOARD",
            Self::ViewLetters
            | Self::CreateLetters
            | Self::EditLetters
            | Self::DeleteLetters => "LETTERS",
            Self::ViewTemplates
            | Self::CreateTemplates
            | Self::EditTemplates
            | Self::DeleteTemplates => "TEMPLATES",
            Self::ViewHr => "HR",
            Self::ManageEmployees
            | Self::ManageOrganizations
            | Self::ManageStamps
            | Self::ViewRoles => "ADMINISTRATION",
            Self::ViewReports => "REPORTS",
            Self::ViewBilling => "BILLING",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---
// 3. CallerContext (quem está chamando)
// ---
// Substitui a leitura da sessão persistida: o chamador é passado explicitamente.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CallerContext {
    // `None` = cargo não reconhecido, sem nenhuma permissão
    pub role: Option<Role>,
    pub organization_id: String,
}

impl CallerContext {
    pub fn new(role: Option<Role>, organization_id: impl Into<String>) -> Self {
        Self {
            role,
            organization_id: organization_id.into(),
        }
    }

    pub fn is_super_admin(&self) -> bool {
        self.role == Some(Role::SuperAdmin)
    }
}

// ---
// 4. Respostas
// ---

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PermissionInfo {
    #[schema(example = "manage_organizations")]
    pub slug: Permission,

    #[schema(example = "ADMINISTRATION")]
    pub module: String,
}

impl From<Permission> for PermissionInfo {
    fn from(permission: Permission) -> Self {
        Self {
            slug: permission,
            module: permission.module().to_string(),
        }
    }
}

// Linha da matriz de cargos (cargo + lista de permissões)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RolePermissions {
    pub role: Role,
    pub permissions: Vec<Permission>,
}

// Permissões efetivas de quem chama
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CallerPermissions {
    pub role: Option<Role>,
    pub organization_id: String,
    pub is_super_admin: bool,
    pub permissions: Vec<Permission>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PermissionCheckResponse {
    pub role: String,
    pub permission: String,
    pub allowed: bool,
}
