// src/services/navigation_service.rs

use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    common::error::AppError,
    middleware::i18n::Locale,
    models::rbac::{CallerContext, Permission},
    services::permission_service::caller_has_permission,
};

struct NavigationItem {
    key: &'static str,
    path: &'static str,
    label_pt: &'static str,
    label_en: &'static str,
    required: Permission,
}

// Menu lateral, na ordem de exibição
const NAVIGATION: [NavigationItem; 10] = [
    NavigationItem {
        key: "dashboard",
        path: "/dashboard",
        label_pt: "Painel",
        label_en: "Dashboard",
        required: Permission::ViewDashboard,
    },
    NavigationItem {
        key: "letters",
        path: "/letters",
        label_pt: "Ofícios",
        label_en: "Letters",
        required: Permission::ViewLetters,
    },
    NavigationItem {
        key: "templates",
        path: "/templates",
        label_pt: "Modelos",
        label_en: "Templates",
        required: Permission::ViewTemplates,
    },
    NavigationItem {
        key: "organizations",
        path: "/organizations",
        label_pt: "Organizações",
        label_en: "Organizations",
        required: Permission::ManageOrganizations,
    },
    NavigationItem {
        key: "employees",
        path: "/employees",
        label_pt: "Funcionários",
        label_en: "Employees",
        required: Permission::ManageEmployees,
    },
    NavigationItem {
        key: "hr",
        path: "/hr",
        label_pt: "Recursos Humanos",
        label_en: "Human Resources",
        required: Permission::ViewHr,
    },
    NavigationItem {
        key: "reports",
        path: "/reports",
        label_pt: "Relatórios",
        label_en: "Reports",
        required: Permission::ViewReports,
    },
    NavigationItem {
        key: "stamps",
        path: "/stamps",
        label_pt: "Carimbos",
        label_en: "Stamps",
        required: Permission::ManageStamps,
    },
    NavigationItem {
        key: "roles",
        path: "/roles",
        label_pt: "Cargos",
        label_en: "Roles",
        required: Permission::ViewRoles,
    },
    NavigationItem {
        key: "billing",
        path: "/billing",
        label_pt: "Plano e Cobrança",
        label_en: "Billing",
        required: Permission::ViewBilling,
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NavigationEntry {
    #[schema(example = "letters")]
    pub key: String,
    #[schema(example = "/letters")]
    pub path: String,
    #[schema(example = "Ofícios")]
    pub label: String,
    pub required_permission: Permission,
}

/// Entradas do menu que o chamador pode ver.
pub fn visible_navigation(caller: &CallerContext, locale: &Locale) -> Vec<NavigationEntry> {
    NAVIGATION
        .iter()
        .filter(|item| caller_has_permission(caller, item.required))
        .map(|item| NavigationEntry {
            key: item.key.to_string(),
            path: item.path.to_string(),
            label: if locale.is_english() { item.label_en } else { item.label_pt }.to_string(),
            required_permission: item.required,
        })
        .collect()
}

// ---
// Botões de ação das telas
// ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Resource {
    Letters,
    Templates,
}

impl Resource {
    pub fn parse(s: &str) -> Result<Self, AppError> {
        match s.trim().to_lowercase().as_str() {
            "letters" => Ok(Self::Letters),
            "templates" => Ok(Self::Templates),
            other => Err(AppError::UnknownResource(other.to_string())),
        }
    }

    // (ver, criar, editar, excluir)
    fn permissions(&self) -> [Permission; 4] {
        match self {
            Self::Letters => [
                Permission::ViewLetters,
                Permission::CreateLetters,
                Permission::EditLetters,
                Permission::DeleteLetters,
            ],
            Self::Templates => [
                Permission::ViewTemplates,
                Permission::CreateTemplates,
                Permission::EditTemplates,
                Permission::DeleteTemplates,
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResourceActions {
    pub resource: Resource,
    pub view: bool,
    pub create: bool,
    pub edit: bool,
    pub delete: bool,
}

pub fn resource_actions(caller: &CallerContext, resource: Resource) -> ResourceActions {
    let [view, create, edit, delete] = resource
        .permissions()
        .map(|p| caller_has_permission(caller, p));

    ResourceActions {
        resource,
        view,
        create,
        edit,
        delete,
    }
}
