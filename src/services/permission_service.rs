// src/services/permission_service.rs

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use crate::models::rbac::{CallerContext, Permission, Role, RolePermissions};

// A tabela de permissões: montada uma vez, somente leitura durante todo o processo.
static PERMISSION_TABLE: LazyLock<HashMap<Role, HashSet<Permission>>> = LazyLock::new(|| {
    use Permission::*;

    let mut table = HashMap::new();

    table.insert(Role::SuperAdmin, Permission::ALL.into_iter().collect());

    table.insert(
        Role::OrgAdmin,
        Permission::ALL
            .into_iter()
            .filter(|p| *p != ViewBilling)
            .collect(),
    );

    table.insert(
        Role::Hr,
        HashSet::from([
            ViewDashboard,
            ViewLetters,
            ViewTemplates,
            ViewHr,
            ManageEmployees,
            ViewReports,
        ]),
    );

    table.insert(
        Role::Officer,
        HashSet::from([
            ViewDashboard,
            ViewLetters,
            CreateLetters,
            EditLetters,
            ViewTemplates,
            ViewReports,
            ManageStamps,
        ]),
    );

    table.insert(
        Role::Reviewer,
        HashSet::from([ViewDashboard, ViewLetters, EditLetters, ViewTemplates, ViewReports]),
    );

    table.insert(Role::Staff, HashSet::from([ViewDashboard, ViewLetters, ViewTemplates]));

    table
});

/// O cargo `role` possui `permission`? Cargo fora da tabela = não (falha fechada).
pub fn has_permission(role: Role, permission: Permission) -> bool {
    PERMISSION_TABLE
        .get(&role)
        .is_some_and(|permissions| permissions.contains(&permission))
}

pub fn caller_has_permission(caller: &CallerContext, permission: Permission) -> bool {
    caller.role.is_some_and(|role| has_permission(role, permission))
}

/// Versão com strings (como chegam da sessão). Nada aqui vira erro:
/// cargo ou permissão desconhecidos simplesmente negam.
pub fn has_permission_str(role: &str, permission: &str) -> bool {
    match (Role::parse(role), Permission::parse(permission)) {
        (Some(role), Some(permission)) => has_permission(role, permission),
        _ => false,
    }
}

pub fn permissions_for(role: Role) -> Vec<Permission> {
    Permission::ALL
        .into_iter()
        .filter(|p| has_permission(role, *p))
        .collect()
}

pub fn caller_permissions(caller: &CallerContext) -> Vec<Permission> {
    caller.role.map(permissions_for).unwrap_or_default()
}

// Matriz da tela de cargos
pub fn role_matrix() -> Vec<RolePermissions> {
    Role::ALL
        .into_iter()
        .map(|role| RolePermissions {
            role,
            permissions: permissions_for(role),
        })
        .collect()
}
