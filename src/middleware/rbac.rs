// src/middleware/rbac.rs

use axum::{extract::FromRequestParts, http::request::Parts};
use std::marker::PhantomData;

use crate::{
    common::error::{ApiError, AppError},
    middleware::{caller::caller_from_headers, i18n::Locale},
    models::rbac::{CallerContext, Permission},
    services::permission_service,
};

/// 1. O Trait que define a Permissão exigida por uma rota
pub trait PermissionDef: Send + Sync + 'static {
    fn permission() -> Permission;
}

/// 2. O Extractor (Guardião). Devolve o chamador já verificado.
pub struct RequirePermission<T> {
    pub caller: CallerContext,
    _permission: PhantomData<T>,
}

// 3. Implementação do FromRequestParts: consulta a tabela estática, sem ir ao backend
impl<T, S> FromRequestParts<S> for RequirePermission<T>
where
    T: PermissionDef,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let locale = Locale::from_headers(&parts.headers);

        // A. Extrai o chamador
        let caller = caller_from_headers(&parts.headers).map_err(|e| e.to_api_error(&locale))?;

        // B. Verifica na tabela
        let required = T::permission();
        if !permission_service::caller_has_permission(&caller, required) {
            tracing::debug!(role = ?caller.role, permission = %required, "Acesso negado");
            return Err(AppError::PermissionDenied(required).to_api_error(&locale));
        }

        Ok(RequirePermission {
            caller,
            _permission: PhantomData,
        })
    }
}

// ---
// DEFINIÇÃO DAS PERMISSÕES (TIPOS)
// ---

pub struct PermManageEmployees;
impl PermissionDef for PermManageEmployees {
    fn permission() -> Permission {
        Permission::ManageEmployees
    }
}

pub struct PermViewRoles;
impl PermissionDef for PermViewRoles {
    fn permission() -> Permission {
        Permission::ViewRoles
    }
}
