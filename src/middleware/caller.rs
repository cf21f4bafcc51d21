// src/middleware/caller.rs

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};

use crate::{
    common::error::{ApiError, AppError},
    middleware::i18n::Locale,
    models::rbac::{CallerContext, Role},
};

// Os cabeçalhos que o front-end envia a partir da sessão salva
pub const CALLER_ROLE_HEADER: &str = "x-caller-role";
pub const ORGANIZATION_ID_HEADER: &str = "x-organization-id";
const AUTHORIZATION_HEADER: &str = "authorization";

fn header_str<'a>(
    headers: &'a HeaderMap,
    name: &'static str,
) -> Result<Option<&'a str>, AppError> {
    headers
        .get(name)
        .map(|value| value.to_str().map_err(|_| AppError::InvalidHeader(name)))
        .transpose()
}

/// Monta o contexto do chamador. Só o cargo é obrigatório; um cargo
/// desconhecido não é erro, apenas não tem permissão nenhuma.
pub fn caller_from_headers(headers: &HeaderMap) -> Result<CallerContext, AppError> {
    let role = header_str(headers, CALLER_ROLE_HEADER)?
        .ok_or(AppError::MissingHeader(CALLER_ROLE_HEADER))?;
    let organization_id = header_str(headers, ORGANIZATION_ID_HEADER)?.unwrap_or_default();

    let parsed = Role::parse(role);
    if parsed.is_none() {
        tracing::debug!("Cargo desconhecido na sessão: {:?}", role);
    }

    Ok(CallerContext::new(parsed, organization_id.trim()))
}

// Extrator: o contexto do chamador direto nos handlers
#[derive(Debug, Clone)]
pub struct Caller(pub CallerContext);

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        caller_from_headers(&parts.headers)
            .map(Caller)
            .map_err(|e| e.to_api_error(&Locale::from_headers(&parts.headers)))
    }
}

// Extrator: o cabeçalho Authorization, repassado ao backend sem validação
#[derive(Debug, Clone, Default)]
pub struct ForwardedAuth(pub Option<String>);

impl ForwardedAuth {
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl<S> FromRequestParts<S> for ForwardedAuth
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = header_str(&parts.headers, AUTHORIZATION_HEADER)
            .map_err(|e| e.to_api_error(&Locale::from_headers(&parts.headers)))?;

        Ok(ForwardedAuth(value.map(str::to_string)))
    }
}
