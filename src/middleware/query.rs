// src/middleware/query.rs

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    middleware::i18n::Locale,
};

/// Query string decodificada e validada. Qualquer falha sai no mesmo corpo
/// JSON localizado dos outros erros, não no texto puro do axum.
#[derive(Debug, Clone, Default)]
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let locale = Locale::from_headers(&parts.headers);

        // A. Decodifica
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                AppError::InvalidQuery(rejection.body_text()).to_api_error(&locale)
            })?;

        // B. Valida
        value
            .validate()
            .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

        Ok(ValidatedQuery(value))
    }
}
