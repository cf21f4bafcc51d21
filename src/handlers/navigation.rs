// src/handlers/navigation.rs

use axum::{extract::Path, response::IntoResponse, Json};

use crate::{
    common::error::ApiError,
    middleware::{caller::Caller, i18n::Locale},
    services::navigation_service::{self, NavigationEntry, Resource, ResourceActions},
};

// GET /api/navigation
#[utoipa::path(
    get,
    path = "/api/navigation",
    tag = "Navigation",
    params(
        ("x-caller-role" = String, Header, description = "Cargo do chamador")
    ),
    responses(
        (
            status = 200,
            description = "Entradas do menu lateral visíveis ao chamador",
            body = Vec<NavigationEntry>
        )
    )
)]
pub async fn get_navigation(locale: Locale, Caller(caller): Caller) -> impl IntoResponse {
    Json(navigation_service::visible_navigation(&caller, &locale))
}

// GET /api/navigation/actions/{resource}
#[utoipa::path(
    get,
    path = "/api/navigation/actions/{resource}",
    tag = "Navigation",
    params(
        ("resource" = String, Path, description = "letters | templates"),
        ("x-caller-role" = String, Header, description = "Cargo do chamador")
    ),
    responses(
        (status = 200, description = "Botões de ação liberados", body = ResourceActions),
        (status = 404, description = "Recurso desconhecido")
    )
)]
pub async fn get_resource_actions(
    locale: Locale,
    Caller(caller): Caller,
    Path(resource): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let resource = Resource::parse(&resource).map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(navigation_service::resource_actions(&caller, resource)))
}
