// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::{middleware::i18n::Locale, models::rbac::Permission};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Query string inválida: {0}")]
    InvalidQuery(String),

    #[error("Cabeçalho obrigatório ausente: {0}")]
    MissingHeader(&'static str),

    #[error("Cabeçalho inválido: {0}")]
    InvalidHeader(&'static str),

    #[error("Permissão necessária: {0}")]
    PermissionDenied(Permission),

    #[error("Recurso desconhecido: {0}")]
    UnknownResource(String),

    #[error("Falha ao contactar o backend: {0}")]
    UpstreamRequest(#[from] reqwest::Error),

    #[error("Backend respondeu com status {0}")]
    UpstreamStatus(u16),

    #[error("Resposta inválida do backend: {0}")]
    UpstreamPayload(#[from] serde_json::Error),

    #[error("Configuração inválida: {0}")]
    Config(String),

    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

// O erro que vai para o cliente
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.error, "details": details }),
            None => json!({ "error": self.error }),
        };
        (self.status, Json(body)).into_response()
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::InvalidQuery(_)
            | AppError::MissingHeader(_)
            | AppError::InvalidHeader(_) => StatusCode::BAD_REQUEST,
            AppError::PermissionDenied(_) => StatusCode::FORBIDDEN,
            AppError::UnknownResource(_) => StatusCode::NOT_FOUND,
            // 401/403 do backend passam adiante; o resto é falha de gateway
            AppError::UpstreamStatus(401) => StatusCode::UNAUTHORIZED,
            AppError::UpstreamStatus(403) => StatusCode::FORBIDDEN,
            AppError::UpstreamStatus(_)
            | AppError::UpstreamRequest(_)
            | AppError::UpstreamPayload(_) => StatusCode::BAD_GATEWAY,
            AppError::Config(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn to_api_error(&self, locale: &Locale) -> ApiError {
        let en = locale.is_english();
        let status = self.status();

        let (error, details) = match self {
            AppError::ValidationError(errors) => {
                let mut details = serde_json::Map::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), json!(messages));
                }
                let msg = if en {
                    "One or more fields are invalid."
                } else {
                    "Um ou mais campos são inválidos."
                };
                (msg.to_string(), Some(Value::Object(details)))
            }
            AppError::InvalidQuery(reason) => {
                let msg = if en {
                    "Invalid query parameters."
                } else {
                    "Parâmetros de consulta inválidos."
                };
                (msg.to_string(), Some(json!(reason)))
            }
            AppError::MissingHeader(name) => {
                let msg = if en {
                    format!("The {name} header is required.")
                } else {
                    format!("O cabeçalho {name} é obrigatório.")
                };
                (msg, None)
            }
            AppError::InvalidHeader(name) => {
                let msg = if en {
                    format!("The {name} header is invalid.")
                } else {
                    format!("O cabeçalho {name} é inválido.")
                };
                (msg, None)
            }
            AppError::PermissionDenied(permission) => {
                let msg = if en {
                    format!("You need the '{permission}' permission to perform this action.")
                } else {
                    format!("Você precisa da permissão '{permission}' para realizar esta ação.")
                };
                (msg, None)
            }
            AppError::UnknownResource(resource) => {
                let msg = if en {
                    format!("Unknown resource '{resource}'.")
                } else {
                    format!("Recurso '{resource}' desconhecido.")
                };
                (msg, None)
            }
            AppError::UpstreamStatus(401) | AppError::UpstreamStatus(403) => {
                let msg = if en {
                    "Access denied by the backend."
                } else {
                    "Acesso negado pelo backend."
                };
                (msg.to_string(), None)
            }
            AppError::UpstreamStatus(_)
            | AppError::UpstreamRequest(_)
            | AppError::UpstreamPayload(_) => {
                tracing::error!("Falha no backend: {}", self);
                let msg = if en {
                    "Could not load organizations."
                } else {
                    "Não foi possível carregar as organizações."
                };
                (msg.to_string(), None)
            }
            AppError::Config(_) | AppError::InternalServerError(_) => {
                tracing::error!("Erro Interno do Servidor: {}", self);
                let msg = if en {
                    "An unexpected error occurred."
                } else {
                    "Ocorreu um erro inesperado."
                };
                (msg.to_string(), None)
            }
        };

        ApiError {
            status,
            error,
            details,
        }
    }
}

// Sem extrator de idioma à mão, responde no idioma padrão
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_api_error(&Locale::default()).into_response()
    }
}
