// src/client/organization_client.rs

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use crate::{common::error::AppError, models::organization::Organization};

/// De onde vem a lista de organizações. Em produção é o backend REST
/// (`GET /organizations`); nos testes, uma lista fixa.
#[async_trait]
pub trait OrganizationSource: Send + Sync {
    /// `auth` é o cabeçalho Authorization do chamador, repassado sem alteração.
    async fn fetch_organizations(&self, auth: Option<&str>) -> Result<Vec<Organization>, AppError>;
}

// ---
// Cliente HTTP (reqwest)
// ---
#[derive(Clone)]
pub struct HttpOrganizationClient {
    http: Client,
    organizations_url: String,
}

impl HttpOrganizationClient {
    pub fn new(backend_url: &str, timeout: Duration) -> Result<Self, AppError> {
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            organizations_url: format!("{}/organizations", backend_url.trim_end_matches('/')),
        })
    }

    pub fn organizations_url(&self) -> &str {
        &self.organizations_url
    }
}

#[async_trait]
impl OrganizationSource for HttpOrganizationClient {
    async fn fetch_organizations(&self, auth: Option<&str>) -> Result<Vec<Organization>, AppError> {
        let mut request = self.http.get(&self.organizations_url);
        if let Some(auth) = auth {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        // Sem nova tentativa: a falha vai direto para a tela
        let response = request.send().await.map_err(|e| {
            tracing::error!(
                "🔥 Falha ao buscar organizações em {}: {}",
                self.organizations_url,
                e
            );
            AppError::UpstreamRequest(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("🔥 Backend respondeu {} para {}", status, self.organizations_url);
            return Err(AppError::UpstreamStatus(status.as_u16()));
        }

        let body: Value = response.json().await?;
        let organizations = parse_organizations(body)?;

        tracing::debug!("{} organizações recebidas do backend", organizations.len());
        Ok(organizations)
    }
}

/// Aceita o array puro ou um envelope `{ "data": [...] }`.
pub fn parse_organizations(body: Value) -> Result<Vec<Organization>, AppError> {
    let list = match body {
        Value::Object(mut envelope) => match envelope.remove("data") {
            Some(data) => data,
            None => Value::Object(envelope),
        },
        other => other,
    };

    Ok(serde_json::from_value(list)?)
}

// ---
// Fonte fixa (testes e execução sem backend)
// ---
#[derive(Debug, Clone, Default)]
pub struct StaticOrganizationSource {
    organizations: Vec<Organization>,
}

impl StaticOrganizationSource {
    pub fn new(organizations: Vec<Organization>) -> Self {
        Self { organizations }
    }
}

#[async_trait]
impl OrganizationSource for StaticOrganizationSource {
    async fn fetch_organizations(
        &self,
        _auth: Option<&str>,
    ) -> Result<Vec<Organization>, AppError> {
        Ok(self.organizations.clone())
    }
}
