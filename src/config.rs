// src/config.rs

use std::{env, sync::Arc, time::Duration};

use crate::{
    client::{HttpOrganizationClient, OrganizationSource},
    common::error::AppError,
    services::hierarchy_service::HierarchyService,
};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    // URL base do backend REST da FIRMA (sem a barra final)
    pub backend_url: String,
    pub bind_addr: String,
    pub backend_timeout: Duration,
}

impl AppConfig {
    /// Lê do ambiente (e do .env, se existir).
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    // Separado do `env` para poder testar sem mexer no ambiente do processo
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend_url = lookup("BACKEND_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .ok_or_else(|| AppError::Config("BACKEND_URL deve ser definida".into()))?;

        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        let timeout_secs = match lookup("BACKEND_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                AppError::Config(format!("BACKEND_TIMEOUT_SECS inválido: {raw}"))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            backend_url,
            bind_addr,
            backend_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub hierarchy_service: HierarchyService,
}

impl AppState {
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env()?;

        // --- Monta o gráfico de dependências ---
        let client = HttpOrganizationClient::new(&config.backend_url, config.backend_timeout)?;
        tracing::info!("✅ Backend de organizações: {}", client.organizations_url());

        Ok(Self::with_source(config, Arc::new(client)))
    }

    pub fn with_source(config: AppConfig, source: Arc<dyn OrganizationSource>) -> Self {
        Self {
            config: Arc::new(config),
            hierarchy_service: HierarchyService::new(source),
        }
    }
}
