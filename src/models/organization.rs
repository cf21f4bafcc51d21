// src/models/organization.rs

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

// ---
// 1. Tipo da Organização
// ---
// Conjunto fechado. Qualquer valor desconhecido (ou ausente) vira `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrganizationType {
    /// Órgão de nível superior
    Agency,
    SubOrganization,
    Office,
    Region,
    #[default]
    Unknown,
}

impl OrganizationType {
    pub fn parse(s: &str) -> Self {
        let normalized = s.trim().to_uppercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "AGENCY" | "TOP_LEVEL" => Self::Agency,
            "SUB_ORGANIZATION" | "SUBORGANIZATION" | "SUB_ORG" => Self::SubOrganization,
            "OFFICE" => Self::Office,
            "REGION" => Self::Region,
            _ => Self::Unknown,
        }
    }
}

// ---
// 2. Organization (o registro vindo do backend)
// ---
// O backend devolve JSON sem garantias de tipo: campo ausente ou nulo vira o
// valor padrão (string vazia / None), nunca um erro.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    #[schema(example = "org-001")]
    #[serde(default, deserialize_with = "opaque_id")]
    pub id: String,

    #[schema(example = "Secretaria de Educação")]
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,

    #[schema(example = "SEDUC")]
    #[serde(default, deserialize_with = "lenient_string")]
    pub code: String,

    #[serde(rename = "type", default, deserialize_with = "organization_type")]
    pub organization_type: OrganizationType,

    // `None` = raiz (dentro do conjunto visível)
    #[serde(default, deserialize_with = "optional_id")]
    pub parent_organization_id: Option<String>,
}

impl Organization {
    pub fn new(id: impl Into<String>, parent_organization_id: Option<&str>) -> Self {
        Self {
            id: id.into(),
            parent_organization_id: parent_organization_id.map(str::to_string),
            ..Default::default()
        }
    }

    /// Busca por nome ou código (sem diferenciar maiúsculas).
    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        term.is_empty()
            || self.name.to_lowercase().contains(&term)
            || self.code.to_lowercase().contains(&term)
    }
}

// ---
// 3. Saídas derivadas (nunca persistidas)
// ---

// Entrada da lista achatada, com a profundidade em relação à raiz visível
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeveledOrganization {
    #[serde(flatten)]
    pub organization: Organization,

    #[schema(example = 1)]
    pub level: usize,
}

// Nó da árvore aninhada (tela de gestão de sub-organizações)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationNode {
    #[serde(flatten)]
    pub organization: Organization,

    pub level: usize,

    #[schema(no_recursion)]
    pub children: Vec<OrganizationNode>,
}

// Opção para os selects dos formulários (funcionário, sub-organização)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationOption {
    pub id: String,

    #[schema(example = "— Diretoria Regional (DR1)")]
    pub label: String,

    pub level: usize,
}

impl From<&LeveledOrganization> for OrganizationOption {
    fn from(entry: &LeveledOrganization) -> Self {
        let org = &entry.organization;
        let mut label = "— ".repeat(entry.level);
        label.push_str(&org.name);
        if !org.code.is_empty() {
            label.push_str(&format!(" ({})", org.code));
        }
        Self {
            id: org.id.clone(),
            label,
            level: entry.level,
        }
    }
}

// ---
// Desserializadores tolerantes
// ---

fn value_to_string(value: Option<Value>) -> String {
    match value {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn opaque_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Value>::deserialize(deserializer).map(value_to_string)
}

fn optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let id = value_to_string(Option::<Value>::deserialize(deserializer)?);
    Ok(if id.is_empty() { None } else { Some(id) })
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Ok(s),
        Some(Value::Number(n)) => Ok(n.to_string()),
        _ => Ok(String::new()),
    }
}

fn organization_type<'de, D>(deserializer: D) -> Result<OrganizationType, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_str)
        .map(OrganizationType::parse)
        .unwrap_or_default())
}
