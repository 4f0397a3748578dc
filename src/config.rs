//! Runtime configuration resolved from command-line arguments

use crate::error::ConfigError;

pub const DEFAULT_API_BASE: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_LIST_LIMIT: u32 = 500;

#[derive(Clone, Debug, PartialEq)]
pub struct ExplorerConfig {
    /// API root without a trailing slash
    pub api_base: String,
    pub list_limit: u32,
    /// Identifier to open in the detail view on start
    pub start_id: Option<String>,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            list_limit: DEFAULT_LIST_LIMIT,
            start_id: None,
        }
    }
}

impl ExplorerConfig {
    pub fn new(
        api_base: &str,
        list_limit: u32,
        start_id: Option<String>,
    ) -> Result<Self, ConfigError> {
        let parsed = reqwest::Url::parse(api_base)
            .map_err(|_| ConfigError::InvalidApiBase(api_base.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(parsed.scheme().to_string()));
        }
        let start_id = start_id
            .map(|id| id.trim().to_lowercase())
            .filter(|id| !id.is_empty());
        if let Some(id) = start_id.as_deref() {
            if !is_resource_key(id) {
                return Err(ConfigError::InvalidStartId(id.to_string()));
            }
        }
        Ok(Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            list_limit,
            start_id,
        })
    }
}

/// Ids and names that address a single `/pokemon/{key}` resource
fn is_resource_key(key: &str) -> bool {
    key.chars()
        .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-')
}
