//! Generative backend configuration from TOML (`[backend]` section)

use serde::{Deserialize, Serialize};

/// OpenAI-compatible generative backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBackendConfig {
    /// Base URL of the OpenAI-compatible API.
    pub base_url: String,
    /// Environment variable name for the API key (default: "DEDALUS_API_KEY").
    pub api_key_env: String,
    /// Direct API key (not recommended, use the env var instead).
    pub api_key: Option<String>,
    /// Tool servers offered to the full-capability tier.
    pub tool_servers: Vec<String>,
}

impl Default for FileBackendConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.dedaluslabs.ai".to_string(),
            api_key_env: "DEDALUS_API_KEY".to_string(),
            api_key: None,
            tool_servers: vec!["windsor/brave-search-mcp".to_string()],
        }
    }
}

impl FileBackendConfig {
    /// Resolve the API key: direct value first, then the named env var.
    ///
    /// `None` means no generative backend is configured.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|k| !k.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_key_wins() {
        let config = FileBackendConfig {
            api_key: Some("sk-direct".to_string()),
            api_key_env: "LATTICE_TEST_UNSET_KEY_VAR".to_string(),
            ..Default::default()
        };
        assert_eq!(config.resolve_api_key().as_deref(), Some("sk-direct"));
    }

    #[test]
    fn test_missing_key_is_none() {
        let config = FileBackendConfig {
            api_key: Some("  ".to_string()),
            api_key_env: "LATTICE_TEST_UNSET_KEY_VAR".to_string(),
            ..Default::default()
        };
        assert_eq!(config.resolve_api_key(), None);
    }
}
