//! Provider configuration from TOML (`[provider]` and `[providers]` sections)

use routewise_domain::{ConfigIssue, ConfigIssueCode, ProviderEndpoint, ProviderRegistry};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Selected provider and request settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Provider used when `--provider` is not given (default: "deepseek").
    pub default: String,
    /// Environment variable read when `--api-key` is not given.
    pub api_key_env: String,
    /// Sampling temperature, clamped to 0.1–0.2.
    pub temperature: f32,
    /// Request timeout for the chat call in seconds.
    pub timeout_secs: u64,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            default: "deepseek".to_string(),
            api_key_env: "ROUTEWISE_API_KEY".to_string(),
            temperature: 0.1,
            timeout_secs: 60,
        }
    }
}

impl FileProviderConfig {
    pub(super) fn temperature_issues(&self) -> Vec<ConfigIssue> {
        if (0.1..=0.2).contains(&self.temperature) {
            return Vec::new();
        }
        vec![ConfigIssue::warning(
            ConfigIssueCode::OutOfRange {
                field: "provider.temperature".to_string(),
            },
            format!(
                "provider.temperature: {} is outside 0.1-0.2 and will be clamped",
                self.temperature
            ),
        )]
    }
}

/// A chat-completions compatible provider defined in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileCustomProvider {
    pub endpoint: String,
    pub model: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    /// `[providers.custom.<id>]` entries.
    pub custom: BTreeMap<String, FileCustomProvider>,
}

impl FileProvidersConfig {
    /// Build the registry. Invalid entries are skipped and reported.
    pub fn to_registry(&self) -> (ProviderRegistry, Vec<ConfigIssue>) {
        let mut registry = ProviderRegistry::builtin();
        let mut issues = Vec::new();

        for (id, entry) in &self.custom {
            let endpoint = entry.endpoint.trim();
            let has_scheme = endpoint.starts_with("https://") || endpoint.starts_with("http://");
            if !has_scheme || entry.model.trim().is_empty() {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::InvalidProviderEntry { id: id.clone() },
                    format!(
                        "providers.custom.{}: needs an http(s) endpoint and a model name; entry ignored",
                        id
                    ),
                ));
                continue;
            }
            registry = registry.with_endpoint(ProviderEndpoint::new(
                id.as_str(),
                endpoint,
                entry.model.trim(),
            ));
        }

        (registry, issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_provider_overrides_builtin() {
        let mut config = FileProvidersConfig::default();
        config.custom.insert(
            "openai".to_string(),
            FileCustomProvider {
                endpoint: "http://localhost:8080/v1/chat/completions".to_string(),
                model: "local-model".to_string(),
            },
        );

        let (registry, issues) = config.to_registry();
        assert!(issues.is_empty());
        assert_eq!(registry.len(), 4);
        assert_eq!(registry.get("openai").unwrap().model, "local-model");
    }

    #[test]
    fn test_empty_model_is_rejected() {
        let mut config = FileProvidersConfig::default();
        config.custom.insert(
            "lab".to_string(),
            FileCustomProvider {
                endpoint: "https://llm.example.com".to_string(),
                model: "  ".to_string(),
            },
        );

        let (registry, issues) = config.to_registry();
        assert_eq!(issues.len(), 1);
        assert!(!registry.contains("lab"));
    }
}
