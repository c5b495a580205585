use crate::error::{InsightsError, InsightsResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_ATTIO_API_BASE: &str = "https://api.attio.com/v2";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub attio: AttioConfig,
    pub openai: OpenAiConfig,
    #[serde(default = "default_knowledge_dir")]
    pub knowledge_dir: PathBuf,
    #[serde(default = "default_cache_ttl")]
    pub notes_cache_ttl_seconds: u64,
    #[serde(default = "default_dashboard_page_size")]
    pub dashboard_page_size: usize,
    #[serde(default = "default_coach_page_size")]
    pub coach_page_size: usize,
    #[serde(default)]
    pub models: ModelConfig
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttioConfig {
    pub api_base: String,
    pub access_token: Option<String>,
    pub timeout_seconds: u64
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpenAiConfig {
    pub api_key: Option<String>,
    pub api_base: Option<String>
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub chat: String,
    pub coach: String,
    pub research: String,
    pub summary: String
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            chat: "o4-mini".to_string(),
            coach: "o3".to_string(),
            research: "gpt-4o-mini-search-preview".to_string(),
            summary: "gpt-4o".to_string()
        }
    }
}

fn default_knowledge_dir() -> PathBuf {
    PathBuf::from("knowledge")
}

fn default_cache_ttl() -> u64 {
    300
}

fn default_dashboard_page_size() -> usize {
    50
}

fn default_coach_page_size() -> usize {
    20
}

impl Default for AttioConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_ATTIO_API_BASE.to_string(),
            access_token: None,
            timeout_seconds: 30
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            attio: AttioConfig::default(),
            openai: OpenAiConfig::default(),
            knowledge_dir: default_knowledge_dir(),
            notes_cache_ttl_seconds: default_cache_ttl(),
            dashboard_page_size: default_dashboard_page_size(),
            coach_page_size: default_coach_page_size(),
            models: ModelConfig::default()
        }
    }
}

impl AttioConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl AppConfig {
    /// Reads settings from process environment variables.
    pub fn from_env() -> InsightsResult<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup. Empty values
    /// count as unset.
    pub fn from_vars<F>(lookup: F) -> InsightsResult<Self>
    where
        F: Fn(&str) -> Option<String>
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();
        let models = ModelConfig::default();

        Ok(Self {
            attio: AttioConfig {
                api_base: get("ATTIO_API_BASE").unwrap_or(defaults.attio.api_base),
                access_token: get("ATTIO_ACCESS_TOKEN"),
                timeout_seconds: parse_var(&get, "REQUEST_TIMEOUT_SECONDS")?
                    .unwrap_or(defaults.attio.timeout_seconds)
            },
            openai: OpenAiConfig {
                api_key: get("OPENAI_API_KEY"),
                api_base: get("OPENAI_API_BASE")
            },
            knowledge_dir: get("KNOWLEDGE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.knowledge_dir),
            notes_cache_ttl_seconds: parse_var(&get, "NOTES_CACHE_TTL_SECONDS")?
                .unwrap_or(defaults.notes_cache_ttl_seconds),
            dashboard_page_size: parse_var(&get, "DASHBOARD_PAGE_SIZE")?
                .unwrap_or(defaults.dashboard_page_size),
            coach_page_size: parse_var(&get, "COACH_PAGE_SIZE")?
                .unwrap_or(defaults.coach_page_size),
            models: ModelConfig {
                chat: get("CHAT_MODEL").unwrap_or(models.chat),
                coach: get("COACH_MODEL").unwrap_or(models.coach),
                research: get("RESEARCH_MODEL").unwrap_or(models.research),
                summary: get("SUMMARY_MODEL").unwrap_or(models.summary)
            }
        })
    }

    pub fn notes_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.notes_cache_ttl_seconds)
    }
}

fn parse_var<T, G>(get: &G, key: &str) -> InsightsResult<Option<T>>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>
{
    get(key)
        .map(|raw| {
            raw.trim().parse::<T>().map_err(|_| {
                InsightsError::Configuration(format!("{key} must be a number, got '{raw}'"))
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_variables() {
        let config = AppConfig::from_vars(vars(&[])).unwrap();
        assert_eq!(config.attio.api_base, DEFAULT_ATTIO_API_BASE);
        assert!(config.attio.access_token.is_none());
        assert!(config.openai.api_key.is_none());
        assert_eq!(config.notes_cache_ttl(), Duration::from_secs(300));
        assert_eq!(config.dashboard_page_size, 50);
        assert_eq!(config.coach_page_size, 20);
        assert_eq!(config.models.coach, "o3");
    }

    #[test]
    fn test_reads_tokens_and_overrides() {
        let config = AppConfig::from_vars(vars(&[
            ("ATTIO_ACCESS_TOKEN", "attio-token"),
            ("OPENAI_API_KEY", "sk-test"),
            ("ATTIO_API_BASE", "http://localhost:9000"),
            ("KNOWLEDGE_DIR", "/tmp/kb"),
            ("REQUEST_TIMEOUT_SECONDS", "5"),
            ("CHAT_MODEL", "gpt-4o")
        ]))
        .unwrap();

        assert_eq!(config.attio.access_token.as_deref(), Some("attio-token"));
        assert_eq!(config.openai.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.attio.api_base, "http://localhost:9000");
        assert_eq!(config.knowledge_dir, PathBuf::from("/tmp/kb"));
        assert_eq!(config.attio.timeout(), Duration::from_secs(5));
        assert_eq!(config.models.chat, "gpt-4o");
    }

    #[test]
    fn test_blank_token_counts_as_missing() {
        let config = AppConfig::from_vars(vars(&[("OPENAI_API_KEY", "  ")])).unwrap();
        assert!(config.openai.api_key.is_none());
    }

    #[test]
    fn test_invalid_number_is_configuration_error() {
        let err = AppConfig::from_vars(vars(&[("DASHBOARD_PAGE_SIZE", "lots")])).unwrap_err();
        assert!(err.is_configuration());
    }
}
