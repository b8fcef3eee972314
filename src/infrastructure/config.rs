//! Application configuration
//!
//! Built-in defaults, then an optional `deckforge.toml`, then
//! `DECKFORGE_`-prefixed environment variables (`DECKFORGE_SERVER__PORT=9000`).

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use config::{Config, ConfigBuilder, Environment, File};
use serde::Deserialize;

const CONFIG_FILE: &str = "deckforge";
const ENV_PREFIX: &str = "DECKFORGE";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub ai: AiConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Frontend origin allowed by CORS; `*` allows any
    pub cors_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            cors_origin: "http://localhost:5173".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub busy_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://deckforge.db".to_string(),
            max_connections: 5,
            busy_timeout_secs: 30,
        }
    }
}

/// Generative text backend settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub base_url: String,
    pub model: String,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
    pub request_timeout_secs: u64,
    /// Pause after every successful call
    pub pacing_ms: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-2.0-flash".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            temperature: 1.0,
            top_p: 0.95,
            top_k: 40,
            max_output_tokens: 8192,
            request_timeout_secs: 60,
            pacing_ms: 500,
        }
    }
}

impl AiConfig {
    /// Read the API key from the configured environment variable
    pub fn api_key(&self) -> Result<String> {
        let key = env::var(&self.api_key_env)
            .with_context(|| format!("{} environment variable is required", self.api_key_env))?;
        if key.trim().is_empty() {
            anyhow::bail!("{} must not be empty", self.api_key_env);
        }
        Ok(key)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Where rendered card sheets are written
    pub files_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            files_dir: PathBuf::from("./files"),
        }
    }
}

impl AppConfig {
    /// Load configuration from `deckforge.toml` and the environment
    pub fn load() -> Result<Self> {
        Self::from_builder(
            Config::builder()
                .add_source(File::with_name(CONFIG_FILE).required(false))
                .add_source(
                    Environment::with_prefix(ENV_PREFIX)
                        .prefix_separator("_")
                        .separator("__")
                        .try_parsing(true),
                ),
        )
    }

    fn from_builder(builder: ConfigBuilder<config::builder::DefaultState>) -> Result<Self> {
        builder
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_builder(Config::builder()).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.url, "sqlite://deckforge.db");
        assert_eq!(config.ai.model, "gemini-2.0-flash");
        assert_eq!(config.ai.pacing_ms, 500);
        assert_eq!(config.storage.files_dir, PathBuf::from("./files"));
    }

    #[test]
    fn test_file_overrides_only_named_keys() {
        let toml = r#"
            [server]
            port = 9000

            [ai]
            model = "gemini-1.5-pro"
            pacing_ms = 0
        "#;
        let config = AppConfig::from_builder(
            Config::builder().add_source(File::from_str(toml, FileFormat::Toml)),
        )
        .unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.ai.model, "gemini-1.5-pro");
        assert_eq!(config.ai.pacing_ms, 0);
        assert_eq!(config.ai.top_k, 40);
    }

    #[test]
    fn test_missing_api_key_is_an_error() {
        let ai = AiConfig {
            api_key_env: "DECKFORGE_TEST_UNSET_KEY_4471".to_string(),
            ..AiConfig::default()
        };
        let err = ai.api_key().unwrap_err();
        assert!(err.to_string().contains("DECKFORGE_TEST_UNSET_KEY_4471"));
    }
}
