use config::{Config, ConfigError, Environment as EnvironmentSource, File};
use serde::Deserialize;

use crate::application::services::DEFAULT_SYSTEM_PROMPT;

use super::Environment;

const DEFAULT_LOG_FILTER: &str = "info,smart_mindmap=debug,tower_http=debug";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub relay: RelaySettings,
    pub extraction: ExtractionSettings,
    pub logging: LoggingSettings,
    pub scaffold: ScaffoldSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RelaySettings {
    pub system_prompt: String,
    pub temperature: f32,
    pub max_tokens: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionSettings {
    pub max_file_size_mb: usize,
}

impl ExtractionSettings {
    pub fn max_file_size_bytes(&self) -> usize {
        self.max_file_size_mb * 1024 * 1024
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

/// Scaffold mode swaps the upstream LLM for a canned outline, so the relay can
/// be exercised without an API key.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScaffoldSettings {
    pub enabled: bool,
    pub mock_response_delay_ms: u64,
}

impl Settings {
    /// Layers `appsettings.{Environment}.toml` (optional) and `APP__`-prefixed
    /// variables over built-in defaults.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        Self::builder()?
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.as_str())).required(false),
            )
            .add_source(
                EnvironmentSource::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("relay.system_prompt", DEFAULT_SYSTEM_PROMPT)?
            .set_default("relay.temperature", 0.3)?
            .set_default("relay.max_tokens", 2000)?
            .set_default("extraction.max_file_size_mb", 10)?
            .set_default("logging.level", DEFAULT_LOG_FILTER)?
            .set_default("logging.enable_json", false)?
            .set_default("scaffold.enabled", false)?
            .set_default("scaffold.mock_response_delay_ms", 0)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            relay: RelaySettings {
                system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
                temperature: 0.3,
                max_tokens: 2000,
            },
            extraction: ExtractionSettings {
                max_file_size_mb: 10,
            },
            logging: LoggingSettings {
                level: DEFAULT_LOG_FILTER.to_string(),
                enable_json: false,
            },
            scaffold: ScaffoldSettings::default(),
        }
    }
}
