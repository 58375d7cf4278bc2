use config::{Config, File};
use serde::Deserialize;

use super::Environment;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub elevate: ElevateSettings,
    #[serde(default)]
    pub polling: PollingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl Settings {
    /// Layer `appsettings.{environment}.toml` (optional) under `APP__`-prefixed
    /// environment variables (`APP__ELEVATE__API_TOKEN`, ...).
    pub fn load(environment: Environment) -> Result<Self, config::ConfigError> {
        let configuration = Config::builder()
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.as_str())).required(false),
            )
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        configuration.try_deserialize()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ElevateSettings {
    pub base_url: String,
    pub api_token: String,
    pub request_timeout_secs: u64,
}

impl Default for ElevateSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.elevateai.com/v1".to_string(),
            api_token: String::new(),
            request_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PollingSettings {
    pub max_attempts: u32,
    pub interval_secs: u64,
}

impl Default for PollingSettings {
    fn default() -> Self {
        Self {
            max_attempts: 80,
            interval_secs: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            enable_json: false,
        }
    }
}
