use config::{Config, ConfigError, File, FileFormat};
use serde::Deserialize;

use super::Environment;

const MEBIBYTE: u64 = 1024 * 1024;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub logging: LoggingSettings,
    pub intake: IntakeSettings,
    pub engine: EngineSettings,
    pub templates: TemplateSettings,
}

impl Settings {
    /// Layers `appsettings.{environment}.toml` (optional) under `APP_`-prefixed
    /// environment variables, e.g. `APP_ENGINE__PROVIDER=http`.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::new(&environment.settings_file(), FileFormat::Toml).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
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
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info,digitize=debug,tower_http=debug".to_string(),
            json: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IntakeSettings {
    pub max_file_size_mb: u64,
}

impl IntakeSettings {
    pub fn max_size_bytes(&self) -> u64 {
        self.max_file_size_mb * MEBIBYTE
    }
}

impl Default for IntakeSettings {
    fn default() -> Self {
        Self {
            max_file_size_mb: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineProvider {
    #[default]
    Mock,
    Http,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub provider: EngineProvider,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
    pub mock_delay_ms: u64,
    pub queue_capacity: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            provider: EngineProvider::Mock,
            base_url: None,
            api_key: None,
            timeout_secs: 30,
            mock_delay_ms: 3000,
            queue_capacity: 32,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TemplateSettings {
    pub seed_examples: bool,
}

impl Default for TemplateSettings {
    fn default() -> Self {
        Self {
            seed_examples: true,
        }
    }
}
