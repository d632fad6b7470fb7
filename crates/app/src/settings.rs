//! Handles settings for the application. Configuration is read from
//! `settings.toml` (optional) and `MAPA__*` environment variables, the latter
//! taking precedence.
//!
//! See `settings.example.toml` for the available keys.
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct App {
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

impl Default for Database {
    fn default() -> Self {
        Self::Sqlite("mapa.db".to_string())
    }
}

/// Header data that rarely changes between reports.
#[derive(Debug, Default, Deserialize)]
pub struct Report {
    pub conference_code: Option<String>,
    pub particular_council: Option<String>,
    pub central_council: Option<String>,
    pub metropolitan_council: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub app: App,
    #[serde(default)]
    pub database: Database,
    #[serde(default)]
    pub report: Report,
}

impl Settings {
    pub fn new(path: &str) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix("MAPA").separator("__"))
            .build()?;

        settings.try_deserialize()
    }
}
