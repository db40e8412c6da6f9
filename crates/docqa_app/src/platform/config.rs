//! Application configuration, loaded from environment variables at startup.
//!
//! A `.env` file in the working directory is honoured outside of tests.

use std::path::{Path, PathBuf};

use docqa_core::DEFAULT_MEDIA_BASE;
use docqa_engine::{GatewaySettings, DEFAULT_API_BASE};
use url::Url;

use super::logging::LogSettings;

pub const ENV_API_BASE: &str = "DOCQA_API_BASE";
pub const ENV_MEDIA_BASE: &str = "DOCQA_MEDIA_BASE";
pub const ENV_CREDENTIALS: &str = "DOCQA_CREDENTIALS";
pub const ENV_LOG: &str = "DOCQA_LOG";
pub const ENV_START: &str = "DOCQA_START";

const DEFAULT_CREDENTIALS_PATH: &str = "./.docqa_credentials.ron";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base: Url,
    pub media_base: Url,
    pub credentials_path: PathBuf,
    pub log: LogSettings,
    /// Path navigated to on startup.
    pub start_path: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup; unset keys take defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_base = parse_url(ENV_API_BASE, lookup(ENV_API_BASE), DEFAULT_API_BASE)?;
        let media_base = parse_url(ENV_MEDIA_BASE, lookup(ENV_MEDIA_BASE), DEFAULT_MEDIA_BASE)?;

        let credentials_path = lookup(ENV_CREDENTIALS)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CREDENTIALS_PATH));

        let log = match lookup(ENV_LOG) {
            Some(raw) => raw
                .parse::<LogSettings>()
                .map_err(|err| ConfigError::InvalidValue(ENV_LOG.to_string(), err))?,
            None => LogSettings::default(),
        };

        let start_path = lookup(ENV_START).unwrap_or_else(|| "/".to_string());

        Ok(Self {
            api_base,
            media_base,
            credentials_path,
            log,
            start_path,
        })
    }

    /// The log file sits next to the credential file.
    pub fn log_dir(&self) -> &Path {
        match self.credentials_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    pub fn gateway_settings(&self) -> GatewaySettings {
        GatewaySettings::new(self.api_base.clone())
    }
}

fn parse_url(key: &str, raw: Option<String>, default: &str) -> Result<Url, ConfigError> {
    let raw = raw.unwrap_or_else(|| default.to_string());
    Url::parse(&raw).map_err(|err| ConfigError::InvalidValue(key.to_string(), err.to_string()))
}
