//! Configuration management

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

use crate::core::errors::{Result, TranslationError};

/// Environment prefix for the translator credentials (`TRANSLATOR_TEXT_ENDPOINT`, ...)
pub const CREDENTIALS_ENV_PREFIX: &str = "TRANSLATOR_TEXT";

/// Environment prefix for proxy tuning (`DOCUMENT_PROXY_DOWNLOAD_TIMEOUT_MS`, ...)
pub const PROXY_ENV_PREFIX: &str = "DOCUMENT_PROXY";

pub const DEFAULT_DOWNLOAD_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_TRANSLATE_TIMEOUT_MS: u64 = 120_000;

/// Credentials for the translation service, fixed for the lifetime of the process
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceCredentials {
    pub subscription_key: String,
    pub endpoint: String,
    pub region: String,
}

impl ServiceCredentials {
    pub fn new(
        subscription_key: impl Into<String>,
        endpoint: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            subscription_key: subscription_key.into(),
            endpoint: endpoint.into(),
            region: region.into(),
        }
    }
}

impl fmt::Debug for ServiceCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceCredentials")
            .field("subscription_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("region", &self.region)
            .finish()
    }
}

/// Process configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub subscription_key: String,
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub region: String,
    pub download_timeout_ms: u64,
    pub translate_timeout_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            subscription_key: String::new(),
            endpoint: String::new(),
            region: String::new(),
            download_timeout_ms: DEFAULT_DOWNLOAD_TIMEOUT_MS,
            translate_timeout_ms: DEFAULT_TRANSLATE_TIMEOUT_MS,
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, an optional file and the environment
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("download_timeout_ms", DEFAULT_DOWNLOAD_TIMEOUT_MS)?
            .set_default("translate_timeout_ms", DEFAULT_TRANSLATE_TIMEOUT_MS)?;

        if let Some(path) = config_file {
            info!("Loading configuration from {}", path.display());
            builder = builder.add_source(File::from(path));
        }

        let settings = builder
            .add_source(Environment::with_prefix(CREDENTIALS_ENV_PREFIX))
            .add_source(Environment::with_prefix(PROXY_ENV_PREFIX).try_parsing(true))
            .build()?;

        Self::from_settings(settings)
    }

    /// Deserialize an already assembled [`Config`]
    pub fn from_settings(settings: Config) -> Result<Self> {
        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    ///
    /// Missing credentials are only reported; the translation service rejects them itself.
    pub fn validate(&self) -> Result<()> {
        if self.subscription_key.is_empty() {
            warn!("{}_SUBSCRIPTION_KEY is not set", CREDENTIALS_ENV_PREFIX);
        }

        if self.endpoint.is_empty() {
            warn!("{}_ENDPOINT is not set", CREDENTIALS_ENV_PREFIX);
        }

        if self.region.is_empty() {
            warn!("{}_REGION is not set", CREDENTIALS_ENV_PREFIX);
        }

        if self.download_timeout_ms == 0 {
            return Err(TranslationError::ConfigError {
                message: "download_timeout_ms must be greater than 0".to_string(),
            });
        }

        if self.translate_timeout_ms == 0 {
            return Err(TranslationError::ConfigError {
                message: "translate_timeout_ms must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    pub fn credentials(&self) -> ServiceCredentials {
        ServiceCredentials::new(&self.subscription_key, &self.endpoint, &self.region)
    }

    pub fn download_timeout(&self) -> Duration {
        Duration::from_millis(self.download_timeout_ms)
    }

    pub fn translate_timeout(&self) -> Duration {
        Duration::from_millis(self.translate_timeout_ms)
    }
}
