use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::time::Duration;
use url::Url;

pub const DEFAULT_CATALOG_KEY: &str = "product_data.json";
pub const DEFAULT_SIGNED_URL_TTL: u64 = 3600;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub signing: SigningConfig,
    #[serde(default)]
    pub resolver: ResolverConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub endpoint: String,
    pub bucket: String,
    #[serde(default = "default_catalog_key")]
    pub catalog_key: String,
    /// Seconds.
    pub request_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SigningConfig {
    pub public_base_url: String,
    pub secret_key: String,
    #[serde(default = "default_ttl")]
    pub ttl_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// 0 means no cap on in-flight signing requests.
    pub max_concurrent_requests: usize,
    pub placeholder_image: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub currency_symbol: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub directory: Option<String>,
}

fn default_catalog_key() -> String {
    DEFAULT_CATALOG_KEY.to_string()
}

fn default_ttl() -> u64 {
    DEFAULT_SIGNED_URL_TTL
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_concurrent_requests: 0,
            placeholder_image: "/static/image-unavailable.svg".to_string(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "₹".to_string(),
        }
    }
}

impl StorageConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

impl SigningConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default"))
            // Add environment-specific config
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add local config (ignored by git)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables with prefix "PRICE_CATALOG_"
            .add_source(Environment::with_prefix("PRICE_CATALOG").separator("__"))
            .build()?;

        let config: AppConfig = s.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a single config file, still honouring environment overrides.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(Environment::with_prefix("PRICE_CATALOG").separator("__"))
            .build()?;

        let config: AppConfig = s.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        // Validate server configuration
        if self.server.port == 0 {
            return Err(ConfigError::Message("Server port must be greater than 0".into()));
        }

        // Validate storage configuration
        if Url::parse(&self.storage.endpoint).is_err() {
            return Err(ConfigError::Message("Invalid storage endpoint URL".into()));
        }

        if self.storage.bucket.trim().is_empty() {
            return Err(ConfigError::Message("Storage bucket must not be empty".into()));
        }

        if self.storage.catalog_key.trim().is_empty() {
            return Err(ConfigError::Message("Storage catalog_key must not be empty".into()));
        }

        if self.storage.request_timeout == 0 {
            return Err(ConfigError::Message("Storage request_timeout must be greater than 0".into()));
        }

        // Validate signing configuration
        if Url::parse(&self.signing.public_base_url).is_err() {
            return Err(ConfigError::Message("Invalid signing public_base_url".into()));
        }

        if self.signing.secret_key.len() < 32 {
            return Err(ConfigError::Message("Signing secret_key must be at least 32 characters".into()));
        }

        if self.signing.ttl_seconds == 0 {
            return Err(ConfigError::Message("Signing ttl_seconds must be greater than 0".into()));
        }

        // Validate resolver configuration
        if self.resolver.placeholder_image.trim().is_empty() {
            return Err(ConfigError::Message("Resolver placeholder_image must not be empty".into()));
        }

        Ok(())
    }
}
