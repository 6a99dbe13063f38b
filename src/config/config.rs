use crate::config::{BridgeConfig, Cli, ConfigError, LoggingConfig};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    pub bridge: BridgeConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub network: NetworkConfig,
    pub backends: BackendsConfig,
}

impl Config {
    /// Loads and validates a TOML configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the configuration from the path given as the first command
    /// line argument, defaulting to `concord.toml`.
    pub fn from_args() -> Self {
        let cli = Cli::new(
            std::env::args()
                .nth(1)
                .unwrap_or_else(|| "concord.toml".to_string()),
        );

        match Config::from_file(&cli.config_path) {
            Ok(config) => config,
            Err(err) => panic!("failed to load config '{}': {}", cli.config_path, err),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bridge.validate()?;
        self.backends.validate()?;
        Ok(())
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct NetworkConfig {
    #[serde(default)]
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_bind_port")]
    pub bind_port: u16,
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_bind_port() -> u16 {
    8000
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            bind_port: default_bind_port(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct BackendsConfig {
    pub registry: RegistryBackendConfig,
    pub clinical: ClinicalBackendConfig,
}

impl BackendsConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, base_url) in [
            ("registry", &self.registry.base_url),
            ("clinical", &self.clinical.base_url),
        ] {
            if base_url.trim().is_empty() {
                return Err(ConfigError::InvalidBackend {
                    name: name.to_string(),
                    reason: "base_url must not be empty".to_string(),
                });
            }
            url::Url::parse(base_url).map_err(|err| ConfigError::InvalidBackend {
                name: name.to_string(),
                reason: format!("invalid base_url: {err}"),
            })?;
        }
        Ok(())
    }
}

/// Registry REST API connection. Registry deployments commonly terminate
/// TLS with a self-signed certificate, hence the `verify_tls` switch.
#[derive(Debug, Deserialize, Clone)]
pub struct RegistryBackendConfig {
    #[serde(default)]
    pub base_url: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_verify_tls")]
    pub verify_tls: bool,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for RegistryBackendConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            username: String::new(),
            password: String::new(),
            verify_tls: default_verify_tls(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ClinicalBackendConfig {
    #[serde(default)]
    pub base_url: String,
    #[serde(default = "default_verify_tls")]
    pub verify_tls: bool,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for ClinicalBackendConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            verify_tls: default_verify_tls(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

fn default_verify_tls() -> bool {
    true
}

fn default_timeout_seconds() -> u64 {
    30
}
