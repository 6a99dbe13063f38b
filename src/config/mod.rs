mod bridge_config;
mod logging_config;
pub mod config;

pub use bridge_config::BridgeConfig;
pub use logging_config::LoggingConfig;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("bridge id must not be empty")]
    InvalidBridgeId,
    #[error("invalid backend '{name}': {reason}")]
    InvalidBackend { name: String, reason: String },
}

/// Structure representing application startup arguments or metadata.
#[derive(Debug)]
pub struct Cli {
    /// Path to the configuration file.
    pub config_path: String,
}

impl Cli {
    /// Creates a new `Cli` instance with the provided configuration path.
    ///
    /// # Arguments
    /// - `config_path`: The path to the configuration file.
    pub fn new(config_path: String) -> Self {
        Self { config_path }
    }
}
