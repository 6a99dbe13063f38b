use crate::config::ConfigError;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct BridgeConfig {
    pub id: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            id: String::new(),
            log_level: default_log_level(),
        }
    }
}

impl BridgeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.id.trim().is_empty() {
            return Err(ConfigError::InvalidBridgeId);
        }
        Ok(())
    }
}
