use serde::{Deserialize, Serialize};
use stablephone_common::config::Validate;
use stablephone_common::defaults::DEFAULT_SERVER_URL;

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    pub url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SERVER_URL.to_string(),
        }
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.url.trim().is_empty() {
            return Err("server url must not be empty".to_string());
        }
        if !self.url.starts_with("ws://") && !self.url.starts_with("wss://") {
            return Err(format!("server url must start with ws:// or wss://, got {}", self.url));
        }
        Ok(())
    }
}
