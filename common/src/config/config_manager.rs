use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

use super::{
    ConfigContentProvider, ConfigSerializer, FileContentConfigProvider, Validate,
    YamlConfigSerializer,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config from {location}: {source}")]
    Read {
        location: String,
        source: std::io::Error,
    },
    #[error("failed to write config to {location}: {source}")]
    Write {
        location: String,
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Deserialize(String),
    #[error("failed to serialize config: {0}")]
    Serialize(String),
    #[error("config validation error: {0}")]
    Invalid(String),
}

/// Loads a config lazily, caches it, and writes changes back through the
/// content provider. A missing config file yields `TConfig::default()`.
pub struct ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer = YamlConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    config_serializer: TConfigSerializer,
    config_content_provider: TConfigContentProvider,
    config: Arc<Mutex<Option<TConfig>>>,
}

impl<TConfig> ConfigManager<FileContentConfigProvider, TConfig, YamlConfigSerializer>
where
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
{
    pub fn from_yaml_file(file_path: &str) -> Self {
        Self::new(FileContentConfigProvider::new(file_path), YamlConfigSerializer::new())
    }
}

impl<TConfigContentProvider, TConfig, TConfigSerializer>
    ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    pub fn new(config_content_provider: TConfigContentProvider, config_serializer: TConfigSerializer) -> Self {
        Self {
            config: Arc::new(Mutex::new(None)),
            config_content_provider,
            config_serializer,
        }
    }

    fn cache(&self) -> MutexGuard<'_, Option<TConfig>> {
        self.config.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn get_config(&self) -> Result<TConfig, ConfigError> {
        let mut current = self.cache();

        if let Some(config) = current.as_ref() {
            return Ok(config.clone());
        }

        let content = self
            .config_content_provider
            .get_config_content()
            .map_err(|source| ConfigError::Read {
                location: self.config_content_provider.describe(),
                source,
            })?;

        let Some(content) = content else {
            return Ok(TConfig::default());
        };

        let config = self
            .config_serializer
            .deserialize(&content)
            .map_err(ConfigError::Deserialize)?;
        config.validate().map_err(ConfigError::Invalid)?;

        *current = Some(config.clone());
        Ok(config)
    }

    pub fn set_config(&self, config: &TConfig) -> Result<(), ConfigError> {
        config.validate().map_err(ConfigError::Invalid)?;

        let serialized = self
            .config_serializer
            .serialize(config)
            .map_err(ConfigError::Serialize)?;

        self.config_content_provider
            .set_config_content(&serialized)
            .map_err(|source| ConfigError::Write {
                location: self.config_content_provider.describe(),
                source,
            })?;

        *self.cache() = Some(config.clone());
        Ok(())
    }

    /// Applies `change` to the current config and persists the result.
    pub fn update_config(&self, change: impl FnOnce(&mut TConfig)) -> Result<TConfig, ConfigError> {
        let mut config = self.get_config()?;
        change(&mut config);
        self.set_config(&config)?;
        Ok(config)
    }
}

impl<TConfigContentProvider, TConfig, TConfigSerializer> Clone
    for ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider + Clone,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig> + Clone,
{
    fn clone(&self) -> Self {
        Self {
            config_serializer: self.config_serializer.clone(),
            config_content_provider: self.config_content_provider.clone(),
            config: Arc::clone(&self.config),
        }
    }
}
