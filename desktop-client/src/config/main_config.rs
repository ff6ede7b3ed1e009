use super::{ConfigManager, ServerConfig, TimingsConfig};
use serde::{Deserialize, Serialize};
use stablephone_common::config::Validate;

pub const CONFIG_FILE: &str = "stablephone_client_config.yaml";

pub fn get_config_manager(path: Option<&str>) -> super::ClientConfigManager {
    ConfigManager::from_yaml_file(path.unwrap_or(CONFIG_FILE))
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub timings: TimingsConfig,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        self.server.validate()?;
        self.timings.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stablephone_common::config::{
        ConfigContentProvider, ConfigSerializer, FileContentConfigProvider, YamlConfigSerializer,
    };
    use stablephone_common::id_generator::suggest_player_name;

    fn get_temp_file_path() -> String {
        use std::env;
        let mut path = env::temp_dir();
        let random_number: u32 = rand::random();
        let file_name = format!("temp_stablephone_client_config_{}.yaml", random_number);
        path.push(file_name);
        path.to_str().unwrap().to_string()
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_default_config_can_be_serialized_and_deserialized_file() {
        let default_config = Config::default();
        let serializer = YamlConfigSerializer::new();
        let content_provider = FileContentConfigProvider::new(get_temp_file_path());

        let serialized_string = serializer.serialize(&default_config).unwrap();
        assert!(content_provider.set_config_content(&serialized_string).is_ok());

        let read_string = content_provider.get_config_content().unwrap().unwrap();
        let deserialized_config: Config = serializer.deserialize(&read_string).unwrap();
        assert_eq!(default_config, deserialized_config);
    }

    #[test]
    fn test_config_can_be_saved_and_loaded_by_manager() {
        let config = Config {
            last_name: Some(suggest_player_name()),
            ..Config::default()
        };
        let content_provider = FileContentConfigProvider::new(get_temp_file_path());
        let manager = ConfigManager::new(content_provider, YamlConfigSerializer::new());

        assert!(manager.set_config(&config).is_ok());
        assert_eq!(config, manager.get_config().unwrap());
        assert_eq!(config, manager.get_config().unwrap());
    }

    #[test]
    fn test_update_config_persists_last_name() {
        let file_path = get_temp_file_path();
        let manager: ConfigManager<_, Config, _> =
            ConfigManager::new(FileContentConfigProvider::new(file_path.clone()), YamlConfigSerializer::new());

        let updated = manager
            .update_config(|config| config.last_name = Some("Ann".to_string()))
            .unwrap();
        assert_eq!(updated.last_name.as_deref(), Some("Ann"));

        let reloaded: ConfigManager<_, Config, _> =
            ConfigManager::new(FileContentConfigProvider::new(file_path), YamlConfigSerializer::new());
        assert_eq!(reloaded.get_config().unwrap().last_name.as_deref(), Some("Ann"));
    }

    #[test]
    fn test_config_file_does_not_exist_returns_default_config() {
        let content_provider = FileContentConfigProvider::new("this_file_does_not_exist.yaml");
        let manager: ConfigManager<_, Config, _> =
            ConfigManager::new(content_provider, YamlConfigSerializer::new());
        assert_eq!(Config::default(), manager.get_config().unwrap());
    }

    #[test]
    fn test_missing_timings_fall_back_to_defaults() {
        let serializer = YamlConfigSerializer::new();
        let config: Config = serializer.deserialize("server:\n  url: wss://example.org/ws\n").unwrap();
        assert_eq!(config.timings, TimingsConfig::default());
        assert_eq!(config.last_name, None);
    }

    #[test]
    fn test_config_with_only_last_name_uses_default_server() {
        let serializer = YamlConfigSerializer::new();
        let config: Config = serializer.deserialize("last_name: Ann\n").unwrap();
        assert_eq!(config.server, ServerConfig::default());
        assert_eq!(config.last_name.as_deref(), Some("Ann"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_config_cant_be_read() {
        let invalid_config_content = r#"
            server:
              url: http://localhost:8000/ws
            timings:
              image_fade_ms: 250
              ready_flash_ms: 1200
        "#;

        let content_provider = FileContentConfigProvider::new(get_temp_file_path());
        content_provider.set_config_content(invalid_config_content).unwrap();

        let manager: ConfigManager<_, Config, _> =
            ConfigManager::new(content_provider, YamlConfigSerializer::new());
        assert!(manager.get_config().is_err());
    }

    #[test]
    fn test_out_of_range_timings_are_rejected() {
        let config = Config {
            timings: TimingsConfig { image_fade_ms: 10, ready_flash_ms: 1200 },
            ..Config::default()
        };
        let error = config.validate().unwrap_err();
        assert!(error.contains("image_fade_ms"));
    }
}
