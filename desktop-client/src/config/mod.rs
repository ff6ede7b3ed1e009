mod main_config;
mod server_config;
mod timings_config;

pub(crate) use stablephone_common::config::{ConfigManager, FileContentConfigProvider, YamlConfigSerializer};

pub use main_config::{get_config_manager, Config};
pub use server_config::ServerConfig;
pub use timings_config::TimingsConfig;

pub type ClientConfigManager = ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer>;
