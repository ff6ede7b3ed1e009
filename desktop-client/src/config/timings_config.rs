use serde::{Deserialize, Serialize};
use stablephone_common::config::{check_range, Validate};
use stablephone_common::defaults::{IMAGE_FADE_DURATION, READY_FLASH_DURATION};
use stablephone_common::engine::EngineTimings;
use std::time::Duration;

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct TimingsConfig {
    pub image_fade_ms: u64,
    pub ready_flash_ms: u64,
}

impl Default for TimingsConfig {
    fn default() -> Self {
        Self {
            image_fade_ms: IMAGE_FADE_DURATION.as_millis() as u64,
            ready_flash_ms: READY_FLASH_DURATION.as_millis() as u64,
        }
    }
}

impl Validate for TimingsConfig {
    fn validate(&self) -> Result<(), String> {
        check_range("image_fade_ms", self.image_fade_ms, 50..=2000)?;
        check_range("ready_flash_ms", self.ready_flash_ms, 100..=10000)?;
        Ok(())
    }
}

impl From<&TimingsConfig> for EngineTimings {
    fn from(config: &TimingsConfig) -> Self {
        Self {
            image_fade: Duration::from_millis(config.image_fade_ms),
            ready_flash: Duration::from_millis(config.ready_flash_ms),
        }
    }
}
