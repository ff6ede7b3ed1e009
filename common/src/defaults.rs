use std::time::Duration;

pub const DEFAULT_SERVER_URL: &str = "ws://localhost:8000/ws";

/// How long the outgoing image stays visible before a swap.
pub const IMAGE_FADE_DURATION: Duration = Duration::from_millis(250);

pub const READY_FLASH_DURATION: Duration = Duration::from_millis(1200);

pub const FIRST_ROUND: u32 = 1;

pub const MAX_SCORE: u32 = 1000;
