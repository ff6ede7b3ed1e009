use std::time::Duration;

use crate::identifiers::PlayerName;
use crate::protocol::ClientIntent;

/// Generation counter handed out with every scheduled timer. A fired timer
/// only counts if its token is still the latest one for its key.
pub type TimerToken = u64;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TimerKey {
    ImageSwap,
    ReadyFlash(PlayerName),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Send(ClientIntent),
    ScheduleTimer {
        key: TimerKey,
        token: TimerToken,
        delay: Duration,
    },
    CancelTimer {
        key: TimerKey,
    },
}
