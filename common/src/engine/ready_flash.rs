use std::collections::HashMap;
use std::time::Duration;

use super::effects::{Effect, TimerKey, TimerToken};
use crate::identifiers::PlayerName;
use crate::protocol::PlayerStatus;

/// One-shot "just became ready" cue per player.
///
/// A player lights up when a snapshot shows them ready after the previous
/// snapshot showed them not ready. Going back to not ready never lights
/// anything, and the cue goes out on its own once its timer fires.
#[derive(Debug)]
pub struct ReadyFlash {
    duration: Duration,
    previous: HashMap<PlayerName, bool>,
    lit: HashMap<PlayerName, TimerToken>,
    next_token: TimerToken,
}

impl ReadyFlash {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            previous: HashMap::new(),
            lit: HashMap::new(),
            next_token: 0,
        }
    }

    pub fn observe(&mut self, players: &[PlayerStatus]) -> Vec<Effect> {
        let mut effects = Vec::new();

        for player in players {
            let was_waiting = self.previous.get(&player.name) == Some(&false);
            if !(was_waiting && player.ready) {
                continue;
            }

            let key = TimerKey::ReadyFlash(player.name.clone());
            if self.lit.contains_key(&player.name) {
                effects.push(Effect::CancelTimer { key: key.clone() });
            }
            self.next_token += 1;
            self.lit.insert(player.name.clone(), self.next_token);
            effects.push(Effect::ScheduleTimer {
                key,
                token: self.next_token,
                delay: self.duration,
            });
        }

        self.previous = players
            .iter()
            .map(|player| (player.name.clone(), player.ready))
            .collect();
        effects
    }

    /// Returns false for a stale token, i.e. one superseded by a later flip.
    pub fn on_timer(&mut self, player: &PlayerName, token: TimerToken) -> bool {
        if self.lit.get(player) != Some(&token) {
            return false;
        }
        self.lit.remove(player);
        true
    }

    pub fn is_flashing(&self, player: &str) -> bool {
        self.lit.contains_key(player)
    }

    pub fn dispose(&mut self) -> Vec<Effect> {
        self.lit
            .drain()
            .map(|(player, _)| Effect::CancelTimer {
                key: TimerKey::ReadyFlash(player),
            })
            .collect()
    }
}
