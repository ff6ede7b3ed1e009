use std::time::Duration;

use super::effects::{Effect, TimerKey, TimerToken};

/// Debounces changes of the image the player is looking at.
///
/// When the target differs from what is displayed, the old image stays up
/// (marked as transitioning) for `fade` and is then swapped for the newest
/// target. Retargeting while a fade is pending cancels the pending timer and
/// starts a fresh one, so only the last target of a burst is ever shown.
#[derive(Debug)]
pub struct TransitionScheduler {
    fade: Duration,
    displayed: Option<String>,
    pending: Option<Option<String>>,
    generation: TimerToken,
    swaps: u64,
}

impl TransitionScheduler {
    pub fn new(fade: Duration) -> Self {
        Self {
            fade,
            displayed: None,
            pending: None,
            generation: 0,
            swaps: 0,
        }
    }

    pub fn displayed(&self) -> Option<&str> {
        self.displayed.as_deref()
    }

    pub fn is_transitioning(&self) -> bool {
        self.pending.is_some()
    }

    /// Number of swaps that actually reached the screen.
    pub fn swaps(&self) -> u64 {
        self.swaps
    }

    pub fn retarget(&mut self, target: Option<&str>) -> Vec<Effect> {
        match &self.pending {
            Some(pending) if pending.as_deref() == target => return Vec::new(),
            None if self.displayed.as_deref() == target => return Vec::new(),
            _ => {}
        }

        if self.displayed.as_deref() == target {
            // Bounced back to what is already on screen before the fade ended.
            self.pending = None;
            return vec![Effect::CancelTimer { key: TimerKey::ImageSwap }];
        }

        self.generation += 1;
        self.pending = Some(target.map(str::to_string));
        vec![
            Effect::CancelTimer { key: TimerKey::ImageSwap },
            Effect::ScheduleTimer {
                key: TimerKey::ImageSwap,
                token: self.generation,
                delay: self.fade,
            },
        ]
    }

    /// Completes the fade if `token` belongs to the latest retarget.
    pub fn on_timer(&mut self, token: TimerToken) -> bool {
        if token != self.generation {
            return false;
        }
        let Some(next) = self.pending.take() else {
            return false;
        };
        self.displayed = next;
        self.swaps += 1;
        true
    }

    /// Tears the transition down with its view: no timer survives, nothing
    /// stays displayed.
    pub fn dispose(&mut self) -> Vec<Effect> {
        self.displayed = None;
        if self.pending.take().is_some() {
            vec![Effect::CancelTimer { key: TimerKey::ImageSwap }]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FADE: Duration = Duration::from_millis(250);

    fn last_token(effects: &[Effect]) -> TimerToken {
        effects
            .iter()
            .rev()
            .find_map(|effect| match effect {
                Effect::ScheduleTimer { token, .. } => Some(*token),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn test_change_keeps_old_image_until_timer() {
        let mut scheduler = TransitionScheduler::new(FADE);
        let token = last_token(&scheduler.retarget(Some("i1")));
        scheduler.on_timer(token);

        let effects = scheduler.retarget(Some("i2"));
        assert_eq!(
            effects,
            vec![
                Effect::CancelTimer { key: TimerKey::ImageSwap },
                Effect::ScheduleTimer { key: TimerKey::ImageSwap, token: 2, delay: FADE },
            ]
        );
        assert!(scheduler.is_transitioning());
        assert_eq!(scheduler.displayed(), Some("i1"));

        assert!(scheduler.on_timer(2));
        assert!(!scheduler.is_transitioning());
        assert_eq!(scheduler.displayed(), Some("i2"));
    }

    #[test]
    fn test_burst_settles_into_one_swap() {
        let mut scheduler = TransitionScheduler::new(FADE);
        let t1 = last_token(&scheduler.retarget(Some("i1")));
        let t2 = last_token(&scheduler.retarget(Some("i2")));
        let t3 = last_token(&scheduler.retarget(Some("i3")));

        assert!(!scheduler.on_timer(t1));
        assert!(!scheduler.on_timer(t2));
        assert_eq!(scheduler.displayed(), None);
        assert!(scheduler.on_timer(t3));

        assert_eq!(scheduler.displayed(), Some("i3"));
        assert_eq!(scheduler.swaps(), 1);
    }

    #[test]
    fn test_same_target_is_a_no_op() {
        let mut scheduler = TransitionScheduler::new(FADE);
        let token = last_token(&scheduler.retarget(Some("i1")));
        assert!(scheduler.retarget(Some("i1")).is_empty());
        scheduler.on_timer(token);
        assert!(scheduler.retarget(Some("i1")).is_empty());
        assert!(scheduler.retarget(None).len() == 2);
    }

    #[test]
    fn test_bounce_back_cancels_without_swap() {
        let mut scheduler = TransitionScheduler::new(FADE);
        let token = last_token(&scheduler.retarget(Some("i1")));
        scheduler.on_timer(token);

        let stale = last_token(&scheduler.retarget(Some("i2")));
        let effects = scheduler.retarget(Some("i1"));

        assert_eq!(effects, vec![Effect::CancelTimer { key: TimerKey::ImageSwap }]);
        assert!(!scheduler.is_transitioning());
        assert!(!scheduler.on_timer(stale));
        assert_eq!(scheduler.displayed(), Some("i1"));
        assert_eq!(scheduler.swaps(), 1);
    }

    #[test]
    fn test_dispose_cancels_pending_fade() {
        let mut scheduler = TransitionScheduler::new(FADE);
        let token = last_token(&scheduler.retarget(Some("i1")));

        assert_eq!(scheduler.dispose(), vec![Effect::CancelTimer { key: TimerKey::ImageSwap }]);
        assert!(!scheduler.on_timer(token));
        assert_eq!(scheduler.displayed(), None);
        assert!(scheduler.dispose().is_empty());
    }
}
