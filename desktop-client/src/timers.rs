use stablephone_common::engine::{EngineEvent, TimerKey, TimerToken};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;

/// Executes the engine's timer effects on the tokio runtime. At most one
/// task is alive per key; scheduling again replaces the previous task.
/// Dropping the runtime aborts everything still pending.
pub struct TimerRuntime {
    handle: Handle,
    events: mpsc::UnboundedSender<EngineEvent>,
    wake: Arc<dyn Fn() + Send + Sync>,
    pending: HashMap<TimerKey, AbortHandle>,
}

impl TimerRuntime {
    pub fn new(
        handle: Handle,
        events: mpsc::UnboundedSender<EngineEvent>,
        wake: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        Self {
            handle,
            events,
            wake: Arc::new(wake),
            pending: HashMap::new(),
        }
    }

    pub fn schedule(&mut self, key: TimerKey, token: TimerToken, delay: Duration) {
        self.cancel(&key);

        let events = self.events.clone();
        let wake = Arc::clone(&self.wake);
        let task_key = key.clone();
        let task = self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            if events.send(EngineEvent::TimerFired { key: task_key, token }).is_ok() {
                wake();
            }
        });
        self.pending.insert(key, task.abort_handle());
    }

    pub fn cancel(&mut self, key: &TimerKey) {
        if let Some(task) = self.pending.remove(key) {
            task.abort();
        }
    }

    pub fn cancel_all(&mut self) {
        for (_, task) in self.pending.drain() {
            task.abort();
        }
    }

    #[cfg(test)]
    fn pending(&mut self) -> usize {
        self.pending.retain(|_, task| !task.is_finished());
        self.pending.len()
    }
}

impl Drop for TimerRuntime {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn runtime() -> (TimerRuntime, mpsc::UnboundedReceiver<EngineEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (TimerRuntime::new(Handle::current(), tx, || {}), rx)
    }

    async fn advance(ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
        tokio::task::yield_now().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_fires_after_delay() {
        let (mut timers, mut rx) = runtime();
        timers.schedule(TimerKey::ImageSwap, 1, Duration::from_millis(250));

        advance(200).await;
        assert!(rx.try_recv().is_err());

        advance(100).await;
        assert_eq!(
            rx.try_recv().unwrap(),
            EngineEvent::TimerFired { key: TimerKey::ImageSwap, token: 1 }
        );
        assert_eq!(timers.pending(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_timer_never_fires() {
        let (mut timers, mut rx) = runtime();
        timers.schedule(TimerKey::ReadyFlash("Ann".into()), 1, Duration::from_millis(100));
        timers.cancel(&TimerKey::ReadyFlash("Ann".into()));

        advance(500).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rescheduling_replaces_pending_task() {
        let (mut timers, mut rx) = runtime();
        timers.schedule(TimerKey::ImageSwap, 1, Duration::from_millis(250));
        advance(100).await;
        timers.schedule(TimerKey::ImageSwap, 2, Duration::from_millis(250));
        assert_eq!(timers.pending(), 1);

        advance(500).await;
        assert_eq!(
            rx.try_recv().unwrap(),
            EngineEvent::TimerFired { key: TimerKey::ImageSwap, token: 2 }
        );
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_keys_are_independent() {
        let (mut timers, mut rx) = runtime();
        timers.schedule(TimerKey::ReadyFlash("Ann".into()), 1, Duration::from_millis(100));
        timers.schedule(TimerKey::ReadyFlash("Bob".into()), 2, Duration::from_millis(100));

        advance(200).await;
        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_aborts_pending_timers() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let wakes = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&wakes);
        let mut timers = TimerRuntime::new(Handle::current(), tx, move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        timers.schedule(TimerKey::ImageSwap, 1, Duration::from_millis(100));
        drop(timers);

        advance(500).await;
        assert!(rx.try_recv().is_err());
        assert_eq!(wakes.load(Ordering::SeqCst), 0);
    }
}
