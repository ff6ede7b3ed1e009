use stablephone_common::engine::IntentSink;
use tokio::sync::mpsc;

use crate::state::SharedState;

/// Hands encoded intents to the websocket task.
#[derive(Clone)]
pub struct CommandSender {
    tx: mpsc::UnboundedSender<String>,
    shared_state: SharedState,
}

impl CommandSender {
    pub fn new(tx: mpsc::UnboundedSender<String>, shared_state: SharedState) -> Self {
        Self { tx, shared_state }
    }
}

impl IntentSink for CommandSender {
    fn is_open(&self) -> bool {
        self.shared_state.is_open() && !self.tx.is_closed()
    }

    fn deliver(&self, payload: String) {
        let _ = self.tx.send(payload);
    }
}
