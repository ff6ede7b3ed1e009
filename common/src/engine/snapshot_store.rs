use std::sync::Arc;

use crate::protocol::GameStateSnapshot;

/// Holds the one authoritative snapshot. Every ingest swaps the whole value,
/// so anyone holding an `Arc` from `current()` keeps a consistent view.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    current: Arc<GameStateSnapshot>,
    received: u64,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ingest(&mut self, snapshot: GameStateSnapshot) -> Arc<GameStateSnapshot> {
        self.current = Arc::new(snapshot);
        self.received += 1;
        Arc::clone(&self.current)
    }

    pub fn current(&self) -> Arc<GameStateSnapshot> {
        Arc::clone(&self.current)
    }

    pub fn get(&self) -> &GameStateSnapshot {
        &self.current
    }

    pub fn received(&self) -> u64 {
        self.received
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{ChainStep, Phase, PlayerStatus};
    use std::collections::BTreeMap;

    #[test]
    fn test_current_before_first_message_is_empty_lobby() {
        let store = SnapshotStore::new();
        let current = store.current();
        assert_eq!(current.phase, Phase::Lobby);
        assert_eq!(current.round_number, 1);
        assert!(current.players.is_empty());
        assert_eq!(store.received(), 0);
    }

    #[test]
    fn test_ingest_replaces_without_merging() {
        let mut store = SnapshotStore::new();
        let mut chains = BTreeMap::new();
        chains.insert(
            "Ann".into(),
            vec![ChainStep { player: "Ann".into(), prompt: "a cat".to_string(), image: None }],
        );
        store.ingest(GameStateSnapshot {
            players: vec![PlayerStatus { name: "Ann".into(), ready: true }],
            phase: Phase::Game,
            chains: Some(chains),
            ..GameStateSnapshot::default()
        });

        store.ingest(GameStateSnapshot { phase: Phase::Game, ..GameStateSnapshot::default() });

        assert!(store.get().players.is_empty());
        assert_eq!(store.get().chains, None);
        assert_eq!(store.received(), 2);
    }

    #[test]
    fn test_readers_keep_their_snapshot_across_ingest() {
        let mut store = SnapshotStore::new();
        let first = store.ingest(GameStateSnapshot { round_number: 2, ..GameStateSnapshot::default() });
        store.ingest(GameStateSnapshot { round_number: 3, ..GameStateSnapshot::default() });

        assert_eq!(first.round_number, 2);
        assert_eq!(store.current().round_number, 3);
    }
}
