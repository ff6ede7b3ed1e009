use crate::defaults::FIRST_ROUND;
use crate::identifiers::PlayerName;

/// Text the local player is typing. Never sent until an explicit submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Drafts {
    pub name: String,
    pub prompt: String,
    pub description: String,
}

/// Local-only state whose lifetime follows the phase cycle rather than the
/// snapshot. `Default` is the state after every return to the lobby.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EphemeralUiState {
    pub drafts: Drafts,
    pub joined: bool,
    pub restart_confirmation_pending: bool,
    pub expanded_image: Option<String>,
    pub expanded_image_prompt: Option<String>,
    pub assigned_chain: Option<PlayerName>,
    pub current_image: Option<String>,
}

impl EphemeralUiState {
    pub fn reset_to_defaults(&mut self) {
        *self = Self::default();
    }

    /// Drops unsent round input. The entered name is kept.
    pub fn clear_drafts(&mut self) {
        self.drafts.prompt.clear();
        self.drafts.description.clear();
    }

    /// The identity used for resolving assignments and for outgoing intents.
    pub fn local_name(&self) -> Option<&str> {
        let name = self.drafts.name.trim();
        if name.is_empty() { None } else { Some(name) }
    }

    pub fn close_expanded(&mut self) {
        self.expanded_image = None;
        self.expanded_image_prompt = None;
    }
}

/// Remembers the round and assignment the drafts were typed against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftWatch {
    round: u32,
    chain_owner: Option<PlayerName>,
}

impl Default for DraftWatch {
    fn default() -> Self {
        Self {
            round: FIRST_ROUND,
            chain_owner: None,
        }
    }
}

impl DraftWatch {
    /// Returns true when either value moved since the last call.
    pub fn observe(&mut self, round: u32, chain_owner: Option<&PlayerName>) -> bool {
        let changed = self.round != round || self.chain_owner.as_ref() != chain_owner;
        self.round = round;
        self.chain_owner = chain_owner.cloned();
        changed
    }

    pub fn rebase(&mut self) {
        *self = Self::default();
    }
}
