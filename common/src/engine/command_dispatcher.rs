use thiserror::Error;

use super::ui_state::EphemeralUiState;
use crate::identifiers::PlayerName;
use crate::protocol::{encode_intent, ClientIntent, GameStateSnapshot, Phase};
use crate::{log, warn};

/// Something the local player asked to send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentRequest {
    Join,
    Ready,
    SubmitPrompt,
    SubmitDescription,
    RestartGame,
}

/// Why a request was not turned into an intent. These mirror the inputs the
/// UI disables; they are not errors the player needs to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Refusal {
    #[error("no player name entered")]
    MissingName,
    #[error("already joined")]
    AlreadyJoined,
    #[error("not available during the {0} phase")]
    WrongPhase(&'static str),
    #[error("not available in round {0}")]
    WrongRound(u32),
    #[error("no chain assigned yet")]
    NoAssignedChain,
    #[error("already submitted for this round")]
    AlreadySubmitted,
    #[error("restart was not confirmed")]
    NotConfirmed,
}

/// Builds the wire intent for `request` from the local state and the latest
/// snapshot, or explains why it cannot be sent right now.
pub fn format_intent(
    request: IntentRequest,
    ui: &EphemeralUiState,
    snapshot: &GameStateSnapshot,
) -> Result<ClientIntent, Refusal> {
    if request == IntentRequest::RestartGame {
        require_phase(snapshot, Phase::Gallery)?;
        if !ui.restart_confirmation_pending {
            return Err(Refusal::NotConfirmed);
        }
        return Ok(ClientIntent::RestartGame);
    }

    let name = PlayerName::from(ui.local_name().ok_or(Refusal::MissingName)?);

    match request {
        IntentRequest::Join => {
            if ui.joined {
                return Err(Refusal::AlreadyJoined);
            }
            Ok(ClientIntent::Join { name })
        }
        IntentRequest::Ready => Ok(ClientIntent::Ready { name }),
        IntentRequest::SubmitPrompt => {
            require_phase(snapshot, Phase::Game)?;
            if snapshot.round_number != 1 {
                return Err(Refusal::WrongRound(snapshot.round_number));
            }
            if snapshot.is_ready(name.as_str()) {
                return Err(Refusal::AlreadySubmitted);
            }
            Ok(ClientIntent::SubmitPrompt {
                name,
                prompt: ui.drafts.prompt.clone(),
            })
        }
        IntentRequest::SubmitDescription => {
            require_phase(snapshot, Phase::Game)?;
            if snapshot.round_number <= 1 {
                return Err(Refusal::WrongRound(snapshot.round_number));
            }
            let chain_owner = ui.assigned_chain.clone().ok_or(Refusal::NoAssignedChain)?;
            if snapshot.is_ready(name.as_str()) {
                return Err(Refusal::AlreadySubmitted);
            }
            Ok(ClientIntent::SubmitDescription {
                name,
                description: ui.drafts.description.clone(),
                chain_owner,
            })
        }
        IntentRequest::RestartGame => unreachable!("handled above"),
    }
}

fn require_phase(snapshot: &GameStateSnapshot, phase: Phase) -> Result<(), Refusal> {
    if snapshot.phase == phase {
        Ok(())
    } else {
        Err(Refusal::WrongPhase(snapshot.phase.as_str()))
    }
}

/// Outbound half of the transport.
pub trait IntentSink {
    fn is_open(&self) -> bool;
    fn deliver(&self, payload: String);
}

/// Encodes intents and hands them to the transport. Nothing is queued,
/// retried or acknowledged: a send while the transport is down is dropped,
/// and the only confirmation of a delivered intent is a later snapshot.
pub struct CommandDispatcher<S: IntentSink> {
    sink: S,
}

impl<S: IntentSink> CommandDispatcher<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    pub fn dispatch(&self, intent: &ClientIntent) {
        if !self.sink.is_open() {
            warn!("Dropping {} intent: transport is not open", intent.kind());
            return;
        }

        match encode_intent(intent) {
            Ok(payload) => {
                log!("Sending {} intent", intent.kind());
                self.sink.deliver(payload);
            }
            Err(e) => warn!("{}", e),
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::PlayerStatus;
    use std::cell::{Cell, RefCell};

    #[derive(Default)]
    struct RecordingSink {
        closed: Cell<bool>,
        sent: RefCell<Vec<String>>,
    }

    impl IntentSink for RecordingSink {
        fn is_open(&self) -> bool {
            !self.closed.get()
        }

        fn deliver(&self, payload: String) {
            self.sent.borrow_mut().push(payload);
        }
    }

    fn named(name: &str) -> EphemeralUiState {
        let mut ui = EphemeralUiState::default();
        ui.drafts.name = name.to_string();
        ui
    }

    fn game_round(round: u32, players: &[(&str, bool)]) -> GameStateSnapshot {
        GameStateSnapshot {
            phase: Phase::Game,
            round_number: round,
            players: players
                .iter()
                .map(|(name, ready)| PlayerStatus { name: (*name).into(), ready: *ready })
                .collect(),
            ..GameStateSnapshot::default()
        }
    }

    #[test]
    fn test_join_needs_name_and_only_once() {
        let lobby = GameStateSnapshot::default();
        assert_eq!(
            format_intent(IntentRequest::Join, &named("  "), &lobby),
            Err(Refusal::MissingName)
        );
        assert_eq!(
            format_intent(IntentRequest::Join, &named(" Ann "), &lobby),
            Ok(ClientIntent::Join { name: "Ann".into() })
        );

        let mut joined = named("Ann");
        joined.joined = true;
        assert_eq!(
            format_intent(IntentRequest::Join, &joined, &lobby),
            Err(Refusal::AlreadyJoined)
        );
    }

    #[test]
    fn test_prompt_only_in_first_round_until_ready() {
        let mut ui = named("Ann");
        ui.drafts.prompt = "a cat in a hat".to_string();

        assert_eq!(
            format_intent(IntentRequest::SubmitPrompt, &ui, &game_round(1, &[("Ann", false)])),
            Ok(ClientIntent::SubmitPrompt { name: "Ann".into(), prompt: "a cat in a hat".to_string() })
        );
        assert_eq!(
            format_intent(IntentRequest::SubmitPrompt, &ui, &game_round(1, &[("Ann", true)])),
            Err(Refusal::AlreadySubmitted)
        );
        assert_eq!(
            format_intent(IntentRequest::SubmitPrompt, &ui, &game_round(2, &[("Ann", false)])),
            Err(Refusal::WrongRound(2))
        );
        assert_eq!(
            format_intent(IntentRequest::SubmitPrompt, &ui, &GameStateSnapshot::default()),
            Err(Refusal::WrongPhase("lobby"))
        );
    }

    #[test]
    fn test_description_requires_assigned_chain() {
        let mut ui = named("Ann");
        ui.drafts.description = "a hat on a cat".to_string();
        let snapshot = game_round(2, &[("Ann", false)]);

        assert_eq!(
            format_intent(IntentRequest::SubmitDescription, &ui, &snapshot),
            Err(Refusal::NoAssignedChain)
        );

        ui.assigned_chain = Some("Bob".into());
        assert_eq!(
            format_intent(IntentRequest::SubmitDescription, &ui, &snapshot),
            Ok(ClientIntent::SubmitDescription {
                name: "Ann".into(),
                description: "a hat on a cat".to_string(),
                chain_owner: "Bob".into(),
            })
        );
    }

    #[test]
    fn test_restart_needs_confirmation_in_gallery() {
        let gallery = GameStateSnapshot { phase: Phase::Gallery, ..GameStateSnapshot::default() };
        let mut ui = EphemeralUiState::default();
        assert_eq!(
            format_intent(IntentRequest::RestartGame, &ui, &gallery),
            Err(Refusal::NotConfirmed)
        );
        ui.restart_confirmation_pending = true;
        assert_eq!(
            format_intent(IntentRequest::RestartGame, &ui, &gallery),
            Ok(ClientIntent::RestartGame)
        );
    }

    #[test]
    fn test_dispatch_sends_every_call() {
        let dispatcher = CommandDispatcher::new(RecordingSink::default());
        let intent = ClientIntent::Ready { name: "Ann".into() };

        dispatcher.dispatch(&intent);
        dispatcher.dispatch(&intent);

        let sent = dispatcher.sink().sent.borrow();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0], r#"{"type":"ready","name":"Ann"}"#);
    }

    #[test]
    fn test_dispatch_drops_when_closed() {
        let sink = RecordingSink::default();
        sink.closed.set(true);
        let dispatcher = CommandDispatcher::new(sink);

        dispatcher.dispatch(&ClientIntent::RestartGame);

        assert!(dispatcher.sink().sent.borrow().is_empty());
    }
}
