use std::time::Duration;

use super::command_dispatcher::{format_intent, IntentRequest};
use super::effects::{Effect, TimerKey, TimerToken};
use super::phase_router::{PhaseRouter, PhaseTransition, ViewMode};
use super::ready_flash::ReadyFlash;
use super::snapshot_store::SnapshotStore;
use super::transition_scheduler::TransitionScheduler;
use super::ui_state::{DraftWatch, Drafts, EphemeralUiState};
use super::view_resolver::{resolve, DerivedView};
use crate::defaults::{IMAGE_FADE_DURATION, READY_FLASH_DURATION};
use crate::identifiers::PlayerName;
use crate::log;
use crate::protocol::{ChainStep, GameStateSnapshot, Phase};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineTimings {
    pub image_fade: Duration,
    pub ready_flash: Duration,
}

impl Default for EngineTimings {
    fn default() -> Self {
        Self {
            image_fade: IMAGE_FADE_DURATION,
            ready_flash: READY_FLASH_DURATION,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Join,
    Ready,
    SubmitPrompt,
    SubmitDescription,
    RequestRestart,
    CancelRestart,
    ConfirmRestart,
    ExpandStep { owner: PlayerName, index: usize },
    CloseExpanded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Snapshot(GameStateSnapshot),
    TimerFired { key: TimerKey, token: TimerToken },
    User(UserAction),
    TransportClosed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerRow {
    pub name: PlayerName,
    pub ready: bool,
    pub is_local: bool,
    pub flashing: bool,
}

/// The whole client state machine.
///
/// `handle` is the only way state changes: it takes one event, updates the
/// local state and returns the effects the host must carry out (send an
/// intent, start or cancel a timer). Events must be fed in arrival order.
pub struct SyncEngine {
    store: SnapshotStore,
    router: PhaseRouter,
    ui: EphemeralUiState,
    derived: DerivedView,
    draft_watch: DraftWatch,
    images: TransitionScheduler,
    ready_flash: ReadyFlash,
    closed: bool,
}

impl Default for SyncEngine {
    fn default() -> Self {
        Self::new(EngineTimings::default())
    }
}

impl SyncEngine {
    pub fn new(timings: EngineTimings) -> Self {
        Self {
            store: SnapshotStore::new(),
            router: PhaseRouter::new(),
            ui: EphemeralUiState::default(),
            derived: DerivedView::default(),
            draft_watch: DraftWatch::default(),
            images: TransitionScheduler::new(timings.image_fade),
            ready_flash: ReadyFlash::new(timings.ready_flash),
            closed: false,
        }
    }

    pub fn handle(&mut self, event: EngineEvent) -> Vec<Effect> {
        match event {
            EngineEvent::Snapshot(snapshot) => self.ingest(snapshot),
            EngineEvent::TimerFired { key, token } => {
                self.on_timer(key, token);
                Vec::new()
            }
            EngineEvent::User(action) => self.on_user_action(action),
            EngineEvent::TransportClosed => self.close(),
        }
    }

    /// Cancels every pending timer, e.g. when the window goes away.
    pub fn shutdown(&mut self) -> Vec<Effect> {
        let mut effects = self.images.dispose();
        effects.extend(self.ready_flash.dispose());
        effects
    }

    fn ingest(&mut self, snapshot: GameStateSnapshot) -> Vec<Effect> {
        if self.closed {
            log!("Ignoring snapshot received after the transport closed");
            return Vec::new();
        }

        let snapshot = self.store.ingest(snapshot);
        let mut effects = Vec::new();

        if let Some(transition) = self.router.observe(snapshot.phase) {
            effects.extend(self.on_phase_transition(transition));
        }

        effects.extend(self.ready_flash.observe(&snapshot.players));
        self.recompute(&snapshot);

        if self.router.view_mode() == ViewMode::Game {
            effects.extend(self.images.retarget(self.derived.image_to_show.as_deref()));
        }
        effects
    }

    fn on_phase_transition(&mut self, transition: PhaseTransition) -> Vec<Effect> {
        let reset = if transition.enters_lobby() { ", resetting local state" } else { "" };
        log!(
            "Phase changed: {} -> {}{}",
            transition.from.as_str(),
            transition.to.as_str(),
            reset
        );
        let mut effects = Vec::new();

        if transition.leaves_game() {
            effects.extend(self.images.dispose());
        }
        if transition.enters_lobby() {
            self.ui.reset_to_defaults();
            self.derived = DerivedView::default();
            self.draft_watch.rebase();
        }
        effects
    }

    fn recompute(&mut self, snapshot: &GameStateSnapshot) {
        let derived = match self.ui.local_name() {
            Some(name) => resolve(name, snapshot),
            None => DerivedView::default(),
        };

        if self
            .draft_watch
            .observe(snapshot.round_number, derived.chain_owner.as_ref())
        {
            self.ui.clear_drafts();
        }

        self.ui.assigned_chain = derived.chain_owner.clone();
        self.ui.current_image = derived.image_to_show.clone();
        self.derived = derived;
    }

    fn on_timer(&mut self, key: TimerKey, token: TimerToken) {
        let current = match &key {
            TimerKey::ImageSwap => self.images.on_timer(token),
            TimerKey::ReadyFlash(player) => self.ready_flash.on_timer(player, token),
        };
        if !current {
            log!("Ignoring stale {:?} timer #{}", key, token);
        }
    }

    fn on_user_action(&mut self, action: UserAction) -> Vec<Effect> {
        let request = match action {
            UserAction::Join => IntentRequest::Join,
            UserAction::Ready => IntentRequest::Ready,
            UserAction::SubmitPrompt => IntentRequest::SubmitPrompt,
            UserAction::SubmitDescription => IntentRequest::SubmitDescription,
            UserAction::ConfirmRestart => IntentRequest::RestartGame,
            UserAction::RequestRestart => {
                if self.router.phase() == Phase::Gallery {
                    self.ui.restart_confirmation_pending = true;
                }
                return Vec::new();
            }
            UserAction::CancelRestart => {
                self.ui.restart_confirmation_pending = false;
                return Vec::new();
            }
            UserAction::ExpandStep { owner, index } => {
                self.expand_step(&owner, index);
                return Vec::new();
            }
            UserAction::CloseExpanded => {
                self.ui.close_expanded();
                return Vec::new();
            }
        };

        let intent = match format_intent(request, &self.ui, self.store.get()) {
            Ok(intent) => intent,
            Err(refusal) => {
                log!("Not sending {:?}: {}", request, refusal);
                return Vec::new();
            }
        };

        match request {
            IntentRequest::Join => {
                let trimmed = self.ui.drafts.name.trim().to_string();
                self.ui.drafts.name = trimmed;
                self.ui.joined = true;
                let snapshot = self.store.current();
                self.recompute(&snapshot);
            }
            IntentRequest::RestartGame => self.ui.restart_confirmation_pending = false,
            _ => {}
        }
        vec![Effect::Send(intent)]
    }

    fn expand_step(&mut self, owner: &PlayerName, index: usize) {
        let snapshot = self.store.get();
        let Some(ChainStep { player, prompt, image: Some(image) }) = snapshot.chain(owner.as_str()).get(index)
        else {
            return;
        };
        self.ui.expanded_image = Some(image.clone());
        self.ui.expanded_image_prompt = Some(format!("\"{}\" by {}", prompt, player));
    }

    fn close(&mut self) -> Vec<Effect> {
        if self.closed {
            return Vec::new();
        }
        log!("Transport closed, no further snapshots will be processed");
        self.closed = true;
        self.shutdown()
    }

    pub fn snapshot(&self) -> &GameStateSnapshot {
        self.store.get()
    }

    pub fn view_mode(&self) -> ViewMode {
        self.router.view_mode()
    }

    pub fn ui_state(&self) -> &EphemeralUiState {
        &self.ui
    }

    /// Drafts are edited in place by text inputs; typing has no effects.
    pub fn drafts_mut(&mut self) -> &mut Drafts {
        &mut self.ui.drafts
    }

    pub fn derived(&self) -> &DerivedView {
        &self.derived
    }

    pub fn displayed_image(&self) -> Option<&str> {
        self.images.displayed()
    }

    pub fn is_image_transitioning(&self) -> bool {
        self.images.is_transitioning()
    }

    pub fn image_swaps(&self) -> u64 {
        self.images.swaps()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn local_player_ready(&self) -> bool {
        self.ui
            .local_name()
            .is_some_and(|name| self.store.get().is_ready(name))
    }

    pub fn can_join(&self) -> bool {
        format_intent(IntentRequest::Join, &self.ui, self.store.get()).is_ok()
    }

    pub fn can_submit_prompt(&self) -> bool {
        format_intent(IntentRequest::SubmitPrompt, &self.ui, self.store.get()).is_ok()
    }

    pub fn can_submit_description(&self) -> bool {
        format_intent(IntentRequest::SubmitDescription, &self.ui, self.store.get()).is_ok()
    }

    pub fn player_rows(&self) -> Vec<PlayerRow> {
        let local = self.ui.local_name();
        self.store
            .get()
            .players
            .iter()
            .map(|player| PlayerRow {
                name: player.name.clone(),
                ready: player.ready,
                is_local: self.ui.joined && local == Some(player.name.as_str()),
                flashing: self.ready_flash.is_flashing(player.name.as_str()),
            })
            .collect()
    }
}
