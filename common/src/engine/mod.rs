//! Client-side synchronization engine.
//!
//! The server owns every game rule. This module only projects the latest
//! snapshot into a per-player view and decides which local state and which
//! timers follow from it. All I/O is expressed as returned [`Effect`]s so the
//! whole engine can be driven synchronously in tests.

mod command_dispatcher;
mod effects;
mod phase_router;
mod ready_flash;
mod snapshot_store;
mod sync_engine;
mod transition_scheduler;
mod ui_state;
mod view_resolver;

pub use command_dispatcher::{format_intent, CommandDispatcher, IntentRequest, IntentSink, Refusal};
pub use effects::{Effect, TimerKey, TimerToken};
pub use phase_router::{PhaseRouter, PhaseTransition, ViewMode};
pub use ready_flash::ReadyFlash;
pub use snapshot_store::SnapshotStore;
pub use sync_engine::{EngineEvent, EngineTimings, PlayerRow, SyncEngine, UserAction};
pub use transition_scheduler::TransitionScheduler;
pub use ui_state::{DraftWatch, Drafts, EphemeralUiState};
pub use view_resolver::{resolve, DerivedView};
