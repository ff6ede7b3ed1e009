//! JSON wire format spoken with the game server.
//!
//! The server pushes one message type, a full `game_state` snapshot, after
//! every change. Decoding is deliberately forgiving: missing or null fields
//! fall back to neutral values so a partially filled snapshot still renders.
//! Optional maps (`assignments`, `chains`, `scores`) stay `None` when absent,
//! which is not the same as present-but-empty.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

use crate::defaults::{FIRST_ROUND, MAX_SCORE};
use crate::identifiers::PlayerName;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed server message: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("failed to encode {kind} intent: {source}")]
    Encode {
        kind: &'static str,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Lobby,
    Game,
    Gallery,
    /// Anything the client does not recognise, including a missing field.
    Unknown,
}

impl Phase {
    pub fn from_wire(value: &str) -> Self {
        match value {
            "lobby" => Phase::Lobby,
            "game" => Phase::Game,
            "gallery" => Phase::Gallery,
            _ => Phase::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Lobby => "lobby",
            Phase::Game => "game",
            Phase::Gallery => "gallery",
            Phase::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlayerStatus {
    pub name: PlayerName,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ready: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChainStep {
    pub player: PlayerName,
    #[serde(default, deserialize_with = "null_as_default")]
    pub prompt: String,
    /// Base64 encoded image; absent while the server is still generating it.
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GameStateSnapshot {
    #[serde(default, deserialize_with = "null_as_default")]
    pub players: Vec<PlayerStatus>,
    #[serde(default = "unknown_phase", deserialize_with = "phase_or_unknown")]
    pub phase: Phase,
    #[serde(default = "first_round", deserialize_with = "round_or_first")]
    pub round_number: u32,
    #[serde(default)]
    pub assignments: Option<HashMap<PlayerName, PlayerName>>,
    #[serde(default)]
    pub chains: Option<BTreeMap<PlayerName, Vec<ChainStep>>>,
    #[serde(default, deserialize_with = "clamped_scores")]
    pub scores: Option<BTreeMap<PlayerName, u32>>,
}

impl Default for GameStateSnapshot {
    /// What the client shows before the first message arrives.
    fn default() -> Self {
        Self {
            players: Vec::new(),
            phase: Phase::Lobby,
            round_number: FIRST_ROUND,
            assignments: None,
            chains: None,
            scores: None,
        }
    }
}

impl GameStateSnapshot {
    pub fn player(&self, name: &str) -> Option<&PlayerStatus> {
        self.players.iter().find(|p| p.name == name)
    }

    pub fn is_ready(&self, name: &str) -> bool {
        self.player(name).is_some_and(|p| p.ready)
    }

    pub fn chain(&self, owner: &str) -> &[ChainStep] {
        self.chains
            .as_ref()
            .and_then(|chains| chains.get(owner))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Scores ordered best first, ties broken by name.
    pub fn ranked_scores(&self) -> Vec<(&PlayerName, u32)> {
        let mut ranked: Vec<(&PlayerName, u32)> = self
            .scores
            .iter()
            .flatten()
            .map(|(name, score)| (name, *score))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    GameState(GameStateSnapshot),
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientIntent {
    Join {
        name: PlayerName,
    },
    Ready {
        name: PlayerName,
    },
    SubmitPrompt {
        name: PlayerName,
        prompt: String,
    },
    SubmitDescription {
        name: PlayerName,
        description: String,
        chain_owner: PlayerName,
    },
    RestartGame,
}

impl ClientIntent {
    pub fn kind(&self) -> &'static str {
        match self {
            ClientIntent::Join { .. } => "join",
            ClientIntent::Ready { .. } => "ready",
            ClientIntent::SubmitPrompt { .. } => "submit_prompt",
            ClientIntent::SubmitDescription { .. } => "submit_description",
            ClientIntent::RestartGame => "restart_game",
        }
    }
}

pub fn decode_server_message(text: &str) -> Result<ServerMessage, ProtocolError> {
    Ok(serde_json::from_str(text)?)
}

pub fn encode_intent(intent: &ClientIntent) -> Result<String, ProtocolError> {
    serde_json::to_string(intent).map_err(|source| ProtocolError::Encode {
        kind: intent.kind(),
        source,
    })
}

fn unknown_phase() -> Phase {
    Phase::Unknown
}

fn first_round() -> u32 {
    FIRST_ROUND
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn phase_or_unknown<'de, D>(deserializer: D) -> Result<Phase, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(phase)) => Phase::from_wire(&phase),
        _ => Phase::Unknown,
    })
}

fn round_or_first<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let round = Option::<Value>::deserialize(deserializer)?
        .and_then(|value| value.as_u64())
        .and_then(|round| u32::try_from(round).ok())
        .filter(|round| *round >= FIRST_ROUND);
    Ok(round.unwrap_or(FIRST_ROUND))
}

/// Scores outside `0..=MAX_SCORE` are clamped and non-integer entries are
/// skipped, so one odd value never drops the whole snapshot.
fn clamped_scores<'de, D>(deserializer: D) -> Result<Option<BTreeMap<PlayerName, u32>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(Value::Object(entries)) = Option::<Value>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let scores = entries
        .into_iter()
        .filter_map(|(name, value)| {
            let score = value.as_i64()?.clamp(0, i64::from(MAX_SCORE));
            let score = u32::try_from(score).ok()?;
            Some((PlayerName::from(name), score))
        })
        .collect();
    Ok(Some(scores))
}
