pub mod config;
pub mod defaults;
pub mod engine;
pub mod id_generator;
pub mod identifiers;
pub mod logger;
pub mod protocol;

pub use identifiers::*;
pub use protocol::{
    ChainStep, ClientIntent, GameStateSnapshot, Phase, PlayerStatus, ProtocolError, ServerMessage,
};
