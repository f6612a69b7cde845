//! Core types: player identity, configuration, RNG, errors.

pub mod config;
pub mod error;
pub mod player;
pub mod rng;

pub use config::GameConfig;
pub use error::EngineError;
pub use player::{PlayerId, PlayerMap, PlayerState};
pub use rng::{GameRng, GameRngState};
