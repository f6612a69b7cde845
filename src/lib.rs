//! # monopoly-engine
//!
//! A Monopoly rules engine and turn-based environment for autonomous
//! agents or a human.
//!
//! ## Design Principles
//!
//! 1. **One source of truth**: `GameState` holds everything; only the
//!    `TurnEngine` mutates it, one validated action at a time.
//!
//! 2. **Suspend only at decisions**: dice, movement, landing effects,
//!    cards, and forced payments run to completion inside a single
//!    `apply`. The engine stops exactly where a player must choose.
//!
//! 3. **Deterministic**: all randomness flows from one seedable RNG, so a
//!    seed plus an action sequence replays a game exactly.
//!
//! 4. **Conservation is checkable**: a bank ledger records every
//!    bank/player transfer, making exact money conservation an assertable
//!    invariant rather than a hope.
//!
//! ## Modules
//!
//! - `core`: player identity, configuration, RNG, errors
//! - `board`: the 40 spaces, rent tables, card decks
//! - `state`: the mutable game state aggregate and its audit
//! - `catalog`: the action union, legal-action mask, validation
//! - `engine`: the phase state machine
//! - `env`: reset/step environment, observations, flat action encoding
//! - `agents`: the player capability and reference policies

pub mod agents;
pub mod board;
pub mod catalog;
pub mod core;
pub mod engine;
pub mod env;
pub mod state;

// Re-export commonly used types
pub use crate::core::{EngineError, GameConfig, GameRng, PlayerId, PlayerMap, PlayerState};

pub use crate::board::{
    Board, Card, CardEffect, ColorGroup, Deck, DeckKind, Space, SpaceId, SpaceKind,
};

pub use crate::state::{
    AuctionState, BankLedger, Creditor, GameState, Holding, PendingDebt, TradeOffer,
};

pub use crate::catalog::{legal_actions, validate, Action, ActionKind, ActionRecord, LegalActions};

pub use crate::engine::{GameResult, Phase, TurnEngine};

pub use crate::env::{Environment, Observation, Renderer, Step};

pub use crate::agents::{GreedyAgent, PlayerAgent, RandomAgent};
