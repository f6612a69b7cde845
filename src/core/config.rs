//! Game configuration: the standard rule table plus engine knobs.
//!
//! Defaults reproduce the standard rule set; setters exist so tests can
//! shrink the board economy (low starting cash, tight turn caps) without
//! touching the engine.

use serde::{Deserialize, Serialize};

/// Rule table and engine knobs for one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of players (2-8).
    pub player_count: usize,

    /// Cash each player starts with.
    pub starting_cash: i64,

    /// Salary credited when passing or reaching GO by forward movement.
    pub go_salary: i64,

    /// Fine to leave jail voluntarily (and forced after the third failed
    /// escape roll).
    pub jail_fine: i64,

    /// Houses in the bank's supply.
    pub house_stock: u8,

    /// Hotels in the bank's supply.
    pub hotel_stock: u8,

    /// Failed escape rolls allowed before the fine is forced.
    pub max_jail_turns: u8,

    /// Turn cap; reaching it ends the game by net worth.
    pub max_turns: u32,

    /// Illegal-action attempts an agent gets at one decision point before
    /// the environment substitutes the safe default action.
    pub illegal_action_retries: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_count: 2,
            starting_cash: 1_500,
            go_salary: 200,
            jail_fine: 50,
            house_stock: 32,
            hotel_stock: 12,
            max_jail_turns: 3,
            max_turns: 10_000,
            illegal_action_retries: 3,
        }
    }
}

impl GameConfig {
    /// Standard rules for the given number of players.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        assert!(
            (2..=8).contains(&player_count),
            "Player count must be 2-8"
        );
        Self {
            player_count,
            ..Self::default()
        }
    }

    /// Set the starting cash.
    #[must_use]
    pub fn with_starting_cash(mut self, cash: i64) -> Self {
        self.starting_cash = cash;
        self
    }

    /// Set the turn cap.
    #[must_use]
    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Set the illegal-action retry budget.
    #[must_use]
    pub fn with_illegal_action_retries(mut self, retries: u32) -> Self {
        self.illegal_action_retries = retries;
        self
    }
}
