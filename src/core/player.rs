//! Player identification and per-player data storage.
//!
//! ## PlayerId
//!
//! Type-safe player identifier supporting 2-8 players.
//!
//! ## PlayerMap
//!
//! Per-player data storage backed by `Vec` for O(1) access, indexable by
//! `PlayerId`.
//!
//! ## PlayerState
//!
//! The mutable per-player slice of the game state: cash, position, jail
//! status, held get-out-of-jail-free cards, bankrupt flag.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::ops::{Index, IndexMut};

use crate::board::DeckKind;

/// Player identifier. Player indices are 0-based turn-order positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-player data storage with O(1) access.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count >= 1, "Must have at least 1 player");
        assert!(player_count <= 8, "At most 8 players supported");

        let data = (0..player_count as u8)
            .map(|i| factory(PlayerId(i)))
            .collect();

        Self { data }
    }

    /// Create a new PlayerMap with all entries set to the same value.
    pub fn with_value(player_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(player_count, |_| value.clone())
    }

    /// Get the number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over all player IDs.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        (0..self.data.len() as u8).map(PlayerId)
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

/// Mutable per-player state.
///
/// Cash may go negative transiently while a debt is being settled; the
/// engine guarantees it is non-negative again (or the player bankrupt)
/// before the turn ends.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Display name.
    pub name: String,

    /// Cash balance.
    pub cash: i64,

    /// Board position, 0-39.
    pub position: u8,

    /// In-jail flag.
    pub in_jail: bool,

    /// Failed escape rolls this jail stay (release forced on the third).
    pub jail_turns: u8,

    /// Held get-out-of-jail-free cards, tagged with the deck each came from
    /// so a used card returns to the right deck.
    pub jail_cards: SmallVec<[DeckKind; 2]>,

    /// Bankrupt players are skipped in turn order but never removed.
    pub bankrupt: bool,
}

impl PlayerState {
    /// Create a player at GO with the given starting cash.
    #[must_use]
    pub fn new(name: impl Into<String>, starting_cash: i64) -> Self {
        Self {
            name: name.into(),
            cash: starting_cash,
            position: 0,
            in_jail: false,
            jail_turns: 0,
            jail_cards: SmallVec::new(),
            bankrupt: false,
        }
    }

    /// Number of held get-out-of-jail-free cards.
    #[must_use]
    pub fn jail_card_count(&self) -> usize {
        self.jail_cards.len()
    }
}
