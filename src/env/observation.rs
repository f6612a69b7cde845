//! Read-only observation snapshots.
//!
//! An [`Observation`] is a serde-serializable projection of the game state:
//! everything an agent (or renderer) may see, and enough to reconstruct the
//! legal-action mask. Monopoly is a full-information game, so nothing is
//! hidden; the projection exists to keep consumers off the mutable state.

use serde::{Deserialize, Serialize};

use crate::board::SpaceId;
use crate::core::PlayerId;
use crate::engine::Phase;
use crate::state::{Creditor, GameState, TradeOffer};

/// One player's visible state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: String,
    pub cash: i64,
    pub position: u8,
    pub in_jail: bool,
    pub jail_turns: u8,
    pub jail_cards: u8,
    pub bankrupt: bool,
}

/// Ownership of one space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoldingView {
    pub space: SpaceId,
    pub owner: PlayerId,
    pub level: u8,
    pub mortgaged: bool,
}

/// The in-flight auction, when one is running.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuctionView {
    pub space: SpaceId,
    pub high_bid: Option<(PlayerId, i64)>,
    pub active_bidders: Vec<PlayerId>,
}

/// The unmet obligation, when the phase is DebtSettlement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebtView {
    pub debtor: PlayerId,
    pub creditor: Creditor,
    /// Cash the debtor still needs to reach zero.
    pub shortfall: i64,
}

/// Full snapshot of the game at a decision point.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub phase: Phase,
    pub turn: u32,
    pub current_player: PlayerId,
    /// Whose decision is outstanding (bidder, trade responder, or the
    /// current player).
    pub actor: PlayerId,
    pub last_roll: Option<(u8, u8)>,
    pub doubles_run: u8,
    pub players: Vec<PlayerView>,
    /// Owned spaces in board order; unlisted spaces are unowned.
    pub holdings: Vec<HoldingView>,
    pub houses_available: u8,
    pub hotels_available: u8,
    pub auction: Option<AuctionView>,
    pub pending_trade: Option<TradeOffer>,
    pub pending_debt: Option<DebtView>,
}

impl Observation {
    /// Snapshot the current state.
    #[must_use]
    pub fn capture(state: &GameState) -> Self {
        let players = state
            .players
            .iter()
            .map(|(id, p)| PlayerView {
                id,
                name: p.name.clone(),
                cash: p.cash,
                position: p.position,
                in_jail: p.in_jail,
                jail_turns: p.jail_turns,
                jail_cards: p.jail_card_count() as u8,
                bankrupt: p.bankrupt,
            })
            .collect();

        let mut holdings: Vec<HoldingView> = state
            .holdings
            .iter()
            .map(|(&space, h)| HoldingView {
                space,
                owner: h.owner,
                level: h.level,
                mortgaged: h.mortgaged,
            })
            .collect();
        holdings.sort_by_key(|h| h.space);

        let auction = state.auction.as_ref().map(|a| AuctionView {
            space: a.space,
            high_bid: a.high_bid(),
            active_bidders: a.active_bidders().to_vec(),
        });

        let pending_debt = state.pending_debt.map(|d| DebtView {
            debtor: d.debtor,
            creditor: d.creditor,
            shortfall: (-state.player(d.debtor).cash).max(0),
        });

        Self {
            phase: state.phase,
            turn: state.turn,
            current_player: state.current_player,
            actor: state.actor(),
            last_roll: state.last_roll,
            doubles_run: state.doubles_run,
            players,
            holdings,
            houses_available: state.houses_available,
            hotels_available: state.hotels_available,
            auction,
            pending_trade: state.pending_trade.clone(),
            pending_debt,
        }
    }

    /// A player's view by ID.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> &PlayerView {
        &self.players[id.index()]
    }

    /// Ownership of a space, if owned.
    #[must_use]
    pub fn holding(&self, space: SpaceId) -> Option<&HoldingView> {
        self.holdings.iter().find(|h| h.space == space)
    }
}
