//! Flat integer action encoding.
//!
//! An adapter for agents that expect a fixed-size discrete action space:
//! every encodable action maps to a stable index in `0..ACTION_SPACE_SIZE`.
//! The layout is kind-major: the no-parameter kinds first, then a 40-slot
//! block per space-parameterized kind, then one slot per absolute bid
//! amount. Trade proposals carry bundles and have no flat index (agents
//! that trade use the structured [`Action`] directly); the automatic
//! payment kinds are likewise unencodable.

use crate::board::{SpaceId, BOARD_SIZE};
use crate::catalog::Action;

/// Highest encodable bid: the cash ceiling of the standard game
/// (total money in play).
pub const MAX_BID: i64 = 20_580;

const SIMPLE_KINDS: usize = 10;
const SPACE_BLOCKS: usize = 4;
const BID_BASE: usize = SIMPLE_KINDS + SPACE_BLOCKS * BOARD_SIZE as usize;

/// Size of the flat action space.
pub const ACTION_SPACE_SIZE: usize = BID_BASE + MAX_BID as usize + 1;

/// Encode an action to its flat index. `None` for the unencodable kinds
/// (trade proposals, automatic payments) and out-of-range bids.
#[must_use]
pub fn encode_action(action: &Action) -> Option<usize> {
    let index = match action {
        Action::RollDice => 0,
        Action::BuyProperty => 1,
        Action::DeclineBuy => 2,
        Action::PassBid => 3,
        Action::UseJailCard => 4,
        Action::PayJailFine => 5,
        Action::AcceptTrade => 6,
        Action::RejectTrade => 7,
        Action::DeclareBankruptcy => 8,
        Action::EndTurn => 9,
        Action::BuildImprovement { space } => space_slot(0, *space),
        Action::SellImprovement { space } => space_slot(1, *space),
        Action::Mortgage { space } => space_slot(2, *space),
        Action::Unmortgage { space } => space_slot(3, *space),
        Action::Bid { amount } => {
            if !(0..=MAX_BID).contains(amount) {
                return None;
            }
            BID_BASE + *amount as usize
        }
        Action::ProposeTrade(_) | Action::PayRent { .. } | Action::PayTax { .. } => return None,
    };
    Some(index)
}

/// Decode a flat index back to an action. `None` for out-of-range indices.
#[must_use]
pub fn decode_action(index: usize) -> Option<Action> {
    match index {
        0 => Some(Action::RollDice),
        1 => Some(Action::BuyProperty),
        2 => Some(Action::DeclineBuy),
        3 => Some(Action::PassBid),
        4 => Some(Action::UseJailCard),
        5 => Some(Action::PayJailFine),
        6 => Some(Action::AcceptTrade),
        7 => Some(Action::RejectTrade),
        8 => Some(Action::DeclareBankruptcy),
        9 => Some(Action::EndTurn),
        i if i < BID_BASE => {
            let offset = i - SIMPLE_KINDS;
            let block = offset / BOARD_SIZE as usize;
            let space = SpaceId::new((offset % BOARD_SIZE as usize) as u8);
            Some(match block {
                0 => Action::BuildImprovement { space },
                1 => Action::SellImprovement { space },
                2 => Action::Mortgage { space },
                _ => Action::Unmortgage { space },
            })
        }
        i if i < ACTION_SPACE_SIZE => Some(Action::Bid {
            amount: (i - BID_BASE) as i64,
        }),
        _ => None,
    }
}

fn space_slot(block: usize, space: SpaceId) -> usize {
    SIMPLE_KINDS + block * BOARD_SIZE as usize + space.index()
}
