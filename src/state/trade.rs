//! Trade offers: two-sided bundles of cash, properties, and jail cards.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::SpaceId;
use crate::core::PlayerId;

/// A proposed trade, pending until the responder accepts or rejects.
///
/// Each side is a bundle of cash, property deeds, and get-out-of-jail-free
/// cards. Mortgage flags and improvement levels travel with the deeds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeOffer {
    /// Player making the offer (the turn owner).
    pub proposer: PlayerId,

    /// Player the offer is addressed to.
    pub responder: PlayerId,

    /// Cash the proposer gives.
    pub cash_offered: i64,

    /// Properties the proposer gives.
    pub spaces_offered: SmallVec<[SpaceId; 4]>,

    /// Get-out-of-jail-free cards the proposer gives.
    pub jail_cards_offered: u8,

    /// Cash the proposer wants.
    pub cash_asked: i64,

    /// Properties the proposer wants.
    pub spaces_asked: SmallVec<[SpaceId; 4]>,

    /// Get-out-of-jail-free cards the proposer wants.
    pub jail_cards_asked: u8,
}

impl TradeOffer {
    /// A cash-and-deeds offer with no jail cards.
    #[must_use]
    pub fn new(
        proposer: PlayerId,
        responder: PlayerId,
        cash_offered: i64,
        spaces_offered: impl IntoIterator<Item = SpaceId>,
        cash_asked: i64,
        spaces_asked: impl IntoIterator<Item = SpaceId>,
    ) -> Self {
        Self {
            proposer,
            responder,
            cash_offered,
            spaces_offered: spaces_offered.into_iter().collect(),
            jail_cards_offered: 0,
            cash_asked,
            spaces_asked: spaces_asked.into_iter().collect(),
            jail_cards_asked: 0,
        }
    }

    /// Whether the offer moves nothing at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cash_offered == 0
            && self.cash_asked == 0
            && self.spaces_offered.is_empty()
            && self.spaces_asked.is_empty()
            && self.jail_cards_offered == 0
            && self.jail_cards_asked == 0
    }
}
