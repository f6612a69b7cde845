//! Auction state: the fallback sale when the landing player declines to buy.
//!
//! Bidding rotates through the active bidders. A bid must strictly exceed
//! the standing high bid; passing removes the bidder for good. The standing
//! high bidder is skipped in rotation and may not retract, so an auction
//! with N bidders ends after at most N-1 passes once a bid stands.

use serde::{Deserialize, Serialize};

use crate::board::SpaceId;
use crate::core::PlayerId;

/// In-flight auction for one space.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuctionState {
    /// The space on the block.
    pub space: SpaceId,

    /// Bidders who have not passed, in rotation order.
    active: Vec<PlayerId>,

    /// Standing high bid, if any.
    high_bid: Option<(PlayerId, i64)>,

    /// Index of the bidder to act next.
    current: usize,
}

impl AuctionState {
    /// Open an auction. `bidders` is the rotation order; the first entry
    /// acts first.
    #[must_use]
    pub fn new(space: SpaceId, bidders: Vec<PlayerId>) -> Self {
        assert!(!bidders.is_empty(), "auction needs at least one bidder");
        Self {
            space,
            active: bidders,
            high_bid: None,
            current: 0,
        }
    }

    /// The bidder whose decision is outstanding, unless the auction is over.
    #[must_use]
    pub fn current_bidder(&self) -> Option<PlayerId> {
        if self.is_done() {
            None
        } else {
            Some(self.active[self.current])
        }
    }

    /// The standing high bid.
    #[must_use]
    pub fn high_bid(&self) -> Option<(PlayerId, i64)> {
        self.high_bid
    }

    /// Bidders still in the auction.
    #[must_use]
    pub fn active_bidders(&self) -> &[PlayerId] {
        &self.active
    }

    /// Whether the auction has ended: only the high bidder remains, or
    /// everyone passed without a bid.
    #[must_use]
    pub fn is_done(&self) -> bool {
        match self.high_bid {
            Some((leader, _)) => self.active.len() == 1 && self.active[0] == leader,
            None => self.active.is_empty(),
        }
    }

    /// Record a bid by the current bidder. The caller has validated the
    /// amount against the standing bid and the bidder's cash.
    pub fn record_bid(&mut self, amount: i64) {
        let bidder = self.active[self.current];
        self.high_bid = Some((bidder, amount));
        if !self.is_done() {
            self.current = (self.current + 1) % self.active.len();
            self.skip_leader();
        }
    }

    /// Record a pass by the current bidder, removing them from rotation.
    pub fn record_pass(&mut self) {
        self.active.remove(self.current);
        if self.active.is_empty() {
            return;
        }
        if self.current >= self.active.len() {
            self.current = 0;
        }
        self.skip_leader();
    }

    fn skip_leader(&mut self) {
        if self.is_done() {
            return;
        }
        if let Some((leader, _)) = self.high_bid {
            if self.active[self.current] == leader {
                self.current = (self.current + 1) % self.active.len();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn players(ids: &[u8]) -> Vec<PlayerId> {
        ids.iter().copied().map(PlayerId::new).collect()
    }

    #[test]
    fn test_all_pass_no_bids() {
        let mut auction = AuctionState::new(SpaceId::new(1), players(&[0, 1, 2]));

        assert_eq!(auction.current_bidder(), Some(PlayerId::new(0)));
        auction.record_pass();
        assert_eq!(auction.current_bidder(), Some(PlayerId::new(1)));
        auction.record_pass();
        assert_eq!(auction.current_bidder(), Some(PlayerId::new(2)));
        auction.record_pass();

        assert!(auction.is_done());
        assert_eq!(auction.high_bid(), None);
    }

    #[test]
    fn test_high_bidder_wins_after_others_pass() {
        let mut auction = AuctionState::new(SpaceId::new(5), players(&[0, 1, 2]));

        auction.record_bid(10); // player 0
        assert_eq!(auction.current_bidder(), Some(PlayerId::new(1)));
        auction.record_bid(20); // player 1
        assert_eq!(auction.current_bidder(), Some(PlayerId::new(2)));
        auction.record_pass(); // player 2 out

        // Rotation skips the leader; player 0 decides again.
        assert_eq!(auction.current_bidder(), Some(PlayerId::new(0)));
        auction.record_pass();

        assert!(auction.is_done());
        assert_eq!(auction.high_bid(), Some((PlayerId::new(1), 20)));
    }

    #[test]
    fn test_leader_is_skipped_in_rotation() {
        let mut auction = AuctionState::new(SpaceId::new(5), players(&[0, 1]));

        auction.record_bid(5); // player 0 leads
        assert_eq!(auction.current_bidder(), Some(PlayerId::new(1)));
        auction.record_bid(6); // player 1 leads
        assert_eq!(auction.current_bidder(), Some(PlayerId::new(0)));
        auction.record_bid(7); // player 0 retakes the lead
        assert_eq!(auction.current_bidder(), Some(PlayerId::new(1)));
        auction.record_pass();

        assert!(auction.is_done());
        assert_eq!(auction.high_bid(), Some((PlayerId::new(0), 7)));
    }

    #[test]
    fn test_last_bidder_may_still_pass() {
        let mut auction = AuctionState::new(SpaceId::new(5), players(&[0, 1]));

        auction.record_pass(); // player 0 out
        assert!(!auction.is_done());
        assert_eq!(auction.current_bidder(), Some(PlayerId::new(1)));

        auction.record_bid(1);
        assert!(auction.is_done());
        assert_eq!(auction.high_bid(), Some((PlayerId::new(1), 1)));
    }
}
