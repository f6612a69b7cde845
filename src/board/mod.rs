//! Immutable board description: the 40 spaces, rent and price tables, and
//! the standard card decks.
//!
//! The board is read-only after construction. Mutable ownership state lives
//! in [`crate::state::GameState`]; the board only answers questions about
//! the static rule data (what a space costs, what rent a holding level
//! commands, where the nearest railroad is).

pub mod deck;
pub mod layout;
pub mod space;

pub use deck::{Card, CardEffect, Deck, DeckKind, NearestKind};
pub use space::{
    ColorGroup, Space, SpaceId, SpaceKind, StreetRents, BOARD_SIZE, GO_POSITION, JAIL_POSITION,
};

/// Railroad rent by number of railroads the landlord owns (1-4).
pub const RAILROAD_RENTS: [i64; 4] = [25, 50, 100, 200];

/// Utility rent multiplier on the dice sum, by utilities owned (1-2).
pub const UTILITY_MULTIPLIERS: [i64; 2] = [4, 10];

/// The immutable board.
#[derive(Clone, Debug)]
pub struct Board {
    spaces: Vec<Space>,
}

impl Board {
    /// Build the standard board.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            spaces: layout::standard_spaces(),
        }
    }

    /// Look up a space by position.
    #[must_use]
    pub fn space(&self, id: SpaceId) -> &Space {
        &self.spaces[id.index()]
    }

    /// All spaces in position order.
    #[must_use]
    pub fn spaces(&self) -> &[Space] {
        &self.spaces
    }

    /// All ownable space IDs in position order.
    pub fn ownable_spaces(&self) -> impl Iterator<Item = SpaceId> + '_ {
        self.spaces.iter().filter(|s| s.is_ownable()).map(|s| s.id)
    }

    /// The street members of a color group, in position order.
    #[must_use]
    pub fn group_members(&self, group: ColorGroup) -> Vec<SpaceId> {
        self.spaces
            .iter()
            .filter(|s| s.group() == Some(group))
            .map(|s| s.id)
            .collect()
    }

    /// The nearest space of the given kind strictly ahead of `from`,
    /// searching forward with wraparound.
    #[must_use]
    pub fn nearest(&self, from: SpaceId, kind: NearestKind) -> SpaceId {
        for offset in 1..=BOARD_SIZE {
            let (candidate, _) = from.advance(offset);
            let matches = match kind {
                NearestKind::Railroad => {
                    matches!(self.space(candidate).kind, SpaceKind::Railroad)
                }
                NearestKind::Utility => {
                    matches!(self.space(candidate).kind, SpaceKind::Utility)
                }
            };
            if matches {
                return candidate;
            }
        }
        from
    }

    /// Rent for a street at the given improvement level.
    #[must_use]
    pub fn street_rent(&self, id: SpaceId, level: u8, monopoly: bool) -> i64 {
        self.space(id)
            .street_rents()
            .map(|rents| rents.for_level(level, monopoly))
            .unwrap_or(0)
    }

    /// Rent for a railroad given how many the landlord owns.
    #[must_use]
    pub fn railroad_rent(&self, owned_count: usize) -> i64 {
        RAILROAD_RENTS[owned_count.clamp(1, 4) - 1]
    }

    /// Rent for a utility given how many the landlord owns and the dice sum
    /// that brought the visitor here.
    #[must_use]
    pub fn utility_rent(&self, owned_count: usize, dice_sum: u8) -> i64 {
        UTILITY_MULTIPLIERS[owned_count.clamp(1, 2) - 1] * dice_sum as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_lookup() {
        let board = Board::standard();
        assert_eq!(board.space(SpaceId::new(0)).name, "GO");
        assert_eq!(board.space(SpaceId::new(39)).name, "Boardwalk");
        assert_eq!(board.space(SpaceId::new(39)).price, Some(400));
    }

    #[test]
    fn test_group_members() {
        let board = Board::standard();
        let browns = board.group_members(ColorGroup::Brown);
        assert_eq!(browns, vec![SpaceId::new(1), SpaceId::new(3)]);

        let greens = board.group_members(ColorGroup::Green);
        assert_eq!(
            greens,
            vec![SpaceId::new(31), SpaceId::new(32), SpaceId::new(34)]
        );
    }

    #[test]
    fn test_nearest_searches_forward_with_wrap() {
        let board = Board::standard();
        assert_eq!(
            board.nearest(SpaceId::new(7), NearestKind::Railroad),
            SpaceId::new(15)
        );
        assert_eq!(
            board.nearest(SpaceId::new(36), NearestKind::Railroad),
            SpaceId::new(5)
        );
        assert_eq!(
            board.nearest(SpaceId::new(22), NearestKind::Utility),
            SpaceId::new(28)
        );
    }

    #[test]
    fn test_rent_tables() {
        let board = Board::standard();

        // Mediterranean Avenue base and monopoly rents.
        assert_eq!(board.street_rent(SpaceId::new(1), 0, false), 2);
        assert_eq!(board.street_rent(SpaceId::new(1), 0, true), 4);
        assert_eq!(board.street_rent(SpaceId::new(1), 5, true), 250);

        assert_eq!(board.railroad_rent(1), 25);
        assert_eq!(board.railroad_rent(4), 200);

        assert_eq!(board.utility_rent(1, 7), 28);
        assert_eq!(board.utility_rent(2, 7), 70);
    }
}
