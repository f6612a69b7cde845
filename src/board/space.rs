//! Board spaces: identity, kind, and rent tables.

use serde::{Deserialize, Serialize};

/// Number of spaces on the board.
pub const BOARD_SIZE: u8 = 40;

/// Board position of the GO space.
pub const GO_POSITION: SpaceId = SpaceId(0);

/// Board position of the jail (Just Visiting) space.
pub const JAIL_POSITION: SpaceId = SpaceId(10);

/// Space identifier: a board position in 0..40.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpaceId(pub u8);

impl SpaceId {
    /// Create a new space ID. Panics on an out-of-range position, which is
    /// a programming error.
    #[must_use]
    pub fn new(position: u8) -> Self {
        assert!(position < BOARD_SIZE, "space position out of range");
        Self(position)
    }

    /// Get the raw board position.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Advance `steps` spaces forward, wrapping around the board.
    /// Returns the destination and whether GO was passed or reached.
    #[must_use]
    pub fn advance(self, steps: u8) -> (SpaceId, bool) {
        let raw = self.0 as u16 + steps as u16;
        let wrapped = raw >= BOARD_SIZE as u16;
        (SpaceId((raw % BOARD_SIZE as u16) as u8), wrapped)
    }

    /// Move `steps` spaces backward, wrapping around the board.
    #[must_use]
    pub fn retreat(self, steps: u8) -> SpaceId {
        let steps = steps % BOARD_SIZE;
        SpaceId((self.0 + BOARD_SIZE - steps) % BOARD_SIZE)
    }

    /// Iterate over all board positions in order.
    pub fn all() -> impl Iterator<Item = SpaceId> {
        (0..BOARD_SIZE).map(SpaceId)
    }
}

impl std::fmt::Display for SpaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Space({})", self.0)
    }
}

/// Street color groups. A full group is a monopoly and unlocks building.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorGroup {
    Brown,
    LightBlue,
    Pink,
    Orange,
    Red,
    Yellow,
    Green,
    DarkBlue,
}

impl ColorGroup {
    /// Cost of one house (and of the hotel upgrade) in this group.
    #[must_use]
    pub const fn house_cost(self) -> i64 {
        match self {
            ColorGroup::Brown | ColorGroup::LightBlue => 50,
            ColorGroup::Pink | ColorGroup::Orange => 100,
            ColorGroup::Red | ColorGroup::Yellow => 150,
            ColorGroup::Green | ColorGroup::DarkBlue => 200,
        }
    }

    /// All groups in board order.
    pub fn all() -> impl Iterator<Item = ColorGroup> {
        [
            ColorGroup::Brown,
            ColorGroup::LightBlue,
            ColorGroup::Pink,
            ColorGroup::Orange,
            ColorGroup::Red,
            ColorGroup::Yellow,
            ColorGroup::Green,
            ColorGroup::DarkBlue,
        ]
        .into_iter()
    }
}

/// Street rent table, indexed by improvement level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreetRents {
    /// Rent with an incomplete color group.
    pub base: i64,
    /// Rent with the full group and no houses.
    pub full_set: i64,
    /// Rent with 1-4 houses.
    pub houses: [i64; 4],
    /// Rent with a hotel.
    pub hotel: i64,
}

impl StreetRents {
    /// Rent for the given improvement level (0-5), given whether the owner
    /// holds the full color group.
    #[must_use]
    pub fn for_level(&self, level: u8, monopoly: bool) -> i64 {
        match level {
            0 if monopoly => self.full_set,
            0 => self.base,
            1..=4 => self.houses[level as usize - 1],
            5 => self.hotel,
            _ => unreachable!("improvement level out of range"),
        }
    }
}

/// What a space is and the data its kind carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpaceKind {
    Go,
    Street { group: ColorGroup, rents: StreetRents },
    Railroad,
    Utility,
    Tax { amount: i64 },
    Chance,
    CommunityChest,
    Jail,
    FreeParking,
    GoToJail,
}

/// One board space. Immutable after board construction; all mutable
/// ownership state lives in the game state's holdings table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Space {
    /// Board position.
    pub id: SpaceId,

    /// Display name.
    pub name: &'static str,

    /// Kind and kind-specific data.
    pub kind: SpaceKind,

    /// Purchase price; `None` for unownable kinds.
    pub price: Option<i64>,

    /// Cash received when mortgaging; `None` for unownable kinds.
    pub mortgage_value: Option<i64>,

    /// Cost to lift a mortgage (value plus interest); `None` for
    /// unownable kinds.
    pub unmortgage_cost: Option<i64>,
}

impl Space {
    /// Whether this space can be owned.
    #[must_use]
    pub fn is_ownable(&self) -> bool {
        matches!(
            self.kind,
            SpaceKind::Street { .. } | SpaceKind::Railroad | SpaceKind::Utility
        )
    }

    /// The color group, for streets.
    #[must_use]
    pub fn group(&self) -> Option<ColorGroup> {
        match self.kind {
            SpaceKind::Street { group, .. } => Some(group),
            _ => None,
        }
    }

    /// The street rent table, for streets.
    #[must_use]
    pub fn street_rents(&self) -> Option<&StreetRents> {
        match &self.kind {
            SpaceKind::Street { rents, .. } => Some(rents),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_wraps_and_reports_go() {
        let (dest, passed) = SpaceId::new(38).advance(4);
        assert_eq!(dest, SpaceId::new(2));
        assert!(passed);

        let (dest, passed) = SpaceId::new(0).advance(7);
        assert_eq!(dest, SpaceId::new(7));
        assert!(!passed);

        // Landing exactly on GO counts as reaching it.
        let (dest, passed) = SpaceId::new(35).advance(5);
        assert_eq!(dest, GO_POSITION);
        assert!(passed);
    }

    #[test]
    fn test_retreat_wraps() {
        assert_eq!(SpaceId::new(7).retreat(3), SpaceId::new(4));
        assert_eq!(SpaceId::new(1).retreat(3), SpaceId::new(38));
    }

    #[test]
    fn test_house_costs() {
        assert_eq!(ColorGroup::Brown.house_cost(), 50);
        assert_eq!(ColorGroup::Orange.house_cost(), 100);
        assert_eq!(ColorGroup::Red.house_cost(), 150);
        assert_eq!(ColorGroup::DarkBlue.house_cost(), 200);
    }

    #[test]
    fn test_street_rent_levels() {
        let rents = StreetRents {
            base: 2,
            full_set: 4,
            houses: [10, 30, 90, 160],
            hotel: 250,
        };
        assert_eq!(rents.for_level(0, false), 2);
        assert_eq!(rents.for_level(0, true), 4);
        assert_eq!(rents.for_level(1, true), 10);
        assert_eq!(rents.for_level(4, true), 160);
        assert_eq!(rents.for_level(5, true), 250);
    }

    #[test]
    #[should_panic(expected = "space position out of range")]
    fn test_out_of_range_position() {
        SpaceId::new(40);
    }
}
