//! The standard 40-space board layout.

use super::space::{ColorGroup, Space, SpaceId, SpaceKind, StreetRents};

fn street(
    position: u8,
    name: &'static str,
    group: ColorGroup,
    price: i64,
    mortgage: i64,
    unmortgage: i64,
    rents: [i64; 7],
) -> Space {
    Space {
        id: SpaceId::new(position),
        name,
        kind: SpaceKind::Street {
            group,
            rents: StreetRents {
                base: rents[0],
                full_set: rents[1],
                houses: [rents[2], rents[3], rents[4], rents[5]],
                hotel: rents[6],
            },
        },
        price: Some(price),
        mortgage_value: Some(mortgage),
        unmortgage_cost: Some(unmortgage),
    }
}

fn railroad(position: u8, name: &'static str) -> Space {
    Space {
        id: SpaceId::new(position),
        name,
        kind: SpaceKind::Railroad,
        price: Some(200),
        mortgage_value: Some(100),
        unmortgage_cost: Some(110),
    }
}

fn utility(position: u8, name: &'static str) -> Space {
    Space {
        id: SpaceId::new(position),
        name,
        kind: SpaceKind::Utility,
        price: Some(150),
        mortgage_value: Some(75),
        unmortgage_cost: Some(83),
    }
}

fn unownable(position: u8, name: &'static str, kind: SpaceKind) -> Space {
    Space {
        id: SpaceId::new(position),
        name,
        kind,
        price: None,
        mortgage_value: None,
        unmortgage_cost: None,
    }
}

/// Build the standard board's 40 spaces in position order.
#[rustfmt::skip]
pub(super) fn standard_spaces() -> Vec<Space> {
    use ColorGroup::*;
    use SpaceKind::*;

    vec![
        unownable(0, "GO", Go),
        street(1, "Mediterranean Avenue", Brown, 60, 30, 33, [2, 4, 10, 30, 90, 160, 250]),
        unownable(2, "Community Chest", CommunityChest),
        street(3, "Baltic Avenue", Brown, 60, 30, 33, [4, 8, 20, 60, 180, 320, 450]),
        unownable(4, "Income Tax", Tax { amount: 200 }),
        railroad(5, "Reading Railroad"),
        street(6, "Oriental Avenue", LightBlue, 100, 50, 55, [6, 12, 30, 90, 270, 400, 550]),
        unownable(7, "Chance", Chance),
        street(8, "Vermont Avenue", LightBlue, 100, 50, 55, [6, 12, 30, 90, 270, 400, 550]),
        street(9, "Connecticut Avenue", LightBlue, 120, 60, 66, [8, 16, 40, 100, 300, 450, 600]),
        unownable(10, "Jail", Jail),
        street(11, "St. Charles Place", Pink, 140, 70, 77, [10, 20, 50, 150, 450, 625, 750]),
        utility(12, "Electric Company"),
        street(13, "States Avenue", Pink, 140, 70, 77, [10, 20, 50, 150, 450, 625, 750]),
        street(14, "Virginia Avenue", Pink, 160, 80, 88, [12, 24, 60, 180, 500, 700, 900]),
        railroad(15, "Pennsylvania Railroad"),
        street(16, "St. James Place", Orange, 180, 90, 99, [14, 28, 70, 200, 550, 750, 950]),
        unownable(17, "Community Chest", CommunityChest),
        street(18, "Tennessee Avenue", Orange, 180, 90, 99, [14, 28, 70, 200, 550, 750, 950]),
        street(19, "New York Avenue", Orange, 200, 100, 110, [16, 32, 80, 220, 600, 800, 1000]),
        unownable(20, "Free Parking", FreeParking),
        street(21, "Kentucky Avenue", Red, 220, 110, 121, [18, 36, 90, 250, 700, 875, 1050]),
        unownable(22, "Chance", Chance),
        street(23, "Indiana Avenue", Red, 220, 110, 121, [18, 36, 90, 250, 700, 875, 1050]),
        street(24, "Illinois Avenue", Red, 240, 120, 132, [20, 40, 100, 300, 750, 925, 1100]),
        railroad(25, "B&O Railroad"),
        street(26, "Atlantic Avenue", Yellow, 260, 130, 143, [22, 44, 110, 330, 800, 975, 1150]),
        street(27, "Ventnor Avenue", Yellow, 260, 130, 143, [22, 44, 110, 330, 800, 975, 1150]),
        utility(28, "Water Works"),
        street(29, "Marvin Gardens", Yellow, 280, 140, 154, [24, 48, 120, 360, 850, 1025, 1200]),
        unownable(30, "Go To Jail", GoToJail),
        street(31, "Pacific Avenue", Green, 300, 150, 165, [26, 52, 130, 390, 900, 1100, 1275]),
        street(32, "North Carolina Avenue", Green, 300, 150, 165, [26, 52, 130, 390, 900, 1100, 1275]),
        unownable(33, "Community Chest", CommunityChest),
        street(34, "Pennsylvania Avenue", Green, 320, 160, 176, [28, 56, 150, 450, 1000, 1200, 1400]),
        railroad(35, "Short Line"),
        unownable(36, "Chance", Chance),
        street(37, "Park Place", DarkBlue, 350, 175, 193, [35, 70, 175, 500, 1100, 1300, 1500]),
        unownable(38, "Luxury Tax", Tax { amount: 100 }),
        street(39, "Boardwalk", DarkBlue, 400, 200, 220, [50, 100, 200, 600, 1400, 1700, 2000]),
    ]
}
