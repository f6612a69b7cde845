//! Chance and Community Chest decks.
//!
//! Drawing is an explicit rotation: the front card comes off, is applied,
//! and returns to the back of the deck. The exception is Get Out of Jail
//! Free, which leaves the deck while a player holds it and rejoins the back
//! of its home deck when used or reclaimed by the bank.

use serde::{Deserialize, Serialize};

use super::space::SpaceId;
use crate::core::GameRng;

/// Which deck a card belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeckKind {
    Chance,
    CommunityChest,
}

impl std::fmt::Display for DeckKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeckKind::Chance => write!(f, "Chance"),
            DeckKind::CommunityChest => write!(f, "Community Chest"),
        }
    }
}

/// Which kind of space a movement card seeks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NearestKind {
    Railroad,
    Utility,
}

/// The effect a drawn card applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardEffect {
    /// Bank pays the drawer.
    Collect(i64),
    /// Drawer pays the bank.
    Pay(i64),
    /// Every other player pays the drawer.
    CollectFromEach(i64),
    /// Drawer pays every other player.
    PayEach(i64),
    /// Move to a fixed space, collecting the GO salary if passed.
    AdvanceTo(SpaceId),
    /// Move forward to the nearest space of the given kind. The rent owed
    /// on arrival is scaled by `rent_multiplier`.
    AdvanceToNearest {
        kind: NearestKind,
        rent_multiplier: u8,
    },
    /// Move backward without collecting the GO salary.
    GoBack(u8),
    /// Straight to jail; no salary.
    GoToJail,
    /// Keep-card: held until used, then returned to this deck.
    GetOutOfJailFree,
    /// Pay the bank per house and per hotel owned.
    Repairs { per_house: i64, per_hotel: i64 },
}

/// One card: identity within its deck, display text, and effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Card {
    pub deck: DeckKind,
    pub id: u8,
    pub text: &'static str,
    pub effect: CardEffect,
}

/// An ordered deck with rotation semantics.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Deck {
    kind: DeckKind,
    cards: Vec<Card>,
}

impl Deck {
    /// Build the standard deck of the given kind, in printed order.
    /// Call [`Deck::shuffle`] before play.
    #[must_use]
    pub fn standard(kind: DeckKind) -> Self {
        let cards = match kind {
            DeckKind::Chance => chance_cards(),
            DeckKind::CommunityChest => community_chest_cards(),
        };
        Self { kind, cards }
    }

    /// Which deck this is.
    #[must_use]
    pub fn kind(&self) -> DeckKind {
        self.kind
    }

    /// Cards currently in the deck.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the deck is empty (possible only if every card is held).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Shuffle the deck in place.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.cards);
    }

    /// Draw the front card. Non-keep cards rotate to the back; a keep card
    /// leaves the deck until returned.
    pub fn draw(&mut self) -> Option<Card> {
        if self.cards.is_empty() {
            return None;
        }
        let card = self.cards.remove(0);
        if card.effect != CardEffect::GetOutOfJailFree {
            self.cards.push(card);
        }
        Some(card)
    }

    /// Return this deck's Get Out of Jail Free card to the back.
    pub fn return_jail_card(&mut self) {
        debug_assert!(
            !self
                .cards
                .iter()
                .any(|c| c.effect == CardEffect::GetOutOfJailFree),
            "deck already holds its jail card"
        );
        let card = match self.kind {
            DeckKind::Chance => chance_cards(),
            DeckKind::CommunityChest => community_chest_cards(),
        }
        .into_iter()
        .find(|c| c.effect == CardEffect::GetOutOfJailFree)
        .expect("standard decks carry a jail card");
        self.cards.push(card);
    }

    /// Peek at the full order (tests only need this).
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

fn chance(id: u8, text: &'static str, effect: CardEffect) -> Card {
    Card {
        deck: DeckKind::Chance,
        id,
        text,
        effect,
    }
}

fn chest(id: u8, text: &'static str, effect: CardEffect) -> Card {
    Card {
        deck: DeckKind::CommunityChest,
        id,
        text,
        effect,
    }
}

fn chance_cards() -> Vec<Card> {
    use CardEffect::*;
    vec![
        chance(1, "Advance to Go (Collect $200).", AdvanceTo(SpaceId::new(0))),
        chance(
            2,
            "Advance to Illinois Avenue. If you pass Go, collect $200.",
            AdvanceTo(SpaceId::new(24)),
        ),
        chance(
            3,
            "Advance to St. Charles Place. If you pass Go, collect $200.",
            AdvanceTo(SpaceId::new(11)),
        ),
        chance(
            4,
            "Advance token to the nearest Utility. If unowned, you may buy it from the Bank.",
            AdvanceToNearest {
                kind: NearestKind::Utility,
                rent_multiplier: 1,
            },
        ),
        chance(
            5,
            "Advance token to the nearest Railroad and pay owner twice the rental to which they are otherwise entitled.",
            AdvanceToNearest {
                kind: NearestKind::Railroad,
                rent_multiplier: 2,
            },
        ),
        chance(6, "Bank pays you dividend of $50.", Collect(50)),
        chance(
            7,
            "Get Out of Jail Free. This card may be kept until needed, or traded/sold.",
            GetOutOfJailFree,
        ),
        chance(8, "Go Back 3 Spaces.", GoBack(3)),
        chance(
            9,
            "Go to Jail. Go directly to jail, do not pass Go, do not collect $200.",
            GoToJail,
        ),
        chance(
            10,
            "Make general repairs on all your property: For each house pay $25, for each hotel pay $100.",
            Repairs {
                per_house: 25,
                per_hotel: 100,
            },
        ),
        chance(11, "Pay poor tax of $15.", Pay(15)),
        chance(
            12,
            "Take a trip to Reading Railroad. If you pass Go, collect $200.",
            AdvanceTo(SpaceId::new(5)),
        ),
        chance(
            13,
            "Take a walk on the Boardwalk. Advance token to Boardwalk.",
            AdvanceTo(SpaceId::new(39)),
        ),
        chance(
            14,
            "You have been elected Chairman of the Board. Pay each player $50.",
            PayEach(50),
        ),
        chance(15, "Your building loan matures. Collect $150.", Collect(150)),
        chance(16, "Receive for services $25.", Collect(25)),
    ]
}

fn community_chest_cards() -> Vec<Card> {
    use CardEffect::*;
    vec![
        chest(1, "Advance to Go (Collect $200).", AdvanceTo(SpaceId::new(0))),
        chest(2, "Bank error in your favor. Collect $200.", Collect(200)),
        chest(3, "Doctor's fees. Pay $50.", Pay(50)),
        chest(4, "From sale of stock you get $50.", Collect(50)),
        chest(
            5,
            "Get Out of Jail Free. This card may be kept until needed, or traded/sold.",
            GetOutOfJailFree,
        ),
        chest(
            6,
            "Go to Jail. Go directly to jail, do not pass Go, do not collect $200.",
            GoToJail,
        ),
        chest(
            7,
            "Grand Opera Night. Collect $50 from every player for opening night seats.",
            CollectFromEach(50),
        ),
        chest(8, "Holiday Fund matures. Receive $100.", Collect(100)),
        chest(9, "Income tax refund. Collect $20.", Collect(20)),
        chest(
            10,
            "It is your birthday. Collect $10 from every player.",
            CollectFromEach(10),
        ),
        chest(11, "Life insurance matures. Collect $100.", Collect(100)),
        chest(12, "Pay hospital fees of $100.", Pay(100)),
        chest(13, "Pay school fees of $150.", Pay(150)),
        chest(14, "Receive $25 consultancy fee.", Collect(25)),
        chest(15, "You inherit $100.", Collect(100)),
        chest(
            16,
            "You are assessed for street repairs: Pay $40 per house and $115 per hotel.",
            Repairs {
                per_house: 40,
                per_hotel: 115,
            },
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_decks_have_sixteen_cards() {
        assert_eq!(Deck::standard(DeckKind::Chance).len(), 16);
        assert_eq!(Deck::standard(DeckKind::CommunityChest).len(), 16);
    }

    #[test]
    fn test_draw_rotates_to_back() {
        let mut deck = Deck::standard(DeckKind::CommunityChest);
        let first = deck.draw().unwrap();
        assert_ne!(first.effect, CardEffect::GetOutOfJailFree);
        assert_eq!(deck.len(), 16);
        assert_eq!(deck.cards().last().unwrap().id, first.id);
    }

    #[test]
    fn test_jail_card_leaves_and_returns() {
        let mut deck = Deck::standard(DeckKind::Chance);

        // Draw until the jail card comes up.
        let mut drawn = deck.draw().unwrap();
        while drawn.effect != CardEffect::GetOutOfJailFree {
            drawn = deck.draw().unwrap();
        }
        assert_eq!(deck.len(), 15);

        // While held, further draws cycle the remaining 15 cards.
        for _ in 0..20 {
            assert_ne!(
                deck.draw().unwrap().effect,
                CardEffect::GetOutOfJailFree
            );
        }

        deck.return_jail_card();
        assert_eq!(deck.len(), 16);
    }

    #[test]
    fn test_shuffle_is_seeded() {
        let mut rng1 = GameRng::new(9);
        let mut rng2 = GameRng::new(9);

        let mut deck1 = Deck::standard(DeckKind::Chance);
        let mut deck2 = Deck::standard(DeckKind::Chance);
        deck1.shuffle(&mut rng1);
        deck2.shuffle(&mut rng2);

        assert_eq!(deck1, deck2);
    }
}
