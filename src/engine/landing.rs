//! Movement and landing resolution.
//!
//! Everything here is automatic: the engine moves the token, dispatches on
//! the space kind, charges rent and taxes through the charge pipeline, and
//! applies drawn cards. A card that moves the player loops back into
//! resolution (a movement card can land on another card space).

use log::{debug, info};

use super::{bank_pay, charge, record, send_to_jail, ChargeOutcome, Phase};
use crate::board::{CardEffect, DeckKind, SpaceId, SpaceKind};
use crate::catalog::Action;
use crate::state::{Creditor, DebtResume, GameState};

/// What a card did, as far as the resolution loop cares.
enum CardOutcome {
    /// Effect fully applied; resolution is complete.
    Done,
    /// The player moved; resolve the new space with this rent multiplier.
    Moved { rent_multiplier: i64 },
    /// The player was jailed; the turn proceeds to post-move actions.
    Jailed,
    /// A charge diverted the flow into debt settlement or bankruptcy.
    Halted,
}

/// Move by a dice roll (crediting the GO salary on a wrap) and resolve the
/// landing.
pub(crate) fn move_and_resolve(state: &mut GameState, dice: (u8, u8)) {
    let player = state.current_player;
    let from = SpaceId::new(state.player(player).position);
    let (dest, passed_go) = from.advance(dice.0 + dice.1);

    state.player_mut(player).position = dest.0;
    if passed_go {
        let salary = state.config.go_salary;
        bank_pay(state, player, salary);
        info!("{} passes GO and collects ${}", player, salary);
    }

    resolve_landing(state, dice);
}

/// Resolve the space under the current player. Loops while cards keep the
/// token moving. Leaves the phase at the next decision point.
pub(crate) fn resolve_landing(state: &mut GameState, dice: (u8, u8)) {
    let mut rent_multiplier: i64 = 1;

    loop {
        let player = state.current_player;
        let space_id = SpaceId::new(state.player(player).position);
        let space = *state.board.space(space_id);
        debug!("{} lands on {}", player, space.name);

        match space.kind {
            SpaceKind::Street { .. } | SpaceKind::Railroad | SpaceKind::Utility => {
                resolve_ownable(state, space_id, dice, rent_multiplier);
                return;
            }
            SpaceKind::Tax { amount } => {
                record(state, player, Action::PayTax { amount });
                info!("{} pays ${} {}", player, amount, space.name);
                if let ChargeOutcome::Paid = charge(
                    state,
                    player,
                    amount,
                    Creditor::Bank,
                    DebtResume::PostMove,
                ) {
                    state.phase = Phase::PostMoveActions;
                }
                return;
            }
            SpaceKind::Chance | SpaceKind::CommunityChest => {
                let deck_kind = match space.kind {
                    SpaceKind::Chance => DeckKind::Chance,
                    _ => DeckKind::CommunityChest,
                };
                let card = state
                    .deck_mut(deck_kind)
                    .draw()
                    .expect("a deck is never exhausted");
                info!("{} draws {}: {}", player, deck_kind, card.text);

                match apply_card(state, card.deck, card.effect) {
                    CardOutcome::Done | CardOutcome::Jailed => {
                        state.phase = Phase::PostMoveActions;
                        return;
                    }
                    CardOutcome::Halted => return,
                    CardOutcome::Moved { rent_multiplier: m } => {
                        rent_multiplier = m;
                    }
                }
            }
            SpaceKind::GoToJail => {
                send_to_jail(state, player);
                state.phase = Phase::PostMoveActions;
                return;
            }
            SpaceKind::Go | SpaceKind::Jail | SpaceKind::FreeParking => {
                state.phase = Phase::PostMoveActions;
                return;
            }
        }
    }
}

/// Resolve landing on an ownable space: buy decision, rent, or nothing on
/// the owner's own property.
fn resolve_ownable(state: &mut GameState, space_id: SpaceId, dice: (u8, u8), multiplier: i64) {
    let player = state.current_player;

    let Some(holding) = state.holding(space_id).copied() else {
        info!(
            "{} is unowned and available for ${}",
            state.board.space(space_id).name,
            state.board.space(space_id).price.unwrap_or(0)
        );
        state.phase = Phase::AwaitingBuyDecision;
        return;
    };

    if holding.owner == player {
        state.phase = Phase::PostMoveActions;
        return;
    }

    let rent = rent_for(state, space_id, dice) * multiplier;
    if rent == 0 {
        // Mortgaged properties collect nothing.
        state.phase = Phase::PostMoveActions;
        return;
    }

    record(
        state,
        player,
        Action::PayRent {
            space: space_id,
            amount: rent,
        },
    );
    info!(
        "{} owes {} ${} rent for {}",
        player,
        holding.owner,
        rent,
        state.board.space(space_id).name
    );
    if let ChargeOutcome::Paid = charge(
        state,
        player,
        rent,
        Creditor::Player(holding.owner),
        DebtResume::PostMove,
    ) {
        state.phase = Phase::PostMoveActions;
    }
}

/// Rent owed for landing on an owned space, before card multipliers.
pub(crate) fn rent_for(state: &GameState, space_id: SpaceId, dice: (u8, u8)) -> i64 {
    let Some(holding) = state.holding(space_id) else {
        return 0;
    };
    if holding.mortgaged {
        return 0;
    }
    let space = state.board.space(space_id);
    match space.kind {
        SpaceKind::Street { group, rents } => {
            let monopoly = state.owns_full_group(holding.owner, group);
            rents.for_level(holding.level, monopoly)
        }
        SpaceKind::Railroad => state
            .board
            .railroad_rent(state.owned_count_of_kind(holding.owner, &SpaceKind::Railroad)),
        SpaceKind::Utility => state.board.utility_rent(
            state.owned_count_of_kind(holding.owner, &SpaceKind::Utility),
            dice.0 + dice.1,
        ),
        _ => 0,
    }
}

/// Apply a drawn card's effect.
fn apply_card(state: &mut GameState, deck: DeckKind, effect: CardEffect) -> CardOutcome {
    let player = state.current_player;

    match effect {
        CardEffect::Collect(amount) => {
            bank_pay(state, player, amount);
            CardOutcome::Done
        }
        CardEffect::Pay(amount) => match charge(
            state,
            player,
            amount,
            Creditor::Bank,
            DebtResume::PostMove,
        ) {
            ChargeOutcome::Paid => CardOutcome::Done,
            _ => CardOutcome::Halted,
        },
        CardEffect::CollectFromEach(amount) => {
            let others: Vec<_> = state
                .alive_players()
                .into_iter()
                .filter(|&p| p != player)
                .collect();
            for other in others {
                // Non-acting debtors auto-liquidate or go bankrupt inside
                // the charge; the resume target is never reached for them.
                charge(
                    state,
                    other,
                    amount,
                    Creditor::Player(player),
                    DebtResume::PostMove,
                );
            }
            CardOutcome::Done
        }
        CardEffect::PayEach(amount) => {
            let others: Vec<_> = state
                .alive_players()
                .into_iter()
                .filter(|&p| p != player)
                .collect();
            let total = amount * others.len() as i64;
            for other in &others {
                state.player_mut(*other).cash += amount;
            }
            state.player_mut(player).cash -= total;
            if state.player(player).cash >= 0 {
                CardOutcome::Done
            } else {
                // The recipients are already paid; the shortfall is owed to
                // the bank's estate process.
                match super::bankruptcy::resolve_shortfall(
                    state,
                    player,
                    Creditor::Bank,
                    DebtResume::PostMove,
                ) {
                    ChargeOutcome::Paid => CardOutcome::Done,
                    _ => CardOutcome::Halted,
                }
            }
        }
        CardEffect::AdvanceTo(target) => {
            advance_with_salary(state, target);
            CardOutcome::Moved { rent_multiplier: 1 }
        }
        CardEffect::AdvanceToNearest {
            kind,
            rent_multiplier,
        } => {
            let from = SpaceId::new(state.player(player).position);
            let target = state.board.nearest(from, kind);
            advance_with_salary(state, target);
            CardOutcome::Moved {
                rent_multiplier: rent_multiplier as i64,
            }
        }
        CardEffect::GoBack(steps) => {
            let from = SpaceId::new(state.player(player).position);
            state.player_mut(player).position = from.retreat(steps).0;
            CardOutcome::Moved { rent_multiplier: 1 }
        }
        CardEffect::GoToJail => {
            send_to_jail(state, player);
            CardOutcome::Jailed
        }
        CardEffect::GetOutOfJailFree => {
            state.player_mut(player).jail_cards.push(deck);
            CardOutcome::Done
        }
        CardEffect::Repairs {
            per_house,
            per_hotel,
        } => {
            let total: i64 = state
                .holdings
                .values()
                .filter(|h| h.owner == player)
                .map(|h| match h.level {
                    5 => per_hotel,
                    level => level as i64 * per_house,
                })
                .sum();
            if total == 0 {
                return CardOutcome::Done;
            }
            info!("{} pays ${} in repairs", player, total);
            match charge(
                state,
                player,
                total,
                Creditor::Bank,
                DebtResume::PostMove,
            ) {
                ChargeOutcome::Paid => CardOutcome::Done,
                _ => CardOutcome::Halted,
            }
        }
    }
}

/// Card movement is always forward: wrapping past (or onto) GO pays the
/// salary.
fn advance_with_salary(state: &mut GameState, target: SpaceId) {
    let player = state.current_player;
    let from = SpaceId::new(state.player(player).position);
    let passed_go = target.0 <= from.0;

    state.player_mut(player).position = target.0;
    if passed_go {
        let salary = state.config.go_salary;
        bank_pay(state, player, salary);
        info!("{} passes GO and collects ${}", player, salary);
    }
}
