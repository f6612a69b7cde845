//! The charge pipeline, debt settlement, and bankruptcy resolution.
//!
//! All money owed flows through [`charge`]. A debtor whose cash goes
//! negative either enters the interactive DebtSettlement phase (the acting
//! player, when they still hold something to liquidate), is liquidated
//! automatically (a non-acting player hit by a card), or goes bankrupt on
//! the spot. Resolution conserves money exactly: the creditor keeps only
//! what the debtor actually had, and a bank shortfall is written off in the
//! ledger.

use log::info;

use super::{advance_turn, apply_mortgage, apply_sell, bank_pay, landing, Phase};
use crate::catalog::{can_mortgage, can_sell};
use crate::core::PlayerId;
use crate::state::{Creditor, DebtResume, GameState, PendingDebt};

/// How a charge concluded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ChargeOutcome {
    /// Fully paid; the caller continues its flow.
    Paid,
    /// The acting player is now in debt settlement; the flow resumes when
    /// (if) the debt clears.
    EnteredDebt,
    /// The debtor went bankrupt; phases were already adjusted.
    Bankrupted,
}

/// Charge `debtor` in favor of `creditor`. Debits, credits, and resolves
/// any shortfall.
pub(crate) fn charge(
    state: &mut GameState,
    debtor: PlayerId,
    amount: i64,
    creditor: Creditor,
    resume: DebtResume,
) -> ChargeOutcome {
    debug_assert!(amount >= 0, "charges are non-negative");

    state.player_mut(debtor).cash -= amount;
    match creditor {
        Creditor::Player(c) => state.player_mut(c).cash += amount,
        Creditor::Bank => state.ledger.collect(amount),
    }

    if state.player(debtor).cash >= 0 {
        return ChargeOutcome::Paid;
    }
    resolve_shortfall(state, debtor, creditor, resume)
}

/// Handle a debtor whose cash is negative after all transfers were booked.
pub(crate) fn resolve_shortfall(
    state: &mut GameState,
    debtor: PlayerId,
    creditor: Creditor,
    resume: DebtResume,
) -> ChargeOutcome {
    if debtor != state.current_player {
        // A non-acting player (hit by a card effect) never gets a decision
        // point: liquidate in board order, then bankrupt if still short.
        auto_liquidate(state, debtor);
        if state.player(debtor).cash >= 0 {
            return ChargeOutcome::Paid;
        }
        resolve_bankruptcy(state, debtor, creditor);
        return ChargeOutcome::Bankrupted;
    }

    if !has_liquidation_options(state, debtor) {
        info!("{} cannot raise the funds and is bankrupt", debtor);
        resolve_bankruptcy(state, debtor, creditor);
        if state.phase != Phase::Terminal {
            advance_turn(state);
        }
        return ChargeOutcome::Bankrupted;
    }

    info!("{} is short on cash and must liquidate or concede", debtor);
    state.pending_debt = Some(PendingDebt {
        debtor,
        creditor,
        resume,
    });
    state.phase = Phase::DebtSettlement;
    ChargeOutcome::EnteredDebt
}

/// Whether the player can still raise cash by selling or mortgaging.
fn has_liquidation_options(state: &GameState, player: PlayerId) -> bool {
    state
        .owned_spaces(player)
        .into_iter()
        .any(|s| can_mortgage(state, player, s) || can_sell(state, player, s))
}

/// Liquidate a non-acting debtor's assets in board order until the debt is
/// covered or nothing sellable or mortgageable remains.
fn auto_liquidate(state: &mut GameState, player: PlayerId) {
    info!("{} liquidates assets to cover a card charge", player);
    loop {
        if state.player(player).cash >= 0 {
            return;
        }
        let owned = state.owned_spaces(player);
        if let Some(space) = owned.iter().copied().find(|&s| can_sell(state, player, s)) {
            apply_sell(state, player, space);
        } else if let Some(space) = owned
            .iter()
            .copied()
            .find(|&s| can_mortgage(state, player, s))
        {
            apply_mortgage(state, player, space);
        } else {
            return;
        }
    }
}

/// After a liquidation action in DebtSettlement: if the debtor is whole
/// again, clear the debt and resume the interrupted flow.
pub(crate) fn settle_check(state: &mut GameState) {
    if state.phase != Phase::DebtSettlement {
        return;
    }
    let Some(debt) = state.pending_debt else {
        return;
    };
    if state.player(debt.debtor).cash < 0 {
        return;
    }

    info!("{} has settled the debt", debt.debtor);
    state.pending_debt = None;
    match debt.resume {
        DebtResume::PostMove => state.phase = Phase::PostMoveActions,
        DebtResume::ReleaseAndMove { dice } => {
            let player = state.player_mut(debt.debtor);
            player.in_jail = false;
            player.jail_turns = 0;
            landing::move_and_resolve(state, dice);
        }
    }
}

/// Transfer a bankrupt player's estate.
///
/// Improvements are sold to the bank at half cost into the estate first.
/// The creditor then keeps the debtor's actual cash (a negative balance is
/// refunded by a player creditor or written off by the bank), followed by
/// the deeds (mortgage flags intact) and jail cards. The debtor ends with
/// nothing and is skipped for the rest of the game.
pub(crate) fn resolve_bankruptcy(state: &mut GameState, debtor: PlayerId, creditor: Creditor) {
    match creditor {
        Creditor::Player(c) => info!("{} is bankrupt; estate goes to {}", debtor, c),
        Creditor::Bank => info!("{} is bankrupt; estate returns to the bank", debtor),
    }

    let owned = state.owned_spaces(debtor);

    // Improvements liquidate at half cost.
    for &space in &owned {
        let level = state.holding(space).map(|h| h.level).unwrap_or(0);
        if level == 0 {
            continue;
        }
        let group = state
            .board
            .space(space)
            .group()
            .expect("improved space is a street");
        if level == 5 {
            state.hotels_available += 1;
        } else {
            state.houses_available += level;
        }
        state.holdings.get_mut(&space).expect("owned").level = 0;
        bank_pay(state, debtor, group.house_cost() / 2 * level as i64);
    }

    // Cash settlement with exact accounting.
    let remaining = state.player(debtor).cash;
    match creditor {
        Creditor::Player(c) => {
            state.player_mut(c).cash += remaining;
        }
        Creditor::Bank => {
            if remaining >= 0 {
                state.ledger.collect(remaining);
            } else {
                state.ledger.write_off(-remaining);
            }
        }
    }
    state.player_mut(debtor).cash = 0;

    // Deeds.
    for &space in &owned {
        match creditor {
            Creditor::Player(c) => {
                state.holdings.get_mut(&space).expect("owned").owner = c;
            }
            Creditor::Bank => {
                state.holdings.remove(&space);
            }
        }
    }

    // Jail cards travel to the creditor or rejoin their decks.
    let cards = std::mem::take(&mut state.player_mut(debtor).jail_cards);
    for kind in cards {
        match creditor {
            Creditor::Player(c) => state.player_mut(c).jail_cards.push(kind),
            Creditor::Bank => state.deck_mut(kind).return_jail_card(),
        }
    }

    state.player_mut(debtor).bankrupt = true;
    state.pending_debt = None;

    if state.alive_players().len() <= 1 {
        info!("game over: one player remains");
        state.phase = Phase::Terminal;
    }
}
