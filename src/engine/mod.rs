//! The turn state machine.
//!
//! [`TurnEngine`] owns the authoritative [`GameState`], consumes one
//! validated action at a time, and advances automatically through every
//! non-decision phase (movement, landing resolution, card effects,
//! automatic payments) until the next decision point. Illegal actions are
//! rejected without mutating anything.

mod bankruptcy;
mod landing;

pub(crate) use bankruptcy::{charge, settle_check, ChargeOutcome};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::board::SpaceId;
use crate::catalog::{self, Action, ActionRecord};
use crate::core::{EngineError, PlayerId};
use crate::state::{AuctionState, Creditor, DebtResume, GameState, Holding};

/// Phases of the turn state machine. The engine suspends only in phases
/// that require a decision; everything else runs to completion inside
/// [`TurnEngine::apply`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Start of a non-jailed turn; waiting for the roll.
    AwaitingRoll,
    /// Start of a jailed turn; fine, card, or escape roll.
    InJailDecision,
    /// Landed on an unowned property; buy or send to auction.
    AwaitingBuyDecision,
    /// Auction in progress; waiting on the current bidder.
    Auction,
    /// Free action window before ending the turn.
    PostMoveActions,
    /// A trade is pending; waiting on the responder.
    AwaitingTradeResponse,
    /// A debt is unmet; the debtor liquidates or concedes.
    DebtSettlement,
    /// Game over; no actions accepted.
    Terminal,
}

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// Single winner: last player standing, or richest at the turn cap.
    Winner(PlayerId),
    /// Turn cap reached with a net-worth tie.
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }
}

/// The rules engine: owns the state, applies actions, advances phases.
#[derive(Clone, Debug)]
pub struct TurnEngine {
    state: GameState,
}

impl TurnEngine {
    /// Wrap a fresh game state.
    #[must_use]
    pub fn new(state: GameState) -> Self {
        Self { state }
    }

    /// Read-only view of the authoritative state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Consume the engine, yielding the state (for archiving).
    #[must_use]
    pub fn into_state(self) -> GameState {
        self.state
    }

    /// The result, once the game is over.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        if self.state.phase != Phase::Terminal {
            return None;
        }
        let alive = self.state.alive_players();
        if alive.len() == 1 {
            return Some(GameResult::Winner(alive[0]));
        }
        // Turn cap: richest net worth wins, ties draw.
        let best = alive
            .iter()
            .map(|&p| self.state.net_worth(p))
            .max()
            .unwrap_or(0);
        let mut leaders = alive
            .into_iter()
            .filter(|&p| self.state.net_worth(p) == best);
        match (leaders.next(), leaders.next()) {
            (Some(winner), None) => Some(GameResult::Winner(winner)),
            _ => Some(GameResult::Draw),
        }
    }

    /// The safe fallback action for the current decision point, used when
    /// an agent exhausts its retry budget. `None` once the game is over.
    #[must_use]
    pub fn default_action(&self) -> Option<Action> {
        match self.state.phase {
            Phase::AwaitingRoll | Phase::InJailDecision => Some(Action::RollDice),
            Phase::AwaitingBuyDecision => Some(Action::DeclineBuy),
            Phase::Auction => Some(Action::PassBid),
            Phase::PostMoveActions => Some(Action::EndTurn),
            Phase::AwaitingTradeResponse => Some(Action::RejectTrade),
            Phase::DebtSettlement => Some(Action::DeclareBankruptcy),
            Phase::Terminal => None,
        }
    }

    /// Validate and apply one action for the current decision point, then
    /// advance through every automatic phase until the next decision point
    /// (or the terminal phase).
    pub fn apply(&mut self, action: Action) -> Result<(), EngineError> {
        catalog::validate(&self.state, &action)?;

        let state = &mut self.state;
        let actor = state.actor();
        record(state, actor, action.clone());
        debug!("{} takes {:?} in {:?}", actor, action, state.phase);

        match action {
            Action::RollDice => match state.phase {
                Phase::AwaitingRoll => roll_and_move(state),
                _ => jail_escape_roll(state),
            },
            Action::BuyProperty => buy_property(state),
            Action::DeclineBuy => open_auction(state),
            Action::Bid { amount } => {
                let auction = state.auction.as_mut().expect("validated bid");
                auction.record_bid(amount);
                if auction.is_done() {
                    close_auction(state);
                }
            }
            Action::PassBid => {
                let auction = state.auction.as_mut().expect("validated pass");
                auction.record_pass();
                if auction.is_done() {
                    close_auction(state);
                }
            }
            Action::UseJailCard => {
                let deck_kind = state
                    .player_mut(actor)
                    .jail_cards
                    .pop()
                    .expect("validated jail card");
                state.deck_mut(deck_kind).return_jail_card();
                info!("{} uses a Get Out of Jail Free card", actor);
                release_and_roll(state);
            }
            Action::PayJailFine => {
                let fine = state.config.jail_fine;
                state.player_mut(actor).cash -= fine;
                state.ledger.collect(fine);
                info!("{} pays the ${fine} jail fine", actor);
                release_and_roll(state);
            }
            Action::BuildImprovement { space } => {
                apply_build(state, actor, space);
            }
            Action::SellImprovement { space } => {
                apply_sell(state, actor, space);
                settle_check(state);
            }
            Action::Mortgage { space } => {
                apply_mortgage(state, actor, space);
                settle_check(state);
            }
            Action::Unmortgage { space } => {
                apply_unmortgage(state, actor, space);
            }
            Action::ProposeTrade(offer) => {
                info!(
                    "{} proposes a trade to {}",
                    offer.proposer, offer.responder
                );
                state.pending_trade = Some(offer);
                state.phase = Phase::AwaitingTradeResponse;
            }
            Action::AcceptTrade => accept_trade(state),
            Action::RejectTrade => {
                let trade = state.pending_trade.take().expect("validated reject");
                info!("{} rejects the trade from {}", trade.responder, trade.proposer);
                state.phase = Phase::PostMoveActions;
            }
            Action::DeclareBankruptcy => {
                let debt = state.pending_debt.expect("validated bankruptcy");
                bankruptcy::resolve_bankruptcy(state, debt.debtor, debt.creditor);
                if state.phase != Phase::Terminal {
                    advance_turn(state);
                }
            }
            Action::EndTurn => end_turn(state),
            Action::PayRent { .. } | Action::PayTax { .. } => {
                unreachable!("payment actions are rejected by validation")
            }
        }

        Ok(())
    }
}

/// Append to the action history.
pub(crate) fn record(state: &mut GameState, player: PlayerId, action: Action) {
    let turn = state.turn;
    state.history.push_back(ActionRecord {
        player,
        action,
        turn,
    });
}

/// Bank pays a player.
pub(crate) fn bank_pay(state: &mut GameState, player: PlayerId, amount: i64) {
    state.player_mut(player).cash += amount;
    state.ledger.pay(amount);
}

/// Jail a player: straight to the jail space, no salary. Jailing the
/// active player suppresses the doubles-again rule for this turn.
pub(crate) fn send_to_jail(state: &mut GameState, player: PlayerId) {
    info!("{} goes to jail", player);
    let jailed = state.player_mut(player);
    jailed.position = crate::board::JAIL_POSITION.0;
    jailed.in_jail = true;
    jailed.jail_turns = 0;
    if player == state.current_player {
        state.newly_jailed = true;
        state.doubles_run = 0;
    }
}

/// A roll from AwaitingRoll: doubles bookkeeping, three-doubles jailing,
/// then movement and landing resolution.
fn roll_and_move(state: &mut GameState) {
    let player = state.current_player;
    let dice = state.rng.roll_dice();
    state.last_roll = Some(dice);
    info!("{} rolls {}+{}", player, dice.0, dice.1);

    if dice.0 == dice.1 {
        state.doubles_run += 1;
        if state.doubles_run >= 3 {
            info!("{} rolled three consecutive doubles", player);
            send_to_jail(state, player);
            state.phase = Phase::PostMoveActions;
            return;
        }
    } else {
        state.doubles_run = 0;
    }

    landing::move_and_resolve(state, dice);
}

/// An escape roll from InJailDecision.
fn jail_escape_roll(state: &mut GameState) {
    let player = state.current_player;
    let dice = state.rng.roll_dice();
    state.last_roll = Some(dice);
    info!("{} rolls {}+{} in jail", player, dice.0, dice.1);

    if dice.0 == dice.1 {
        info!("{} rolls doubles and is released", player);
        let p = state.player_mut(player);
        p.in_jail = false;
        p.jail_turns = 0;
        // An escape roll never grants another turn.
        state.doubles_run = 0;
        landing::move_and_resolve(state, dice);
        return;
    }

    state.player_mut(player).jail_turns += 1;
    if state.player(player).jail_turns >= state.config.max_jail_turns {
        // Third failed attempt: the fine is forced, then the roll stands.
        let fine = state.config.jail_fine;
        info!("{} must pay the ${fine} fine after a third failed roll", player);
        match charge(
            state,
            player,
            fine,
            Creditor::Bank,
            DebtResume::ReleaseAndMove { dice },
        ) {
            ChargeOutcome::Paid => {
                let p = state.player_mut(player);
                p.in_jail = false;
                p.jail_turns = 0;
                landing::move_and_resolve(state, dice);
            }
            // Debt settlement (or bankruptcy) takes over from here.
            ChargeOutcome::EnteredDebt | ChargeOutcome::Bankrupted => {}
        }
    } else {
        advance_turn(state);
    }
}

/// Release after a fine or card, then the forced roll and movement.
fn release_and_roll(state: &mut GameState) {
    let player = state.current_player;
    let p = state.player_mut(player);
    p.in_jail = false;
    p.jail_turns = 0;

    let dice = state.rng.roll_dice();
    state.last_roll = Some(dice);
    info!("{} rolls {}+{} leaving jail", player, dice.0, dice.1);
    // A release roll never grants another turn.
    state.doubles_run = 0;
    landing::move_and_resolve(state, dice);
}

fn buy_property(state: &mut GameState) {
    let player = state.current_player;
    let space = SpaceId::new(state.player(player).position);
    let price = state.board.space(space).price.expect("validated purchase");

    state.player_mut(player).cash -= price;
    state.ledger.collect(price);
    state.holdings.insert(space, Holding::of(player));
    info!(
        "{} buys {} for ${}",
        player,
        state.board.space(space).name,
        price
    );
    state.phase = Phase::PostMoveActions;
}

fn open_auction(state: &mut GameState) {
    let player = state.current_player;
    let space = SpaceId::new(state.player(player).position);

    // Rotation starts with the decliner and follows turn order.
    let mut bidders = vec![player];
    let mut next = state.next_alive_after(player);
    while next != player {
        bidders.push(next);
        next = state.next_alive_after(next);
    }

    info!(
        "{} declines {}; auction opens with {} bidders",
        player,
        state.board.space(space).name,
        bidders.len()
    );
    state.auction = Some(AuctionState::new(space, bidders));
    state.phase = Phase::Auction;
}

fn close_auction(state: &mut GameState) {
    let auction = state.auction.take().expect("auction being closed");
    let space = auction.space;
    match auction.high_bid() {
        Some((winner, amount)) => {
            state.player_mut(winner).cash -= amount;
            state.ledger.collect(amount);
            state.holdings.insert(space, Holding::of(winner));
            info!(
                "{} wins the auction for {} at ${}",
                winner,
                state.board.space(space).name,
                amount
            );
        }
        None => {
            info!(
                "auction for {} ends with no bids; it stays unowned",
                state.board.space(space).name
            );
        }
    }
    state.phase = Phase::PostMoveActions;
}

/// Add one improvement level. Legality (monopoly, even-build, stock, cash)
/// was validated.
fn apply_build(state: &mut GameState, player: PlayerId, space: SpaceId) {
    let group = state.board.space(space).group().expect("validated street");
    let cost = group.house_cost();

    state.player_mut(player).cash -= cost;
    state.ledger.collect(cost);

    let holding = state.holdings.get_mut(&space).expect("validated holding");
    holding.level += 1;
    if holding.level == 5 {
        state.hotels_available -= 1;
        state.houses_available += 4;
    } else {
        state.houses_available -= 1;
    }
    info!(
        "{} builds on {} (level {})",
        player,
        state.board.space(space).name,
        state.holding(space).unwrap().level
    );
}

/// Remove one improvement level for half its cost. Shared with
/// auto-liquidation.
pub(crate) fn apply_sell(state: &mut GameState, player: PlayerId, space: SpaceId) {
    let group = state.board.space(space).group().expect("validated street");
    let refund = group.house_cost() / 2;

    let holding = state.holdings.get_mut(&space).expect("validated holding");
    if holding.level == 5 {
        state.hotels_available += 1;
        state.houses_available -= 4;
    } else {
        state.houses_available += 1;
    }
    holding.level -= 1;

    bank_pay(state, player, refund);
    info!(
        "{} sells an improvement on {} for ${}",
        player,
        state.board.space(space).name,
        refund
    );
}

/// Mortgage a property for its listed value. Shared with auto-liquidation.
pub(crate) fn apply_mortgage(state: &mut GameState, player: PlayerId, space: SpaceId) {
    let value = state
        .board
        .space(space)
        .mortgage_value
        .expect("validated mortgage");
    state.holdings.get_mut(&space).expect("validated holding").mortgaged = true;
    bank_pay(state, player, value);
    info!(
        "{} mortgages {} for ${}",
        player,
        state.board.space(space).name,
        value
    );
}

fn apply_unmortgage(state: &mut GameState, player: PlayerId, space: SpaceId) {
    let cost = state
        .board
        .space(space)
        .unmortgage_cost
        .expect("validated unmortgage");
    state.player_mut(player).cash -= cost;
    state.ledger.collect(cost);
    state.holdings.get_mut(&space).expect("validated holding").mortgaged = false;
    info!(
        "{} lifts the mortgage on {} for ${}",
        player,
        state.board.space(space).name,
        cost
    );
}

fn accept_trade(state: &mut GameState) {
    let trade = state.pending_trade.take().expect("validated accept");
    info!(
        "{} accepts the trade from {}",
        trade.responder, trade.proposer
    );

    // Cash both ways: a pure player-to-player transfer, no ledger entries.
    state.player_mut(trade.proposer).cash += trade.cash_asked - trade.cash_offered;
    state.player_mut(trade.responder).cash += trade.cash_offered - trade.cash_asked;

    for &space in &trade.spaces_offered {
        state.holdings.get_mut(&space).expect("validated deed").owner = trade.responder;
    }
    for &space in &trade.spaces_asked {
        state.holdings.get_mut(&space).expect("validated deed").owner = trade.proposer;
    }

    for _ in 0..trade.jail_cards_offered {
        let card = state.player_mut(trade.proposer).jail_cards.pop().expect("validated cards");
        state.player_mut(trade.responder).jail_cards.push(card);
    }
    for _ in 0..trade.jail_cards_asked {
        let card = state.player_mut(trade.responder).jail_cards.pop().expect("validated cards");
        state.player_mut(trade.proposer).jail_cards.push(card);
    }

    state.phase = Phase::PostMoveActions;
}

fn end_turn(state: &mut GameState) {
    let player = state.current_player;
    if state.doubles_run > 0 && !state.newly_jailed {
        info!("{} rolled doubles and goes again", player);
        state.phase = Phase::AwaitingRoll;
        return;
    }
    advance_turn(state);
}

/// Hand the turn to the next non-bankrupt player, checking the turn cap
/// and the last-player-standing condition.
pub(crate) fn advance_turn(state: &mut GameState) {
    state.doubles_run = 0;
    state.newly_jailed = false;
    state.turn += 1;

    let alive = state.alive_players();
    if alive.len() <= 1 {
        info!("game over: one player remains");
        state.phase = Phase::Terminal;
        return;
    }
    if state.turn >= state.config.max_turns {
        info!("game over: turn cap {} reached", state.config.max_turns);
        state.phase = Phase::Terminal;
        return;
    }

    state.current_player = state.next_alive_after(state.current_player);
    state.phase = if state.player(state.current_player).in_jail {
        Phase::InJailDecision
    } else {
        Phase::AwaitingRoll
    };
    debug!(
        "turn {} begins for {} in {:?}",
        state.turn, state.current_player, state.phase
    );
}
