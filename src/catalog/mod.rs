//! Action catalog: the discriminated action union, the legal-action mask,
//! and validation of proposed actions against the current state.
//!
//! Validation never mutates state: an action outside the legal set comes
//! back as [`EngineError::IllegalAction`] (or [`EngineError::InvalidTradeOffer`]
//! for malformed trade bundles) and the caller may retry.

use serde::{Deserialize, Serialize};

use crate::board::SpaceId;
use crate::core::{EngineError, PlayerId};
use crate::engine::Phase;
use crate::state::{GameState, TradeOffer};

/// A complete game action: the verb plus the parameters its kind requires.
///
/// `PayRent` and `PayTax` are automatic: the engine applies and records
/// them itself, and validation rejects them when agent-submitted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Roll the dice (also the escape attempt while jailed).
    RollDice,
    /// Buy the unowned property just landed on.
    BuyProperty,
    /// Decline the purchase, sending the property to auction.
    DeclineBuy,
    /// Raise the standing auction bid.
    Bid { amount: i64 },
    /// Leave the auction.
    PassBid,
    /// Rent owed to another player (automatic).
    PayRent { space: SpaceId, amount: i64 },
    /// Tax owed to the bank (automatic).
    PayTax { amount: i64 },
    /// Spend a held Get Out of Jail Free card.
    UseJailCard,
    /// Pay the jail fine to leave voluntarily.
    PayJailFine,
    /// Add one improvement level to a street.
    BuildImprovement { space: SpaceId },
    /// Remove one improvement level from a street for half its cost.
    SellImprovement { space: SpaceId },
    /// Mortgage a property for immediate cash.
    Mortgage { space: SpaceId },
    /// Lift a mortgage for its value plus interest.
    Unmortgage { space: SpaceId },
    /// Offer a trade to another player.
    ProposeTrade(TradeOffer),
    /// Accept the pending trade (responder only).
    AcceptTrade,
    /// Reject the pending trade (responder only).
    RejectTrade,
    /// Concede: assets go to the pending creditor.
    DeclareBankruptcy,
    /// Finish post-move actions and hand over the turn.
    EndTurn,
}

/// Action kinds, the label space of the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    RollDice,
    BuyProperty,
    DeclineBuy,
    Bid,
    PassBid,
    PayRent,
    PayTax,
    UseJailCard,
    PayJailFine,
    BuildImprovement,
    SellImprovement,
    Mortgage,
    Unmortgage,
    ProposeTrade,
    AcceptTrade,
    RejectTrade,
    DeclareBankruptcy,
    EndTurn,
}

impl Action {
    /// The kind of this action.
    #[must_use]
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::RollDice => ActionKind::RollDice,
            Action::BuyProperty => ActionKind::BuyProperty,
            Action::DeclineBuy => ActionKind::DeclineBuy,
            Action::Bid { .. } => ActionKind::Bid,
            Action::PassBid => ActionKind::PassBid,
            Action::PayRent { .. } => ActionKind::PayRent,
            Action::PayTax { .. } => ActionKind::PayTax,
            Action::UseJailCard => ActionKind::UseJailCard,
            Action::PayJailFine => ActionKind::PayJailFine,
            Action::BuildImprovement { .. } => ActionKind::BuildImprovement,
            Action::SellImprovement { .. } => ActionKind::SellImprovement,
            Action::Mortgage { .. } => ActionKind::Mortgage,
            Action::Unmortgage { .. } => ActionKind::Unmortgage,
            Action::ProposeTrade(_) => ActionKind::ProposeTrade,
            Action::AcceptTrade => ActionKind::AcceptTrade,
            Action::RejectTrade => ActionKind::RejectTrade,
            Action::DeclareBankruptcy => ActionKind::DeclareBankruptcy,
            Action::EndTurn => ActionKind::EndTurn,
        }
    }
}

/// A recorded action with metadata: the replay log and audit trail.
/// Automatic payments appear here alongside agent decisions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who took (or was charged by) this action.
    pub player: PlayerId,

    /// The action.
    pub action: Action,

    /// Turn number when it happened.
    pub turn: u32,
}

/// The legal-action mask for the current decision point.
///
/// Lists the legal kinds plus the parameter sets behind the parameterized
/// kinds. [`LegalActions::candidate_actions`] enumerates representative
/// concrete actions (bids at the minimum raise; trade proposals are not
/// enumerable and must be built from the bundles an agent wants).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalActions {
    /// Whose decision this is.
    pub actor: PlayerId,

    /// Phase the mask was computed for.
    pub phase: Phase,

    kinds: Vec<ActionKind>,

    /// Streets that may gain an improvement level.
    pub buildable: Vec<SpaceId>,

    /// Streets that may lose an improvement level.
    pub sellable: Vec<SpaceId>,

    /// Properties that may be mortgaged.
    pub mortgageable: Vec<SpaceId>,

    /// Properties whose mortgage may be lifted.
    pub unmortgageable: Vec<SpaceId>,

    /// Inclusive bid bounds, when bidding is open to the actor.
    pub bid_range: Option<(i64, i64)>,

    /// Players a trade may be proposed to.
    pub trade_partners: Vec<PlayerId>,
}

impl LegalActions {
    fn new(actor: PlayerId, phase: Phase) -> Self {
        Self {
            actor,
            phase,
            kinds: Vec::new(),
            buildable: Vec::new(),
            sellable: Vec::new(),
            mortgageable: Vec::new(),
            unmortgageable: Vec::new(),
            bid_range: None,
            trade_partners: Vec::new(),
        }
    }

    /// The legal kinds.
    #[must_use]
    pub fn kinds(&self) -> &[ActionKind] {
        &self.kinds
    }

    /// Whether a kind is legal at all.
    #[must_use]
    pub fn allows(&self, kind: ActionKind) -> bool {
        self.kinds.contains(&kind)
    }

    /// Whether no action is legal (terminal phase).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Enumerate representative concrete actions: one per parameter choice
    /// for space-parameterized kinds, the minimum raise for bids. Trade
    /// proposals are excluded (their parameter space is a bundle).
    #[must_use]
    pub fn candidate_actions(&self) -> Vec<Action> {
        let mut actions = Vec::new();
        for &kind in &self.kinds {
            match kind {
                ActionKind::RollDice => actions.push(Action::RollDice),
                ActionKind::BuyProperty => actions.push(Action::BuyProperty),
                ActionKind::DeclineBuy => actions.push(Action::DeclineBuy),
                ActionKind::Bid => {
                    if let Some((min, _)) = self.bid_range {
                        actions.push(Action::Bid { amount: min });
                    }
                }
                ActionKind::PassBid => actions.push(Action::PassBid),
                ActionKind::UseJailCard => actions.push(Action::UseJailCard),
                ActionKind::PayJailFine => actions.push(Action::PayJailFine),
                ActionKind::BuildImprovement => actions.extend(
                    self.buildable
                        .iter()
                        .map(|&space| Action::BuildImprovement { space }),
                ),
                ActionKind::SellImprovement => actions.extend(
                    self.sellable
                        .iter()
                        .map(|&space| Action::SellImprovement { space }),
                ),
                ActionKind::Mortgage => actions.extend(
                    self.mortgageable
                        .iter()
                        .map(|&space| Action::Mortgage { space }),
                ),
                ActionKind::Unmortgage => actions.extend(
                    self.unmortgageable
                        .iter()
                        .map(|&space| Action::Unmortgage { space }),
                ),
                ActionKind::AcceptTrade => actions.push(Action::AcceptTrade),
                ActionKind::RejectTrade => actions.push(Action::RejectTrade),
                ActionKind::DeclareBankruptcy => actions.push(Action::DeclareBankruptcy),
                ActionKind::EndTurn => actions.push(Action::EndTurn),
                ActionKind::ProposeTrade | ActionKind::PayRent | ActionKind::PayTax => {}
            }
        }
        actions
    }
}

/// Compute the legal-action mask for the current decision point.
#[must_use]
pub fn legal_actions(state: &GameState) -> LegalActions {
    let actor = state.actor();
    let mut legal = LegalActions::new(actor, state.phase);

    match state.phase {
        Phase::AwaitingRoll => {
            legal.kinds.push(ActionKind::RollDice);
        }
        Phase::InJailDecision => {
            legal.kinds.push(ActionKind::RollDice);
            let player = state.player(actor);
            if player.cash >= state.config.jail_fine {
                legal.kinds.push(ActionKind::PayJailFine);
            }
            if player.jail_card_count() > 0 {
                legal.kinds.push(ActionKind::UseJailCard);
            }
        }
        Phase::AwaitingBuyDecision => {
            let space = SpaceId::new(state.player(actor).position);
            let price = state.board.space(space).price.unwrap_or(i64::MAX);
            if state.player(actor).cash >= price {
                legal.kinds.push(ActionKind::BuyProperty);
            }
            legal.kinds.push(ActionKind::DeclineBuy);
        }
        Phase::Auction => {
            if let Some(auction) = &state.auction {
                let min = auction.high_bid().map(|(_, amount)| amount + 1).unwrap_or(1);
                let max = state.player(actor).cash;
                if min <= max {
                    legal.kinds.push(ActionKind::Bid);
                    legal.bid_range = Some((min, max));
                }
                legal.kinds.push(ActionKind::PassBid);
            }
        }
        Phase::PostMoveActions => {
            fill_asset_actions(state, actor, &mut legal);
            let partners: Vec<PlayerId> = state
                .alive_players()
                .into_iter()
                .filter(|&p| p != actor)
                .collect();
            if !partners.is_empty() {
                legal.kinds.push(ActionKind::ProposeTrade);
                legal.trade_partners = partners;
            }
            legal.kinds.push(ActionKind::EndTurn);
        }
        Phase::AwaitingTradeResponse => {
            if let Some(trade) = &state.pending_trade {
                if responder_can_accept(state, trade) {
                    legal.kinds.push(ActionKind::AcceptTrade);
                }
            }
            legal.kinds.push(ActionKind::RejectTrade);
        }
        Phase::DebtSettlement => {
            fill_asset_actions(state, actor, &mut legal);
            // Unmortgaging and building never help a debtor; only
            // liquidation and concession are offered.
            legal.kinds.retain(|&k| {
                matches!(k, ActionKind::Mortgage | ActionKind::SellImprovement)
            });
            legal.buildable.clear();
            legal.unmortgageable.clear();
            legal.kinds.push(ActionKind::DeclareBankruptcy);
        }
        Phase::Terminal => {}
    }

    legal
}

/// Populate the build/sell/mortgage/unmortgage kinds and their space sets.
fn fill_asset_actions(state: &GameState, actor: PlayerId, legal: &mut LegalActions) {
    for space in state.owned_spaces(actor) {
        if can_build(state, actor, space) {
            legal.buildable.push(space);
        }
        if can_sell(state, actor, space) {
            legal.sellable.push(space);
        }
        if can_mortgage(state, actor, space) {
            legal.mortgageable.push(space);
        }
        if can_unmortgage(state, actor, space) {
            legal.unmortgageable.push(space);
        }
    }
    if !legal.buildable.is_empty() {
        legal.kinds.push(ActionKind::BuildImprovement);
    }
    if !legal.sellable.is_empty() {
        legal.kinds.push(ActionKind::SellImprovement);
    }
    if !legal.mortgageable.is_empty() {
        legal.kinds.push(ActionKind::Mortgage);
    }
    if !legal.unmortgageable.is_empty() {
        legal.kinds.push(ActionKind::Unmortgage);
    }
}

/// Whether `player` may add an improvement level to `space` right now.
///
/// Requires a monopolized, unmortgaged street below hotel level, the
/// even-build floor (only a least-improved group member may build), bank
/// stock for the next level, and the cash to pay for it.
#[must_use]
pub fn can_build(state: &GameState, player: PlayerId, space: SpaceId) -> bool {
    let Some(holding) = state.holding(space) else {
        return false;
    };
    let Some(group) = state.board.space(space).group() else {
        return false;
    };
    if holding.owner != player || holding.mortgaged || holding.level >= 5 {
        return false;
    }
    if !state.owns_full_group(player, group) {
        return false;
    }
    // Mortgaged group members block building anywhere in the group.
    let members = state.board.group_members(group);
    if members
        .iter()
        .any(|&m| state.holding(m).is_some_and(|h| h.mortgaged))
    {
        return false;
    }
    let min_level = members
        .iter()
        .map(|&m| state.holding(m).map(|h| h.level).unwrap_or(0))
        .min()
        .unwrap_or(0);
    if holding.level != min_level {
        return false;
    }
    let stock_ok = if holding.level == 4 {
        state.hotels_available >= 1
    } else {
        state.houses_available >= 1
    };
    stock_ok && state.player(player).cash >= group.house_cost()
}

/// Whether `player` may remove an improvement level from `space` right now.
///
/// Only a most-improved group member may sell; breaking a hotel back to
/// four houses needs four houses in the bank.
#[must_use]
pub fn can_sell(state: &GameState, player: PlayerId, space: SpaceId) -> bool {
    let Some(holding) = state.holding(space) else {
        return false;
    };
    let Some(group) = state.board.space(space).group() else {
        return false;
    };
    if holding.owner != player || holding.level == 0 {
        return false;
    }
    let max_level = state
        .board
        .group_members(group)
        .iter()
        .map(|&m| state.holding(m).map(|h| h.level).unwrap_or(0))
        .max()
        .unwrap_or(0);
    if holding.level != max_level {
        return false;
    }
    holding.level != 5 || state.houses_available >= 4
}

/// Whether `player` may mortgage `space`: owned, unmortgaged, and (for
/// streets) unimproved.
#[must_use]
pub fn can_mortgage(state: &GameState, player: PlayerId, space: SpaceId) -> bool {
    state.holding(space).is_some_and(|h| {
        h.owner == player && !h.mortgaged && h.level == 0
    })
}

/// Whether `player` may lift the mortgage on `space`.
#[must_use]
pub fn can_unmortgage(state: &GameState, player: PlayerId, space: SpaceId) -> bool {
    let Some(holding) = state.holding(space) else {
        return false;
    };
    let cost = state.board.space(space).unmortgage_cost.unwrap_or(i64::MAX);
    holding.owner == player && holding.mortgaged && state.player(player).cash >= cost
}

fn responder_can_accept(state: &GameState, trade: &TradeOffer) -> bool {
    let responder = state.player(trade.responder);
    responder.cash >= trade.cash_asked
        && responder.jail_card_count() >= trade.jail_cards_asked as usize
        && trade
            .spaces_asked
            .iter()
            .all(|&s| state.owner_of(s) == Some(trade.responder))
}

/// Validate a submitted action for the current decision point.
///
/// Returns without mutating anything; `Ok(())` means the engine may apply
/// the action.
pub fn validate(state: &GameState, action: &Action) -> Result<(), EngineError> {
    if state.phase == Phase::Terminal {
        return Err(EngineError::GameOver);
    }

    let kind = action.kind();
    let phase = state.phase;
    let legal = legal_actions(state);

    if matches!(kind, ActionKind::PayRent | ActionKind::PayTax) {
        return Err(EngineError::illegal(
            kind,
            phase,
            "payment actions are applied automatically",
        ));
    }
    if !legal.allows(kind) {
        return Err(EngineError::illegal(
            kind,
            phase,
            "kind not in the current legal set",
        ));
    }

    match action {
        Action::Bid { amount } => {
            let (min, max) = legal.bid_range.ok_or_else(|| {
                EngineError::illegal(kind, phase, "no bid is possible")
            })?;
            if *amount < min || *amount > max {
                return Err(EngineError::illegal(
                    kind,
                    phase,
                    format!("bid {amount} outside [{min}, {max}]"),
                ));
            }
        }
        Action::BuildImprovement { space } => {
            if !legal.buildable.contains(space) {
                return Err(EngineError::illegal(kind, phase, format!("cannot build on {space}")));
            }
        }
        Action::SellImprovement { space } => {
            if !legal.sellable.contains(space) {
                return Err(EngineError::illegal(kind, phase, format!("cannot sell from {space}")));
            }
        }
        Action::Mortgage { space } => {
            if !legal.mortgageable.contains(space) {
                return Err(EngineError::illegal(kind, phase, format!("cannot mortgage {space}")));
            }
        }
        Action::Unmortgage { space } => {
            if !legal.unmortgageable.contains(space) {
                return Err(EngineError::illegal(kind, phase, format!("cannot unmortgage {space}")));
            }
        }
        Action::ProposeTrade(offer) => {
            validate_trade(state, offer)?;
        }
        _ => {}
    }

    Ok(())
}

/// Validate a trade offer's bundles before it becomes pending.
pub fn validate_trade(state: &GameState, offer: &TradeOffer) -> Result<(), EngineError> {
    let invalid = |reason: String| Err(EngineError::InvalidTradeOffer(reason));

    if offer.proposer == offer.responder {
        return invalid("proposer and responder are the same player".into());
    }
    if offer.proposer != state.actor() {
        return invalid("only the acting player may propose".into());
    }
    if offer.responder.index() >= state.player_count() {
        return invalid(format!("no such player {}", offer.responder));
    }
    if state.player(offer.responder).bankrupt {
        return invalid(format!("{} is bankrupt", offer.responder));
    }
    if offer.is_empty() {
        return invalid("offer moves nothing".into());
    }
    if offer.cash_offered < 0 || offer.cash_asked < 0 {
        return invalid("negative cash amount".into());
    }
    if offer.cash_offered > state.player(offer.proposer).cash {
        return invalid("proposer cannot cover offered cash".into());
    }
    if offer.cash_asked > state.player(offer.responder).cash {
        return invalid("responder cannot cover asked cash".into());
    }
    if state.player(offer.proposer).jail_card_count() < offer.jail_cards_offered as usize {
        return invalid("proposer lacks offered jail cards".into());
    }
    if state.player(offer.responder).jail_card_count() < offer.jail_cards_asked as usize {
        return invalid("responder lacks asked jail cards".into());
    }
    for &space in &offer.spaces_offered {
        if state.owner_of(space) != Some(offer.proposer) {
            return invalid(format!(
                "proposer does not own {}",
                state.board.space(space).name
            ));
        }
    }
    for &space in &offer.spaces_asked {
        if state.owner_of(space) != Some(offer.responder) {
            return invalid(format!(
                "responder does not own {}",
                state.board.space(space).name
            ));
        }
    }
    let mut all: Vec<SpaceId> = offer
        .spaces_offered
        .iter()
        .chain(offer.spaces_asked.iter())
        .copied()
        .collect();
    all.sort_unstable();
    all.dedup();
    if all.len() != offer.spaces_offered.len() + offer.spaces_asked.len() {
        return invalid("a property appears twice in the offer".into());
    }
    // Moving a street out of a group that carries houses would strand the
    // improvements without a monopoly; the buildings must be sold first.
    for &space in &all {
        if let Some(group) = state.board.space(space).group() {
            let improved = state
                .board
                .group_members(group)
                .iter()
                .any(|&m| state.holding(m).is_some_and(|h| h.level > 0));
            if improved {
                return invalid(format!(
                    "{} is in a color group with improvements",
                    state.board.space(space).name
                ));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameConfig;
    use crate::state::Holding;

    fn fresh() -> GameState {
        GameState::new(GameConfig::new(3), &["A", "B", "C"], 7)
    }

    #[test]
    fn test_awaiting_roll_mask() {
        let state = fresh();
        let legal = legal_actions(&state);
        assert_eq!(legal.kinds(), &[ActionKind::RollDice]);
        assert!(validate(&state, &Action::RollDice).is_ok());
        assert!(validate(&state, &Action::EndTurn).is_err());
    }

    #[test]
    fn test_payment_actions_rejected() {
        let state = fresh();
        let err = validate(
            &state,
            &Action::PayTax { amount: 100 },
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::IllegalAction { .. }));
    }

    #[test]
    fn test_buy_requires_cash() {
        let mut state = fresh();
        state.phase = Phase::AwaitingBuyDecision;
        state.players[PlayerId::new(0)].position = 39; // Boardwalk, $400

        let legal = legal_actions(&state);
        assert!(legal.allows(ActionKind::BuyProperty));
        assert!(legal.allows(ActionKind::DeclineBuy));

        state.players[PlayerId::new(0)].cash = 399;
        // Keep the ledger consistent for any later audit.
        state.ledger.collect(1101);
        let legal = legal_actions(&state);
        assert!(!legal.allows(ActionKind::BuyProperty));
        assert!(legal.allows(ActionKind::DeclineBuy));
    }

    #[test]
    fn test_even_build_floor() {
        let mut state = fresh();
        let p0 = PlayerId::new(0);
        state.phase = Phase::PostMoveActions;
        state.holdings.insert(SpaceId::new(1), Holding::of(p0));
        state.holdings.insert(SpaceId::new(3), Holding::of(p0));

        // Level playing field: both buildable.
        assert!(can_build(&state, p0, SpaceId::new(1)));
        assert!(can_build(&state, p0, SpaceId::new(3)));

        // Raise Mediterranean to 1; only Baltic may build now.
        state.holdings.get_mut(&SpaceId::new(1)).unwrap().level = 1;
        state.houses_available -= 1;
        assert!(!can_build(&state, p0, SpaceId::new(1)));
        assert!(can_build(&state, p0, SpaceId::new(3)));

        // Selling mirrors it: only Mediterranean may sell.
        assert!(can_sell(&state, p0, SpaceId::new(1)));
        assert!(!can_sell(&state, p0, SpaceId::new(3)));
    }

    #[test]
    fn test_build_requires_monopoly_and_mortgage_free_group() {
        let mut state = fresh();
        let p0 = PlayerId::new(0);
        state.holdings.insert(SpaceId::new(1), Holding::of(p0));
        assert!(!can_build(&state, p0, SpaceId::new(1)));

        state.holdings.insert(SpaceId::new(3), Holding::of(p0));
        assert!(can_build(&state, p0, SpaceId::new(1)));

        state.holdings.get_mut(&SpaceId::new(3)).unwrap().mortgaged = true;
        assert!(!can_build(&state, p0, SpaceId::new(1)));
    }

    #[test]
    fn test_hotel_stock_gates_build_and_sell() {
        let mut state = fresh();
        let p0 = PlayerId::new(0);
        state
            .holdings
            .insert(SpaceId::new(1), Holding { owner: p0, level: 4, mortgaged: false });
        state
            .holdings
            .insert(SpaceId::new(3), Holding { owner: p0, level: 4, mortgaged: false });
        state.houses_available -= 8;

        state.hotels_available = 0;
        assert!(!can_build(&state, p0, SpaceId::new(1)));
        state.hotels_available = 1;
        assert!(can_build(&state, p0, SpaceId::new(1)));

        // A placed hotel cannot be broken down without 4 bank houses.
        state.holdings.get_mut(&SpaceId::new(1)).unwrap().level = 5;
        state.houses_available = 3;
        assert!(!can_sell(&state, p0, SpaceId::new(1)));
        state.houses_available = 4;
        assert!(can_sell(&state, p0, SpaceId::new(1)));
    }

    #[test]
    fn test_mortgage_legality() {
        let mut state = fresh();
        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);
        state.holdings.insert(SpaceId::new(5), Holding::of(p0));

        assert!(can_mortgage(&state, p0, SpaceId::new(5)));
        assert!(!can_mortgage(&state, p1, SpaceId::new(5)));

        state.holdings.get_mut(&SpaceId::new(5)).unwrap().mortgaged = true;
        assert!(!can_mortgage(&state, p0, SpaceId::new(5)));
        assert!(can_unmortgage(&state, p0, SpaceId::new(5)));

        state.players[p0].cash = 0;
        state.ledger.collect(1500);
        assert!(!can_unmortgage(&state, p0, SpaceId::new(5)));
    }

    #[test]
    fn test_trade_validation() {
        let mut state = fresh();
        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);
        state.phase = Phase::PostMoveActions;
        state.holdings.insert(SpaceId::new(1), Holding::of(p0));

        // Self-trade.
        let offer = TradeOffer::new(p0, p0, 10, [], 0, []);
        assert!(matches!(
            validate_trade(&state, &offer),
            Err(EngineError::InvalidTradeOffer(_))
        ));

        // Asking for a property the responder does not own.
        let offer = TradeOffer::new(p0, p1, 0, [SpaceId::new(1)], 0, [SpaceId::new(3)]);
        assert!(validate_trade(&state, &offer).is_err());

        // Well-formed.
        let offer = TradeOffer::new(p0, p1, 50, [SpaceId::new(1)], 100, []);
        assert!(validate_trade(&state, &offer).is_ok());
        assert!(validate(&state, &Action::ProposeTrade(offer)).is_ok());
    }

    #[test]
    fn test_debt_settlement_mask() {
        let mut state = fresh();
        let p0 = PlayerId::new(0);
        state.holdings.insert(SpaceId::new(5), Holding::of(p0));
        state.phase = Phase::DebtSettlement;
        state.pending_debt = Some(crate::state::PendingDebt {
            debtor: p0,
            creditor: crate::state::Creditor::Bank,
            resume: crate::state::DebtResume::PostMove,
        });

        let legal = legal_actions(&state);
        assert!(legal.allows(ActionKind::Mortgage));
        assert!(legal.allows(ActionKind::DeclareBankruptcy));
        assert!(!legal.allows(ActionKind::EndTurn));
        assert!(!legal.allows(ActionKind::BuildImprovement));
    }

    #[test]
    fn test_candidate_actions_enumeration() {
        let mut state = fresh();
        let p0 = PlayerId::new(0);
        state.phase = Phase::PostMoveActions;
        state.holdings.insert(SpaceId::new(5), Holding::of(p0));

        let legal = legal_actions(&state);
        let candidates = legal.candidate_actions();
        assert!(candidates.contains(&Action::EndTurn));
        assert!(candidates.contains(&Action::Mortgage { space: SpaceId::new(5) }));
        // Trades are legal as a kind but not enumerated.
        assert!(legal.allows(ActionKind::ProposeTrade));
        assert!(!candidates
            .iter()
            .any(|a| a.kind() == ActionKind::ProposeTrade));
    }

    #[test]
    fn test_action_serde_round_trip() {
        let action = Action::Bid { amount: 120 };
        let json = serde_json::to_string(&action).unwrap();
        let back: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(action, back);
    }
}
