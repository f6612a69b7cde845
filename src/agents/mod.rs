//! Player agents: the decision capability and two reference policies.
//!
//! An agent is anything that can pick a legal action when asked. Variants
//! are separate implementations of one trait; there is no hierarchy. A
//! human-driven implementation would query a UI behind the same signature.

use crate::catalog::{Action, ActionKind, LegalActions};
use crate::core::GameRng;
use crate::env::Observation;

/// The player capability: pick an action from the provided mask.
///
/// Implementations should return an action drawn from `legal`; the
/// environment re-asks (up to the retry budget) and then substitutes a safe
/// default if they do not.
pub trait PlayerAgent {
    /// Display name, used for the player roster.
    fn name(&self) -> &str;

    /// Choose an action for the current decision point.
    fn decide(&mut self, observation: &Observation, legal: &LegalActions) -> Action;
}

/// Uniform-random agent with its own seeded RNG.
///
/// Samples among the mask's enumerable candidates; a sampled bid draws a
/// uniform amount from the open bid range. Never proposes trades (their
/// parameter space is unbounded).
pub struct RandomAgent {
    name: String,
    rng: GameRng,
}

impl RandomAgent {
    /// Create a random agent with its own RNG seed.
    #[must_use]
    pub fn new(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            rng: GameRng::new(seed),
        }
    }
}

impl PlayerAgent for RandomAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn decide(&mut self, _observation: &Observation, legal: &LegalActions) -> Action {
        let candidates = legal.candidate_actions();
        let choice = self
            .rng
            .choose(&candidates)
            .cloned()
            .unwrap_or(Action::EndTurn);

        // Re-roll the sampled bid across the whole open range.
        if let Action::Bid { .. } = choice {
            if let Some((min, max)) = legal.bid_range {
                let amount = if min == max {
                    min
                } else {
                    self.rng.gen_range(min..max + 1)
                };
                return Action::Bid { amount };
            }
        }
        choice
    }
}

/// Deterministic buy-and-build policy.
///
/// Buys whatever it lands on, escapes jail as cheaply as possible, builds
/// whenever it can, sits out auctions, and rejects all trades.
pub struct GreedyAgent {
    name: String,
}

impl GreedyAgent {
    /// Create a greedy agent.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl PlayerAgent for GreedyAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn decide(&mut self, _observation: &Observation, legal: &LegalActions) -> Action {
        if legal.allows(ActionKind::BuyProperty) {
            return Action::BuyProperty;
        }
        if legal.allows(ActionKind::UseJailCard) {
            return Action::UseJailCard;
        }
        if legal.allows(ActionKind::PayJailFine) {
            return Action::PayJailFine;
        }
        if let Some(&space) = legal.buildable.first() {
            return Action::BuildImprovement { space };
        }
        if legal.allows(ActionKind::EndTurn) {
            return Action::EndTurn;
        }
        if legal.allows(ActionKind::DeclineBuy) {
            return Action::DeclineBuy;
        }
        if legal.allows(ActionKind::PassBid) {
            return Action::PassBid;
        }
        if legal.allows(ActionKind::RejectTrade) {
            return Action::RejectTrade;
        }
        // Debt settlement: liquidate before conceding.
        if let Some(&space) = legal.sellable.first() {
            return Action::SellImprovement { space };
        }
        if let Some(&space) = legal.mortgageable.first() {
            return Action::Mortgage { space };
        }
        if legal.allows(ActionKind::DeclareBankruptcy) {
            return Action::DeclareBankruptcy;
        }
        Action::RollDice
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::core::GameConfig;
    use crate::state::GameState;

    #[test]
    fn test_random_agent_picks_legal_actions() {
        let state = GameState::new(GameConfig::new(2), &["A", "B"], 4);
        let legal = catalog::legal_actions(&state);
        let obs = Observation::capture(&state);

        let mut agent = RandomAgent::new("R", 1);
        for _ in 0..10 {
            let action = agent.decide(&obs, &legal);
            assert!(catalog::validate(&state, &action).is_ok());
        }
    }

    #[test]
    fn test_greedy_agent_rolls_at_turn_start() {
        let state = GameState::new(GameConfig::new(2), &["A", "B"], 4);
        let legal = catalog::legal_actions(&state);
        let obs = Observation::capture(&state);

        let mut agent = GreedyAgent::new("G");
        assert_eq!(agent.decide(&obs, &legal), Action::RollDice);
    }

    #[test]
    fn test_random_agent_is_deterministic_per_seed() {
        let state = GameState::new(GameConfig::new(2), &["A", "B"], 4);
        let legal = catalog::legal_actions(&state);
        let obs = Observation::capture(&state);

        let mut a = RandomAgent::new("R", 9);
        let mut b = RandomAgent::new("R", 9);
        for _ in 0..5 {
            assert_eq!(a.decide(&obs, &legal), b.decide(&obs, &legal));
        }
    }
}
