//! The environment: reset/step semantics over the turn engine.
//!
//! A thin synchronous wrapper for RL-style control loops. `reset` builds a
//! fresh engine and returns the first observation and mask; `step` applies
//! one action and reports the resulting observation, rewards, and
//! termination; `run` drives the registered agents to completion, enforcing
//! the illegal-action retry budget. The core holds no external resources;
//! `close` only releases the renderer.

pub mod encoding;
pub mod observation;

pub use observation::{AuctionView, DebtView, HoldingView, Observation, PlayerView};

use log::{info, warn};

use crate::agents::PlayerAgent;
use crate::catalog::{self, Action, LegalActions};
use crate::core::{EngineError, GameConfig, PlayerMap};
use crate::engine::{GameResult, Phase, TurnEngine};
use crate::state::GameState;

/// A renderer consumes read-only snapshots after each step. It must not
/// (and cannot) mutate game state.
pub trait Renderer {
    fn render(&mut self, observation: &Observation);
}

/// Result of one environment step.
#[derive(Clone, Debug)]
pub struct Step {
    /// Snapshot after the action was applied.
    pub observation: Observation,

    /// Per-player rewards: zero everywhere except the terminal transition
    /// (+1 winner, -1 losers, 0 all around on a draw).
    pub rewards: PlayerMap<f32>,

    /// Whether the game reached the terminal phase.
    pub done: bool,

    /// The result, once done.
    pub result: Option<GameResult>,
}

/// Synchronous turn-based environment.
pub struct Environment {
    config: GameConfig,
    engine: Option<TurnEngine>,
    agents: Vec<Box<dyn PlayerAgent>>,
    renderer: Option<Box<dyn Renderer>>,
}

impl Environment {
    /// Create an environment with the given rule table.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            engine: None,
            agents: Vec::new(),
            renderer: None,
        }
    }

    /// Attach a renderer; it receives a snapshot after every step.
    #[must_use]
    pub fn with_renderer(mut self, renderer: Box<dyn Renderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Start a fresh game with the given agents (one per configured
    /// player, in turn order). Returns the initial observation and the
    /// legal-action mask for the first decision point.
    pub fn reset(
        &mut self,
        agents: Vec<Box<dyn PlayerAgent>>,
        seed: u64,
    ) -> (Observation, LegalActions) {
        assert_eq!(
            agents.len(),
            self.config.player_count,
            "one agent per configured player"
        );

        let names: Vec<&str> = agents.iter().map(|a| a.name()).collect();
        let state = GameState::new(self.config.clone(), &names, seed);
        info!(
            "new game: {} players, seed {}",
            self.config.player_count, seed
        );

        let engine = TurnEngine::new(state);
        let observation = Observation::capture(engine.state());
        let legal = catalog::legal_actions(engine.state());

        self.agents = agents;
        self.engine = Some(engine);
        if let Some(renderer) = &mut self.renderer {
            renderer.render(&observation);
        }
        (observation, legal)
    }

    /// The engine, for inspection between steps.
    #[must_use]
    pub fn engine(&self) -> &TurnEngine {
        self.engine.as_ref().expect("environment has been reset")
    }

    /// The legal-action mask for the current decision point.
    #[must_use]
    pub fn legal_actions(&self) -> LegalActions {
        catalog::legal_actions(self.engine().state())
    }

    /// Apply one action. Illegal actions return the error and leave the
    /// state untouched, so the caller may retry with a corrected action.
    pub fn step(&mut self, action: Action) -> Result<Step, EngineError> {
        let engine = self.engine.as_mut().expect("environment has been reset");
        engine.apply(action)?;

        let done = engine.state().phase == Phase::Terminal;
        let result = engine.result();
        let mut rewards = PlayerMap::with_value(engine.state().player_count(), 0.0);
        if let Some(GameResult::Winner(winner)) = &result {
            for id in rewards.player_ids().collect::<Vec<_>>() {
                rewards[id] = if id == *winner { 1.0 } else { -1.0 };
            }
        }

        let observation = Observation::capture(engine.state());
        if let Some(renderer) = &mut self.renderer {
            renderer.render(&observation);
        }

        Ok(Step {
            observation,
            rewards,
            done,
            result,
        })
    }

    /// Drive the registered agents until the game ends, enforcing the
    /// illegal-action retry budget: an agent that keeps submitting illegal
    /// actions is auto-resolved with the phase's safe default action.
    pub fn run(&mut self) -> GameResult {
        loop {
            let engine = self.engine.as_ref().expect("environment has been reset");
            if let Some(result) = engine.result() {
                return result;
            }

            let observation = Observation::capture(engine.state());
            let legal = catalog::legal_actions(engine.state());
            let actor = legal.actor;
            let retries = self.config.illegal_action_retries;

            let mut applied = false;
            for _ in 0..=retries {
                let action = self.agents[actor.index()].decide(&observation, &legal);
                match self.step(action) {
                    Ok(_) => {
                        applied = true;
                        break;
                    }
                    Err(EngineError::IllegalAction { kind, .. }) => {
                        warn!("{} submitted an illegal {:?}; asking again", actor, kind);
                    }
                    Err(EngineError::InvalidTradeOffer(reason)) => {
                        warn!("{} proposed an invalid trade ({reason}); asking again", actor);
                    }
                    Err(err) => panic!("engine failure: {err}"),
                }
            }

            if !applied {
                let fallback = self
                    .engine()
                    .default_action()
                    .expect("non-terminal phases have a default");
                warn!(
                    "{} exhausted the retry budget; forcing {:?}",
                    actor, fallback
                );
                self.step(fallback)
                    .expect("the default action is always legal");
            }
        }
    }

    /// Release external collaborators. The core itself holds no resources.
    pub fn close(&mut self) {
        info!("closing environment");
        self.renderer = None;
        self.agents.clear();
    }
}
