pub mod greedy;
pub mod heuristic_greedy;
pub mod heuristic_space;
pub mod qlearning;
pub mod qlearning_common;
pub mod qlearning_trainer;

pub use greedy::GreedyStrategy;
pub use heuristic_greedy::HeuristicGreedyStrategy;
pub use heuristic_space::HeuristicSpaceStrategy;
pub use qlearning::QLearningStrategy;
pub use qlearning_common::{partition, QLearningConfig, QTable, StateKey};
pub use qlearning_trainer::QTrainer;

use std::fmt;
use std::str::FromStr;

use store::{GameState, Move, ScoreCard};

/// What a strategy is allowed to look at when choosing: the whole game
/// state (snapshot, never mutated through here) and its own seat index.
#[derive(Clone, Copy)]
pub struct SeatView<'a> {
    pub state: &'a GameState,
    pub seat: usize,
}

impl<'a> SeatView<'a> {
    /// The acting seat's own scorecard.
    pub fn card(&self) -> &'a ScoreCard {
        &self.state.seats[self.seat]
    }
}

/// A pluggable decision rule.
///
/// Contract: the returned index satisfies `0 <= index < moves.len()`.
/// `moves` is never empty (Pass or Penalty is always offered) and its order
/// is stable for one decision, so index-based selection is well defined.
pub trait Strategy {
    fn choose_move(&mut self, moves: &[Move], view: SeatView<'_>) -> usize;
}

/// Strategy identifiers accepted by the harness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    Greedy,
    HeuristicGreedy,
    HeuristicSpace,
    QLearning,
}

impl StrategyKind {
    /// Instantiate the strategy. A trained policy is only consumed by
    /// [`StrategyKind::QLearning`]; without one the table is empty and the
    /// agent falls back to the first offered move on unseen states.
    pub fn build(&self, policy: Option<&QTable>) -> Box<dyn Strategy> {
        match self {
            StrategyKind::Greedy => Box::new(GreedyStrategy),
            StrategyKind::HeuristicGreedy => Box::new(HeuristicGreedyStrategy),
            StrategyKind::HeuristicSpace => Box::new(HeuristicSpaceStrategy),
            StrategyKind::QLearning => Box::new(QLearningStrategy::new(
                policy.cloned().unwrap_or_default(),
            )),
        }
    }
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "greedy" => Ok(StrategyKind::Greedy),
            "heuristic-greedy" => Ok(StrategyKind::HeuristicGreedy),
            "heuristic-space" => Ok(StrategyKind::HeuristicSpace),
            "qlearning" => Ok(StrategyKind::QLearning),
            _ => Err(format!("unknown strategy '{}'", name)),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StrategyKind::Greedy => write!(f, "greedy"),
            StrategyKind::HeuristicGreedy => write!(f, "heuristic-greedy"),
            StrategyKind::HeuristicSpace => write!(f, "heuristic-space"),
            StrategyKind::QLearning => write!(f, "qlearning"),
        }
    }
}
