//! Time-boxed self-play training loop for the tabular Q-learning policy.
use crate::strategy::greedy::GreedyStrategy;
use crate::strategy::qlearning_common::{partition, QLearningConfig, QTable, StateKey};
use crate::{SeatView, Strategy};
use log::{debug, info};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::time::{Duration, Instant};
use store::{DiceRoller, Error, GameState, Move};

/// Trains a [`QTable`] by playing two-seat games against a Greedy
/// opponent until a wall-clock budget runs out. The budget is checked
/// once per completed episode, never inside one.
pub struct QTrainer {
    config: QLearningConfig,
    table: QTable,
    roller: DiceRoller,
    rng: StdRng,
    opponent: GreedyStrategy,
    episodes: usize,
}

impl QTrainer {
    pub fn new(config: QLearningConfig, seed: Option<u64>) -> Self {
        Self {
            config,
            table: QTable::new(),
            roller: DiceRoller::new(seed),
            rng: match seed {
                None => StdRng::from_rng(rand::thread_rng()).unwrap(),
                Some(seed) => SeedableRng::seed_from_u64(seed),
            },
            opponent: GreedyStrategy,
            episodes: 0,
        }
    }

    pub fn episodes(&self) -> usize {
        self.episodes
    }

    pub fn table(&self) -> &QTable {
        &self.table
    }

    pub fn into_table(self) -> QTable {
        self.table
    }

    /// Run training episodes until `budget` elapses.
    pub fn train(&mut self, budget: Duration) -> Result<(), Error> {
        let deadline = Instant::now() + budget;
        while Instant::now() < deadline {
            self.run_episode()?;
            self.episodes += 1;
            if self.episodes % 1000 == 0 {
                debug!(
                    "{} episodes, {} table entries",
                    self.episodes,
                    self.table.len()
                );
            }
        }
        info!(
            "trained for {:?}: {} episodes, {} table entries",
            budget,
            self.episodes,
            self.table.len()
        );
        Ok(())
    }

    /// One self-play episode: the learner holds seat 0, picks eps-greedily
    /// over the currently legal moves and receives 0 on every non-terminal
    /// transition; the terminal transition pays the win or loss reward.
    fn run_episode(&mut self) -> Result<(), Error> {
        const LEARNER: usize = 0;
        let mut state = GameState::new(2);
        let mut pending: Option<(StateKey, Move)> = None;

        while !state.is_ended() {
            state.set_dice(self.roller.roll());
            let seat_count = state.seats.len();
            let first = state.active_seat;
            for offset in 0..seat_count {
                let seat = (first + offset) % seat_count;
                let moves = state.legal_moves(seat);
                if seat == LEARNER {
                    let key = partition(&state);
                    // bootstrap the previous decision against this one
                    if let Some((previous_key, previous_move)) = pending.take() {
                        let target = self.config.gamma * self.table.best_value(&key, &moves);
                        self.table
                            .update(previous_key, previous_move, target, &self.config);
                    }
                    let index = if self.rng.gen::<f64>() < self.config.epsilon {
                        self.rng.gen_range(0..moves.len())
                    } else {
                        self.table.best_index(&key, &moves)
                    };
                    let chosen_move = moves[index];
                    state.apply_indexed(seat, &moves, index)?;
                    pending = Some((key, chosen_move));
                } else {
                    let index = self.opponent.choose_move(
                        &moves,
                        SeatView {
                            state: &state,
                            seat,
                        },
                    );
                    state.apply_indexed(seat, &moves, index)?;
                }
            }
            state.commit_locks();
            if !state.check_end() {
                state.advance_turn();
            }
        }

        if let Some((key, chosen_move)) = pending.take() {
            let scores = state.scores();
            let won = scores
                .iter()
                .enumerate()
                .all(|(seat, score)| seat == LEARNER || scores[LEARNER] > *score);
            let reward = if won {
                self.config.win_reward
            } else {
                self.config.loss_reward
            };
            self.table.update(key, chosen_move, reward, &self.config);
        }
        Ok(())
    }
}
