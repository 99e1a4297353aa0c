use crate::strategy::qlearning_common::{partition, QTable};
use crate::{SeatView, Strategy};
use rand::{thread_rng, Rng};
use store::Move;

/// Plays the move with the highest learned value for the current state
/// partition. With a nonzero `epsilon` (training only) it instead picks
/// uniformly at random that fraction of the time; at inference epsilon is
/// 0 and the policy is pure exploitation.
#[derive(Debug, Clone)]
pub struct QLearningStrategy {
    table: QTable,
    epsilon: f64,
}

impl QLearningStrategy {
    pub fn new(table: QTable) -> Self {
        Self {
            table,
            epsilon: 0.0,
        }
    }

    pub fn with_exploration(table: QTable, epsilon: f64) -> Self {
        Self { table, epsilon }
    }

    pub fn table(&self) -> &QTable {
        &self.table
    }
}

impl Strategy for QLearningStrategy {
    fn choose_move(&mut self, moves: &[Move], view: SeatView<'_>) -> usize {
        if self.epsilon > 0.0 {
            let mut rng = thread_rng();
            if rng.gen::<f64>() < self.epsilon {
                return rng.gen_range(0..moves.len());
            }
        }
        let key = partition(view.state);
        self.table.best_index(&key, moves)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::qlearning_common::QLearningConfig;
    use store::{DiceSet, GameState, Mark, RowColor};

    #[test]
    fn test_exploits_learned_values() {
        let mut state = GameState::new(2);
        state.set_dice(DiceSet {
            colored: [1, 1, 1, 1],
            whites: (3, 4),
        });
        let moves = state.legal_moves(1);
        let key = partition(&state);

        let config = QLearningConfig::default();
        let mut table = QTable::new();
        table.update(
            key.clone(),
            Move::Single(Mark {
                color: RowColor::Green,
                number: 7,
            }),
            50.0,
            &config,
        );

        let mut strategy = QLearningStrategy::new(table);
        let index = strategy.choose_move(&moves, SeatView {
            state: &state,
            seat: 1,
        });
        assert_eq!(
            moves[index],
            Move::Single(Mark {
                color: RowColor::Green,
                number: 7,
            })
        );
    }

    #[test]
    fn test_empty_table_takes_first_offered() {
        let mut state = GameState::new(2);
        state.set_dice(DiceSet {
            colored: [1, 1, 1, 1],
            whites: (3, 4),
        });
        let moves = state.legal_moves(0);
        let mut strategy = QLearningStrategy::new(QTable::new());
        let index = strategy.choose_move(&moves, SeatView {
            state: &state,
            seat: 0,
        });
        assert_eq!(index, 0);
    }
}
