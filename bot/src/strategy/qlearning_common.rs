//! Shared pieces of the tabular Q-learning agent: the hyperparameter
//! block, the state partition function and the value table.
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use store::{GameState, Move, RowColor};

/// Hyperparameters for training and inference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QLearningConfig {
    /// Exploration probability during training; inference always uses 0
    pub epsilon: f64,
    /// Future-value discount
    pub gamma: f64,
    /// Learning rate a fresh (partition, move) pair starts at
    pub initial_rate: f64,
    /// Geometric decay applied to a pair's rate after each of its updates
    pub rate_decay: f64,
    /// Terminal reward when the learner wins
    pub win_reward: f64,
    /// Terminal reward otherwise
    pub loss_reward: f64,
}

impl Default for QLearningConfig {
    fn default() -> Self {
        Self {
            epsilon: 0.1,
            gamma: 0.95,
            initial_rate: 0.5,
            rate_decay: 0.999,
            win_reward: 200.0,
            loss_reward: -200.0,
        }
    }
}

/// Coarsened lookup key for one decision.
///
/// The full game state (rows, penalties, dice) collapses into a severity
/// byte plus one bucket per row per seat, so the table stays small enough
/// for tabular learning. The collapse is deliberately lossy; the learned
/// policy is expected to stay below the hand-coded heuristics.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateKey {
    /// min(total penalties, 7) * 4 + globally locked color count
    pub severity: u8,
    /// x_count / 3 for every row of every seat, in seat then color order
    pub row_buckets: Vec<u8>,
}

/// Collapse `state` into its partition key.
pub fn partition(state: &GameState) -> StateKey {
    let total_penalties: u8 = state
        .seats
        .iter()
        .map(|card| card.penalties)
        .sum::<u8>()
        .min(7);
    let severity = total_penalties * 4 + state.locked_colors().len() as u8;
    let mut row_buckets = Vec::with_capacity(state.seats.len() * 4);
    for card in &state.seats {
        for color in RowColor::ALL {
            row_buckets.push(card.row(color).x_count / 3);
        }
    }
    StateKey {
        severity,
        row_buckets,
    }
}

/// One cell of the table: the value estimate and the per-pair learning
/// rate, which decays geometrically with every update of this cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QEntry {
    pub value: f64,
    pub rate: f64,
}

/// Flattened cell used for JSON persistence (a map keyed by a struct does
/// not serialize directly).
#[derive(Debug, Serialize, Deserialize)]
struct QRecord {
    key: StateKey,
    chosen_move: Move,
    entry: QEntry,
}

/// The learned policy: value estimates per (partition, move) pair.
#[derive(Debug, Default, Clone)]
pub struct QTable {
    entries: HashMap<(StateKey, Move), QEntry>,
}

impl QTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Learned value of taking `chosen_move` under `key`; unseen pairs are 0.
    pub fn value(&self, key: &StateKey, chosen_move: &Move) -> f64 {
        self.entries
            .get(&(key.clone(), *chosen_move))
            .map(|entry| entry.value)
            .unwrap_or(0.0)
    }

    /// Max learned value over an offered move list (the bootstrap term).
    pub fn best_value(&self, key: &StateKey, moves: &[Move]) -> f64 {
        moves
            .iter()
            .map(|chosen_move| self.value(key, chosen_move))
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Index of the best offered move; ties go to the first encountered.
    pub fn best_index(&self, key: &StateKey, moves: &[Move]) -> usize {
        let mut best_index = 0;
        let mut best_value = f64::NEG_INFINITY;
        for (index, chosen_move) in moves.iter().enumerate() {
            let value = self.value(key, chosen_move);
            if value > best_value {
                best_index = index;
                best_value = value;
            }
        }
        best_index
    }

    /// Move the pair's estimate toward `target` by its current learning
    /// rate, then decay that rate.
    pub fn update(
        &mut self,
        key: StateKey,
        chosen_move: Move,
        target: f64,
        config: &QLearningConfig,
    ) {
        let entry = self
            .entries
            .entry((key, chosen_move))
            .or_insert(QEntry {
                value: 0.0,
                rate: config.initial_rate,
            });
        entry.value += entry.rate * (target - entry.value);
        entry.rate *= config.rate_decay;
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let records: Vec<QRecord> = self
            .entries
            .iter()
            .map(|((key, chosen_move), entry)| QRecord {
                key: key.clone(),
                chosen_move: *chosen_move,
                entry: *entry,
            })
            .collect();
        let data = serde_json::to_string(&records)?;
        std::fs::write(path, data)?;
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let data = std::fs::read_to_string(path)?;
        let records: Vec<QRecord> = serde_json::from_str(&data)?;
        let entries = records
            .into_iter()
            .map(|record| ((record.key, record.chosen_move), record.entry))
            .collect();
        Ok(Self { entries })
    }
}
