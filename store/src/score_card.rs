//! Per-seat scorecard state and scoring arithmetic.
use crate::game_rules_moves::{Mark, Move};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The four scoring rows of a Qwixx card.
#[derive(
    Debug, Clone, Copy, Eq, Ord, PartialEq, PartialOrd, Hash, Serialize, Deserialize,
)]
pub enum RowColor {
    Red,
    Yellow,
    Green,
    Blue,
}

impl RowColor {
    pub const ALL: [RowColor; 4] = [
        RowColor::Red,
        RowColor::Yellow,
        RowColor::Green,
        RowColor::Blue,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for RowColor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RowColor::Red => write!(f, "Red"),
            RowColor::Yellow => write!(f, "Yellow"),
            RowColor::Green => write!(f, "Green"),
            RowColor::Blue => write!(f, "Blue"),
        }
    }
}

/// Marking direction of a row, fixed per color: Red and Yellow run 2..12,
/// Green and Blue run 12..2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Increasing,
    Decreasing,
}

/// One scoring row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub color: RowColor,
    pub direction: Direction,
    /// Last number marked; 0 (increasing) or 13 (decreasing) while empty
    pub last_number: u8,
    pub x_count: u8,
    pub locked: bool,
}

impl Row {
    pub fn new(color: RowColor) -> Self {
        let direction = match color {
            RowColor::Red | RowColor::Yellow => Direction::Increasing,
            RowColor::Green | RowColor::Blue => Direction::Decreasing,
        };
        Self {
            color,
            direction,
            last_number: match direction {
                Direction::Increasing => 0,
                Direction::Decreasing => 13,
            },
            x_count: 0,
            locked: false,
        }
    }

    /// The only number that can lock this row: 12 increasing, 2 decreasing.
    pub fn terminal_value(&self) -> u8 {
        match self.direction {
            Direction::Increasing => 12,
            Direction::Decreasing => 2,
        }
    }

    /// True if `number` strictly extends the row in its direction.
    pub fn extends(&self, number: u8) -> bool {
        match self.direction {
            Direction::Increasing => number > self.last_number,
            Direction::Decreasing => number < self.last_number,
        }
    }
}

/// The score contribution of n crosses in one row.
pub fn triangular(n: u8) -> i32 {
    let n = n as i32;
    n * (n + 1) / 2
}

/// Points lost per penalty.
pub const PENALTY_COST: i32 = 5;

/// A seat's scorecard: four rows plus a penalty counter.
///
/// Owned exclusively by one seat and mutated only through engine-mediated
/// move application. Rows are never re-validated here: the move generator is
/// responsible for only producing marks that are legal on the current card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreCard {
    rows: [Row; 4],
    pub penalties: u8,
}

impl Default for ScoreCard {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreCard {
    pub fn new() -> Self {
        Self {
            rows: [
                Row::new(RowColor::Red),
                Row::new(RowColor::Yellow),
                Row::new(RowColor::Green),
                Row::new(RowColor::Blue),
            ],
            penalties: 0,
        }
    }

    pub fn row(&self, color: RowColor) -> &Row {
        &self.rows[color.index()]
    }

    pub fn rows(&self) -> &[Row; 4] {
        &self.rows
    }

    /// Apply a chosen move, returning the colors whose rows reached their
    /// terminal value. The caller (the engine) turns those into pending
    /// locks; `locked` is only set at the global lock-commit boundary.
    ///
    /// Both halves of a Double were validated together against the pre-turn
    /// card, so the second half is applied without re-validation.
    pub fn apply_move(&mut self, chosen_move: &Move) -> Vec<RowColor> {
        let mut terminal_colors = Vec::new();
        match chosen_move {
            Move::Pass => {}
            Move::Penalty => self.penalties += 1,
            Move::Single(mark) => {
                if self.mark_row(*mark) {
                    terminal_colors.push(mark.color);
                }
            }
            Move::Double(first, second) => {
                if self.mark_row(*first) {
                    terminal_colors.push(first.color);
                }
                if self.mark_row(*second) {
                    terminal_colors.push(second.color);
                }
            }
        }
        terminal_colors
    }

    /// Cross off a number. A terminal mark counts double. Returns true if
    /// the row reached its terminal value.
    fn mark_row(&mut self, mark: Mark) -> bool {
        let row = &mut self.rows[mark.color.index()];
        row.last_number = mark.number;
        if mark.number == row.terminal_value() {
            row.x_count += 2;
            true
        } else {
            row.x_count += 1;
            false
        }
    }

    pub(crate) fn lock_row(&mut self, color: RowColor) {
        self.rows[color.index()].locked = true;
    }

    pub fn score(&self) -> i32 {
        self.rows.iter().map(|row| triangular(row.x_count)).sum::<i32>()
            - PENALTY_COST * self.penalties as i32
    }

    /// Score this card would have after `chosen_move`, computed from the
    /// hypothetical cross counts without touching the live rows.
    pub fn score_with(&self, chosen_move: &Move) -> i32 {
        let mut x_counts = [0u8; 4];
        for (slot, row) in x_counts.iter_mut().zip(self.rows.iter()) {
            *slot = row.x_count;
        }
        let mut penalties = self.penalties;
        match chosen_move {
            Move::Pass => {}
            Move::Penalty => penalties += 1,
            Move::Single(mark) => self.bump(&mut x_counts, mark),
            Move::Double(first, second) => {
                self.bump(&mut x_counts, first);
                self.bump(&mut x_counts, second);
            }
        }
        x_counts.iter().map(|n| triangular(*n)).sum::<i32>() - PENALTY_COST * penalties as i32
    }

    fn bump(&self, x_counts: &mut [u8; 4], mark: &Mark) {
        let index = mark.color.index();
        x_counts[index] += if mark.number == self.rows[index].terminal_value() {
            2
        } else {
            1
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_card() {
        let card = ScoreCard::new();
        assert_eq!(card.row(RowColor::Red).last_number, 0);
        assert_eq!(card.row(RowColor::Yellow).last_number, 0);
        assert_eq!(card.row(RowColor::Green).last_number, 13);
        assert_eq!(card.row(RowColor::Blue).last_number, 13);
        assert_eq!(card.score(), 0);
    }

    #[test]
    fn test_triangular() {
        let values: Vec<i32> = (0u8..=5).map(triangular).collect();
        assert_eq!(values, vec![0, 1, 3, 6, 10, 15]);
    }

    #[test]
    fn test_mark_and_score() {
        let mut card = ScoreCard::new();
        card.apply_move(&Move::Single(Mark {
            color: RowColor::Red,
            number: 5,
        }));
        card.apply_move(&Move::Single(Mark {
            color: RowColor::Red,
            number: 8,
        }));
        card.apply_move(&Move::Single(Mark {
            color: RowColor::Green,
            number: 10,
        }));
        card.apply_move(&Move::Penalty);
        assert_eq!(card.row(RowColor::Red).x_count, 2);
        assert_eq!(card.row(RowColor::Red).last_number, 8);
        assert_eq!(card.row(RowColor::Green).last_number, 10);
        // 3 + 1 - 5
        assert_eq!(card.score(), -1);
    }

    #[test]
    fn test_terminal_mark_counts_double() {
        let mut card = ScoreCard::new();
        for number in [2, 3, 4, 5, 9] {
            card.apply_move(&Move::Single(Mark {
                color: RowColor::Red,
                number,
            }));
        }
        assert_eq!(card.row(RowColor::Red).x_count, 5);
        let terminal = card.apply_move(&Move::Single(Mark {
            color: RowColor::Red,
            number: 12,
        }));
        assert_eq!(terminal, vec![RowColor::Red]);
        assert_eq!(card.row(RowColor::Red).x_count, 7);
        // the lock itself is committed by the engine, not here
        assert!(!card.row(RowColor::Red).locked);
    }

    #[test]
    fn test_x_count_never_decreases() {
        let mut card = ScoreCard::new();
        let mut previous = 0;
        for number in [2, 7, 5, 11] {
            // 5 after 7 regresses last_number (double-halves are validated
            // together, not sequentially) but x_count still only grows
            card.apply_move(&Move::Single(Mark {
                color: RowColor::Yellow,
                number,
            }));
            let x_count = card.row(RowColor::Yellow).x_count;
            assert!(x_count >= previous);
            previous = x_count;
        }
        assert_eq!(previous, 4);
    }

    #[test]
    fn test_score_with_matches_apply() {
        let mut card = ScoreCard::new();
        card.apply_move(&Move::Single(Mark {
            color: RowColor::Blue,
            number: 9,
        }));
        let moves = [
            Move::Pass,
            Move::Penalty,
            Move::Single(Mark {
                color: RowColor::Red,
                number: 7,
            }),
            Move::Double(
                Mark {
                    color: RowColor::Red,
                    number: 7,
                },
                Mark {
                    color: RowColor::Blue,
                    number: 4,
                },
            ),
        ];
        for chosen_move in &moves {
            let predicted = card.score_with(chosen_move);
            let mut scratch = card.clone();
            scratch.apply_move(chosen_move);
            assert_eq!(predicted, scratch.score());
        }
        // the live card was not altered by the predictions
        assert_eq!(card.row(RowColor::Blue).last_number, 9);
        assert_eq!(card.score(), 1);
    }
}
