//! Move legality and enumeration for one seat against one dice roll.
use crate::dice::DiceSet;
use crate::score_card::{RowColor, ScoreCard};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Crossing off one number on one row.
///
/// Field order matters: the derived `Ord` sorts marks by (color, number),
/// which is the canonical enumeration order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Mark {
    pub color: RowColor,
    pub number: u8,
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} in {}", self.number, self.color)
    }
}

/// A seat's choice for one round.
///
/// The variant order gives the derived `Ord` the required deterministic
/// enumeration order: singles sorted by (color, number), then doubles,
/// then Pass / Penalty. Two moves are equal when they cross the same
/// numbers on the same rows, whatever physical dice produced them.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Move {
    Single(Mark),
    /// A WhitePair mark and a ColorPair mark taken together, applied first
    /// then second. Both halves are validated against the same pre-turn
    /// card, never sequentially.
    Double(Mark, Mark),
    Pass,
    Penalty,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Move::Single(mark) => write!(f, "{}", mark),
            Move::Double(first, second) => write!(f, "{} and {}", first, second),
            Move::Pass => write!(f, "Pass"),
            Move::Penalty => write!(f, "Penalty"),
        }
    }
}

/// Which move set a seat is entitled to this round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// The seat that rolled: white and colored pairings, or a forced Penalty
    Active,
    /// Any other seat: the white pairing or Pass
    Inactive,
}

/// Computes the legal move set for one card against one dice roll.
///
/// Pure with respect to the card: every mark, including both halves of a
/// Double, is checked against the card as it stands before the turn.
pub struct MoveRules<'a> {
    card: &'a ScoreCard,
    dice: &'a DiceSet,
}

impl<'a> MoveRules<'a> {
    pub fn new(card: &'a ScoreCard, dice: &'a DiceSet) -> Self {
        Self { card, dice }
    }

    /// Whether `sum` may be crossed off on `color`'s row:
    /// - the row is not locked,
    /// - the sum strictly extends the row in its direction,
    /// - the terminal value is reserved for rows with at least five crosses.
    pub fn mark_allowed(&self, color: RowColor, sum: u8) -> bool {
        let row = self.card.row(color);
        if row.locked {
            return false;
        }
        if !row.extends(sum) {
            return false;
        }
        if row.x_count < 5 && sum == row.terminal_value() {
            return false;
        }
        true
    }

    /// Legal marks built from the two white dice, one candidate per color.
    pub fn white_pair_marks(&self) -> Vec<Mark> {
        let sum = self.dice.white_sum();
        RowColor::ALL
            .iter()
            .filter(|color| self.mark_allowed(**color, sum))
            .map(|color| Mark {
                color: *color,
                number: sum,
            })
            .collect()
    }

    /// Legal marks pairing each white die with the matching colored die.
    pub fn color_pair_marks(&self) -> Vec<Mark> {
        let mut marks = Vec::new();
        for color in RowColor::ALL {
            for sum in self.dice.color_sums(color) {
                if self.mark_allowed(color, sum) {
                    let mark = Mark { color, number: sum };
                    if !marks.contains(&mark) {
                        marks.push(mark);
                    }
                }
            }
        }
        marks
    }

    /// Enumerate the full move set for `role`, in canonical order.
    ///
    /// Active: all white and colored Singles, every WhitePair x ColorPair
    /// Double with identical halves dropped, deduplicated, plus Penalty.
    /// Inactive: the white Singles plus Pass; inactive seats are never
    /// offered a Penalty.
    pub fn moves(&self, role: Role) -> Vec<Move> {
        let white_marks = self.white_pair_marks();
        let mut moves: Vec<Move> = white_marks.iter().copied().map(Move::Single).collect();

        match role {
            Role::Inactive => {
                moves.sort_unstable();
                moves.push(Move::Pass);
            }
            Role::Active => {
                let color_marks = self.color_pair_marks();
                moves.extend(color_marks.iter().copied().map(Move::Single));
                for white_mark in &white_marks {
                    for color_mark in &color_marks {
                        if white_mark != color_mark {
                            moves.push(Move::Double(*white_mark, *color_mark));
                        }
                    }
                }
                moves.sort_unstable();
                moves.dedup();
                moves.push(Move::Penalty);
            }
        }
        moves
    }
}
