//! # Play a Qwixx game
//!
//! `GameState` owns one scorecard per seat and walks each round through the
//! turn state machine: Roll, ActiveMove, InactiveMoves, LockCommit,
//! EndCheck, then turn rotation. Dice are rolled by the caller (a session
//! or trainer owning a [`DiceRoller`](crate::DiceRoller)) and handed in, so
//! games stay reproducible under a fixed seed.
use crate::dice::DiceSet;
use crate::error::Error;
use crate::game_rules_moves::{Move, MoveRules, Role};
use crate::score_card::{RowColor, ScoreCard};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A seat reaching this many penalties ends the game.
pub const PENALTY_LIMIT: u8 = 4;

/// This many distinct locked colors (global, counted once per color) ends
/// the game.
pub const LOCKED_COLORS_LIMIT: usize = 2;

/// The different stages a game can be in. (not to be confused with the entire "GameState")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    InGame,
    Ended,
}

/// The reasons why a game could end
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Deserialize)]
pub enum EndGameReason {
    /// A seat took its fourth penalty
    PenaltyLimit { seat: usize },
    /// Two row colors are locked across the table
    RowsLocked,
}

/// Represents a Qwixx game: scorecards in seat order, the current dice
/// faces and the active seat index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub seats: Vec<ScoreCard>,
    pub dice: DiceSet,
    pub active_seat: usize,
    pub stage: Stage,
    pub end_reason: Option<EndGameReason>,
    /// Colors that received a terminal mark this round; locked for every
    /// seat at the next lock-commit boundary
    pending_locks: Vec<RowColor>,
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Stage: {:?}", self.stage)?;
        writeln!(f, "Dice: {}", self.dice.to_display_string())?;
        for (seat, card) in self.seats.iter().enumerate() {
            let marker = if seat == self.active_seat { "*" } else { " " };
            writeln!(f, "{}seat {}: {} points", marker, seat, card.score())?;
        }
        Ok(())
    }
}

impl GameState {
    /// Create a game with `seat_count` fresh scorecards, seat 0 active.
    pub fn new(seat_count: usize) -> Self {
        Self {
            seats: vec![ScoreCard::new(); seat_count],
            dice: DiceSet::default(),
            active_seat: 0,
            stage: Stage::InGame,
            end_reason: None,
            pending_locks: Vec::new(),
        }
    }

    /// Discard all per-game state so the same seats can play again.
    pub fn reset(&mut self) {
        for card in self.seats.iter_mut() {
            *card = ScoreCard::new();
        }
        self.dice = DiceSet::default();
        self.active_seat = 0;
        self.stage = Stage::InGame;
        self.end_reason = None;
        self.pending_locks.clear();
    }

    pub fn is_ended(&self) -> bool {
        self.stage == Stage::Ended
    }

    /// The role a seat plays this round.
    pub fn role_of(&self, seat: usize) -> Role {
        if seat == self.active_seat {
            Role::Active
        } else {
            Role::Inactive
        }
    }

    /// Install this round's dice faces (the Roll step).
    pub fn set_dice(&mut self, dice: DiceSet) {
        self.dice = dice;
    }

    /// The stably-ordered legal move set for `seat` against the current
    /// dice and its own card.
    pub fn legal_moves(&self, seat: usize) -> Vec<Move> {
        MoveRules::new(&self.seats[seat], &self.dice).moves(self.role_of(seat))
    }

    /// Apply the move a strategy picked out of `offered`.
    ///
    /// An out-of-range index, or a move that the current state would not
    /// offer, is a fatal contract violation: the error propagates and the
    /// game instance is abandoned, never clamped or retried.
    pub fn apply_indexed(
        &mut self,
        seat: usize,
        offered: &[Move],
        index: usize,
    ) -> Result<(), Error> {
        if self.is_ended() {
            return Err(Error::GameEnded);
        }
        if seat >= self.seats.len() {
            return Err(Error::SeatInvalid);
        }
        let chosen_move = offered.get(index).ok_or(Error::InvalidMoveIndex {
            index,
            offered: offered.len(),
        })?;
        if !self.legal_moves(seat).contains(chosen_move) {
            return Err(Error::IllegalStateTransition);
        }
        debug!("seat {} plays {}", seat, chosen_move);
        for color in self.seats[seat].apply_move(chosen_move) {
            if !self.pending_locks.contains(&color) {
                self.pending_locks.push(color);
            }
        }
        Ok(())
    }

    /// Lock-commit boundary: every color that received a terminal mark this
    /// round locks on every seat's card, whatever that seat's own progress.
    pub fn commit_locks(&mut self) {
        for color in std::mem::take(&mut self.pending_locks) {
            debug!("locking {} for all seats", color);
            for card in self.seats.iter_mut() {
                card.lock_row(color);
            }
        }
    }

    /// Colors locked anywhere on the table, counted once per color.
    pub fn locked_colors(&self) -> Vec<RowColor> {
        RowColor::ALL
            .iter()
            .filter(|color| self.seats.iter().any(|card| card.row(**color).locked))
            .copied()
            .collect()
    }

    /// EndCheck: four penalties on any seat, or two locked colors. Returns
    /// true (and records the reason) if the game is over.
    pub fn check_end(&mut self) -> bool {
        if self.is_ended() {
            return true;
        }
        if let Some(seat) = self
            .seats
            .iter()
            .position(|card| card.penalties >= PENALTY_LIMIT)
        {
            self.end_game(EndGameReason::PenaltyLimit { seat });
            return true;
        }
        if self.locked_colors().len() >= LOCKED_COLORS_LIMIT {
            self.end_game(EndGameReason::RowsLocked);
            return true;
        }
        false
    }

    fn end_game(&mut self, reason: EndGameReason) {
        debug!("game over: {:?}", reason);
        self.stage = Stage::Ended;
        self.end_reason = Some(reason);
    }

    /// Rotate the active seat; a no-op once the game has ended.
    pub fn advance_turn(&mut self) {
        if !self.is_ended() {
            self.active_seat = (self.active_seat + 1) % self.seats.len();
        }
    }

    /// Final (or current) scores in seat order.
    pub fn scores(&self) -> Vec<i32> {
        self.seats.iter().map(|card| card.score()).collect()
    }
}
