/// This module contains the error definition for the Qwixx simulator.
use std::fmt;

/// Holds all possible errors that can occur while driving a game.
///
/// The first two variants are strategy contract violations: they indicate a
/// corrupted simulation and must abort the game instance, never be clamped
/// or retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A strategy returned a move index outside the offered range
    InvalidMoveIndex { index: usize, offered: usize },
    /// The engine was asked to apply a move it never offered
    IllegalStateTransition,
    /// Game has already ended
    GameEnded,
    /// Invalid seat index
    SeatInvalid,
}

// implement Error trait
impl std::error::Error for Error {}

// implement Display trait
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidMoveIndex { index, offered } => {
                write!(f, "Move index {} out of range ({} moves offered)", index, offered)
            }
            Error::IllegalStateTransition => write!(f, "Move was not offered for this state"),
            Error::GameEnded => write!(f, "Game has already ended"),
            Error::SeatInvalid => write!(f, "Invalid seat index"),
        }
    }
}
