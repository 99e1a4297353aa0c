//! Decision strategies and the game session driver for the Qwixx
//! simulator. The rules themselves live in the `store` crate; this crate
//! decides which of the offered moves to take.
pub mod session;
pub mod strategy;

pub use session::GameSession;
pub use strategy::{SeatView, Strategy, StrategyKind};
