mod game;
pub use game::{EndGameReason, GameState, Stage, LOCKED_COLORS_LIMIT, PENALTY_LIMIT};

mod game_rules_moves;
pub use game_rules_moves::{Mark, Move, MoveRules, Role};

mod score_card;
pub use score_card::{triangular, Direction, Row, RowColor, ScoreCard};

mod error;
pub use error::Error;

mod dice;
pub use dice::{DiceRoller, DiceSet};
