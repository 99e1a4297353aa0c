//! Drives complete games between configured strategies.
use crate::strategy::qlearning_common::QTable;
use crate::{SeatView, Strategy, StrategyKind};
use log::debug;
use store::{DiceRoller, Error, GameState, Move};

/// One reusable game instance: scorecards, a dice roller and one strategy
/// per seat. Independent sessions share nothing, so a batch harness may
/// run as many of them as it likes side by side.
pub struct GameSession {
    state: GameState,
    dice_roller: DiceRoller,
    agents: Vec<Box<dyn Strategy>>,
}

impl GameSession {
    /// Build a session with one seat per strategy spec, in order. `policy`
    /// feeds any `qlearning` seats; a fixed `seed` makes the whole run of
    /// games reproducible.
    pub fn new(specs: &[StrategyKind], seed: Option<u64>, policy: Option<&QTable>) -> Self {
        let agents = specs.iter().map(|kind| kind.build(policy)).collect();
        Self {
            state: GameState::new(specs.len()),
            dice_roller: DiceRoller::new(seed),
            agents,
        }
    }

    pub fn seat_count(&self) -> usize {
        self.agents.len()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The stably-ordered legal move set for a seat, as the engine would
    /// offer it right now.
    pub fn legal_moves(&self, seat: usize) -> Vec<Move> {
        self.state.legal_moves(seat)
    }

    /// Play a full game and return the final scores in seat order. The
    /// session resets itself first, so it can be called repeatedly; the
    /// dice stream continues across games. A strategy contract violation
    /// aborts the game and propagates.
    pub fn play_one_game(&mut self) -> Result<Vec<i32>, Error> {
        self.state.reset();
        while !self.state.is_ended() {
            self.play_round()?;
        }
        let scores = self.state.scores();
        debug!("game ended {:?}: scores {:?}", self.state.end_reason, scores);
        Ok(scores)
    }

    /// One round: roll, active move, inactive moves in turn order, lock
    /// commit, end check, turn rotation.
    fn play_round(&mut self) -> Result<(), Error> {
        self.state.set_dice(self.dice_roller.roll());
        let seat_count = self.seat_count();
        let first = self.state.active_seat;
        for offset in 0..seat_count {
            let seat = (first + offset) % seat_count;
            let moves = self.state.legal_moves(seat);
            let index = self.agents[seat].choose_move(
                &moves,
                SeatView {
                    state: &self.state,
                    seat,
                },
            );
            self.state.apply_indexed(seat, &moves, index)?;
        }
        self.state.commit_locks();
        if !self.state.check_end() {
            self.state.advance_turn();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_game_terminates_with_scores() {
        let specs = [StrategyKind::Greedy, StrategyKind::Greedy];
        let mut session = GameSession::new(&specs, Some(42), None);
        let scores = session.play_one_game().expect("game should finish");
        assert_eq!(scores.len(), 2);
        assert!(session.state().is_ended());
        assert!(session.state().end_reason.is_some());
    }

    #[test]
    fn test_seeded_games_are_reproducible() {
        let specs = [StrategyKind::Greedy, StrategyKind::HeuristicGreedy];
        let mut first = GameSession::new(&specs, Some(123), None);
        let mut second = GameSession::new(&specs, Some(123), None);
        for _ in 0..3 {
            assert_eq!(
                first.play_one_game().expect("game"),
                second.play_one_game().expect("game")
            );
        }
    }

    #[test]
    fn test_session_reusable_after_game() {
        let specs = [
            StrategyKind::HeuristicSpace,
            StrategyKind::Greedy,
            StrategyKind::HeuristicGreedy,
        ];
        let mut session = GameSession::new(&specs, Some(7), None);
        for _ in 0..5 {
            let scores = session.play_one_game().expect("game should finish");
            assert_eq!(scores.len(), 3);
        }
    }

    #[test]
    fn test_qlearning_seat_plays_untrained() {
        let specs = [StrategyKind::QLearning, StrategyKind::Greedy];
        let mut session = GameSession::new(&specs, Some(99), None);
        let scores = session.play_one_game().expect("game should finish");
        assert_eq!(scores.len(), 2);
    }

    #[test]
    fn test_faulty_strategy_aborts_game() {
        struct OutOfRange;
        impl Strategy for OutOfRange {
            fn choose_move(&mut self, moves: &[Move], _view: SeatView<'_>) -> usize {
                moves.len()
            }
        }
        let mut session = GameSession::new(&[StrategyKind::Greedy], Some(1), None);
        session.agents[0] = Box::new(OutOfRange);
        let result = session.play_one_game();
        assert!(matches!(result, Err(Error::InvalidMoveIndex { .. })));
    }
}
