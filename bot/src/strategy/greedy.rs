use crate::{SeatView, Strategy};
use store::Move;

/// Takes whichever move yields the highest immediate score on its own
/// card, evaluated hypothetically through
/// [`ScoreCard::score_with`](store::ScoreCard::score_with). Ties go to the
/// first candidate in move-list order.
#[derive(Debug, Default, Clone, Copy)]
pub struct GreedyStrategy;

impl Strategy for GreedyStrategy {
    fn choose_move(&mut self, moves: &[Move], view: SeatView<'_>) -> usize {
        let card = view.card();
        let mut best_index = 0;
        let mut best_score = i32::MIN;
        for (index, candidate) in moves.iter().enumerate() {
            let score = card.score_with(candidate);
            if score > best_score {
                best_index = index;
                best_score = score;
            }
        }
        best_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::{DiceSet, GameState, Mark, Move, RowColor};

    #[test]
    fn test_prefers_double_over_single() {
        let mut state = GameState::new(1);
        state.set_dice(DiceSet {
            colored: [3, 1, 1, 1],
            whites: (3, 4),
        });
        let moves = state.legal_moves(0);
        let mut strategy = GreedyStrategy;
        let index = strategy.choose_move(&moves, SeatView { state: &state, seat: 0 });
        // two crosses beat one cross and beat Penalty
        assert!(matches!(moves[index], Move::Double(_, _)));
    }

    #[test]
    fn test_pass_beats_nothing_else_offered() {
        let mut state = GameState::new(2);
        // inactive seat with a useless white sum: Pass scores 0,
        // any mark scores positive, so a mark wins
        state.set_dice(DiceSet {
            colored: [1, 1, 1, 1],
            whites: (2, 5),
        });
        let moves = state.legal_moves(1);
        let mut strategy = GreedyStrategy;
        let index = strategy.choose_move(&moves, SeatView { state: &state, seat: 1 });
        assert_eq!(
            moves[index],
            Move::Single(Mark {
                color: RowColor::Red,
                number: 7,
            })
        );
    }
}
