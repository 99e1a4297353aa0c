use crate::{SeatView, Strategy};
use store::{Move, ScoreCard};

/// Minimizes the card space a move consumes instead of chasing points.
///
/// The distance of a Single or Double is the sum of |number - last_number|
/// over its marks; Pass costs 1 and Penalty 13, the worst possible. Ties go
/// to the first candidate in move-list order.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicSpaceStrategy;

pub const PASS_DISTANCE: u32 = 1;
pub const PENALTY_DISTANCE: u32 = 13;

fn move_distance(card: &ScoreCard, candidate: &Move) -> u32 {
    let mark_distance = |mark: &store::Mark| -> u32 {
        mark.number.abs_diff(card.row(mark.color).last_number) as u32
    };
    match candidate {
        Move::Pass => PASS_DISTANCE,
        Move::Penalty => PENALTY_DISTANCE,
        Move::Single(mark) => mark_distance(mark),
        Move::Double(first, second) => mark_distance(first) + mark_distance(second),
    }
}

impl Strategy for HeuristicSpaceStrategy {
    fn choose_move(&mut self, moves: &[Move], view: SeatView<'_>) -> usize {
        let card = view.card();
        let mut best_index = 0;
        let mut best_distance = u32::MAX;
        for (index, candidate) in moves.iter().enumerate() {
            let distance = move_distance(card, candidate);
            if distance < best_distance {
                best_index = index;
                best_distance = distance;
            }
        }
        best_index
    }
}
