use crate::strategy::greedy::GreedyStrategy;
use crate::{SeatView, Strategy};
use store::{Mark, Move, ScoreCard};

/// Greedy restricted to marks close to the row's current position, so the
/// card keeps room for later sums.
///
/// A mark is eligible when |number - last_number| <= 2 if last_number is in
/// 5..=8, else <= 3; terminal marks are always eligible. Every half of a
/// Double must pass. Among eligible mark-bearing moves the highest
/// hypothetical score wins, ties broken by the smallest total distance. If
/// nothing is eligible: Pass when offered, otherwise plain greedy over the
/// whole list.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicGreedyStrategy;

fn within_window(card: &ScoreCard, mark: &Mark) -> bool {
    let row = card.row(mark.color);
    if mark.number == row.terminal_value() {
        return true;
    }
    let distance = mark.number.abs_diff(row.last_number);
    let limit = if (5..=8).contains(&row.last_number) {
        2
    } else {
        3
    };
    distance <= limit
}

fn mark_distance(card: &ScoreCard, mark: &Mark) -> u32 {
    mark.number.abs_diff(card.row(mark.color).last_number) as u32
}

fn eligible(card: &ScoreCard, candidate: &Move) -> Option<u32> {
    match candidate {
        Move::Pass | Move::Penalty => None,
        Move::Single(mark) => {
            within_window(card, mark).then(|| mark_distance(card, mark))
        }
        Move::Double(first, second) => {
            (within_window(card, first) && within_window(card, second))
                .then(|| mark_distance(card, first) + mark_distance(card, second))
        }
    }
}

impl Strategy for HeuristicGreedyStrategy {
    fn choose_move(&mut self, moves: &[Move], view: SeatView<'_>) -> usize {
        let card = view.card();
        let mut best: Option<(usize, i32, u32)> = None;
        for (index, candidate) in moves.iter().enumerate() {
            let Some(distance) = eligible(card, candidate) else {
                continue;
            };
            let score = card.score_with(candidate);
            let better = match best {
                None => true,
                Some((_, best_score, best_distance)) => {
                    score > best_score || (score == best_score && distance < best_distance)
                }
            };
            if better {
                best = Some((index, score, distance));
            }
        }
        if let Some((index, _, _)) = best {
            return index;
        }
        if let Some(index) = moves.iter().position(|candidate| *candidate == Move::Pass) {
            return index;
        }
        GreedyStrategy.choose_move(moves, view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::{DiceSet, GameState, RowColor};

    fn view(state: &GameState) -> SeatView<'_> {
        SeatView { state, seat: 0 }
    }

    #[test]
    fn test_window_tightens_mid_row() {
        let card = ScoreCard::new();
        // fresh increasing row, last 0: limit 3
        assert!(within_window(
            &card,
            &Mark {
                color: RowColor::Red,
                number: 3,
            }
        ));
        assert!(!within_window(
            &card,
            &Mark {
                color: RowColor::Red,
                number: 4,
            }
        ));

        let mut card = ScoreCard::new();
        card.apply_move(&Move::Single(Mark {
            color: RowColor::Red,
            number: 6,
        }));
        // last 6 sits in the tight band: limit 2
        assert!(within_window(
            &card,
            &Mark {
                color: RowColor::Red,
                number: 8,
            }
        ));
        assert!(!within_window(
            &card,
            &Mark {
                color: RowColor::Red,
                number: 9,
            }
        ));
    }

    #[test]
    fn test_terminal_exempt_from_window() {
        let mut card = ScoreCard::new();
        for number in [2, 3, 4, 5, 6] {
            card.apply_move(&Move::Single(Mark {
                color: RowColor::Red,
                number,
            }));
        }
        // 12 is six away from 6 but terminal
        assert!(within_window(
            &card,
            &Mark {
                color: RowColor::Red,
                number: 12,
            }
        ));
    }

    #[test]
    fn test_falls_back_to_pass() {
        let mut state = GameState::new(2);
        state.set_dice(DiceSet {
            colored: [1, 1, 1, 1],
            whites: (6, 6),
        });
        // inactive seat: white sum 12 is terminal on Red/Yellow (forbidden
        // below five crosses) and distance 1 from 13 on Green/Blue... so
        // Green/Blue singles are eligible; push their rows low first
        for number in [12, 10, 8] {
            state.seats[1].apply_move(&Move::Single(Mark {
                color: RowColor::Green,
                number,
            }));
            state.seats[1].apply_move(&Move::Single(Mark {
                color: RowColor::Blue,
                number,
            }));
        }
        // now 12 extends nothing on Green/Blue: only Pass remains
        let moves = state.legal_moves(1);
        assert_eq!(moves, vec![Move::Pass]);
        let mut strategy = HeuristicGreedyStrategy;
        let index = strategy.choose_move(&moves, SeatView {
            state: &state,
            seat: 1,
        });
        assert_eq!(moves[index], Move::Pass);
    }

    #[test]
    fn test_prefers_near_marks_over_far_ones() {
        let mut state = GameState::new(1);
        // white sum 3 and Red sums 2/3 sit inside the window; every other
        // colored sum lands 5 or more away from its row
        state.set_dice(DiceSet {
            colored: [1, 6, 6, 6],
            whites: (1, 2),
        });
        let moves = state.legal_moves(0);
        let mut strategy = HeuristicGreedyStrategy;
        let index = strategy.choose_move(&moves, view(&state));
        // the best eligible move is a Double of two near marks
        match moves[index] {
            Move::Double(first, second) => {
                assert!(first.number <= 3);
                assert!(second.number <= 3 || second.number >= 10);
            }
            ref other => panic!("expected a Double, got {}", other),
        }
    }
}
