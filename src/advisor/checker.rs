use log::trace;

use super::precedence::Precedence;
use super::scanner::{room_above, vertical_count, Axis, LineScan, WIN_LENGTH};
use crate::game::{Board, Token};

/// Inputs for one evaluation: who is placing, and whether to also look
/// for an opponent line this placement would cut off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckerSettings {
    pub token: Token,
    pub block_request: bool,
}

impl CheckerSettings {
    pub fn new(token: Token, block_request: bool) -> Self {
        CheckerSettings {
            token,
            block_request,
        }
    }
}

/// Outcome of evaluating one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Evaluation {
    pub precedence: Precedence,
    /// The placement stops an opponent four. `precedence` is then the
    /// best rank among the blocking axes.
    pub block_found: bool,
}

/// Per-call fold over the axes.
struct Accumulator {
    block_request: bool,
    max: Precedence,
    max_block: Option<Precedence>,
}

impl Accumulator {
    /// Returns `Some(Four)` when the axis decides the evaluation outright.
    fn fold(&mut self, precedence: Precedence, block_found: bool) -> Option<Precedence> {
        if self.block_request && block_found {
            // Blocking a live three is as good as a block gets.
            if precedence == Precedence::Three {
                self.block_request = false;
            }
            self.max_block = Some(self.max_block.map_or(precedence, |b| b.max(precedence)));
        } else if precedence >= Precedence::Four {
            return Some(Precedence::Four);
        } else {
            self.max = self.max.max(precedence);
        }
        None
    }
}

/// Rate a placement in `col` for `settings.token` across all four axes.
///
/// A four on any axis wins outright. Otherwise, with a block requested,
/// the column is re-scanned as the opponent; an opponent four marks the
/// evaluation as a block, and an opponent three demotes a weaker own rank
/// to [`Precedence::TwoBlock`]. Full columns evaluate to the default.
pub fn evaluate(board: &Board, col: usize, settings: CheckerSettings) -> Evaluation {
    let Some(row) = board.landing_row(col) else {
        return Evaluation::default();
    };
    let mut acc = Accumulator {
        block_request: settings.block_request,
        max: Precedence::None,
        max_block: None,
    };

    let (precedence, block_found) = vertical_move(board, col, settings.token, acc.block_request);
    if let Some(win) = acc.fold(precedence, block_found) {
        return Evaluation {
            precedence: win,
            block_found: false,
        };
    }

    for axis in Axis::ALL {
        let mut scan = LineScan::new(axis, col, row, board);
        let (precedence, block_found) = ripple_move(board, &mut scan, settings.token, acc.block_request);
        trace!("col {col} {axis:?}: {precedence:?} block={block_found}");
        if let Some(win) = acc.fold(precedence, block_found) {
            return Evaluation {
                precedence: win,
                block_found: false,
            };
        }
    }

    match acc.max_block {
        Some(block) => Evaluation {
            precedence: block,
            block_found: true,
        },
        None => Evaluation {
            precedence: acc.max,
            block_found: false,
        },
    }
}

fn vertical_precedence(board: &Board, col: usize, token: Token) -> Precedence {
    let count = vertical_count(board, col, token);
    Precedence::classify(count, room_above(board, col, count))
}

fn vertical_move(board: &Board, col: usize, token: Token, block_request: bool) -> (Precedence, bool) {
    let mut precedence = vertical_precedence(board, col, token);
    let mut block_found = false;

    // Only a column topped by the opponent can hold an opponent run.
    if precedence <= Precedence::One && block_request {
        let blocked = vertical_precedence(board, col, token.other());
        if blocked == Precedence::Four {
            block_found = true;
        } else if blocked == Precedence::Three && precedence < blocked {
            precedence = Precedence::TwoBlock;
        }
    }
    (precedence, block_found)
}

/// Count `token` through the origin, then keep walking through empty,
/// supported cells to see whether the run could reach four right now.
fn ripple_precedence(board: &Board, scan: &mut LineScan, token: Token) -> Precedence {
    let count = scan.ripple(board, token, 1, false);
    if count == WIN_LENGTH {
        return Precedence::Four;
    }
    let reach = scan.ripple(board, Token::Empty, count, true);
    Precedence::classify(count, reach == WIN_LENGTH)
}

fn ripple_move(board: &Board, scan: &mut LineScan, token: Token, block_request: bool) -> (Precedence, bool) {
    let mut precedence = ripple_precedence(board, scan, token);
    let mut block_found = false;

    if precedence < Precedence::Four && block_request {
        scan.reset();
        let blocked = ripple_precedence(board, scan, token.other());
        if blocked == Precedence::Four {
            block_found = true;
        } else if blocked == Precedence::Three && precedence < blocked {
            precedence = Precedence::TwoBlock;
        }
    }
    (precedence, block_found)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Rank along one ripple axis, without any block search.
    fn axis_precedence(board: &Board, col: usize, axis: Axis, token: Token) -> Precedence {
        let Some(row) = board.landing_row(col) else {
            return Precedence::None;
        };
        ripple_precedence(board, &mut LineScan::new(axis, col, row, board), token)
    }

    fn plain(token: Token) -> CheckerSettings {
        CheckerSettings::new(token, false)
    }

    fn blocking(token: Token) -> CheckerSettings {
        CheckerSettings::new(token, true)
    }

    #[test]
    fn empty_board_is_a_live_one() {
        let board = Board::default();
        for col in 0..7 {
            let eval = evaluate(&board, col, blocking(Token::Computer));
            assert_eq!(eval.precedence, Precedence::One, "col {col}");
            assert!(!eval.block_found);
        }
    }

    #[test]
    fn vertical_three_is_a_win() {
        let board = Board::from_ascii(&[
            ". . . . . . .",
            ". . . . . . .",
            ". . . . . . .",
            ". . 0 . . . .",
            ". . 0 . . . .",
            ". . 0 . . . .",
        ]);
        let eval = evaluate(&board, 2, blocking(Token::Computer));
        assert_eq!(eval.precedence, Precedence::Four);
        assert!(!eval.block_found);
    }

    #[test]
    fn opponent_vertical_three_is_a_block() {
        let board = Board::from_ascii(&[
            ". . . . . . .",
            ". . . . . . .",
            ". . . . . . .",
            ". . X . . . .",
            ". . X . . . .",
            ". . X . . . .",
        ]);
        let eval = evaluate(&board, 2, blocking(Token::Computer));
        assert!(eval.block_found);
        assert_eq!(eval.precedence, Precedence::OneFallThrough);

        // Without a block request the same column is just a weak move.
        let eval = evaluate(&board, 2, plain(Token::Computer));
        assert!(!eval.block_found);
        assert_eq!(eval.precedence, Precedence::OneFallThrough);
    }

    #[test]
    fn horizontal_gap_completes_four() {
        let board = Board::from_ascii(&[
            ". . . . . . .",
            ". . . . . . .",
            ". . . . . . .",
            ". . . . . . .",
            ". . . . . . .",
            ". X X . X . .",
        ]);
        assert_eq!(
            evaluate(&board, 3, plain(Token::Player)).precedence,
            Precedence::Four
        );
        let eval = evaluate(&board, 3, blocking(Token::Computer));
        assert!(eval.block_found);
    }

    #[test]
    fn right_diagonal_win() {
        let board = Board::from_ascii(&[
            ". . . . . . .",
            ". . . . . . .",
            ". . . . . . .",
            ". X 0 . . . .",
            ". 0 X 0 . . .",
            ". 0 0 X 0 . .",
        ]);
        // Column 1 lands on row 2, heading the `\` run through (2,3), (3,4), (4,5).
        assert_eq!(
            axis_precedence(&board, 1, Axis::RightDiagonal, Token::Computer),
            Precedence::Four
        );
        assert_eq!(
            evaluate(&board, 1, plain(Token::Computer)).precedence,
            Precedence::Four
        );
    }

    #[test]
    fn opponent_open_three_demotes_to_two_block() {
        // Placing in column 1 leaves the Player a live three through column 4.
        let board = Board::from_ascii(&[
            ". . . . . . .",
            ". . . . . . .",
            ". . . . . . .",
            ". . . . . . .",
            ". . . . . . .",
            ". . X X . . .",
        ]);
        let eval = evaluate(&board, 1, blocking(Token::Computer));
        assert!(!eval.block_found);
        assert_eq!(eval.precedence, Precedence::TwoBlock);
    }

    #[test]
    fn three_with_missing_support_falls_through() {
        let mut board = Board::from_ascii(&[
            ". . . . . . .",
            ". . . . . . .",
            ". . . . . . .",
            ". . . . . . .",
            ". 0 0 . . . .",
            ". X X X . . .",
        ]);
        assert_eq!(
            axis_precedence(&board, 3, Axis::Horizontal, Token::Computer),
            Precedence::ThreeFallThrough
        );

        board.add_piece(4, Token::Player).unwrap();
        assert_eq!(
            axis_precedence(&board, 3, Axis::Horizontal, Token::Computer),
            Precedence::Three
        );
    }

    #[test]
    fn vertical_without_headroom_falls_through() {
        let board = Board::from_ascii(&[
            ". . . . . . .",
            ". . . . . . .",
            ". . 0 . . . .",
            ". . X . . . .",
            ". . X . . . .",
            ". . 0 . . . .",
        ]);
        assert_eq!(
            vertical_precedence(&board, 2, Token::Computer),
            Precedence::TwoFallThrough
        );
    }

    #[test]
    fn full_column_has_no_precedence() {
        let mut board = Board::default();
        for _ in 0..6 {
            board.add_piece(0, Token::Player).unwrap();
        }
        assert_eq!(evaluate(&board, 0, blocking(Token::Computer)), Evaluation::default());
        assert_eq!(
            axis_precedence(&board, 0, Axis::Horizontal, Token::Computer),
            Precedence::None
        );
    }

    #[test]
    fn evaluation_is_repeatable() {
        let board = Board::from_ascii(&[
            ". . . . . . .",
            ". . . . . . .",
            ". . . X . . .",
            ". . 0 0 . . .",
            ". X X 0 0 . .",
            "X 0 X X 0 . .",
        ]);
        let before = board.clone();
        for col in 0..7 {
            let first = evaluate(&board, col, blocking(Token::Computer));
            let second = evaluate(&board, col, blocking(Token::Computer));
            assert_eq!(first, second, "col {col}");
        }
        assert_eq!(board, before);
    }
}
