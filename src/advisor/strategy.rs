use std::fmt;

use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::checker::{self, CheckerSettings};
use super::precedence::Precedence;
use super::records::{MoveRecords, RecordKind};
use crate::error::AdvisorError;
use crate::game::{Board, Token};

/// Why a column was recommended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Advice {
    /// Playing here completes four immediately.
    Win,
    /// Playing here stops an opponent four.
    Block,
    /// The opponent cannot win by stacking on top of this move.
    Safe,
    /// Every open column hands the opponent a win; this one is merely open.
    Fallback,
}

/// A single recommended column for `mover`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recommendation {
    pub advice: Advice,
    pub column: usize,
    pub mover: Token,
}

impl Recommendation {
    /// 1-based column as shown to the user.
    pub fn slot(&self) -> usize {
        self.column + 1
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.advice {
            Advice::Win => write!(f, "Winning move: {}", self.slot()),
            Advice::Block => write!(f, "Blocking move: {}", self.slot()),
            Advice::Safe => write!(f, "Recommended move: {}", self.slot()),
            Advice::Fallback => write!(
                f,
                "All moves will allow the {} to win on the next move. Available move: {}",
                self.mover.other().name().to_lowercase(),
                self.slot()
            ),
        }
    }
}

/// Picks a column by scoring every open one with the move checker.
///
/// Used both to play for the user and to advise them. Columns are visited
/// in random order, so ties between equally ranked columns are broken
/// randomly.
pub struct Advisor<R = StdRng> {
    rng: R,
}

impl Advisor<StdRng> {
    pub fn new() -> Self {
        Advisor {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl Default for Advisor<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Advisor<R> {
    pub fn with_rng(rng: R) -> Self {
        Advisor { rng }
    }

    /// Recommend a column for `mover`.
    ///
    /// An immediate win ends the search at once. Otherwise the result is
    /// the best block, else the best move that leaves the opponent no
    /// four on top of it, else the best remaining open column. The board
    /// is borrowed mutably only to try moves; it is unchanged on return.
    pub fn recommend(&mut self, board: &mut Board, mover: Token) -> Result<Recommendation, AdvisorError> {
        let mut columns: Vec<usize> = (0..board.width()).collect();
        columns.shuffle(&mut self.rng);

        let mut records = MoveRecords::new();
        let mut block_request = true;

        for col in columns {
            let Some(landing) = board.landing_row(col) else {
                continue;
            };
            if !board.token_at(landing, col).is_empty() {
                continue;
            }

            let eval = checker::evaluate(board, col, CheckerSettings::new(mover, block_request));
            debug!("col {col}: {:?} block={}", eval.precedence, eval.block_found);

            if eval.block_found {
                if eval.precedence == Precedence::Three {
                    records.set(RecordKind::Block, col, eval.precedence);
                    block_request = false;
                } else {
                    records.offer(RecordKind::Block, col, eval.precedence);
                }
            } else if eval.precedence == Precedence::Four {
                return Ok(Recommendation {
                    advice: Advice::Win,
                    column: col,
                    mover,
                });
            } else if eval.precedence > records.get(RecordKind::NoWin).precedence {
                if landing > 0 && !leaves_no_win(board, col, mover)? {
                    records.offer(RecordKind::Default, col, eval.precedence);
                } else {
                    records.set(RecordKind::NoWin, col, eval.precedence);
                }
            }
        }

        let (kind, column) = records.best().ok_or(AdvisorError::MalformedState)?;
        let advice = match kind {
            RecordKind::Block => Advice::Block,
            RecordKind::NoWin => Advice::Safe,
            RecordKind::Default => Advice::Fallback,
        };
        Ok(Recommendation {
            advice,
            column,
            mover,
        })
    }
}

/// Try `mover` in `col` and check the opponent cannot then win by
/// dropping on top of it.
fn leaves_no_win(board: &mut Board, col: usize, mover: Token) -> Result<bool, AdvisorError> {
    board
        .add_piece(col, mover)
        .map_err(|_| AdvisorError::MalformedState)?;
    let reply = checker::evaluate(board, col, CheckerSettings::new(mover.other(), false));
    board
        .remove_piece(col)
        .map_err(|_| AdvisorError::MalformedState)?;
    Ok(reply.precedence != Precedence::Four)
}
