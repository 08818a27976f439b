//! JSON payloads of the game server and the checks applied before any of
//! them touches the board.

use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;
use crate::game::{Board, MAX_HEIGHT, MAX_WIDTH, MIN_HEIGHT, MIN_WIDTH};

/// Number of coordinates in a winning line: four `(col, row)` pairs.
const WIN_LINE_VALUES: usize = 8;

/// Board dimensions and computer strategies offered by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Info {
    pub width: usize,
    pub height: usize,
    pub strategies: Vec<String>,
}

impl Info {
    /// Board size within `MIN_*..=MAX_*` and at least one strategy.
    pub fn validate(&self) -> Result<(), ProtocolError> {
        if self.width < MIN_WIDTH {
            return Err(ProtocolError::BoardTooNarrow {
                min: MIN_WIDTH,
                actual: self.width,
            });
        }
        if self.height < MIN_HEIGHT {
            return Err(ProtocolError::BoardTooShort {
                min: MIN_HEIGHT,
                actual: self.height,
            });
        }
        if self.width > MAX_WIDTH {
            return Err(ProtocolError::BoardTooWide {
                max: MAX_WIDTH,
                actual: self.width,
            });
        }
        if self.height > MAX_HEIGHT {
            return Err(ProtocolError::BoardTooTall {
                max: MAX_HEIGHT,
                actual: self.height,
            });
        }
        if self.strategies.is_empty() {
            return Err(ProtocolError::NoStrategies);
        }
        Ok(())
    }
}

/// How a finished game ended, from the user's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Won,
    Lost,
    Draw,
}

/// A validated reply to a move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Play {
    /// 0-based column the user played, as acknowledged by the server.
    pub player_move: usize,
    /// Absent when the user's move ended the game.
    pub computer_move: Option<usize>,
    pub outcome: Option<GameOutcome>,
    /// `(col, row)` cells of the winning line; empty unless won or lost.
    pub win_line: Vec<(usize, usize)>,
}

#[derive(Debug, Deserialize)]
struct NewResponse {
    response: bool,
    #[serde(default)]
    reason: Option<String>,
    #[serde(default)]
    pid: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlayResponse {
    response: bool,
    #[serde(default)]
    reason: Option<String>,
    #[serde(default)]
    ack_move: Option<MoveReport>,
    #[serde(default, rename = "move")]
    computer_move: Option<MoveReport>,
}

#[derive(Debug, Deserialize)]
struct MoveReport {
    slot: i64,
    #[serde(rename = "isWin")]
    is_win: bool,
    #[serde(rename = "isDraw")]
    is_draw: bool,
    row: Vec<i64>,
}

struct CheckedMove {
    slot: usize,
    is_win: bool,
    is_draw: bool,
    win_line: Vec<(usize, usize)>,
}

pub fn parse_info(body: &str) -> Result<Info, ProtocolError> {
    let info: Info = serde_json::from_str(body)?;
    info.validate()?;
    Ok(info)
}

/// Extract the game id from a new-game reply.
pub fn parse_new(body: &str) -> Result<String, ProtocolError> {
    let reply: NewResponse = serde_json::from_str(body)?;
    check_envelope(reply.response, reply.reason)?;
    reply.pid.ok_or(ProtocolError::MissingPid)
}

/// Validate a move reply against the board as it was before the user's
/// move and the slot the user sent.
pub fn parse_play(body: &str, board: &Board, sent_slot: usize) -> Result<Play, ProtocolError> {
    let reply: PlayResponse = serde_json::from_str(body)?;
    check_envelope(reply.response, reply.reason)?;

    let ack = reply.ack_move.ok_or(ProtocolError::MissingAck)?;
    let ack = check_move(&ack, board, None)?;
    if ack.slot != sent_slot {
        return Err(ProtocolError::SlotMismatch {
            expected: sent_slot,
            received: ack.slot,
        });
    }

    if ack.is_win || ack.is_draw {
        if reply.computer_move.is_some() {
            return Err(ProtocolError::UnexpectedMove);
        }
        let outcome = if ack.is_draw {
            GameOutcome::Draw
        } else {
            GameOutcome::Won
        };
        return Ok(Play {
            player_move: ack.slot,
            computer_move: None,
            outcome: Some(outcome),
            win_line: ack.win_line,
        });
    }

    let reply_move = reply.computer_move.ok_or(ProtocolError::MissingMove)?;
    let reply_move = check_move(&reply_move, board, Some(ack.slot))?;
    let outcome = if reply_move.is_draw {
        Some(GameOutcome::Draw)
    } else if reply_move.is_win {
        Some(GameOutcome::Lost)
    } else {
        None
    };
    Ok(Play {
        player_move: ack.slot,
        computer_move: Some(reply_move.slot),
        outcome,
        win_line: reply_move.win_line,
    })
}

fn check_envelope(response: bool, reason: Option<String>) -> Result<(), ProtocolError> {
    if response {
        return Ok(());
    }
    match reason {
        Some(reason) => Err(ProtocolError::Refused(reason)),
        None => Err(ProtocolError::MissingReason),
    }
}

/// `pending` is a column that already holds one more piece than `board`
/// shows, so its capacity is one less.
fn check_move(report: &MoveReport, board: &Board, pending: Option<usize>) -> Result<CheckedMove, ProtocolError> {
    let slot = usize::try_from(report.slot)
        .ok()
        .filter(|&slot| slot < board.width())
        .ok_or(ProtocolError::SlotOutOfRange(report.slot))?;
    let needed = if pending == Some(slot) { 2 } else { 1 };
    if board.column_height(slot) < needed {
        return Err(ProtocolError::SlotOutOfRange(report.slot));
    }

    let values = report.row.len();
    if report.is_win && (values < WIN_LINE_VALUES || values % 2 != 0) {
        return Err(ProtocolError::WinLineLength(values));
    }
    if report.is_draw && values != 0 {
        return Err(ProtocolError::DrawWithRow);
    }
    if !report.is_win && values != 0 {
        return Err(ProtocolError::RowWithoutWin);
    }

    Ok(CheckedMove {
        slot,
        is_win: report.is_win,
        is_draw: report.is_draw,
        win_line: win_line(&report.row)?,
    })
}

/// Pair up `[col, row, col, row, ...]`. Longer lists can carry overlapping
/// lines; those are sorted by column then row and cut to four cells.
fn win_line(values: &[i64]) -> Result<Vec<(usize, usize)>, ProtocolError> {
    let mut cells = values
        .chunks_exact(2)
        .map(|pair| {
            let col = usize::try_from(pair[0]).map_err(|_| ProtocolError::NegativeCoordinate)?;
            let row = usize::try_from(pair[1]).map_err(|_| ProtocolError::NegativeCoordinate)?;
            Ok((col, row))
        })
        .collect::<Result<Vec<_>, ProtocolError>>()?;
    if values.len() > WIN_LINE_VALUES {
        cells.sort_unstable();
        cells.truncate(WIN_LINE_VALUES / 2);
    }
    Ok(cells)
}
