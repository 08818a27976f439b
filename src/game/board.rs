use std::fmt;

use super::Token;
use crate::error::BoardError;

/// Smallest board the server may report.
pub const MIN_WIDTH: usize = 7;
pub const MIN_HEIGHT: usize = 6;

/// Largest board the client will allocate and draw.
pub const MAX_WIDTH: usize = 64;
pub const MAX_HEIGHT: usize = 64;

/// One slot of the grid. `highlighted` marks the cells of a finished
/// game's winning line and plays no part in move evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    pub token: Token,
    pub highlighted: bool,
}

/// A `width` x `height` grid indexed `[row][col]` with row 0 at the top.
///
/// `column_heights[col]` is the number of empty slots left above the stack
/// in that column, so the next piece in `col` lands on row
/// `column_heights[col] - 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    rows: Vec<Vec<Cell>>,
    column_heights: Vec<usize>,
}

impl Board {
    /// Create an empty board
    pub fn new(width: usize, height: usize) -> Self {
        Board {
            width,
            height,
            rows: vec![vec![Cell::default(); width]; height],
            column_heights: vec![height; width],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the token at a specific position
    /// Row 0 is the top, row `height - 1` is the bottom
    pub fn token_at(&self, row: usize, col: usize) -> Token {
        self.rows[row][col].token
    }

    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.rows[row][col]
    }

    /// Number of empty slots remaining in `col`.
    pub fn column_height(&self, col: usize) -> usize {
        self.column_heights[col]
    }

    /// Row a piece dropped into `col` would land on, if the column has room.
    pub fn landing_row(&self, col: usize) -> Option<usize> {
        self.column_heights.get(col)?.checked_sub(1)
    }

    /// Check if a column is full. Out-of-range columns count as full.
    pub fn is_column_full(&self, col: usize) -> bool {
        self.landing_row(col).is_none()
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        self.column_heights.iter().all(|&h| h == 0)
    }

    /// Drop a piece in a column, returns the row where it landed
    pub fn add_piece(&mut self, col: usize, token: Token) -> Result<usize, BoardError> {
        if col >= self.width {
            return Err(BoardError::InvalidColumn(col));
        }
        let row = self.landing_row(col).ok_or(BoardError::ColumnFull(col))?;
        self.column_heights[col] = row;
        self.rows[row][col] = Cell {
            token,
            highlighted: false,
        };
        Ok(row)
    }

    /// Lift the topmost piece out of `col`, returning what was there.
    pub fn remove_piece(&mut self, col: usize) -> Result<Token, BoardError> {
        if col >= self.width {
            return Err(BoardError::InvalidColumn(col));
        }
        let row = self.column_heights[col];
        if row >= self.height {
            return Err(BoardError::ColumnEmpty(col));
        }
        let removed = std::mem::take(&mut self.rows[row][col]);
        self.column_heights[col] += 1;
        Ok(removed.token)
    }

    /// Mark the cells of a winning line, given as `(col, row)` points.
    /// Every point must be on the board and occupied; nothing is marked
    /// otherwise.
    pub fn highlight(&mut self, line: &[(usize, usize)]) -> Result<(), BoardError> {
        if line.is_empty() {
            return Err(BoardError::MalformedWinLine);
        }
        for &(col, row) in line {
            if col >= self.width || row >= self.height || self.rows[row][col].token.is_empty() {
                return Err(BoardError::MalformedWinLine);
            }
        }
        for &(col, row) in line {
            self.rows[row][col].highlighted = true;
        }
        Ok(())
    }

    /// Build a board from ASCII rows, top row first. Column heights are
    /// derived from the first occupied cell of each column.
    #[cfg(test)]
    pub(crate) fn from_ascii(rows: &[&str]) -> Self {
        let height = rows.len();
        let width = rows[0].chars().filter(|c| !c.is_whitespace()).count();
        let mut board = Board::new(width, height);
        for (r, line) in rows.iter().enumerate() {
            for (c, ch) in line.chars().filter(|c| !c.is_whitespace()).enumerate() {
                board.rows[r][c].token = match ch {
                    'X' => Token::Player,
                    '0' | 'O' => Token::Computer,
                    _ => Token::Empty,
                };
            }
        }
        for col in 0..width {
            board.column_heights[col] = (0..height)
                .take_while(|&r| board.rows[r][col].token.is_empty())
                .count();
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(MIN_WIDTH, MIN_HEIGHT)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            for cell in row {
                write!(f, " {}", cell.token)?;
            }
            writeln!(f)?;
        }
        for col in 1..=self.width {
            write!(f, " {col}")?;
        }
        writeln!(f)
    }
}
