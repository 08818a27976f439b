use crate::error::SelectionError;
use crate::game::Board;

/// What the user typed at the slot prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveSelection {
    /// A 0-based column that is on the board and not full.
    Slot(usize),
    /// Ask the advisor instead of moving.
    Cheat,
}

impl MoveSelection {
    /// Parse `input` as `cheat` (any case) or a 1-based slot.
    pub fn parse(input: &str, board: &Board) -> Result<Self, SelectionError> {
        let input = input.trim();
        if input.eq_ignore_ascii_case("cheat") {
            return Ok(MoveSelection::Cheat);
        }
        let invalid = || SelectionError::InvalidSlot {
            input: input.to_string(),
            width: board.width(),
        };
        let slot: usize = input.parse().map_err(|_| invalid())?;
        if slot == 0 || slot > board.width() {
            return Err(invalid());
        }
        let col = slot - 1;
        if board.is_column_full(col) {
            return Err(SelectionError::ColumnFull);
        }
        Ok(MoveSelection::Slot(col))
    }
}
