use crate::game::{Board, Token};

/// Longest run that matters; scanning stops once it is reached.
pub const WIN_LENGTH: usize = 4;

/// Lines through a cell that can extend on both sides of it. The vertical
/// line only runs downward from a landing cell and is counted with
/// [`vertical_count`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    /// Lower-left to upper-right (`/`).
    LeftDiagonal,
    /// Upper-left to lower-right (`\`).
    RightDiagonal,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::Horizontal, Axis::LeftDiagonal, Axis::RightDiagonal];

    /// `(dcol, drow)` steps for the two probes. The first probe always
    /// walks toward lower column numbers.
    fn steps(self) -> ((isize, isize), (isize, isize)) {
        match self {
            Axis::Horizontal => ((-1, 0), (1, 0)),
            Axis::LeftDiagonal => ((-1, 1), (1, -1)),
            Axis::RightDiagonal => ((-1, -1), (1, 1)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Point {
    col: isize,
    row: isize,
}

impl Point {
    fn step(self, (dcol, drow): (isize, isize)) -> Point {
        Point {
            col: self.col + dcol,
            row: self.row + drow,
        }
    }
}

/// A pair of probes straddling an origin cell along one axis.
///
/// Both probes are confined to a window of three cells either side of the
/// origin, clipped to the board, so a scan never looks further than a
/// four-long line through the origin could reach.
#[derive(Debug, Clone)]
pub struct LineScan {
    origin: Point,
    step1: (isize, isize),
    step2: (isize, isize),
    pt1: Point,
    pt2: Point,
    min: Point,
    max: Point,
}

impl LineScan {
    pub fn new(axis: Axis, col: usize, row: usize, board: &Board) -> Self {
        let (step1, step2) = axis.steps();
        let origin = Point {
            col: col as isize,
            row: row as isize,
        };
        let reach = (WIN_LENGTH - 1) as isize;
        let min = Point {
            col: (origin.col - reach).max(0),
            row: (origin.row - reach).max(0),
        };
        let max = Point {
            col: (origin.col + reach).min(board.width() as isize - 1),
            row: (origin.row + reach).min(board.height() as isize - 1),
        };
        LineScan {
            origin,
            step1,
            step2,
            pt1: origin.step(step1),
            pt2: origin.step(step2),
            min,
            max,
        }
    }

    /// Put both probes back beside the origin.
    pub fn reset(&mut self) {
        self.pt1 = self.origin.step(self.step1);
        self.pt2 = self.origin.step(self.step2);
    }

    fn in_window(&self, pt: Point) -> bool {
        (self.min.col..=self.max.col).contains(&pt.col)
            && (self.min.row..=self.max.row).contains(&pt.row)
    }

    pub fn compare_pt1(&self) -> bool {
        self.in_window(self.pt1)
    }

    pub fn compare_pt2(&self) -> bool {
        self.in_window(self.pt2)
    }

    pub fn compare_both(&self) -> bool {
        self.compare_pt1() && self.compare_pt2()
    }

    pub fn advance_pt1(&mut self) {
        self.pt1 = self.pt1.step(self.step1);
    }

    pub fn advance_pt2(&mut self) {
        self.pt2 = self.pt2.step(self.step2);
    }

    pub fn advance_both(&mut self) {
        self.advance_pt1();
        self.advance_pt2();
    }

    /// Token under the first probe. Only valid while `compare_pt1` holds.
    pub fn read_pt1(&self, board: &Board) -> Token {
        board.token_at(self.pt1.row as usize, self.pt1.col as usize)
    }

    /// Token under the second probe. Only valid while `compare_pt2` holds.
    pub fn read_pt2(&self, board: &Board) -> Token {
        board.token_at(self.pt2.row as usize, self.pt2.col as usize)
    }

    pub fn supported_pt1(&self, board: &Board) -> bool {
        supported_below(board, self.pt1)
    }

    pub fn supported_pt2(&self, board: &Board) -> bool {
        supported_below(board, self.pt2)
    }

    /// Count cells holding `target` outward from the probes, starting
    /// from `count`, capped at [`WIN_LENGTH`].
    ///
    /// Both probes first advance together while they agree on `target`,
    /// then each continues alone. With `fall_through` set every counted
    /// cell must also rest on something, so a piece could be dropped
    /// there immediately.
    pub fn ripple(&mut self, board: &Board, target: Token, mut count: usize, fall_through: bool) -> usize {
        while count < WIN_LENGTH
            && self.compare_both()
            && self.read_pt1(board) == target
            && self.read_pt2(board) == target
            && (!fall_through || (self.supported_pt1(board) && self.supported_pt2(board)))
        {
            self.advance_both();
            count += 2;
        }
        if count >= WIN_LENGTH {
            return WIN_LENGTH;
        }

        while count < WIN_LENGTH
            && self.compare_pt1()
            && self.read_pt1(board) == target
            && (!fall_through || self.supported_pt1(board))
        {
            self.advance_pt1();
            count += 1;
        }
        while count < WIN_LENGTH
            && self.compare_pt2()
            && self.read_pt2(board) == target
            && (!fall_through || self.supported_pt2(board))
        {
            self.advance_pt2();
            count += 1;
        }
        count.min(WIN_LENGTH)
    }
}

/// True when `pt` is on the bottom row or sits on an occupied cell.
fn supported_below(board: &Board, pt: Point) -> bool {
    let below = pt.row as usize + 1;
    below >= board.height() || !board.token_at(below, pt.col as usize).is_empty()
}

/// Count `token` straight down from the landing slot of `col`, including
/// the piece that would be placed there.
pub fn vertical_count(board: &Board, col: usize, token: Token) -> usize {
    let mut row = board.column_height(col);
    let mut count = 1;
    while row < board.height() && count < WIN_LENGTH && board.token_at(row, col) == token {
        row += 1;
        count += 1;
    }
    count
}

/// Whether enough empty slots remain above the landing row of `col` to
/// stack a vertical run of `count` up to four.
pub fn room_above(board: &Board, col: usize, count: usize) -> bool {
    let needed = WIN_LENGTH.saturating_sub(count);
    match board.landing_row(col) {
        Some(landing) => landing >= needed,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probes_walk_opposite_ways_from_the_left() {
        for axis in Axis::ALL {
            let ((dcol1, drow1), (dcol2, drow2)) = axis.steps();
            assert_eq!(dcol1, -1, "{axis:?}");
            assert_eq!((dcol2, drow2), (-dcol1, -drow1), "{axis:?}");
        }
    }

    #[test]
    fn window_is_clipped_to_board() {
        let board = Board::default();
        let scan = LineScan::new(Axis::Horizontal, 0, 5, &board);
        assert!(!scan.compare_pt1());
        assert!(scan.compare_pt2());
        assert!(!scan.compare_both());
    }

    #[test]
    fn window_stops_three_cells_out() {
        let board = Board::new(10, 6);
        let mut scan = LineScan::new(Axis::Horizontal, 5, 5, &board);
        for _ in 0..3 {
            assert!(scan.compare_both());
            scan.advance_both();
        }
        assert!(!scan.compare_pt1());
        assert!(!scan.compare_pt2());
    }

    #[test]
    fn diagonal_probes_respect_vertical_window() {
        let board = Board::default();
        // Bottom row: the lower probe of either diagonal starts off the board.
        let left = LineScan::new(Axis::LeftDiagonal, 3, 5, &board);
        assert!(!left.compare_pt1());
        assert!(left.compare_pt2());
        let right = LineScan::new(Axis::RightDiagonal, 3, 5, &board);
        assert!(right.compare_pt1());
        assert!(!right.compare_pt2());
    }

    #[test]
    fn ripple_counts_both_sides_of_a_gap() {
        // Placing at column 2 joins 0 0 _ 0.
        let board = Board::from_ascii(&[
            ". . . . . . .",
            ". . . . . . .",
            ". . . . . . .",
            ". . . . . . .",
            ". . . . . . .",
            "0 0 . 0 . . .",
        ]);
        let mut scan = LineScan::new(Axis::Horizontal, 2, 5, &board);
        assert_eq!(scan.ripple(&board, Token::Computer, 1, false), 4);
    }

    #[test]
    fn ripple_stops_at_a_different_token() {
        let board = Board::from_ascii(&[
            ". . . . . . .",
            ". . . . . . .",
            ". . . . . . .",
            ". . . . . . .",
            ". . . . . . .",
            ". X 0 . 0 X .",
        ]);
        let mut scan = LineScan::new(Axis::Horizontal, 3, 5, &board);
        assert_eq!(scan.ripple(&board, Token::Computer, 1, false), 3);
    }

    #[test]
    fn ripple_follows_left_diagonal() {
        let board = Board::from_ascii(&[
            ". . . . . . .",
            ". . . . . . .",
            ". . . . . . .",
            ". . 0 . . . .",
            ". 0 X . . . .",
            "0 X X . . . .",
        ]);
        // Probe from the cell that would complete the diagonal.
        let mut scan = LineScan::new(Axis::LeftDiagonal, 3, 2, &board);
        assert_eq!(scan.ripple(&board, Token::Computer, 1, false), 4);
    }

    #[test]
    fn fall_through_requires_support() {
        let board = Board::from_ascii(&[
            ". . . . . . .",
            ". . . . . . .",
            ". . . . . . .",
            ". . . . . . .",
            ". . . . . . .",
            ". . . X . . .",
        ]);
        // Row 4 beside the X: column 3 is supported, its neighbours are not.
        let mut scan = LineScan::new(Axis::Horizontal, 2, 4, &board);
        assert_eq!(scan.ripple(&board, Token::Empty, 1, true), 2);
    }

    #[test]
    fn vertical_count_includes_placed_piece() {
        let board = Board::from_ascii(&[
            ". . . . . . .",
            ". . . . . . .",
            ". . . . . . .",
            ". . 0 . . . .",
            ". . 0 . . . .",
            ". . X . . . .",
        ]);
        assert_eq!(vertical_count(&board, 2, Token::Computer), 3);
        assert_eq!(vertical_count(&board, 2, Token::Player), 1);
        assert_eq!(vertical_count(&board, 0, Token::Computer), 1);
    }

    #[test]
    fn room_above_counts_remaining_slots() {
        let board = Board::from_ascii(&[
            ". . . . . . .",
            ". . . . . . .",
            ". . 0 . . . .",
            ". . X . . . .",
            ". . X . . . .",
            ". . X . . . .",
        ]);
        // Landing row 1: one more slot above it (row 0).
        assert!(room_above(&board, 2, 3));
        assert!(!room_above(&board, 2, 2));
        assert!(!room_above(&board, 2, 1));
        assert!(room_above(&board, 0, 1));
    }
}
