use std::fmt;

use super::PlayerId;
use crate::error::{MoveError, SetupError};

pub const DEFAULT_WIDTH: usize = 7;
pub const DEFAULT_HEIGHT: usize = 6;

/// Number of aligned pieces needed to win.
pub const RUN_LENGTH: usize = 4;

/// Row/column steps of the four run directions: right, down, down-right, down-left.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Occupied(PlayerId),
}

/// Coordinates of a winning line, as `(row, column)` pairs.
pub type Run = [(usize, usize); RUN_LENGTH];

/// The grid. Row 0 is the top, row `height - 1` is the bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board with `width` columns and `height` rows
    pub fn new(width: usize, height: usize) -> Result<Self, SetupError> {
        if width == 0 || height == 0 {
            return Err(SetupError::InvalidDimensions { width, height });
        }
        Ok(Board {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    /// Get the cell at a position, or `None` when it lies outside the board
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if row < self.height && col < self.width {
            Some(self.cells[self.index(row, col)])
        } else {
            None
        }
    }

    /// Find the row a piece dropped in `col` would settle into.
    ///
    /// Returns `Ok(None)` when the column is already full.
    pub fn find_landing_row(&self, col: usize) -> Result<Option<usize>, MoveError> {
        if col >= self.width {
            return Err(MoveError::InvalidColumn {
                column: col,
                width: self.width,
            });
        }

        Ok((0..self.height)
            .rev()
            .find(|&row| self.cells[self.index(row, col)] == Cell::Empty))
    }

    /// Occupy a cell previously returned by [`Board::find_landing_row`].
    ///
    /// Any other position (an occupied cell, a cell with a gap below it, a
    /// row off the board, a full column) is rejected and the board is left
    /// unchanged.
    pub fn place(&mut self, row: usize, col: usize, player: PlayerId) -> Result<(), MoveError> {
        if self.find_landing_row(col)? != Some(row) {
            return Err(MoveError::NotLandingRow { row, column: col });
        }
        let idx = self.index(row, col);
        self.cells[idx] = Cell::Occupied(player);
        Ok(())
    }

    /// Check if a column is full. Columns outside the board count as full.
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= self.width {
            return true;
        }
        self.cells[self.index(0, col)] != Cell::Empty
    }

    /// Columns that still accept a piece
    pub fn legal_columns(&self) -> Vec<usize> {
        (0..self.width)
            .filter(|&col| !self.is_column_full(col))
            .collect()
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&cell| cell != Cell::Empty)
    }

    /// Check whether `player` has four in a row anywhere on the board
    pub fn has_run(&self, player: PlayerId) -> bool {
        self.find_run(player).is_some()
    }

    /// Find a run of `player`'s pieces.
    ///
    /// Every cell is tried as the origin of a run in each of the four
    /// directions; the first complete run found is returned.
    pub fn find_run(&self, player: PlayerId) -> Option<Run> {
        let target = Cell::Occupied(player);
        for row in 0..self.height {
            for col in 0..self.width {
                for &(d_row, d_col) in &DIRECTIONS {
                    let Some(run) = self.line_from(row, col, d_row, d_col) else {
                        continue;
                    };
                    if run
                        .iter()
                        .all(|&(r, c)| self.cells[self.index(r, c)] == target)
                    {
                        return Some(run);
                    }
                }
            }
        }
        None
    }

    /// Coordinates of the line of [`RUN_LENGTH`] cells starting at
    /// `(row, col)`, or `None` if any of them falls off the board.
    fn line_from(&self, row: usize, col: usize, d_row: isize, d_col: isize) -> Option<Run> {
        let mut run = [(0, 0); RUN_LENGTH];
        for (step, slot) in run.iter_mut().enumerate() {
            let r = row.checked_add_signed(d_row * step as isize)?;
            let c = col.checked_add_signed(d_col * step as isize)?;
            if r >= self.height || c >= self.width {
                return None;
            }
            *slot = (r, c);
        }
        Some(run)
    }
}

impl Default for Board {
    fn default() -> Self {
        Board {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            cells: vec![Cell::Empty; DEFAULT_WIDTH * DEFAULT_HEIGHT],
        }
    }
}

/// One line per row, top row first: `.` for empty, `1`/`2` for pieces.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            for col in 0..self.width {
                match self.cells[self.index(row, col)] {
                    Cell::Empty => write!(f, ".")?,
                    Cell::Occupied(player) => write!(f, "{player}")?,
                }
            }
            if row + 1 < self.height {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a board from its text form. Each column is filled bottom-up, so
    /// layouts with floating pieces panic.
    fn board_from_layout(layout: &str) -> Board {
        let rows: Vec<Vec<char>> = layout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| line.chars().collect())
            .collect();
        let height = rows.len();
        let width = rows[0].len();
        let mut board = Board::new(width, height).unwrap();

        for col in 0..width {
            for row in (0..height).rev() {
                let player = match rows[row][col] {
                    '1' => PlayerId::One,
                    '2' => PlayerId::Two,
                    _ => continue,
                };
                assert_eq!(board.find_landing_row(col), Ok(Some(row)), "floating piece");
                board.place(row, col, player).unwrap();
            }
        }
        board
    }

    fn drop_piece(board: &mut Board, col: usize, player: PlayerId) -> usize {
        let row = board.find_landing_row(col).unwrap().unwrap();
        board.place(row, col, player).unwrap();
        row
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(7, 6).unwrap();
        for row in 0..6 {
            for col in 0..7 {
                assert_eq!(board.get(row, col), Some(Cell::Empty));
            }
        }
        assert!(!board.is_full());
    }

    #[test]
    fn test_default_dimensions() {
        let board = Board::default();
        assert_eq!(board.width(), 7);
        assert_eq!(board.height(), 6);
        assert_eq!(board, Board::new(7, 6).unwrap());
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert_eq!(
            Board::new(0, 6),
            Err(SetupError::InvalidDimensions {
                width: 0,
                height: 6
            })
        );
        assert!(Board::new(7, 0).is_err());
    }

    #[test]
    fn test_landing_row_climbs_column() {
        let mut board = Board::new(7, 6).unwrap();

        for placed in 0..6 {
            assert_eq!(board.find_landing_row(3), Ok(Some(5 - placed)));
            drop_piece(&mut board, 3, PlayerId::One);
        }
        assert_eq!(board.find_landing_row(3), Ok(None));
        assert!(board.is_column_full(3));
    }

    #[test]
    fn test_landing_row_uses_width_as_column_bound() {
        // Wide and short, so rows and columns cannot be confused
        let board = Board::new(9, 2).unwrap();
        assert_eq!(board.find_landing_row(8), Ok(Some(1)));
        assert_eq!(
            board.find_landing_row(9),
            Err(MoveError::InvalidColumn {
                column: 9,
                width: 9
            })
        );
    }

    #[test]
    fn test_place_sets_cell() {
        let mut board = Board::new(7, 6).unwrap();
        let row = drop_piece(&mut board, 2, PlayerId::Two);
        assert_eq!(row, 5);
        assert_eq!(board.get(5, 2), Some(Cell::Occupied(PlayerId::Two)));
        assert_eq!(board.get(4, 2), Some(Cell::Empty));
    }

    #[test]
    fn test_place_out_of_bounds_rejected() {
        let mut board = Board::new(7, 6).unwrap();
        assert_eq!(
            board.place(10, 10, PlayerId::One),
            Err(MoveError::InvalidColumn {
                column: 10,
                width: 7
            })
        );
        assert_eq!(
            board.place(10, 0, PlayerId::One),
            Err(MoveError::NotLandingRow { row: 10, column: 0 })
        );
        assert_eq!(board, Board::new(7, 6).unwrap());
    }

    #[test]
    fn test_place_off_landing_row_rejected() {
        let mut board = Board::new(7, 6).unwrap();
        drop_piece(&mut board, 4, PlayerId::One);
        let before = board.clone();

        // Occupied cell
        assert_eq!(
            board.place(5, 4, PlayerId::Two),
            Err(MoveError::NotLandingRow { row: 5, column: 4 })
        );
        // Floating above the landing row
        assert_eq!(
            board.place(2, 4, PlayerId::Two),
            Err(MoveError::NotLandingRow { row: 2, column: 4 })
        );
        assert_eq!(board, before);
        assert_eq!(board.get(5, 4), Some(Cell::Occupied(PlayerId::One)));
    }

    #[test]
    fn test_place_in_full_column_rejected() {
        let mut board = Board::new(2, 2).unwrap();
        drop_piece(&mut board, 0, PlayerId::One);
        drop_piece(&mut board, 0, PlayerId::Two);
        assert_eq!(
            board.place(0, 0, PlayerId::One),
            Err(MoveError::NotLandingRow { row: 0, column: 0 })
        );
        assert_eq!(board.get(0, 0), Some(Cell::Occupied(PlayerId::Two)));
    }

    #[test]
    fn test_get_out_of_bounds() {
        let board = Board::new(7, 6).unwrap();
        assert_eq!(board.get(6, 0), None);
        assert_eq!(board.get(0, 7), None);
    }

    #[test]
    fn test_legal_columns() {
        let mut board = Board::new(3, 1).unwrap();
        drop_piece(&mut board, 1, PlayerId::One);
        assert_eq!(board.legal_columns(), vec![0, 2]);
        assert!(board.is_column_full(5));
    }

    #[test]
    fn test_full_board() {
        let mut board = Board::new(7, 6).unwrap();
        for col in 0..7 {
            for _ in 0..6 {
                drop_piece(&mut board, col, PlayerId::One);
            }
        }
        assert!(board.is_full());
        assert!(board.legal_columns().is_empty());
    }

    #[test]
    fn test_horizontal_run() {
        let board = board_from_layout(
            "
            .......
            .......
            .......
            .......
            .222...
            .1111..
            ",
        );
        assert_eq!(
            board.find_run(PlayerId::One),
            Some([(5, 1), (5, 2), (5, 3), (5, 4)])
        );
        assert!(!board.has_run(PlayerId::Two));
    }

    #[test]
    fn test_horizontal_run_order_independent() {
        // Same four cells, dropped right to left
        let mut board = Board::new(7, 6).unwrap();
        for col in (3..7).rev() {
            drop_piece(&mut board, col, PlayerId::Two);
        }
        assert_eq!(
            board.find_run(PlayerId::Two),
            Some([(5, 3), (5, 4), (5, 5), (5, 6)])
        );
    }

    #[test]
    fn test_vertical_run() {
        let board = board_from_layout(
            "
            .......
            .......
            ...2...
            ...2...
            ...2..1
            ...2.11
            ",
        );
        assert_eq!(
            board.find_run(PlayerId::Two),
            Some([(2, 3), (3, 3), (4, 3), (5, 3)])
        );
    }

    #[test]
    fn test_diagonal_down_right_run() {
        let board = board_from_layout(
            "
            .......
            .......
            1......
            21.....
            221....
            2121...
            ",
        );
        assert_eq!(
            board.find_run(PlayerId::One),
            Some([(2, 0), (3, 1), (4, 2), (5, 3)])
        );
    }

    #[test]
    fn test_diagonal_down_left_run() {
        let board = board_from_layout(
            "
            .......
            .......
            ......2
            .....21
            ....211
            ...2112
            ",
        );
        assert_eq!(
            board.find_run(PlayerId::Two),
            Some([(2, 6), (3, 5), (4, 4), (5, 3)])
        );
    }

    #[test]
    fn test_no_run_with_three() {
        let board = board_from_layout(
            "
            .......
            .......
            .......
            1......
            12.....
            1122...
            ",
        );
        assert!(!board.has_run(PlayerId::One));
        assert!(!board.has_run(PlayerId::Two));
    }

    #[test]
    fn test_run_ignores_opponent_pieces() {
        let board = board_from_layout(
            "
            ....
            1112
            ",
        );
        assert!(!board.has_run(PlayerId::One));
    }

    #[test]
    fn test_small_board_never_has_run() {
        let board = board_from_layout(
            "
            111
            111
            111
            ",
        );
        assert!(board.is_full());
        assert!(!board.has_run(PlayerId::One));
    }

    #[test]
    fn test_full_board_with_run() {
        let board = board_from_layout(
            "
            1212
            2121
            1211
            2112
            ",
        );
        assert!(board.is_full());
        assert!(!board.has_run(PlayerId::One));
        assert_eq!(
            board.find_run(PlayerId::Two),
            Some([(0, 3), (1, 2), (2, 1), (3, 0)])
        );
    }

    #[test]
    fn test_display() {
        let mut board = Board::new(4, 2).unwrap();
        drop_piece(&mut board, 0, PlayerId::One);
        drop_piece(&mut board, 0, PlayerId::Two);
        drop_piece(&mut board, 3, PlayerId::One);
        assert_eq!(board.to_string(), "2...\n1..1");
    }
}
