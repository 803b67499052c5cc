//! Grid occupancy, fit-testing, and line scanning.
//!
//! The board is a fixed-size grid of empty/filled cells. Dimensions never
//! change after creation. All queries are pure; only [`Board::place`] and
//! [`Board::clear_line`] mutate.
//!
//! Fit-testing fails closed: the first out-of-bounds or occupied cell makes
//! `can_place` false. Rows and columns are scanned independently, so one
//! placement can complete a row and a column through the same cell.

use smallvec::SmallVec;

use crate::pieces::{Piece, Shape};
use crate::session::SnapshotError;

/// State of a single board cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Filled,
}

/// A clearable line: one full row or one full column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Line {
    Row(usize),
    Col(usize),
}

/// Indices of all currently complete lines.
///
/// Rows and columns are evaluated independently; a cell can count toward
/// both at once.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompletedLines {
    /// Complete row indices, ascending.
    pub rows: SmallVec<[usize; 4]>,
    /// Complete column indices, ascending.
    pub cols: SmallVec<[usize; 4]>,
}

impl CompletedLines {
    /// Total number of complete lines.
    #[must_use]
    pub fn total(&self) -> u32 {
        (self.rows.len() + self.cols.len()) as u32
    }

    /// Check whether no line is complete.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.cols.is_empty()
    }
}

/// Fixed-dimension grid of cell occupancy.
///
/// ## Example
///
/// ```
/// use gridblocks::{Board, Shape};
///
/// let mut board = Board::new(10, 10);
/// let square = Shape::from_rows(vec![vec![1, 1], vec![1, 1]]).unwrap();
///
/// assert!(board.can_place(0, 0, &square));
/// assert_eq!(board.place(0, 0, &square), 4);
/// assert!(!board.can_place(0, 0, &square));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create a board with all cells empty.
    ///
    /// Panics on zero dimensions (programmer error).
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        assert!(rows > 0 && cols > 0, "board dimensions must be nonzero");
        Self {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
        }
    }

    /// Number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Read a cell.
    ///
    /// Panics on out-of-range coordinates; renderers iterate `0..rows()` x
    /// `0..cols()`.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        assert!(row < self.rows && col < self.cols, "cell out of range");
        self.cells[row * self.cols + col]
    }

    /// Check whether every cell is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&c| c == Cell::Empty)
    }

    /// Number of filled cells.
    #[must_use]
    pub fn filled_count(&self) -> u32 {
        self.cells.iter().filter(|&&c| c == Cell::Filled).count() as u32
    }

    /// True iff the shape's bounding box, anchored at (row, col), lies
    /// entirely within the board. Negative anchors are out of bounds.
    #[must_use]
    pub fn is_within_bounds(&self, row: i32, col: i32, shape: &Shape) -> bool {
        row >= 0
            && col >= 0
            && row as usize + shape.height() <= self.rows
            && col as usize + shape.width() <= self.cols
    }

    /// True iff every filled cell of the shape maps to an in-bounds, empty
    /// board cell. Fails closed on the first violation.
    #[must_use]
    pub fn can_place(&self, row: i32, col: i32, shape: &Shape) -> bool {
        for (dr, dc) in shape.filled_cells() {
            let r = row + dr as i32;
            let c = col + dc as i32;
            if r < 0 || c < 0 || r as usize >= self.rows || c as usize >= self.cols {
                return false;
            }
            if self.cells[r as usize * self.cols + c as usize] == Cell::Filled {
                return false;
            }
        }
        true
    }

    /// Mark every filled cell of the shape as occupied and return how many
    /// cells were filled.
    ///
    /// Precondition: the caller has already verified [`Board::can_place`].
    /// This operation does not re-validate and is not safe to call
    /// speculatively.
    pub fn place(&mut self, row: usize, col: usize, shape: &Shape) -> u32 {
        debug_assert!(self.can_place(row as i32, col as i32, shape));

        let mut occupied = 0;
        for (dr, dc) in shape.filled_cells() {
            self.cells[(row + dr) * self.cols + (col + dc)] = Cell::Filled;
            occupied += 1;
        }
        occupied
    }

    /// Scan for complete rows and columns.
    #[must_use]
    pub fn completed_lines(&self) -> CompletedLines {
        let mut completed = CompletedLines::default();

        for row in 0..self.rows {
            if (0..self.cols).all(|col| self.cells[row * self.cols + col] == Cell::Filled) {
                completed.rows.push(row);
            }
        }
        for col in 0..self.cols {
            if (0..self.rows).all(|row| self.cells[row * self.cols + col] == Cell::Filled) {
                completed.cols.push(col);
            }
        }

        completed
    }

    /// Set every cell of the given line to empty.
    ///
    /// Clearing an already-empty line is a no-op. Panics on an out-of-range
    /// index (programmer error).
    pub fn clear_line(&mut self, line: Line) {
        match line {
            Line::Row(row) => {
                assert!(row < self.rows, "row index out of range");
                for col in 0..self.cols {
                    self.cells[row * self.cols + col] = Cell::Empty;
                }
            }
            Line::Col(col) => {
                assert!(col < self.cols, "column index out of range");
                for row in 0..self.rows {
                    self.cells[row * self.cols + col] = Cell::Empty;
                }
            }
        }
    }

    /// True iff at least one piece in the batch fits somewhere on the board.
    ///
    /// Exhaustive scan over (piece, row, col) with early exit. Fine at 10x10
    /// scale; this is the hot path to revisit if dimensions ever grow.
    #[must_use]
    pub fn has_any_valid_move(&self, pieces: &[Piece]) -> bool {
        pieces.iter().any(|piece| {
            (0..self.rows as i32).any(|row| {
                (0..self.cols as i32).any(|col| self.can_place(row, col, &piece.shape))
            })
        })
    }

    /// Convert to the 0/1 wire form, row-major.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        (0..self.rows)
            .map(|row| {
                (0..self.cols)
                    .map(|col| u8::from(self.cells[row * self.cols + col] == Cell::Filled))
                    .collect()
            })
            .collect()
    }

    /// Rebuild a board from the 0/1 wire form.
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Self, SnapshotError> {
        if rows.is_empty() || rows[0].is_empty() {
            return Err(SnapshotError::BadDimensions);
        }
        let cols = rows[0].len();
        if rows.iter().any(|r| r.len() != cols) {
            return Err(SnapshotError::BadDimensions);
        }

        let mut board = Board::new(rows.len(), cols);
        for (r, row) in rows.iter().enumerate() {
            for (c, &value) in row.iter().enumerate() {
                board.cells[r * cols + c] = match value {
                    0 => Cell::Empty,
                    1 => Cell::Filled,
                    other => return Err(SnapshotError::BadCell(other)),
                };
            }
        }
        Ok(board)
    }
}
