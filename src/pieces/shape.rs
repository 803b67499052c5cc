//! Polyomino shapes - immutable cell footprints.
//!
//! A `Shape` is a rectangular boolean matrix describing which relative cells
//! a piece occupies. Non-rectangular footprints are encoded with `false`
//! cells. Shapes never change after construction; a piece that needs a
//! different footprint is a different shape.
//!
//! ## Wire Form
//!
//! Shapes serialize as `number[][]` of 0/1, matching the persisted session
//! snapshot. Deserialization re-validates, so a corrupted save degrades to a
//! recoverable [`ShapeError`] instead of a malformed shape.

use serde::{Deserialize, Serialize};

/// Validation failure for a shape matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeError {
    /// The matrix has no rows or no columns.
    Empty,
    /// Row lengths differ.
    Ragged,
    /// No cell is filled.
    NoFilledCells,
}

impl std::fmt::Display for ShapeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShapeError::Empty => write!(f, "shape matrix is empty"),
            ShapeError::Ragged => write!(f, "shape matrix rows have unequal lengths"),
            ShapeError::NoFilledCells => write!(f, "shape has no filled cells"),
        }
    }
}

impl std::error::Error for ShapeError {}

/// An immutable polyomino footprint.
///
/// Invariants (enforced at construction):
/// - at least one row and one column
/// - all rows the same length
/// - at least one filled cell
///
/// ## Example
///
/// ```
/// use gridblocks::Shape;
///
/// let square = Shape::from_rows(vec![vec![1, 1], vec![1, 1]]).unwrap();
/// assert_eq!(square.height(), 2);
/// assert_eq!(square.width(), 2);
/// assert_eq!(square.filled_count(), 4);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u8>>", into = "Vec<Vec<u8>>")]
pub struct Shape {
    cells: Vec<Vec<bool>>,
}

impl Shape {
    /// Create a shape from a boolean matrix.
    pub fn new(cells: Vec<Vec<bool>>) -> Result<Self, ShapeError> {
        if cells.is_empty() || cells[0].is_empty() {
            return Err(ShapeError::Empty);
        }
        let width = cells[0].len();
        if cells.iter().any(|row| row.len() != width) {
            return Err(ShapeError::Ragged);
        }
        if !cells.iter().any(|row| row.iter().any(|&c| c)) {
            return Err(ShapeError::NoFilledCells);
        }
        Ok(Self { cells })
    }

    /// Create a shape from the 0/1 wire form.
    ///
    /// Any nonzero value counts as filled, matching the 0|1 snapshot
    /// contract without being strict about what corruption looks like.
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Self, ShapeError> {
        Self::new(
            rows.into_iter()
                .map(|row| row.into_iter().map(|c| c != 0).collect())
                .collect(),
        )
    }

    /// Convert to the 0/1 wire form.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.cells
            .iter()
            .map(|row| row.iter().map(|&c| u8::from(c)).collect())
            .collect()
    }

    /// Number of rows in the bounding box.
    #[must_use]
    pub fn height(&self) -> usize {
        self.cells.len()
    }

    /// Number of columns in the bounding box.
    #[must_use]
    pub fn width(&self) -> usize {
        self.cells[0].len()
    }

    /// Is the cell at (row, col) filled?
    ///
    /// Out-of-range coordinates read as unfilled.
    #[must_use]
    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        self.cells
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(false)
    }

    /// Iterate over the (row, col) offsets of every filled cell.
    pub fn filled_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, &c)| c)
                .map(move |(c, _)| (r, c))
        })
    }

    /// Number of filled cells.
    #[must_use]
    pub fn filled_count(&self) -> u32 {
        self.cells
            .iter()
            .map(|row| row.iter().filter(|&&c| c).count() as u32)
            .sum()
    }
}

impl TryFrom<Vec<Vec<u8>>> for Shape {
    type Error = ShapeError;

    fn try_from(rows: Vec<Vec<u8>>) -> Result<Self, Self::Error> {
        Shape::from_rows(rows)
    }
}

impl From<Shape> for Vec<Vec<u8>> {
    fn from(shape: Shape) -> Self {
        shape.to_rows()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_shape() {
        let t = Shape::from_rows(vec![vec![0, 1, 0], vec![1, 1, 1]]).unwrap();

        assert_eq!(t.height(), 2);
        assert_eq!(t.width(), 3);
        assert_eq!(t.filled_count(), 4);
        assert!(!t.is_filled(0, 0));
        assert!(t.is_filled(0, 1));
        assert!(t.is_filled(1, 2));
    }

    #[test]
    fn test_empty_matrix_rejected() {
        assert_eq!(Shape::from_rows(vec![]), Err(ShapeError::Empty));
        assert_eq!(Shape::from_rows(vec![vec![]]), Err(ShapeError::Empty));
    }

    #[test]
    fn test_ragged_matrix_rejected() {
        assert_eq!(
            Shape::from_rows(vec![vec![1, 1], vec![1]]),
            Err(ShapeError::Ragged)
        );
    }

    #[test]
    fn test_all_empty_rejected() {
        assert_eq!(
            Shape::from_rows(vec![vec![0, 0], vec![0, 0]]),
            Err(ShapeError::NoFilledCells)
        );
    }

    #[test]
    fn test_out_of_range_reads_unfilled() {
        let dot = Shape::from_rows(vec![vec![1]]).unwrap();
        assert!(!dot.is_filled(5, 5));
    }

    #[test]
    fn test_filled_cells_offsets() {
        let z = Shape::from_rows(vec![vec![1, 1, 0], vec![0, 1, 1]]).unwrap();
        let cells: Vec<_> = z.filled_cells().collect();
        assert_eq!(cells, vec![(0, 0), (0, 1), (1, 1), (1, 2)]);
    }

    #[test]
    fn test_wire_roundtrip() {
        let rows = vec![vec![1, 0, 1], vec![0, 1, 0], vec![1, 0, 1]];
        let shape = Shape::from_rows(rows.clone()).unwrap();
        assert_eq!(shape.to_rows(), rows);
    }

    #[test]
    fn test_serde_as_matrix() {
        let shape = Shape::from_rows(vec![vec![1, 1], vec![1, 1]]).unwrap();
        let json = serde_json::to_string(&shape).unwrap();
        assert_eq!(json, "[[1,1],[1,1]]");

        let back: Shape = serde_json::from_str(&json).unwrap();
        assert_eq!(back, shape);
    }

    #[test]
    fn test_serde_rejects_corrupt_shape() {
        let err = serde_json::from_str::<Shape>("[[0,0],[0,0]]");
        assert!(err.is_err());
    }
}
