//! The serializable session snapshot.
//!
//! `SessionSnapshot` is the exact JSON projection persisted under the
//! `gameState` key: `{grid, pieces, score, goals}`. It is derived from the
//! live session after every successful placement and reconciled back into
//! one on load; it is only authoritative immediately after a load.
//!
//! Loading is fail-closed: any structural problem surfaces as a
//! [`SnapshotError`] and the caller falls back to a fresh session, exactly
//! as if no save existed.

use serde::{Deserialize, Serialize};

use crate::goals::Goal;
use crate::pieces::{Shape, ShapeError};

/// Structural failure while reconstructing state from a snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SnapshotError {
    /// Grid is empty or ragged.
    BadDimensions,
    /// A grid cell held something other than 0 or 1.
    BadCell(u8),
    /// A saved piece shape failed validation.
    Shape(ShapeError),
}

impl std::fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotError::BadDimensions => write!(f, "snapshot grid is empty or ragged"),
            SnapshotError::BadCell(value) => {
                write!(f, "snapshot grid cell holds {value}, expected 0 or 1")
            }
            SnapshotError::Shape(err) => write!(f, "snapshot piece shape invalid: {err}"),
        }
    }
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SnapshotError::Shape(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ShapeError> for SnapshotError {
    fn from(err: ShapeError) -> Self {
        SnapshotError::Shape(err)
    }
}

/// The persisted projection of one session.
///
/// Field names and value shapes are the wire contract; they round-trip
/// byte-faithfully through JSON.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Board occupancy, row-major, 0 = empty, 1 = filled.
    pub grid: Vec<Vec<u8>>,

    /// Shapes of the active batch. Piece identity is not persisted; pieces
    /// are recreated with fresh IDs on load.
    pub pieces: Vec<Shape>,

    /// Current score.
    pub score: u32,

    /// Goal triples.
    pub goals: Vec<Goal>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SessionSnapshot {
        SessionSnapshot {
            grid: vec![vec![0, 1], vec![1, 0]],
            pieces: vec![Shape::from_rows(vec![vec![1, 1]]).unwrap()],
            score: 14,
            goals: vec![Goal {
                description: "Reach 100 points".into(),
                target: 100,
                progress: 14,
            }],
        }
    }

    #[test]
    fn test_wire_field_names() {
        let json = serde_json::to_string(&sample()).unwrap();

        assert!(json.contains(r#""grid":[[0,1],[1,0]]"#));
        assert!(json.contains(r#""pieces":[[[1,1]]]"#));
        assert!(json.contains(r#""score":14"#));
        assert!(json.contains(r#""goals":"#));
    }

    #[test]
    fn test_roundtrip() {
        let snapshot = sample();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: SessionSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }

    #[test]
    fn test_corrupt_piece_fails_parse() {
        let json = r#"{"grid":[[0]],"pieces":[[[0,0]]],"score":0,"goals":[]}"#;
        assert!(serde_json::from_str::<SessionSnapshot>(json).is_err());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            SnapshotError::BadCell(7).to_string(),
            "snapshot grid cell holds 7, expected 0 or 1"
        );
        let err: SnapshotError = ShapeError::Ragged.into();
        assert!(err.to_string().contains("rows have unequal lengths"));
    }
}
