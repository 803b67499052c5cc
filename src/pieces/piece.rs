//! Piece instances - shapes with identity.
//!
//! A `Piece` is one draggable instance of a [`Shape`] in the active batch.
//! Two pieces with identical shapes are distinct entities: the drag layer
//! references a `PieceId`, never a shape, so placing one square from a batch
//! that happens to contain two leaves the other untouched.
//!
//! IDs are allocated by the session through [`PieceIds`] and are never
//! reused within a session.

use serde::{Deserialize, Serialize};

use super::shape::Shape;

/// Unique identifier for a piece instance within a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceId(pub u32);

impl PieceId {
    /// Create a new piece ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for PieceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Piece({})", self.0)
    }
}

/// Monotonic piece ID allocator, owned by the session.
#[derive(Clone, Debug, Default)]
pub struct PieceIds {
    next: u32,
}

impl PieceIds {
    /// Create an allocator starting at ID 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next piece ID.
    pub fn alloc(&mut self) -> PieceId {
        let id = PieceId(self.next);
        self.next += 1;
        id
    }
}

/// A placeable piece: identity plus footprint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Piece {
    /// Stable identity within the session.
    pub id: PieceId,

    /// The occupied-cell footprint.
    pub shape: Shape,
}

impl Piece {
    /// Create a piece from an allocated ID and a shape.
    #[must_use]
    pub fn new(id: PieceId, shape: Shape) -> Self {
        Self { id, shape }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Shape {
        Shape::from_rows(vec![vec![1, 1], vec![1, 1]]).unwrap()
    }

    #[test]
    fn test_alloc_is_monotonic() {
        let mut ids = PieceIds::new();

        assert_eq!(ids.alloc(), PieceId::new(0));
        assert_eq!(ids.alloc(), PieceId::new(1));
        assert_eq!(ids.alloc(), PieceId::new(2));
    }

    #[test]
    fn test_same_shape_distinct_identity() {
        let mut ids = PieceIds::new();
        let a = Piece::new(ids.alloc(), square());
        let b = Piece::new(ids.alloc(), square());

        assert_eq!(a.shape, b.shape);
        assert_ne!(a.id, b.id);
        assert_ne!(a, b);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", PieceId::new(7)), "Piece(7)");
    }
}
