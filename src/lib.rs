//! # gridblocks
//!
//! A deterministic engine for a single-player block puzzle: polyomino pieces
//! are dragged onto a fixed 10x10 board, lock in place when they fit, and
//! fully-filled rows/columns clear for points. The game ends when no piece in
//! the active batch can be placed anywhere.
//!
//! ## Design Principles
//!
//! 1. **Explicit State**: Everything mutable lives in a [`GameSession`] the
//!    caller owns. No globals, no ambient scene objects.
//!
//! 2. **Pure Core**: The engine takes plain data in (a piece id and a target
//!    cell) and returns plain data out (a [`PlacementReport`]). Rendering,
//!    input, and sound are collaborators that adapt to this surface.
//!
//! 3. **Deterministic**: Piece sampling runs on a seeded ChaCha8 stream.
//!    Same seed, same piece batches.
//!
//! 4. **Recoverable Failures**: Invalid placements are `Err` values that
//!    leave the session untouched. Persistence failures never block a legal
//!    placement.
//!
//! ## Modules
//!
//! - `core`: Deterministic RNG
//! - `board`: Grid-state container, fit-testing, line scan/clear
//! - `pieces`: Shape matrices, piece identity, the shape catalog
//! - `goals`: Session objectives and progress tracking
//! - `engine`: The placement state machine and pixel-to-cell geometry
//! - `session`: Snapshot wire format, key-value stores, the persistence host

pub mod core;
pub mod board;
pub mod pieces;
pub mod goals;
pub mod engine;
pub mod session;

// Re-export commonly used types
pub use crate::core::GameRng;

pub use crate::board::{Board, Cell, CompletedLines, Line};

pub use crate::pieces::{Piece, PieceId, PieceIds, Shape, ShapeCatalog, ShapeError, ShapeId};

pub use crate::goals::{Goal, GoalCategory, GoalTracker};

pub use crate::engine::{
    GameSession, GridGeometry, PlacementError, PlacementReport, SessionPhase, Settings, BATCH_SIZE,
};

pub use crate::session::{
    FileStore, MemoryStore, SessionHost, SessionSnapshot, SessionStore, SnapshotError, StateStore,
    GAME_STATE_KEY, HIGH_SCORE_KEY,
};
