//! Placement engine: the session state machine and drag-layer geometry.

pub mod geometry;
pub mod session;

pub use geometry::GridGeometry;
pub use session::{
    GameSession, PlacementError, PlacementReport, SessionPhase, Settings, BATCH_SIZE, BOARD_COLS,
    BOARD_ROWS,
};
