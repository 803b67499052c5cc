//! The placement state machine.
//!
//! A [`GameSession`] owns everything mutable in one play-through: board,
//! active batch, score, goals, settings, RNG, and the high score cache. It
//! is a two-state machine, `Active` and `GameOver`; the transition is
//! one-way until [`GameSession::start_new_game`].
//!
//! ## Placement Protocol
//!
//! `attempt_placement` runs the full turn synchronously: fit-test, occupy,
//! batch bookkeeping, scoring, goal updates, line clears, high-score check,
//! terminal-state detection. Rejections are plain `Err` values and leave
//! the session untouched; the host returns the piece to its resting
//! position and optionally plays a feedback sound.
//!
//! ## Batch Lifecycle
//!
//! The batch refills only when it empties completely. A lone leftover piece
//! that fits nowhere forces game over even though two slots are free; that
//! matches the shipped game's behavior and is preserved deliberately.

use crate::board::{Board, CompletedLines, Line};
use crate::core::GameRng;
use crate::goals::{GoalCategory, GoalTracker};
use crate::pieces::{Piece, PieceId, PieceIds, ShapeCatalog};
use crate::session::{SessionSnapshot, SnapshotError};

/// Board rows for a standard session.
pub const BOARD_ROWS: usize = 10;

/// Board columns for a standard session.
pub const BOARD_COLS: usize = 10;

/// Number of pieces per batch.
pub const BATCH_SIZE: usize = 3;

/// Points awarded per cleared line.
const LINE_CLEAR_POINTS: u32 = 10;

/// Session lifecycle state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    /// Accepting placements.
    Active,
    /// Terminal; placements are rejected until a new game starts.
    GameOver,
}

/// Why a placement was rejected.
///
/// All variants are recoverable; the session is unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlacementError {
    /// The shape's bounding box does not fit on the board at the target.
    OutOfBounds,
    /// A filled cell of the shape lands on an occupied board cell.
    Collision,
    /// The session is in the terminal state.
    GameOver,
    /// The piece id does not belong to the active batch.
    UnknownPiece,
}

impl std::fmt::Display for PlacementError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let signal = match self {
            PlacementError::OutOfBounds => "invalid-out-of-bounds",
            PlacementError::Collision => "invalid-collision",
            PlacementError::GameOver => "game-over",
            PlacementError::UnknownPiece => "unknown-piece",
        };
        f.write_str(signal)
    }
}

impl std::error::Error for PlacementError {}

/// Everything a collaborator needs to know about one successful placement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacementReport {
    /// Cells occupied by the placed piece.
    pub occupied: u32,

    /// Lines completed and cleared this turn.
    pub cleared: CompletedLines,

    /// Total score awarded this turn (occupancy plus clear bonus).
    pub score_awarded: u32,

    /// Whether placing this piece emptied the batch and a new one was drawn.
    pub batch_refilled: bool,

    /// Whether the session transitioned to `GameOver`.
    pub game_over: bool,

    /// Whether this turn raised the high score.
    pub new_high_score: bool,
}

/// Collaborator-facing toggles. Not part of the snapshot wire format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Settings {
    /// Play feedback sounds.
    pub sound_effects: bool,
    /// Play background music.
    pub music: bool,
}

/// One play-through of the puzzle.
#[derive(Clone, Debug)]
pub struct GameSession {
    board: Board,
    pieces: Vec<Piece>,
    score: u32,
    goals: GoalTracker,
    phase: SessionPhase,
    catalog: ShapeCatalog,
    rng: GameRng,
    piece_ids: PieceIds,
    high_score: u32,
    settings: Settings,
}

impl GameSession {
    /// Create a fresh session on the standard 10x10 board with the standard
    /// catalog and a first batch already drawn.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::with_catalog(ShapeCatalog::standard(), seed)
    }

    /// Create a fresh session with a custom catalog.
    #[must_use]
    pub fn with_catalog(catalog: ShapeCatalog, seed: u64) -> Self {
        let mut rng = GameRng::new(seed);
        let mut piece_ids = PieceIds::new();
        let pieces = catalog.generate_batch(&mut rng, &mut piece_ids, BATCH_SIZE);

        Self {
            board: Board::new(BOARD_ROWS, BOARD_COLS),
            pieces,
            score: 0,
            goals: GoalTracker::standard(),
            phase: SessionPhase::Active,
            catalog,
            rng,
            piece_ids,
            high_score: 0,
            settings: Settings::default(),
        }
    }

    /// Reconstruct a session from a saved snapshot.
    ///
    /// Pieces get fresh identities; the RNG restarts from `seed`. An empty
    /// saved batch is refilled and empty saved goals fall back to the
    /// standard set. If the restored position has no valid move left, the
    /// session comes back already in `GameOver`.
    pub fn restore(snapshot: SessionSnapshot, seed: u64) -> Result<Self, SnapshotError> {
        let board = Board::from_rows(snapshot.grid)?;
        let mut rng = GameRng::new(seed);
        let mut piece_ids = PieceIds::new();
        let catalog = ShapeCatalog::standard();

        let mut pieces: Vec<Piece> = snapshot
            .pieces
            .into_iter()
            .map(|shape| Piece::new(piece_ids.alloc(), shape))
            .collect();
        if pieces.is_empty() {
            pieces = catalog.generate_batch(&mut rng, &mut piece_ids, BATCH_SIZE);
        }

        let goals = if snapshot.goals.is_empty() {
            GoalTracker::standard()
        } else {
            GoalTracker::from_goals(snapshot.goals)
        };

        let phase = if board.has_any_valid_move(&pieces) {
            SessionPhase::Active
        } else {
            SessionPhase::GameOver
        };

        Ok(Self {
            board,
            pieces,
            score: snapshot.score,
            goals,
            phase,
            catalog,
            rng,
            piece_ids,
            high_score: 0,
            settings: Settings::default(),
        })
    }

    // === Queries ===

    /// The board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The active batch, in display order.
    #[must_use]
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Look up an active piece by id.
    #[must_use]
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.id == id)
    }

    /// Current score.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Best score seen, including previous sessions if seeded via
    /// [`GameSession::set_high_score`].
    #[must_use]
    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Convenience check for the terminal state.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.phase == SessionPhase::GameOver
    }

    /// Goal progress.
    #[must_use]
    pub fn goals(&self) -> &GoalTracker {
        &self.goals
    }

    /// Current settings.
    #[must_use]
    pub fn settings(&self) -> Settings {
        self.settings
    }

    /// True iff any active piece still fits somewhere.
    #[must_use]
    pub fn has_any_valid_move(&self) -> bool {
        self.board.has_any_valid_move(&self.pieces)
    }

    // === Commands ===

    /// Seed the high score from the persisted value at startup.
    pub fn set_high_score(&mut self, value: u32) {
        self.high_score = value;
    }

    /// Flip the sound-effects toggle and return the new value.
    pub fn toggle_sound_effects(&mut self) -> bool {
        self.settings.sound_effects = !self.settings.sound_effects;
        self.settings.sound_effects
    }

    /// Flip the music toggle and return the new value.
    pub fn toggle_music(&mut self) -> bool {
        self.settings.music = !self.settings.music;
        self.settings.music
    }

    /// Attempt to lock an active piece with its bounding-box origin at
    /// (`row`, `col`).
    ///
    /// On success the full turn runs: occupy, batch bookkeeping, scoring,
    /// goal updates, line clears, high-score check, terminal detection.
    /// On failure nothing changes and the reason comes back as the error.
    pub fn attempt_placement(
        &mut self,
        piece_id: PieceId,
        row: i32,
        col: i32,
    ) -> Result<PlacementReport, PlacementError> {
        if self.phase == SessionPhase::GameOver {
            return Err(PlacementError::GameOver);
        }

        let index = self
            .pieces
            .iter()
            .position(|p| p.id == piece_id)
            .ok_or(PlacementError::UnknownPiece)?;
        let shape = self.pieces[index].shape.clone();

        if !self.board.is_within_bounds(row, col, &shape) {
            return Err(PlacementError::OutOfBounds);
        }
        if !self.board.can_place(row, col, &shape) {
            return Err(PlacementError::Collision);
        }

        let occupied = self.board.place(row as usize, col as usize, &shape);
        self.pieces.remove(index);

        let batch_refilled = if self.pieces.is_empty() {
            self.pieces = self
                .catalog
                .generate_batch(&mut self.rng, &mut self.piece_ids, BATCH_SIZE);
            true
        } else {
            false
        };

        self.score += occupied;
        self.goals.update_progress(GoalCategory::Points, occupied);
        self.goals.update_progress(GoalCategory::Pieces, 1);

        let (cleared, clear_points) = self.apply_line_clears();

        let new_high_score = if self.score > self.high_score {
            self.high_score = self.score;
            true
        } else {
            false
        };

        let game_over = !self.board.has_any_valid_move(&self.pieces);
        if game_over {
            self.phase = SessionPhase::GameOver;
        }

        Ok(PlacementReport {
            occupied,
            cleared,
            score_awarded: occupied + clear_points,
            batch_refilled,
            game_over,
            new_high_score,
        })
    }

    /// Reset to a fresh playing state. Callable from any phase; the high
    /// score survives.
    pub fn start_new_game(&mut self) {
        self.board = Board::new(self.board.rows(), self.board.cols());
        self.score = 0;
        self.goals.reset();
        self.pieces = self
            .catalog
            .generate_batch(&mut self.rng, &mut self.piece_ids, BATCH_SIZE);
        self.phase = SessionPhase::Active;
    }

    /// Project the persistable state.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            grid: self.board.to_rows(),
            pieces: self.pieces.iter().map(|p| p.shape.clone()).collect(),
            score: self.score,
            goals: self.goals.to_goals(),
        }
    }

    /// Clear every completed row and column, award the clear bonus, and
    /// feed the goal tracker. Runs after every successful placement, even
    /// when nothing cleared.
    fn apply_line_clears(&mut self) -> (CompletedLines, u32) {
        let completed = self.board.completed_lines();

        for &row in &completed.rows {
            self.board.clear_line(Line::Row(row));
        }
        for &col in &completed.cols {
            self.board.clear_line(Line::Col(col));
        }

        let points = LINE_CLEAR_POINTS * completed.total();
        self.score += points;
        self.goals.update_progress(GoalCategory::Lines, completed.total());
        self.goals.update_progress(GoalCategory::Points, points);

        (completed, points)
    }
}
