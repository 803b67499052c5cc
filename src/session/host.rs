//! The persistence-driving adapter around a [`GameSession`].
//!
//! `SessionHost` implements the save discipline the game expects without
//! putting I/O inside the engine:
//!
//! - load-on-start: a present, parseable `gameState` restores the session
//!   (skipping the fresh first batch); anything else initializes fresh
//! - save after every successful placement and after any settings toggle
//! - `startNewGame` semantics: delete `gameState`, keep `highScore`
//! - persist `highScore` the moment a placement raises it
//!
//! Store failures never surface: a legal placement succeeds even when every
//! write is lost.

use crate::engine::{GameSession, PlacementError, PlacementReport};
use crate::pieces::PieceId;

use super::store::{SessionStore, StateStore};

/// A game session wired to a durable store.
#[derive(Clone, Debug)]
pub struct SessionHost<S> {
    session: GameSession,
    store: SessionStore<S>,
}

impl<S: StateStore> SessionHost<S> {
    /// Start a session: restore from the store when possible, otherwise
    /// fresh. The persisted high score is seeded either way.
    pub fn start(store: S, seed: u64) -> Self {
        let store = SessionStore::new(store);
        let high_score = store.high_score();

        let mut session = store
            .load_session()
            .and_then(|snapshot| GameSession::restore(snapshot, seed).ok())
            .unwrap_or_else(|| GameSession::new(seed));
        session.set_high_score(high_score);

        Self { session, store }
    }

    /// The wrapped session.
    #[must_use]
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Attempt a placement and, on success, persist the snapshot (and the
    /// high score when it moved).
    pub fn attempt_placement(
        &mut self,
        piece_id: PieceId,
        row: i32,
        col: i32,
    ) -> Result<PlacementReport, PlacementError> {
        let report = self.session.attempt_placement(piece_id, row, col)?;

        self.store.save_session(&self.session.snapshot());
        if report.new_high_score {
            self.store.set_high_score(self.session.high_score());
        }

        Ok(report)
    }

    /// Reset to a fresh game and delete the saved snapshot. `highScore`
    /// stays.
    pub fn start_new_game(&mut self) {
        self.store.clear_session();
        self.session.start_new_game();
    }

    /// Flip the sound-effects toggle; the settings change triggers a save.
    pub fn toggle_sound_effects(&mut self) -> bool {
        let enabled = self.session.toggle_sound_effects();
        self.store.save_session(&self.session.snapshot());
        enabled
    }

    /// Flip the music toggle; the settings change triggers a save.
    pub fn toggle_music(&mut self) -> bool {
        let enabled = self.session.toggle_music();
        self.store.save_session(&self.session.snapshot());
        enabled
    }

    /// The persisted high score as this host last saw it.
    #[must_use]
    pub fn high_score(&self) -> u32 {
        self.session.high_score()
    }

    /// Tear down, returning the underlying store.
    pub fn into_store(self) -> S {
        self.store.into_inner()
    }
}
