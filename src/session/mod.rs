//! Session persistence: the snapshot wire format, key-value stores, and the
//! host adapter that drives saves.

pub mod host;
pub mod snapshot;
pub mod store;

pub use host::SessionHost;
pub use snapshot::{SessionSnapshot, SnapshotError};
pub use store::{
    FileStore, MemoryStore, SessionStore, StateStore, GAME_STATE_KEY, HIGH_SCORE_KEY,
};
