//! Key-value stores and the typed session store facade.
//!
//! The persistence collaborator is a string-keyed, string-valued durable
//! store. The engine never requires one to work: every write path swallows
//! failures, because a failed save must never block or reject a legal
//! placement, and a failed read is the same as no saved state.
//!
//! Two keys exist:
//! - `gameState`: the JSON session snapshot, deleted on a new game
//! - `highScore`: a plain integer string with an independent lifecycle; it
//!   survives new games and only grows

use std::fs;
use std::path::PathBuf;

use rustc_hash::FxHashMap;

use super::snapshot::SessionSnapshot;

/// Key under which the session snapshot is stored.
pub const GAME_STATE_KEY: &str = "gameState";

/// Key under which the high score is stored.
pub const HIGH_SCORE_KEY: &str = "highScore";

/// The durable store the host writes through.
///
/// Implementations are free to fail silently; callers treat a missing value
/// and a failed read identically.
pub trait StateStore {
    /// Read the value for a key, if present.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, replacing any previous one.
    fn set(&mut self, key: &str, value: &str);

    /// Delete a key. Deleting a missing key is a no-op.
    fn remove(&mut self, key: &str);
}

/// In-memory store for tests and embedding.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: FxHashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// One-file-per-key store rooted at a directory.
///
/// I/O errors are swallowed: an unreadable file reads as absent, a failed
/// write leaves the previous value in place.
#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at the given directory.
    ///
    /// The directory is created lazily on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Create a store under the platform data directory for `app`.
    #[must_use]
    pub fn in_data_dir(app: &str) -> Self {
        let dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(app);
        Self::new(dir)
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StateStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(&mut self, key: &str, value: &str) {
        if fs::create_dir_all(&self.dir).is_ok() {
            let _ = fs::write(self.path_for(key), value);
        }
    }

    fn remove(&mut self, key: &str) {
        let _ = fs::remove_file(self.path_for(key));
    }
}

/// Typed facade over the two session keys.
#[derive(Clone, Debug)]
pub struct SessionStore<S> {
    store: S,
}

impl<S: StateStore> SessionStore<S> {
    /// Wrap a raw store.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Load the saved snapshot, if one is present and parses.
    ///
    /// A missing key, unreadable value, or parse failure all read as "no
    /// saved state".
    #[must_use]
    pub fn load_session(&self) -> Option<SessionSnapshot> {
        let raw = self.store.get(GAME_STATE_KEY)?;
        serde_json::from_str(&raw).ok()
    }

    /// Persist the snapshot. Serialization or store failure is swallowed.
    pub fn save_session(&mut self, snapshot: &SessionSnapshot) {
        if let Ok(json) = serde_json::to_string(snapshot) {
            self.store.set(GAME_STATE_KEY, &json);
        }
    }

    /// Delete the saved snapshot.
    pub fn clear_session(&mut self) {
        self.store.remove(GAME_STATE_KEY);
    }

    /// Read the persisted high score; absent or unparseable reads as 0.
    #[must_use]
    pub fn high_score(&self) -> u32 {
        self.store
            .get(HIGH_SCORE_KEY)
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(0)
    }

    /// Persist the high score as a plain integer string.
    pub fn set_high_score(&mut self, value: u32) {
        self.store.set(HIGH_SCORE_KEY, &value.to_string());
    }

    /// Take back the underlying store.
    pub fn into_inner(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goals::Goal;
    use crate::pieces::Shape;

    fn snapshot() -> SessionSnapshot {
        SessionSnapshot {
            grid: vec![vec![0, 0], vec![1, 1]],
            pieces: vec![Shape::from_rows(vec![vec![1]]).unwrap()],
            score: 7,
            goals: vec![Goal::new("Reach 100 points", 100)],
        }
    }

    #[test]
    fn test_memory_store_basics() {
        let mut store = MemoryStore::new();

        assert_eq!(store.get("k"), None);
        store.set("k", "v");
        assert_eq!(store.get("k"), Some("v".to_string()));
        store.set("k", "w");
        assert_eq!(store.get("k"), Some("w".to_string()));
        store.remove("k");
        assert_eq!(store.get("k"), None);
        store.remove("k"); // no-op
    }

    #[test]
    fn test_session_roundtrip() {
        let mut store = SessionStore::new(MemoryStore::new());
        assert!(store.load_session().is_none());

        store.save_session(&snapshot());
        assert_eq!(store.load_session(), Some(snapshot()));

        store.clear_session();
        assert!(store.load_session().is_none());
    }

    #[test]
    fn test_corrupt_session_reads_as_absent() {
        let mut raw = MemoryStore::new();
        raw.set(GAME_STATE_KEY, "{not json");
        let store = SessionStore::new(raw);

        assert!(store.load_session().is_none());
    }

    #[test]
    fn test_high_score_plain_integer_string() {
        let mut store = SessionStore::new(MemoryStore::new());
        assert_eq!(store.high_score(), 0);

        store.set_high_score(240);
        assert_eq!(store.high_score(), 240);
        assert_eq!(
            store.into_inner().get(HIGH_SCORE_KEY),
            Some("240".to_string())
        );
    }

    #[test]
    fn test_high_score_garbage_reads_zero() {
        let mut raw = MemoryStore::new();
        raw.set(HIGH_SCORE_KEY, "many");
        let store = SessionStore::new(raw);

        assert_eq!(store.high_score(), 0);
    }

    #[test]
    fn test_high_score_independent_of_session() {
        let mut store = SessionStore::new(MemoryStore::new());
        store.save_session(&snapshot());
        store.set_high_score(50);

        store.clear_session();

        assert!(store.load_session().is_none());
        assert_eq!(store.high_score(), 50);
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = std::env::temp_dir().join(format!(
            "gridblocks-store-test-{}",
            std::process::id()
        ));
        let mut store = FileStore::new(&dir);

        assert_eq!(store.get("k"), None);
        store.set("k", "v");
        assert_eq!(store.get("k"), Some("v".to_string()));
        store.remove("k");
        assert_eq!(store.get("k"), None);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
