//! Key-value persistence for session history, arena stats, challenges
//! and the daily plan.
//!
//! Values are JSON documents. [`JsonFileStore`] keeps one `<key>.json`
//! file per key under a data directory; [`MemoryStore`] is for tests and
//! dry runs.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::challenges::ChallengeBoard;
use crate::error::StoreError;
use crate::games::arena::ArenaStats;
use crate::report::SessionResult;
use crate::tasks::DailyTask;

pub const HISTORY_KEY: &str = "history";
pub const ARENA_KEY: &str = "arena";
pub const CHALLENGES_KEY: &str = "challenges";
pub const TASKS_KEY: &str = "tasks";

/// A string-keyed store of raw JSON documents.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn put(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.values.remove(key);
        Ok(())
    }
}

/// One JSON file per key inside a directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn put(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Decode a stored value.
pub fn load<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>, StoreError> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| StoreError::Corrupt {
            key: key.to_string(),
            message: e.to_string(),
        })
}

/// Encode and store a value.
pub fn save<T: Serialize>(store: &mut dyn KeyValueStore, key: &str, value: &T) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(value).map_err(|e| StoreError::Encode {
        key: key.to_string(),
        message: e.to_string(),
    })?;
    store.put(key, &json)
}

/// Load a value, discarding it if it no longer decodes.
fn load_or_reset<T: DeserializeOwned>(store: &mut dyn KeyValueStore, key: &str) -> Result<Option<T>, StoreError> {
    match load(store, key) {
        Err(e) if e.is_corrupt() => {
            tracing::warn!("discarding malformed stored value: {e}");
            store.remove(key)?;
            Ok(None)
        }
        other => other,
    }
}

/// Session results, oldest first.
#[derive(Debug, Clone, Default)]
pub struct History {
    pub sessions: Vec<SessionResult>,
}

impl History {
    /// Load history; malformed stored state is removed and yields an empty history.
    pub fn load(store: &mut dyn KeyValueStore) -> Result<Self, StoreError> {
        let sessions: Vec<SessionResult> = load_or_reset(store, HISTORY_KEY)?.unwrap_or_default();
        Ok(Self { sessions })
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StoreError> {
        save(store, HISTORY_KEY, &self.sessions)
    }

    /// Append a result and persist.
    pub fn record(&mut self, result: SessionResult, store: &mut dyn KeyValueStore) -> Result<(), StoreError> {
        self.sessions.push(result);
        self.sessions.sort_by_key(|r| r.created_at);
        self.save(store)
    }

    pub fn latest(&self) -> Option<&SessionResult> {
        self.sessions.last()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }
}

/// Load arena stats; malformed stored state is removed and yields fresh stats.
pub fn load_arena(store: &mut dyn KeyValueStore) -> Result<ArenaStats, StoreError> {
    Ok(load_or_reset(store, ARENA_KEY)?.unwrap_or_default())
}

pub fn save_arena(store: &mut dyn KeyValueStore, stats: &ArenaStats) -> Result<(), StoreError> {
    save(store, ARENA_KEY, stats)
}

pub fn load_challenges(store: &mut dyn KeyValueStore) -> Result<ChallengeBoard, StoreError> {
    Ok(load_or_reset(store, CHALLENGES_KEY)?.unwrap_or_default())
}

pub fn save_challenges(store: &mut dyn KeyValueStore, board: &ChallengeBoard) -> Result<(), StoreError> {
    save(store, CHALLENGES_KEY, board)
}

/// Load the daily plan; malformed stored state yields an empty plan.
pub fn load_tasks(store: &mut dyn KeyValueStore) -> Result<Vec<DailyTask>, StoreError> {
    Ok(load_or_reset(store, TASKS_KEY)?.unwrap_or_default())
}

pub fn save_tasks(store: &mut dyn KeyValueStore, tasks: &[DailyTask]) -> Result<(), StoreError> {
    save(store, TASKS_KEY, &tasks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::Game;
    use crate::model::Difficulty;
    use chrono::Utc;
    use uuid::Uuid;

    fn result(overall: f64) -> SessionResult {
        SessionResult {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            difficulty: Difficulty::Easy,
            category_scores: vec![],
            overall,
            elapsed_ms: 1000,
            answers: vec![],
            source: None,
        }
    }

    #[test]
    fn history_roundtrip_in_memory() {
        let mut store = MemoryStore::new();
        let mut history = History::load(&mut store).unwrap();
        assert!(history.is_empty());

        history.record(result(40.0), &mut store).unwrap();
        history.record(result(80.0), &mut store).unwrap();

        let reloaded = History::load(&mut store).unwrap();
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded.latest().unwrap().overall, 80.0);
    }

    #[test]
    fn malformed_history_is_discarded() {
        let mut store = MemoryStore::new();
        store.put(HISTORY_KEY, "{not json").unwrap();

        let history = History::load(&mut store).unwrap();
        assert!(history.is_empty());
        assert_eq!(store.get(HISTORY_KEY).unwrap(), None);
    }

    #[test]
    fn file_store_persists_per_key() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("data"));
        assert_eq!(store.get("missing").unwrap(), None);

        let mut history = History::default();
        history.record(result(55.0), &mut store).unwrap();
        assert!(dir.path().join("data").join("history.json").exists());

        let reloaded = History::load(&mut JsonFileStore::new(dir.path().join("data"))).unwrap();
        assert_eq!(reloaded.sessions[0].overall, 55.0);

        store.remove(HISTORY_KEY).unwrap();
        store.remove(HISTORY_KEY).unwrap();
        assert_eq!(store.get(HISTORY_KEY).unwrap(), None);
    }

    #[test]
    fn arena_stats_persist() {
        let mut store = MemoryStore::new();
        let mut stats = load_arena(&mut store).unwrap();
        assert_eq!(stats.level, 1);
        stats.record(Game::DualTask, 120, Utc::now());
        save_arena(&mut store, &stats).unwrap();

        let loaded = load_arena(&mut store).unwrap();
        assert_eq!(loaded.total_xp, 120);
        assert_eq!(loaded.level, 2);

        store.put(ARENA_KEY, "[]").unwrap();
        assert_eq!(load_arena(&mut store).unwrap().games_played, 0);
    }

    #[test]
    fn challenges_and_tasks_persist() {
        use crate::challenges::{ChallengeLength, ChallengeLevel};

        let mut store = MemoryStore::new();
        let mut board = load_challenges(&mut store).unwrap();
        assert!(board.active.is_empty());
        let id = board
            .start(ChallengeLength::Week, ChallengeLevel::Beginner, Utc::now())
            .id;
        board.complete_goal(id, "1-0", Utc::now()).unwrap();
        save_challenges(&mut store, &board).unwrap();
        assert_eq!(load_challenges(&mut store).unwrap(), board);

        store.put(TASKS_KEY, "{\"not\": \"a list\"}").unwrap();
        assert!(load_tasks(&mut store).unwrap().is_empty());
        assert_eq!(store.get(TASKS_KEY).unwrap(), None);
        save_tasks(&mut store, &[]).unwrap();
        assert!(load_tasks(&mut store).unwrap().is_empty());
    }
}
