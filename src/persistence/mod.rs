//! Save/load of the task list
//!
//! Features:
//! - Whole-list JSON snapshot under one fixed key
//! - Absent or corrupt data loads as an empty list
//! - Write failures are logged and dropped, never returned to the UI

pub mod id;
pub mod storage;

pub use id::IdGenerator;
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};

#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;

use crate::consts::TASKS_KEY;
use crate::task::Task;

/// Bridges a task list to one storage slot
#[derive(Debug, Clone)]
pub struct TaskPersistence<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStorage> TaskPersistence<S> {
    /// Adapter over the default `todos` slot
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, TASKS_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Read the slot; `Ok(None)` when nothing was ever saved
    pub fn try_load(&self) -> Result<Option<Vec<Task>>, StorageError> {
        let Some(json) = self.storage.get_item(&self.key)? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_str(&json)?))
    }

    /// Load saved tasks, falling back to an empty list
    pub fn load(&self) -> Vec<Task> {
        match self.try_load() {
            Ok(Some(tasks)) => {
                log::info!("Loaded {} tasks", tasks.len());
                tasks
            }
            Ok(None) => {
                log::info!("No saved tasks found, starting fresh");
                Vec::new()
            }
            Err(e) => {
                log::warn!("Ignoring unreadable task list in `{}`: {}", self.key, e);
                Vec::new()
            }
        }
    }

    /// Overwrite the slot with `tasks`
    pub fn try_save(&mut self, tasks: &[Task]) -> Result<(), StorageError> {
        let json = serde_json::to_string(tasks)?;
        self.storage.set_item(&self.key, &json)
    }

    /// Save `tasks`, logging rather than returning failures
    pub fn save(&mut self, tasks: &[Task]) {
        match self.try_save(tasks) {
            Ok(()) => log::debug!("Tasks saved ({} entries)", tasks.len()),
            Err(e) => log::warn!("Failed to save tasks: {}", e),
        }
    }

    /// Remove the slot entirely
    pub fn clear(&mut self) {
        match self.storage.remove_item(&self.key) {
            Ok(()) => log::info!("Saved tasks cleared"),
            Err(e) => log::warn!("Failed to clear saved tasks: {}", e),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::{DateTime, TimeDelta, TimeZone, Utc};
    use proptest::prelude::*;

    /// Storage whose every operation fails
    #[derive(Debug, Default)]
    pub(crate) struct BrokenStorage;

    impl KeyValueStorage for BrokenStorage {
        fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("broken".to_string()))
        }

        fn set_item(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Backend("quota exceeded".to_string()))
        }

        fn remove_item(&mut self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("broken".to_string()))
        }
    }

    fn sample_tasks() -> Vec<Task> {
        let created = Utc.with_ymd_and_hms(2025, 5, 4, 10, 0, 0).unwrap()
            + TimeDelta::milliseconds(321);
        let mut done = Task::new("b".to_string(), "Walk dog".to_string(), created);
        done.completed = true;
        done.updated_at = created + TimeDelta::milliseconds(1500);
        vec![
            done,
            Task::new("a".to_string(), "Buy milk".to_string(), created),
        ]
    }

    fn with_raw(value: &str) -> TaskPersistence<MemoryStorage> {
        let mut storage = MemoryStorage::new();
        storage.set_item(TASKS_KEY, value).unwrap();
        TaskPersistence::new(storage)
    }

    #[test]
    fn test_round_trip() {
        let tasks = sample_tasks();
        let mut persistence = TaskPersistence::new(MemoryStorage::new());
        persistence.save(&tasks);

        let loaded = persistence.load();
        assert_eq!(loaded, tasks);
    }

    fn arb_tasks() -> impl Strategy<Value = Vec<Task>> {
        // 2000-01-01 .. 2100-01-01 in ms; updates land up to a year later
        let record = (
            "[a-zA-Z0-9 ,.!?'\"é✓]{1,24}",
            any::<bool>(),
            946_684_800_000i64..4_102_444_800_000i64,
            0i64..31_536_000_000i64,
        );
        prop::collection::vec(record, 0..16).prop_map(|records| {
            records
                .into_iter()
                .enumerate()
                .map(|(i, (text, completed, created_ms, age_ms))| {
                    let created = DateTime::from_timestamp_millis(created_ms).unwrap();
                    let mut task = Task::new(format!("id{i}"), text, created);
                    task.completed = completed;
                    task.updated_at = created + TimeDelta::milliseconds(age_ms);
                    task
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_round_trip_any_list(tasks in arb_tasks()) {
            let mut persistence = TaskPersistence::new(MemoryStorage::new());
            persistence.save(&tasks);
            prop_assert_eq!(persistence.load(), tasks);
        }
    }

    #[test]
    fn test_saved_layout() {
        let mut persistence = TaskPersistence::new(MemoryStorage::new());
        persistence.save(&sample_tasks());

        let raw = persistence.storage().get_item("todos").unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let first = &value.as_array().unwrap()[0];
        assert_eq!(first["id"], "b");
        assert_eq!(first["text"], "Walk dog");
        assert_eq!(first["completed"], true);
        assert_eq!(first["createdAt"], "2025-05-04T10:00:00.321Z");
        assert_eq!(first["updatedAt"], "2025-05-04T10:00:01.821Z");
    }

    #[test]
    fn test_save_overwrites() {
        let mut persistence = TaskPersistence::new(MemoryStorage::new());
        persistence.save(&sample_tasks());
        persistence.save(&[]);
        assert_eq!(persistence.load(), Vec::new());
        assert_eq!(persistence.try_load().unwrap(), Some(Vec::new()));
    }

    #[test]
    fn test_absent_loads_empty() {
        let persistence = TaskPersistence::new(MemoryStorage::new());
        assert!(persistence.try_load().unwrap().is_none());
        assert!(persistence.load().is_empty());
    }

    #[test]
    fn test_corrupt_loads_empty() {
        for raw in [
            "42",
            "\"todos\"",
            "null",
            "{\"id\":\"a\"}",
            "[{\"id\":\"a\",\"text\":\"x\"",
            "[{\"id\":\"a\",\"text\":\"x\",\"completed\":false,\"createdAt\":\"yesterday\",\"updatedAt\":\"today\"}]",
            "",
        ] {
            let persistence = with_raw(raw);
            assert!(persistence.try_load().is_err(), "accepted {raw:?}");
            assert!(persistence.load().is_empty());
        }
    }

    #[test]
    fn test_broken_storage_degrades() {
        let mut persistence = TaskPersistence::new(BrokenStorage);
        assert!(persistence.load().is_empty());
        persistence.save(&sample_tasks());
        persistence.clear();
        assert!(persistence.try_save(&sample_tasks()).is_err());
    }

    #[test]
    fn test_custom_key_and_clear() {
        let mut persistence = TaskPersistence::with_key(MemoryStorage::new(), "work_todos");
        persistence.save(&sample_tasks());
        assert!(persistence.storage().get_item("todos").unwrap().is_none());
        assert_eq!(persistence.load().len(), 2);

        persistence.clear();
        assert!(persistence.storage().is_empty());
    }

    #[test]
    fn test_file_backed_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let tasks = sample_tasks();

        let mut persistence = TaskPersistence::new(FileStorage::open(dir.path()).unwrap());
        persistence.save(&tasks);

        let reopened = TaskPersistence::new(FileStorage::open(dir.path()).unwrap());
        assert_eq!(reopened.load(), tasks);
    }
}
