//! TodoFlow - task list core with local persistence
//!
//! Core modules:
//! - `task`: Task model, filters and counts
//! - `store`: The task collection and its mutations
//! - `persistence`: Save/load through a durable key-value slot
//! - `settings`: Persisted preferences
//! - `stats`: Summary figures for display
//! - `web`: Browser bindings (wasm32 only)

pub mod clock;
pub mod persistence;
pub mod settings;
pub mod stats;
pub mod store;
pub mod task;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use clock::{Clock, SystemClock};
pub use persistence::{
    FileStorage, IdGenerator, KeyValueStorage, MemoryStorage, StorageError, TaskPersistence,
};
pub use settings::Settings;
pub use store::TaskStore;
pub use task::{Counts, Filter, Task, TaskId, TaskPatch, UnknownFilter};

/// Storage configuration constants
pub mod consts {
    /// Slot holding the serialized task list
    pub const TASKS_KEY: &str = "todos";
    /// Slot holding serialized settings
    pub const SETTINGS_KEY: &str = "todoflow_settings";
    /// Random base-36 characters appended to the timestamp part of an id
    pub const RANDOM_ID_CHARS: usize = 9;
}
