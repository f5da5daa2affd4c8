//! User preferences
//!
//! Persisted in their own slot, separate from the task list.

use serde::{Deserialize, Serialize};

use crate::consts::{SETTINGS_KEY, TASKS_KEY};
use crate::persistence::KeyValueStorage;
use crate::task::Filter;

/// Application settings/preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Slot holding the task list
    pub storage_key: String,
    /// Default log filter (`error` .. `trace`)
    pub log_level: String,
    /// View shown on startup
    pub initial_filter: Filter,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage_key: TASKS_KEY.to_string(),
            log_level: "info".to_string(),
            initial_filter: Filter::All,
        }
    }
}

impl Settings {
    /// Log level as a `log` filter, falling back to `Info` on bad input
    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }

    /// Load settings from `storage`, or defaults if absent/unreadable
    pub fn load(storage: &impl KeyValueStorage) -> Self {
        if let Ok(Some(json)) = storage.get_item(SETTINGS_KEY) {
            if let Ok(settings) = serde_json::from_str(&json) {
                log::info!("Loaded settings");
                return settings;
            }
            log::warn!("Ignoring unreadable settings");
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to `storage`
    pub fn save(&self, storage: &mut impl KeyValueStorage) {
        if let Ok(json) = serde_json::to_string(self) {
            match storage.set_item(SETTINGS_KEY, &json) {
                Ok(()) => log::info!("Settings saved"),
                Err(e) => log::warn!("Failed to save settings: {}", e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.storage_key, "todos");
        assert_eq!(settings.level_filter(), log::LevelFilter::Info);
        assert_eq!(settings.initial_filter, Filter::All);
    }

    #[test]
    fn test_round_trip() {
        let mut storage = MemoryStorage::new();
        let settings = Settings {
            storage_key: "work".to_string(),
            log_level: "debug".to_string(),
            initial_filter: Filter::Active,
        };
        settings.save(&mut storage);
        assert_eq!(Settings::load(&storage), settings);
    }

    #[test]
    fn test_partial_and_corrupt() {
        let mut storage = MemoryStorage::new();
        storage
            .set_item(SETTINGS_KEY, r#"{"initial_filter":"completed"}"#)
            .unwrap();
        let settings = Settings::load(&storage);
        assert_eq!(settings.initial_filter, Filter::Completed);
        assert_eq!(settings.storage_key, "todos");

        storage.set_item(SETTINGS_KEY, "[1, 2").unwrap();
        assert_eq!(Settings::load(&storage), Settings::default());
    }

    #[test]
    fn test_bad_level_falls_back() {
        let settings = Settings {
            log_level: "loud".to_string(),
            ..Settings::default()
        };
        assert_eq!(settings.level_filter(), log::LevelFilter::Info);
    }
}
