//! Browser bindings
//!
//! The page keeps its own transient UI state (edit mode, draft text) and
//! re-renders from the JSON snapshots returned here.

use wasm_bindgen::prelude::*;

use crate::persistence::{IdGenerator, LocalStorage, TaskPersistence};
use crate::settings::Settings;
use crate::store::TaskStore;
use crate::task::{Filter, TaskPatch};
use crate::{SystemClock, stats};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let settings = Settings::load(&LocalStorage::open());
    let level = settings.level_filter().to_level().unwrap_or(log::Level::Error);
    if console_log::init_with_level(level).is_err() {
        // Logger already installed by an earlier instance
        return;
    }
    log::info!("TodoFlow starting...");
}

/// Task list bound to `window.localStorage`
#[wasm_bindgen]
pub struct TodoApp {
    store: TaskStore<LocalStorage>,
    settings: Settings,
}

#[wasm_bindgen]
impl TodoApp {
    #[wasm_bindgen(constructor)]
    pub fn new() -> TodoApp {
        let storage = LocalStorage::open();
        let settings = Settings::load(&storage);
        let persistence = TaskPersistence::with_key(storage, settings.storage_key.clone());
        let store = TaskStore::open_with(persistence, IdGenerator::new(), Box::new(SystemClock));
        log::info!("TodoFlow ready ({} tasks)", store.len());
        TodoApp { store, settings }
    }

    /// Filter the page should show first
    #[wasm_bindgen(js_name = initialFilter)]
    pub fn initial_filter(&self) -> String {
        self.settings.initial_filter.to_string()
    }

    /// Remember `filter` as the view to open with next time
    #[wasm_bindgen(js_name = setInitialFilter)]
    pub fn set_initial_filter(&mut self, filter: &str) {
        self.settings.initial_filter = parse_filter(filter);
        self.settings.save(&mut LocalStorage::open());
    }

    pub fn add(&mut self, text: &str) -> String {
        self.store.add(text);
        self.snapshot()
    }

    pub fn toggle(&mut self, id: &str) -> String {
        self.store.toggle(id);
        self.snapshot()
    }

    #[wasm_bindgen(js_name = setCompleted)]
    pub fn set_completed(&mut self, id: &str, completed: bool) -> String {
        self.store.update(id, TaskPatch::completed(completed));
        self.snapshot()
    }

    /// Save an edit; the caller has already trimmed `text`
    pub fn edit(&mut self, id: &str, text: &str) -> String {
        self.store.update(id, TaskPatch::text(text));
        self.snapshot()
    }

    pub fn remove(&mut self, id: &str) -> String {
        self.store.delete(id);
        self.snapshot()
    }

    #[wasm_bindgen(js_name = clearCompleted)]
    pub fn clear_completed(&mut self) -> String {
        self.store.clear_completed();
        self.snapshot()
    }

    /// Full list as JSON, newest first
    pub fn snapshot(&self) -> String {
        to_json(&self.store.tasks())
    }

    /// Filtered list as JSON; unknown filter names show everything
    pub fn view(&self, filter: &str) -> String {
        to_json(&self.store.filtered_view(parse_filter(filter)))
    }

    /// `{all, active, completed}` as JSON
    pub fn counts(&self) -> String {
        to_json(&self.store.counts())
    }

    #[wasm_bindgen(js_name = completionRate)]
    pub fn completion_rate(&self) -> u32 {
        stats::completion_rate(&self.store.counts())
    }

    pub fn summary(&self) -> String {
        stats::remaining_summary(&self.store.counts())
    }

    #[wasm_bindgen(js_name = emptyMessage)]
    pub fn empty_message(&self, filter: &str) -> String {
        stats::empty_message(parse_filter(filter)).to_string()
    }
}

impl Default for TodoApp {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_filter(name: &str) -> Filter {
    name.parse().unwrap_or_else(|e| {
        log::warn!("{}", e);
        Filter::All
    })
}

fn to_json(value: &impl serde::Serialize) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        log::error!("Failed to serialize snapshot: {}", e);
        "null".to_string()
    })
}
