//! Task store
//!
//! Owns the task collection and is the only code that mutates it. Every
//! mutation that changes the list is followed by a save through the
//! persistence adapter; the outcome of that save never reaches callers.
//!
//! Ordering is newest first: `add` prepends.

use crate::clock::{Clock, SystemClock};
use crate::persistence::{IdGenerator, KeyValueStorage, TaskPersistence};
use crate::task::{Counts, Filter, Task, TaskPatch};

/// In-memory task list mirrored to durable storage
pub struct TaskStore<S: KeyValueStorage> {
    tasks: Vec<Task>,
    persistence: TaskPersistence<S>,
    ids: IdGenerator,
    clock: Box<dyn Clock>,
}

impl<S: KeyValueStorage> TaskStore<S> {
    /// Load the default slot of `storage` with wall-clock time and random ids
    pub fn open(storage: S) -> Self {
        Self::open_with(
            TaskPersistence::new(storage),
            IdGenerator::new(),
            Box::new(SystemClock),
        )
    }

    /// Load from an explicit adapter, id source and clock
    pub fn open_with(persistence: TaskPersistence<S>, ids: IdGenerator, clock: Box<dyn Clock>) -> Self {
        let tasks = persistence.load();
        Self {
            tasks,
            persistence,
            ids,
            clock,
        }
    }

    /// Current snapshot, newest first
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn persistence(&self) -> &TaskPersistence<S> {
        &self.persistence
    }

    /// Give back the storage, e.g. to reopen it
    pub fn into_storage(self) -> S {
        self.persistence.into_storage()
    }

    /// Prepend a new active task. Blank text is ignored.
    pub fn add(&mut self, text: &str) -> &[Task] {
        let text = text.trim();
        if text.is_empty() {
            log::debug!("Ignoring blank task");
            return &self.tasks;
        }

        let now = self.clock.now();
        let id = self.ids.generate(now.timestamp_millis());
        self.tasks.insert(0, Task::new(id, text.to_string(), now));
        self.commit();
        &self.tasks
    }

    /// Merge `patch` into the task with `id` and bump `updated_at`.
    ///
    /// Unknown ids are ignored. Text is stored as given (the editing
    /// surface trims it), but blank text is left out of the merge so no
    /// stored task ever has empty text. The rest of the patch still applies.
    pub fn update(&mut self, id: &str, mut patch: TaskPatch) -> &[Task] {
        if patch.text.as_deref().is_some_and(|t| t.trim().is_empty()) {
            log::debug!("Ignoring blank text for task {}", id);
            patch.text = None;
            if patch.is_empty() {
                return &self.tasks;
            }
        }

        let now = self.clock.now();
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            log::debug!("No task {} to update", id);
            return &self.tasks;
        };

        if let Some(text) = patch.text {
            task.text = text;
        }
        if let Some(completed) = patch.completed {
            task.completed = completed;
        }
        // A clock step backwards must not reorder the timestamps
        task.updated_at = now.max(task.updated_at);

        self.commit();
        &self.tasks
    }

    /// Flip completion of the task with `id`
    pub fn toggle(&mut self, id: &str) -> &[Task] {
        match self.get(id).map(|t| !t.completed) {
            Some(completed) => self.update(id, TaskPatch::completed(completed)),
            None => &self.tasks,
        }
    }

    /// Remove the task with `id`, if present
    pub fn delete(&mut self, id: &str) -> &[Task] {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() != before {
            self.commit();
        } else {
            log::debug!("No task {} to delete", id);
        }
        &self.tasks
    }

    /// Remove every completed task
    pub fn clear_completed(&mut self) -> &[Task] {
        let before = self.tasks.len();
        self.tasks.retain(Task::is_active);
        let removed = before - self.tasks.len();
        if removed > 0 {
            log::info!("Cleared {} completed tasks", removed);
            self.commit();
        }
        &self.tasks
    }

    /// Tasks matching `filter`, in collection order
    pub fn filtered_view(&self, filter: Filter) -> Vec<&Task> {
        self.tasks.iter().filter(|t| filter.matches(t)).collect()
    }

    pub fn counts(&self) -> Counts {
        Counts::of(&self.tasks)
    }

    fn commit(&mut self) {
        self.persistence.save(&self.tasks);
    }
}
