//! Task model and derived views
//!
//! Everything here is pure data: the store owns mutation, the
//! persistence layer owns the wire format.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque task identifier
pub type TaskId = String;

/// A single to-do entry
///
/// Field names serialize in camelCase so the persisted slot stays
/// readable by the browser build and by data written before it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
    /// Fixed at creation
    pub created_at: DateTime<Utc>,
    /// Refreshed on every change to `text` or `completed`
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Build a fresh, active task. Callers are expected to pass trimmed text.
    pub(crate) fn new(id: TaskId, text: String, now: DateTime<Utc>) -> Self {
        Self {
            id,
            text,
            completed: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the task is still open
    pub fn is_active(&self) -> bool {
        !self.completed
    }
}

/// Partial update applied by `TaskStore::update`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub text: Option<String>,
    pub completed: Option<bool>,
}

impl TaskPatch {
    /// Patch that only replaces the text
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            completed: None,
        }
    }

    /// Patch that only sets the completion flag
    pub fn completed(completed: bool) -> Self {
        Self {
            text: None,
            completed: Some(completed),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.completed.is_none()
    }
}

/// View selector over the collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Active, Filter::Completed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Active => "active",
            Filter::Completed => "completed",
        }
    }

    /// Whether `task` belongs in this view
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !task.completed,
            Filter::Completed => task.completed,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a filter name is not one of `all`, `active`, `completed`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown filter `{0}` (expected all, active or completed)")]
pub struct UnknownFilter(pub String);

impl FromStr for Filter {
    type Err = UnknownFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Filter::All),
            "active" => Ok(Filter::Active),
            "completed" | "done" => Ok(Filter::Completed),
            _ => Err(UnknownFilter(s.to_string())),
        }
    }
}

/// Task totals per filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Counts {
    pub all: usize,
    pub active: usize,
    pub completed: usize,
}

impl Counts {
    /// Count `tasks` in one pass
    pub fn of(tasks: &[Task]) -> Self {
        let completed = tasks.iter().filter(|t| t.completed).count();
        Self {
            all: tasks.len(),
            active: tasks.len() - completed,
            completed,
        }
    }

    /// Count for a single filter
    pub fn get(&self, filter: Filter) -> usize {
        match filter {
            Filter::All => self.all,
            Filter::Active => self.active,
            Filter::Completed => self.completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn task(id: &str, completed: bool) -> Task {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let mut t = Task::new(id.to_string(), format!("task {id}"), now);
        t.completed = completed;
        t
    }

    #[test]
    fn test_filter_matches() {
        let open = task("a", false);
        let done = task("b", true);

        assert!(Filter::All.matches(&open));
        assert!(Filter::All.matches(&done));
        assert!(Filter::Active.matches(&open));
        assert!(!Filter::Active.matches(&done));
        assert!(!Filter::Completed.matches(&open));
        assert!(Filter::Completed.matches(&done));
    }

    #[test]
    fn test_filter_parse() {
        assert_eq!("all".parse::<Filter>(), Ok(Filter::All));
        assert_eq!(" Active ".parse::<Filter>(), Ok(Filter::Active));
        assert_eq!("done".parse::<Filter>(), Ok(Filter::Completed));
        assert!("someday".parse::<Filter>().is_err());

        for filter in Filter::ALL {
            assert_eq!(filter.to_string().parse::<Filter>(), Ok(filter));
        }
    }

    #[test]
    fn test_counts() {
        let tasks = vec![task("a", false), task("b", true), task("c", false)];
        let counts = Counts::of(&tasks);
        assert_eq!(
            counts,
            Counts {
                all: 3,
                active: 2,
                completed: 1
            }
        );
        assert_eq!(counts.get(Filter::Active), 2);
        assert_eq!(Counts::of(&[]), Counts::default());
    }

    #[test]
    fn test_task_json_shape() {
        let t = task("abc", true);
        let value = serde_json::to_value(&t).unwrap();
        assert_eq!(value["id"], "abc");
        assert_eq!(value["completed"], true);
        assert_eq!(value["createdAt"], "2025-03-01T12:00:00Z");
        assert_eq!(value["updatedAt"], "2025-03-01T12:00:00Z");
        assert!(value.get("created_at").is_none());
    }

    #[test]
    fn test_task_reads_browser_dates() {
        // Shape produced by JSON.stringify on a JS Date
        let json = r#"{
            "id": "lx3k9a0abc123def",
            "text": "Buy milk",
            "completed": false,
            "createdAt": "2024-06-01T08:30:00.123Z",
            "updatedAt": "2024-06-01T09:00:00.456Z"
        }"#;
        let t: Task = serde_json::from_str(json).unwrap();
        assert_eq!(t.text, "Buy milk");
        assert_eq!(t.created_at.timestamp_subsec_millis(), 123);
        assert!(t.updated_at > t.created_at);
    }
}
