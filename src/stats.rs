//! Summary figures and display strings for the task list

use crate::task::{Counts, Filter};

/// Whole-percent share of completed tasks (0 for an empty list)
pub fn completion_rate(counts: &Counts) -> u32 {
    if counts.all == 0 {
        return 0;
    }
    (counts.completed as f64 / counts.all as f64 * 100.0).round() as u32
}

/// Footer line, e.g. "2 of 5 tasks remaining"
pub fn remaining_summary(counts: &Counts) -> String {
    format!("{} of {} tasks remaining", counts.active, counts.all)
}

/// Placeholder shown when a view has nothing in it
pub fn empty_message(filter: Filter) -> &'static str {
    match filter {
        Filter::All => "No tasks yet. Add one above to get started!",
        Filter::Active => "No active tasks",
        Filter::Completed => "No completed tasks yet",
    }
}
