//! Task records and completion bookkeeping.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A unit of work tracked in the live task list.
///
/// Serialized with camelCase keys (`id`, `title`, `completed`, `createdAt`)
/// so stored collections stay readable by other tools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Builds a new incomplete task from user input.
    ///
    /// The title is trimmed; `None` is returned when nothing is left.
    pub fn new(title: &str, created_at: DateTime<Utc>) -> Option<Self> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }

        Some(Task {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            completed: false,
            created_at,
        })
    }
}

/// Completed-over-total counter.
///
/// Displays as `completed/total`; an empty list renders as `0/0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Completion {
    pub completed: usize,
    pub total: usize,
}

impl Completion {
    /// Share of completed tasks in `0.0..=1.0`, `None` for an empty list.
    pub fn ratio(&self) -> Option<f64> {
        if self.total == 0 {
            None
        } else {
            Some(self.completed as f64 / self.total as f64)
        }
    }
}

impl std::ops::Add for Completion {
    type Output = Completion;

    fn add(self, rhs: Completion) -> Completion {
        Completion {
            completed: self.completed + rhs.completed,
            total: self.total + rhs.total,
        }
    }
}

impl fmt::Display for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.completed, self.total)
    }
}

/// Aggregates over a slice of tasks.
pub trait TaskGroup {
    fn completion(&self) -> Completion;
    fn find(&self, id: &str) -> Option<&Task>;
    /// Looks a task up by exact id or by its 1-based list position.
    fn resolve(&self, reference: &str) -> Option<&Task>;
}

impl TaskGroup for [Task] {
    fn completion(&self) -> Completion {
        Completion {
            completed: self.iter().filter(|t| t.completed).count(),
            total: self.len(),
        }
    }

    fn find(&self, id: &str) -> Option<&Task> {
        self.iter().find(|t| t.id == id)
    }

    fn resolve(&self, reference: &str) -> Option<&Task> {
        let reference = reference.trim();
        self.find(reference).or_else(|| {
            reference
                .parse::<usize>()
                .ok()
                .and_then(|position| position.checked_sub(1))
                .and_then(|index| self.get(index))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_task_trims_title() {
        let task = Task::new("  write report  ", Utc::now()).unwrap();
        assert_eq!(task.title, "write report");
        assert!(!task.completed);
        assert!(!task.id.is_empty());
    }

    #[test]
    fn blank_title_is_rejected() {
        assert!(Task::new("", Utc::now()).is_none());
        assert!(Task::new("   \t ", Utc::now()).is_none());
    }

    #[test]
    fn empty_completion_displays_zero_over_zero() {
        let tasks: Vec<Task> = vec![];
        let completion = tasks.completion();
        assert_eq!(completion.to_string(), "0/0");
        assert_eq!(completion.ratio(), None);
    }

    #[test]
    fn resolve_accepts_id_or_position() {
        let now = Utc::now();
        let tasks = vec![Task::new("first", now).unwrap(), Task::new("second", now).unwrap()];

        assert_eq!(tasks.resolve("2").map(|t| t.title.as_str()), Some("second"));
        assert_eq!(tasks.resolve(&tasks[0].id).map(|t| t.title.as_str()), Some("first"));
        assert!(tasks.resolve("0").is_none());
        assert!(tasks.resolve("3").is_none());
        assert!(tasks.resolve("nope").is_none());
    }
}
