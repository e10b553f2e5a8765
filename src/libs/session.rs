//! In-progress and finished work sessions.

use super::task::{Completion, Task, TaskGroup};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of history entries shown as "recent sessions".
pub const RECENT_SESSIONS_LIMIT: usize = 5;

/// A session that has been started and not yet ended.
///
/// It owns no tasks: while it is in progress the live task list of the
/// store belongs to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSession {
    pub id: String,
    pub start_time: DateTime<Utc>,
}

impl ActiveSession {
    pub fn new(start_time: DateTime<Utc>) -> Self {
        ActiveSession {
            id: Uuid::new_v4().to_string(),
            start_time,
        }
    }

    /// Closes the session, taking ownership of the task snapshot.
    ///
    /// `end_time` is clamped so it never precedes `start_time`.
    pub fn finish(self, end_time: DateTime<Utc>, duration: u64, tasks: Vec<Task>) -> Session {
        Session {
            id: self.id,
            start_time: self.start_time,
            end_time: end_time.max(self.start_time),
            duration,
            tasks,
        }
    }
}

/// A finished session as stored in the history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Elapsed timer seconds at the moment the session ended.
    pub duration: u64,
    pub tasks: Vec<Task>,
}

impl Session {
    pub fn completion(&self) -> Completion {
        self.tasks.completion()
    }
}

/// Aggregates over the session history.
pub trait SessionHistory {
    fn total_duration(&self) -> u64;
    fn total_completion(&self) -> Completion;
    /// The last `limit` sessions, most recent first.
    fn recent(&self, limit: usize) -> Vec<&Session>;
}

impl SessionHistory for [Session] {
    fn total_duration(&self) -> u64 {
        self.iter().fold(0u64, |acc, s| acc.saturating_add(s.duration))
    }

    fn total_completion(&self) -> Completion {
        self.iter().fold(Completion::default(), |acc, s| acc + s.completion())
    }

    fn recent(&self, limit: usize) -> Vec<&Session> {
        self.iter().rev().take(limit).collect()
    }
}
