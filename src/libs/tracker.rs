//! Session controller and task manager.
//!
//! [`Tracker`] ties the entity store, the timer and a clock together and
//! exposes the user-facing operations. Session transitions follow a small
//! state machine:
//!
//! ```text
//!          start            pause
//!   Idle ─────────▶ Running ────────▶ Paused
//!    ▲                 │  ◀──────────   │
//!    │                 │     resume     │
//!    └────── end ──────┴────── end ─────┘
//! ```
//!
//! Any operation invoked from a state that does not allow it is a no-op and
//! returns `false` (or `None`); none of them can fail.

use super::clock::{Clock, SystemClock};
use super::config::Config;
use super::session::{ActiveSession, Session};
use super::storage::KeyValueStore;
use super::store::{EntityStore, Mutation};
use super::task::Task;
use super::timer::Timer;
use std::fmt;

/// Where the session controller currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Running,
    Paused,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SessionState::Idle => "idle",
            SessionState::Running => "running",
            SessionState::Paused => "paused",
        };
        f.write_str(label)
    }
}

/// Read-only view of the tracker handed to the view composer.
#[derive(Debug, Clone, Copy)]
pub struct TrackerSnapshot<'a> {
    pub tasks: &'a [Task],
    pub sessions: &'a [Session],
    pub current_session: Option<&'a ActiveSession>,
    pub elapsed: u64,
    pub state: SessionState,
}

pub struct Tracker {
    store: EntityStore,
    timer: Timer,
    clock: Box<dyn Clock>,
}

impl Tracker {
    pub fn new(store: EntityStore, timer: Timer, clock: Box<dyn Clock>) -> Self {
        Tracker { store, timer, clock }
    }

    /// Opens a tracker over `adapter` with the system clock.
    pub fn open(adapter: Box<dyn KeyValueStore>, timer: Timer) -> Self {
        Self::new(EntityStore::open(adapter), timer, Box::new(SystemClock))
    }

    /// Opens a tracker with the configured storage and tick period.
    pub fn from_config(config: &Config) -> Self {
        let timer = Timer::new(config.timer().tick_interval());
        Self::open(config.open_adapter(), timer)
    }

    pub fn state(&self) -> SessionState {
        match (self.store.current_session(), self.timer.is_running()) {
            (None, _) => SessionState::Idle,
            (Some(_), true) => SessionState::Running,
            (Some(_), false) => SessionState::Paused,
        }
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn tasks(&self) -> &[Task] {
        self.store.tasks()
    }

    pub fn sessions(&self) -> &[Session] {
        self.store.sessions()
    }

    pub fn current_session(&self) -> Option<&ActiveSession> {
        self.store.current_session()
    }

    pub fn elapsed(&self) -> u64 {
        self.timer.elapsed()
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    pub fn snapshot(&self) -> TrackerSnapshot<'_> {
        TrackerSnapshot {
            tasks: self.store.tasks(),
            sessions: self.store.sessions(),
            current_session: self.store.current_session(),
            elapsed: self.timer.elapsed(),
            state: self.state(),
        }
    }

    /// Begins a new session. Only valid while idle.
    pub fn start(&mut self) -> Option<&ActiveSession> {
        if self.state() != SessionState::Idle {
            tracing::debug!(state = ?self.state(), "start ignored");
            return None;
        }

        let session = ActiveSession::new(self.clock.now());
        tracing::debug!(id = %session.id, "session started");
        self.store.commit(Mutation::SetCurrentSession(Some(session)));
        self.timer.start();
        self.store.current_session()
    }

    /// Stops the timer of a running session, keeping its elapsed time.
    pub fn pause(&mut self) -> bool {
        if self.state() != SessionState::Running {
            tracing::debug!(state = ?self.state(), "pause ignored");
            return false;
        }

        self.timer.stop();
        tracing::debug!(elapsed = self.timer.elapsed(), "session paused");
        true
    }

    /// Continues a paused session under the same id.
    pub fn resume(&mut self) -> bool {
        if self.state() != SessionState::Paused {
            tracing::debug!(state = ?self.state(), "resume ignored");
            return false;
        }

        self.timer.start();
        tracing::debug!(elapsed = self.timer.elapsed(), "session resumed");
        true
    }

    /// Finishes the current session and appends it to the history.
    ///
    /// The finished session carries the elapsed seconds and a copy of the
    /// live task list; afterwards the tracker is idle, the counter is zero
    /// and the live list is empty.
    pub fn end(&mut self) -> Option<&Session> {
        let active = self.store.current_session()?.clone();

        // Stop ticking before anything else so no tick lands mid-transition.
        let duration = self.timer.elapsed();
        self.timer.stop();

        let session = active.finish(self.clock.now(), duration, self.store.tasks().to_vec());
        tracing::debug!(id = %session.id, duration, tasks = session.tasks.len(), "session ended");

        self.store.commit(Mutation::AppendSession(session));
        self.store.commit(Mutation::SetCurrentSession(None));
        self.timer.reset();
        self.store.commit(Mutation::ClearTasks);

        self.store.sessions().last()
    }

    /// Appends a task built from `title`. Blank titles add nothing.
    pub fn add_task(&mut self, title: &str) -> Option<&Task> {
        let task = Task::new(title, self.clock.now())?;
        self.store.commit(Mutation::AddTask(task));
        self.store.tasks().last()
    }

    /// Flips the completion flag of the task with `id`.
    pub fn toggle_task(&mut self, id: &str) -> Option<&Task> {
        if !self.store.commit(Mutation::ToggleTask(id.to_string())) {
            tracing::debug!(id, "toggle ignored, no such task");
            return None;
        }
        self.store.tasks().iter().find(|t| t.id == id)
    }

    /// Waits for the next timer tick; pending forever unless running.
    pub async fn next_tick(&mut self) {
        self.timer.next_tick().await
    }

    /// Counts one elapsed second if a session is running.
    pub fn on_tick(&mut self) -> bool {
        if self.state() != SessionState::Running {
            return false;
        }
        self.timer.apply_tick()
    }
}
