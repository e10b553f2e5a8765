//! Core library modules for focusflow.
//!
//! ## Features
//!
//! - **Session Control**: start, pause, resume and end timed work sessions
//! - **Task Management**: a live task list snapshotted into each finished session
//! - **Persistence**: pluggable key-value adapters (SQLite, JSON files, memory)
//! - **Analytics**: derived views over the session history
//! - **Infrastructure**: configuration, messages, logging
//!
//! ## Usage
//!
//! ```rust
//! use focusflow::libs::storage::MemoryStore;
//! use focusflow::libs::timer::Timer;
//! use focusflow::libs::tracker::Tracker;
//!
//! let mut tracker = Tracker::open(Box::new(MemoryStore::new()), Timer::default());
//! tracker.start();
//! tracker.add_task("write report");
//! let session = tracker.end().unwrap();
//! assert_eq!(session.tasks.len(), 1);
//! assert!(tracker.tasks().is_empty());
//! ```

pub mod clock;
pub mod config;
pub mod data_storage;
pub mod formatter;
pub mod logging;
pub mod messages;
pub mod session;
pub mod storage;
pub mod store;
pub mod task;
pub mod timer;
pub mod tracker;
pub mod view;
