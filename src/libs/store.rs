//! Entity store: the single in-memory source of truth.
//!
//! The store owns the live task list, the session history and the
//! in-progress session. Every change goes through [`EntityStore::commit`],
//! which applies one [`Mutation`] and then writes the whole affected
//! collection through the persistence adapter. Apart from the backup of an
//! unreadable collection at startup, nothing else writes to storage.
//!
//! ## Failure handling
//!
//! - A collection that is absent from storage starts empty.
//! - A collection that cannot be parsed starts empty and a warning is shown;
//!   its text is kept under `<key>.malformed`.
//! - A failed write is reported; memory stays authoritative.
//! - An adapter that reports itself unavailable switches the store to
//!   in-memory-only mode for the rest of the process.

use super::session::{ActiveSession, Session};
use super::storage::{KeyValueStore, StorageError, SESSIONS_KEY, TASKS_KEY};
use super::task::Task;
use crate::libs::messages::Message;
use crate::{msg_error, msg_info, msg_warning};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A persisted collection of the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Tasks,
    Sessions,
}

impl Collection {
    pub fn key(&self) -> &'static str {
        match self {
            Collection::Tasks => TASKS_KEY,
            Collection::Sessions => SESSIONS_KEY,
        }
    }
}

/// A single change to the store.
#[derive(Debug, Clone)]
pub enum Mutation {
    AddTask(Task),
    ToggleTask(String),
    ClearTasks,
    AppendSession(Session),
    SetCurrentSession(Option<ActiveSession>),
}

pub struct EntityStore {
    tasks: Vec<Task>,
    sessions: Vec<Session>,
    current_session: Option<ActiveSession>,
    adapter: Box<dyn KeyValueStore>,
    degraded: bool,
}

impl EntityStore {
    /// Seeds a store from the adapter's saved collections.
    pub fn open(mut adapter: Box<dyn KeyValueStore>) -> Self {
        let mut degraded = false;
        let tasks = load_collection::<Task>(adapter.as_mut(), TASKS_KEY, &mut degraded);
        let sessions = load_collection::<Session>(adapter.as_mut(), SESSIONS_KEY, &mut degraded);

        if degraded {
            msg_warning!(Message::StorageDegraded);
        }
        tracing::debug!(tasks = tasks.len(), sessions = sessions.len(), "entity store loaded");

        EntityStore {
            tasks,
            sessions,
            current_session: None,
            adapter,
            degraded,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn current_session(&self) -> Option<&ActiveSession> {
        self.current_session.as_ref()
    }

    /// Whether writes are being skipped because storage became unavailable.
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Applies `mutation`, persists the affected collection and reports
    /// whether anything changed.
    pub fn commit(&mut self, mutation: Mutation) -> bool {
        tracing::debug!(?mutation, "commit");

        let affected = match mutation {
            Mutation::AddTask(task) => {
                self.tasks.push(task);
                Some(Collection::Tasks)
            }
            Mutation::ToggleTask(id) => match self.tasks.iter_mut().find(|t| t.id == id) {
                Some(task) => {
                    task.completed = !task.completed;
                    Some(Collection::Tasks)
                }
                None => return false,
            },
            Mutation::ClearTasks => {
                self.tasks.clear();
                Some(Collection::Tasks)
            }
            Mutation::AppendSession(session) => {
                self.sessions.push(session);
                Some(Collection::Sessions)
            }
            Mutation::SetCurrentSession(session) => {
                self.current_session = session;
                None
            }
        };

        if let Some(collection) = affected {
            self.persist(collection);
        }
        true
    }

    fn persist(&mut self, collection: Collection) {
        if self.degraded {
            return;
        }

        let key = collection.key();
        let result = match collection {
            Collection::Tasks => write_collection(self.adapter.as_mut(), key, &self.tasks),
            Collection::Sessions => write_collection(self.adapter.as_mut(), key, &self.sessions),
        };

        if let Err(e) = result {
            msg_error!(Message::PersistFailed {
                key: key.to_string(),
                error: e.to_string(),
            });
            if e.is_unavailable() {
                self.degraded = true;
                msg_warning!(Message::StorageDegraded);
            }
        }
    }
}

fn load_collection<T: DeserializeOwned>(adapter: &mut dyn KeyValueStore, key: &str, degraded: &mut bool) -> Vec<T> {
    match adapter.load(key) {
        Ok(None) => Vec::new(),
        Ok(Some(text)) => match serde_json::from_str::<Vec<T>>(&text) {
            Ok(items) => items,
            Err(e) => {
                msg_warning!(Message::CollectionMalformed {
                    key: key.to_string(),
                    error: e.to_string(),
                });
                back_up_malformed(adapter, key, &text, degraded);
                Vec::new()
            }
        },
        Err(e) => {
            msg_error!(Message::CollectionLoadFailed {
                key: key.to_string(),
                error: e.to_string(),
            });
            *degraded = true;
            Vec::new()
        }
    }
}

/// Copies unreadable text to `<key>.malformed` before the next commit
/// overwrites `key`. If the copy cannot be written, nothing is written at
/// all for this process.
fn back_up_malformed(adapter: &mut dyn KeyValueStore, key: &str, text: &str, degraded: &mut bool) {
    let backup_key = malformed_key(key);
    match adapter.save(&backup_key, text) {
        Ok(()) => msg_info!(Message::CollectionBackedUp(backup_key)),
        Err(e) => {
            msg_error!(Message::PersistFailed {
                key: backup_key,
                error: e.to_string(),
            });
            *degraded = true;
        }
    }
}

/// Storage key holding the last unreadable value of `key`.
pub fn malformed_key(key: &str) -> String {
    format!("{}.malformed", key)
}

fn write_collection<T: Serialize>(adapter: &mut dyn KeyValueStore, key: &str, items: &[T]) -> Result<(), StorageError> {
    let text = serde_json::to_string(items)?;
    adapter.save(key, &text)
}
