#[cfg(test)]
mod tests {
    use focusflow::db::kv::SqliteStore;
    use focusflow::libs::storage::{FileStore, KeyValueStore, MemoryStore, StorageError, SESSIONS_KEY, TASKS_KEY};
    use focusflow::libs::store::{malformed_key, EntityStore, Mutation};
    use focusflow::libs::timer::Timer;
    use focusflow::libs::tracker::{SessionState, Tracker};
    use std::cell::RefCell;
    use std::io;
    use std::rc::Rc;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct StorageTestContext {
        temp_dir: TempDir,
    }

    impl TestContext for StorageTestContext {
        fn setup() -> Self {
            StorageTestContext {
                temp_dir: tempfile::tempdir().unwrap(),
            }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Failure {
        Never,
        Io,
        Unavailable,
    }

    impl Failure {
        fn error(&self) -> Option<StorageError> {
            match self {
                Failure::Never => None,
                Failure::Io => Some(io::Error::new(io::ErrorKind::PermissionDenied, "read-only").into()),
                Failure::Unavailable => Some(StorageError::Unavailable("disk removed".to_string())),
            }
        }
    }

    /// Adapter that records every save and fails on demand.
    #[derive(Clone)]
    struct ScriptedStore {
        inner: MemoryStore,
        on_load: Failure,
        on_save: Failure,
        saves: Rc<RefCell<Vec<String>>>,
    }

    impl ScriptedStore {
        fn new(on_load: Failure, on_save: Failure) -> Self {
            ScriptedStore {
                inner: MemoryStore::new(),
                on_load,
                on_save,
                saves: Rc::new(RefCell::new(Vec::new())),
            }
        }

        fn saved_keys(&self) -> Vec<String> {
            self.saves.borrow().clone()
        }
    }

    impl KeyValueStore for ScriptedStore {
        fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
            match self.on_load.error() {
                Some(e) => Err(e),
                None => self.inner.load(key),
            }
        }

        fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            self.saves.borrow_mut().push(key.to_string());
            match self.on_save.error() {
                Some(e) => Err(e),
                None => self.inner.save(key, value),
            }
        }
    }

    fn tracker_over(adapter: impl KeyValueStore + 'static) -> Tracker {
        Tracker::open(Box::new(adapter), Timer::default())
    }

    /// Runs one session with the given `(title, completed)` tasks.
    fn record_session(tracker: &mut Tracker, tasks: &[(&str, bool)], ticks: u64) {
        tracker.start();
        for (title, completed) in tasks {
            let id = tracker.add_task(title).unwrap().id.clone();
            if *completed {
                tracker.toggle_task(&id);
            }
        }
        for _ in 0..ticks {
            tracker.on_tick();
        }
        tracker.end();
    }

    #[test]
    fn test_tasks_saved_as_json_array() {
        let storage = MemoryStore::new();
        let mut tracker = tracker_over(storage.clone());
        tracker.add_task("write tests");

        let saved: serde_json::Value = serde_json::from_str(&storage.get(TASKS_KEY).unwrap()).unwrap();
        let task = &saved[0];
        assert_eq!(task["title"], "write tests");
        assert_eq!(task["completed"], false);
        assert!(task["id"].is_string());
        assert!(task["createdAt"].is_string());
    }

    #[test]
    fn test_sessions_saved_with_camel_case_keys() {
        let storage = MemoryStore::new();
        let mut tracker = tracker_over(storage.clone());
        record_session(&mut tracker, &[("a", false)], 7);

        let saved: serde_json::Value = serde_json::from_str(&storage.get(SESSIONS_KEY).unwrap()).unwrap();
        let session = &saved[0];
        assert_eq!(session["duration"], 7);
        assert!(session["startTime"].is_string());
        assert!(session["endTime"].is_string());
        assert_eq!(session["tasks"][0]["title"], "a");

        // Ending clears the live list on disk as well.
        assert_eq!(storage.get(TASKS_KEY).unwrap(), "[]");
    }

    #[test]
    fn test_reopen_restores_collections() {
        let storage = MemoryStore::new();
        let mut tracker = tracker_over(storage.clone());
        record_session(&mut tracker, &[("done", true), ("open", false)], 30);
        let id = tracker.add_task("carry over").unwrap().id.clone();
        tracker.toggle_task(&id);
        let sessions = tracker.sessions().to_vec();
        let tasks = tracker.tasks().to_vec();
        drop(tracker);

        let reopened = tracker_over(storage);
        assert_eq!(reopened.sessions(), sessions.as_slice());
        assert_eq!(reopened.tasks(), tasks.as_slice());

        let recorded = &reopened.sessions()[0].tasks;
        assert_eq!(recorded.len(), 2);
        assert_eq!(recorded[0].title, "done");
        assert!(recorded[0].completed);
        assert_eq!(recorded[1].title, "open");
        assert!(!recorded[1].completed);
        for (restored, original) in recorded.iter().zip(&sessions[0].tasks) {
            assert_eq!(restored.id, original.id);
            assert_eq!(restored.created_at, original.created_at);
        }
        assert_eq!(reopened.sessions()[0].duration, 30);
    }

    #[test]
    fn test_session_in_progress_is_not_restored() {
        let storage = MemoryStore::new();
        let mut tracker = tracker_over(storage.clone());
        tracker.start();
        tracker.on_tick();
        drop(tracker);

        let reopened = tracker_over(storage);
        assert_eq!(reopened.state(), SessionState::Idle);
        assert_eq!(reopened.elapsed(), 0);
        assert!(reopened.sessions().is_empty());
    }

    #[test]
    fn test_absent_collections_start_empty() {
        let store = EntityStore::open(Box::new(MemoryStore::new()));
        assert!(store.tasks().is_empty());
        assert!(store.sessions().is_empty());
        assert!(!store.is_degraded());
    }

    #[test]
    fn test_malformed_collection_starts_empty() {
        let storage = MemoryStore::new()
            .with_value(TASKS_KEY, "{not json")
            .with_value(SESSIONS_KEY, r#"{"duration": 5}"#);
        let mut tracker = tracker_over(storage.clone());

        assert!(tracker.tasks().is_empty());
        assert!(tracker.sessions().is_empty());
        assert!(!tracker.store().is_degraded());

        // The next write replaces the broken value.
        tracker.add_task("fresh");
        let saved: serde_json::Value = serde_json::from_str(&storage.get(TASKS_KEY).unwrap()).unwrap();
        assert_eq!(saved.as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_malformed_collection_is_backed_up() {
        let broken = r#"[{"id":"s-1","startTime":"2025-01-15T09:00:00.000Z","duration":-1}]"#;
        let storage = MemoryStore::new().with_value(SESSIONS_KEY, broken);
        let mut tracker = tracker_over(storage.clone());

        assert!(tracker.sessions().is_empty());
        assert_eq!(storage.get(&malformed_key(SESSIONS_KEY)).as_deref(), Some(broken));

        record_session(&mut tracker, &[("after reset", true)], 1);
        assert_eq!(storage.get(&malformed_key(SESSIONS_KEY)).as_deref(), Some(broken));
        assert!(storage.get(SESSIONS_KEY).unwrap().contains("after reset"));
    }

    #[test]
    fn test_failed_backup_stops_all_writes() {
        let mut storage = ScriptedStore::new(Failure::Never, Failure::Io);
        storage.inner = storage.inner.with_value(TASKS_KEY, "not json");
        let mut tracker = tracker_over(storage.clone());

        assert!(tracker.store().is_degraded());
        tracker.add_task("kept in memory");

        assert_eq!(storage.saved_keys(), vec![malformed_key(TASKS_KEY)]);
        assert_eq!(storage.inner.get(TASKS_KEY).as_deref(), Some("not json"));
    }

    #[test]
    fn test_empty_arrays_load_as_empty() {
        let storage = MemoryStore::new().with_value(TASKS_KEY, "[]").with_value(SESSIONS_KEY, "[]");
        let store = EntityStore::open(Box::new(storage));

        assert!(store.tasks().is_empty());
        assert!(store.sessions().is_empty());
        assert!(!store.is_degraded());
    }

    #[test]
    fn test_loads_millisecond_timestamps() {
        let task = r#"{"id":"t-1","title":"Legacy","completed":true,"createdAt":"2025-01-15T09:30:00.000Z"}"#;
        let storage = MemoryStore::new()
            .with_value(TASKS_KEY, &format!("[{}]", task))
            .with_value(
                SESSIONS_KEY,
                &format!(
                    r#"[{{"id":"s-1","startTime":"2025-01-15T09:00:00.000Z","endTime":"2025-01-15T09:45:00.000Z","duration":2700,"tasks":[{}]}}]"#,
                    task
                ),
            );
        let tracker = tracker_over(storage);

        assert_eq!(tracker.tasks()[0].id, "t-1");
        assert!(tracker.tasks()[0].completed);
        let session = &tracker.sessions()[0];
        assert_eq!(session.duration, 2700);
        assert_eq!((session.end_time - session.start_time).num_minutes(), 45);
        assert_eq!(session.tasks[0].title, "Legacy");
    }

    #[test]
    fn test_start_and_pause_write_nothing() {
        let storage = ScriptedStore::new(Failure::Never, Failure::Never);
        let mut tracker = tracker_over(storage.clone());

        tracker.start();
        tracker.pause();
        tracker.resume();

        assert!(storage.saved_keys().is_empty());
    }

    #[test]
    fn test_each_commit_writes_only_affected_collection() {
        let storage = ScriptedStore::new(Failure::Never, Failure::Never);
        let mut tracker = tracker_over(storage.clone());

        tracker.start();
        let id = tracker.add_task("one").unwrap().id.clone();
        tracker.toggle_task(&id);
        tracker.toggle_task("missing");
        assert_eq!(storage.saved_keys(), vec![TASKS_KEY, TASKS_KEY]);

        tracker.end();
        assert_eq!(storage.saved_keys(), vec![TASKS_KEY, TASKS_KEY, SESSIONS_KEY, TASKS_KEY]);
    }

    #[test]
    fn test_unknown_toggle_commit_reports_no_change() {
        let storage = ScriptedStore::new(Failure::Never, Failure::Never);
        let mut store = EntityStore::open(Box::new(storage.clone()));

        assert!(!store.commit(Mutation::ToggleTask("missing".to_string())));
        assert!(storage.saved_keys().is_empty());
    }

    #[test]
    fn test_failed_write_keeps_memory_and_retries() {
        let storage = ScriptedStore::new(Failure::Never, Failure::Io);
        let mut tracker = tracker_over(storage.clone());

        tracker.add_task("first");
        tracker.add_task("second");

        assert_eq!(tracker.tasks().len(), 2);
        assert!(!tracker.store().is_degraded());
        assert_eq!(storage.saved_keys(), vec![TASKS_KEY, TASKS_KEY]);
    }

    #[test]
    fn test_unavailable_storage_degrades_to_memory() {
        let storage = ScriptedStore::new(Failure::Never, Failure::Unavailable);
        let mut tracker = tracker_over(storage.clone());

        tracker.add_task("first");
        assert!(tracker.store().is_degraded());

        tracker.add_task("second");
        record_session(&mut tracker, &[], 2);

        assert_eq!(storage.saved_keys(), vec![TASKS_KEY]);
        assert_eq!(tracker.sessions().len(), 1);
        assert_eq!(tracker.sessions()[0].tasks.len(), 2);
    }

    #[test]
    fn test_load_failure_degrades_without_writing() {
        let storage = ScriptedStore::new(Failure::Io, Failure::Never);
        let mut tracker = tracker_over(storage.clone());

        assert!(tracker.store().is_degraded());
        tracker.add_task("kept in memory");

        assert_eq!(tracker.tasks().len(), 1);
        assert!(storage.saved_keys().is_empty());
    }

    #[test_context(StorageTestContext)]
    #[test]
    fn test_file_store_round_trip(ctx: &mut StorageTestContext) {
        let dir = ctx.temp_dir.path().join("data");
        let mut tracker = tracker_over(FileStore::open(&dir).unwrap());
        record_session(&mut tracker, &[("file backed", true), ("pending review", false)], 12);
        tracker.add_task("pending");
        drop(tracker);

        assert!(dir.join("tasks.json").exists());
        assert!(dir.join("sessions.json").exists());
        assert!(!dir.join("tasks.json.tmp").exists());

        let reopened = tracker_over(FileStore::open(&dir).unwrap());
        assert_eq!(reopened.sessions().len(), 1);
        assert_eq!(reopened.sessions()[0].duration, 12);
        let flags: Vec<bool> = reopened.sessions()[0].tasks.iter().map(|t| t.completed).collect();
        assert_eq!(flags, vec![true, false]);
        assert_eq!(reopened.tasks()[0].title, "pending");
    }

    #[test_context(StorageTestContext)]
    #[test]
    fn test_file_store_missing_key_is_none(ctx: &mut StorageTestContext) {
        let store = FileStore::open(ctx.temp_dir.path()).unwrap();
        assert!(store.load(TASKS_KEY).unwrap().is_none());
    }

    #[test_context(StorageTestContext)]
    #[test]
    fn test_file_store_overwrites_whole_value(ctx: &mut StorageTestContext) {
        let mut store = FileStore::open(ctx.temp_dir.path()).unwrap();
        store.save(TASKS_KEY, r#"[{"long": "value"}]"#).unwrap();
        store.save(TASKS_KEY, "[]").unwrap();

        assert_eq!(store.load(TASKS_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test_context(StorageTestContext)]
    #[test]
    fn test_file_store_on_a_file_is_unavailable(ctx: &mut StorageTestContext) {
        let blocker = ctx.temp_dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();

        let result = FileStore::open(blocker.join("nested"));
        assert!(matches!(result, Err(ref e) if e.is_unavailable()));
    }

    #[test_context(StorageTestContext)]
    #[test]
    fn test_sqlite_store_round_trip(ctx: &mut StorageTestContext) {
        let path = ctx.temp_dir.path().join("focusflow.db");
        let mut tracker = tracker_over(SqliteStore::open(&path).unwrap());
        record_session(&mut tracker, &[("a", true), ("b", false)], 3);
        record_session(&mut tracker, &[], 4);
        drop(tracker);

        let reopened = tracker_over(SqliteStore::open(&path).unwrap());
        let durations: Vec<u64> = reopened.sessions().iter().map(|s| s.duration).collect();
        assert_eq!(durations, vec![3, 4]);
        assert_eq!(reopened.sessions()[0].completion().to_string(), "1/2");
        assert!(reopened.sessions()[0].tasks[0].completed);
        assert!(!reopened.sessions()[0].tasks[1].completed);
        assert!(reopened.tasks().is_empty());
    }

    #[test_context(StorageTestContext)]
    #[test]
    fn test_sqlite_store_upserts(ctx: &mut StorageTestContext) {
        let mut store = SqliteStore::open(&ctx.temp_dir.path().join("kv.db")).unwrap();
        assert!(store.load(SESSIONS_KEY).unwrap().is_none());

        store.save(SESSIONS_KEY, "[1]").unwrap();
        store.save(SESSIONS_KEY, "[1,2]").unwrap();

        assert_eq!(store.load(SESSIONS_KEY).unwrap().as_deref(), Some("[1,2]"));
        let rows: i64 = store
            .conn
            .query_row("SELECT COUNT(*) FROM storage", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }
}
