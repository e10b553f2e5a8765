#[derive(Debug, Clone)]
pub enum Message {
    // === SESSION MESSAGES ===
    SessionStarted,
    SessionAlreadyActive,
    SessionPaused(String),  // elapsed
    SessionNotRunning,
    SessionResumed(String), // elapsed
    SessionNotPaused,
    SessionEnded {
        duration: String,
        tasks: String,
    },
    NoActiveSession,
    SessionDiscarded(String), // elapsed
    Status {
        state: String,
        timer: String,
        tasks: String,
    },

    // === TASK MESSAGES ===
    TaskCreated(String),  // title
    TaskTitleEmpty,
    TaskCompleted(String), // title
    TaskReopened(String),  // title
    TaskNotFound(String),  // id or position

    // === STORAGE MESSAGES ===
    CollectionMalformed {
        key: String,
        error: String,
    },
    CollectionBackedUp(String), // backup key
    CollectionLoadFailed {
        key: String,
        error: String,
    },
    PersistFailed {
        key: String,
        error: String,
    },
    StorageOpenFailed(String),
    StorageDegraded,

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    ConfigFileNotFound,
    ConfigParseError(String),
    ConfigModuleStorage,
    ConfigModuleTimer,
    PromptSelectModules,
    PromptStorageBackend,
    PromptStorageDirectory,
    PromptTickInterval,

    // === INTERACTIVE LOOP MESSAGES ===
    RunWelcome,
    RunHelp,
    UnknownCommand(String),
    MissingArgument(String), // command name
    InputReadFailed(String),

    // === VIEW MESSAGES ===
    ViewComingSoon(String), // view name
    UnknownView(String),
    SessionTimerHeader,
    CurrentSessionTasksHeader,
    SessionStatsHeader,
    AllTasksHeader,
    SessionAnalyticsHeader,
    RecentSessionsHeader,
    NoTasks,
    NoSessions,
    TotalSessionsLabel,
    TasksCompletedLabel,
    CurrentSessionLabel,
    TotalTimeLabel,
    SessionsLabel,
    CompletionLabel,
}
