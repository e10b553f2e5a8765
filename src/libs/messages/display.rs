//! Display implementation for focusflow messages.
//!
//! Every user-facing string lives here, keyed by a [`Message`] variant, so
//! commands and library code never format text inline.
//!
//! ```rust
//! use focusflow::libs::messages::Message;
//!
//! assert_eq!(Message::TaskCreated("write report".into()).to_string(), "Task 'write report' added");
//! ```

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === SESSION MESSAGES ===
            Message::SessionStarted => "Session started".to_string(),
            Message::SessionAlreadyActive => "A session is already in progress".to_string(),
            Message::SessionPaused(elapsed) => format!("Session paused at {}", elapsed),
            Message::SessionNotRunning => "No running session to pause".to_string(),
            Message::SessionResumed(elapsed) => format!("Session resumed at {}", elapsed),
            Message::SessionNotPaused => "No paused session to resume".to_string(),
            Message::SessionEnded { duration, tasks } => format!("Session finished after {} ({} tasks completed)", duration, tasks),
            Message::NoActiveSession => "No session in progress".to_string(),
            Message::SessionDiscarded(elapsed) => format!("The session in progress ({}) was not ended and has been discarded", elapsed),
            Message::Status { state, timer, tasks } => format!("{} | {} | tasks {}", timer, state, tasks),

            // === TASK MESSAGES ===
            Message::TaskCreated(title) => format!("Task '{}' added", title),
            Message::TaskTitleEmpty => "Task title is empty, nothing added".to_string(),
            Message::TaskCompleted(title) => format!("Task '{}' marked as done", title),
            Message::TaskReopened(title) => format!("Task '{}' marked as not done", title),
            Message::TaskNotFound(reference) => format!("Task '{}' not found", reference),

            // === STORAGE MESSAGES ===
            Message::CollectionMalformed { key, error } => format!("Stored {} could not be read and were reset: {}", key, error),
            Message::CollectionBackedUp(key) => format!("The unreadable value was saved as '{}'", key),
            Message::CollectionLoadFailed { key, error } => format!("Failed to load {}: {}", key, error),
            Message::PersistFailed { key, error } => format!("Failed to save {}: {}", key, error),
            Message::StorageOpenFailed(error) => format!("Failed to open storage: {}", error),
            Message::StorageDegraded => "Storage is unavailable, changes are kept in memory only until exit".to_string(),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDeleted => "Configuration removed".to_string(),
            Message::ConfigFileNotFound => "Configuration file not found".to_string(),
            Message::ConfigParseError(error) => format!("Failed to parse configuration, using defaults: {}", error),
            Message::ConfigModuleStorage => "Storage settings".to_string(),
            Message::ConfigModuleTimer => "Timer settings".to_string(),
            Message::PromptSelectModules => "Select modules to configure".to_string(),
            Message::PromptStorageBackend => "Storage backend".to_string(),
            Message::PromptStorageDirectory => "Data directory (empty for the default location)".to_string(),
            Message::PromptTickInterval => "Timer tick interval (ms)".to_string(),

            // === INTERACTIVE LOOP MESSAGES ===
            Message::RunWelcome => "Focus Flow. Type 'help' for commands.".to_string(),
            Message::RunHelp => [
                "Commands:",
                "  start            start a new session",
                "  pause            pause the running session",
                "  resume           resume the paused session",
                "  end              finish the session and save it",
                "  add <title>      add a task",
                "  toggle <id|n>    mark a task done or not done",
                "  view <name>      show home, tasks, inbox, reporting, portfolios or goals",
                "  status           show the timer",
                "  help             show this help",
                "  quit             exit",
            ]
            .join("\n"),
            Message::UnknownCommand(input) => format!("Unknown command '{}'. Type 'help' for commands.", input),
            Message::MissingArgument(command) => format!("'{}' needs an argument", command),
            Message::InputReadFailed(error) => format!("Could not read input: {}", error),

            // === VIEW MESSAGES ===
            Message::ViewComingSoon(name) => format!("Coming soon: the {} view is under development.", name),
            Message::UnknownView(name) => format!("Unknown view '{}'. Available: home, tasks, inbox, reporting, portfolios, goals", name),
            Message::SessionTimerHeader => "Session Timer".to_string(),
            Message::CurrentSessionTasksHeader => "Current Session Tasks".to_string(),
            Message::SessionStatsHeader => "Session Stats".to_string(),
            Message::AllTasksHeader => "All Tasks".to_string(),
            Message::SessionAnalyticsHeader => "Session Analytics".to_string(),
            Message::RecentSessionsHeader => "Recent Sessions".to_string(),
            Message::NoTasks => "No tasks yet".to_string(),
            Message::NoSessions => "No sessions yet".to_string(),
            Message::TotalSessionsLabel => "Total Sessions".to_string(),
            Message::TasksCompletedLabel => "Tasks Completed".to_string(),
            Message::CurrentSessionLabel => "Current Session".to_string(),
            Message::TotalTimeLabel => "Total Time".to_string(),
            Message::SessionsLabel => "Sessions".to_string(),
            Message::CompletionLabel => "Completion".to_string(),
        };

        write!(f, "{}", text)
    }
}
