//! One-shot task commands against the saved task list.

use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::libs::task::{Task, TaskGroup};
use crate::libs::tracker::Tracker;
use crate::libs::view::{compose, View, ViewName};
use crate::{msg_info, msg_success};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct TaskArgs {
    #[command(subcommand)]
    command: TaskCommand,
}

#[derive(Debug, Subcommand)]
enum TaskCommand {
    #[command(about = "Add a task to the current list")]
    Add {
        /// Task title; surrounding whitespace is ignored
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
    },
    #[command(about = "Mark a task done or not done")]
    Toggle {
        /// Task id or 1-based position in the list
        id: String,
    },
    #[command(about = "List the current tasks")]
    List,
}

pub fn cmd(task_args: TaskArgs) -> Result<()> {
    let mut tracker = Tracker::from_config(&Config::read_or_default());

    match task_args.command {
        TaskCommand::Add { title } => add(&mut tracker, &title.join(" ")),
        TaskCommand::Toggle { id } => toggle(&mut tracker, &id),
        TaskCommand::List => View::print(&compose(ViewName::Tasks, &tracker.snapshot())),
    }

    Ok(())
}

/// Adds a task and reports the outcome.
pub(crate) fn add(tracker: &mut Tracker, title: &str) {
    match tracker.add_task(title) {
        Some(task) => msg_success!(Message::TaskCreated(task.title.clone())),
        None => msg_info!(Message::TaskTitleEmpty),
    }
}

/// Toggles the task referenced by id or position and reports the outcome.
pub(crate) fn toggle(tracker: &mut Tracker, reference: &str) {
    let id = tracker.tasks().resolve(reference).map(|t| t.id.clone());
    match id.and_then(|id| tracker.toggle_task(&id).cloned()) {
        Some(Task { title, completed: true, .. }) => msg_success!(Message::TaskCompleted(title)),
        Some(Task { title, .. }) => msg_info!(Message::TaskReopened(title)),
        None => msg_info!(Message::TaskNotFound(reference.trim().to_string())),
    }
}
