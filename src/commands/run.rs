//! Interactive session loop.
//!
//! Timer ticks and user commands share one cooperative loop: a single
//! `tokio::select!` waits for either the next tick or the next stdin line,
//! and each event is handled to completion before the next one is taken.
//! The in-progress session lives only as long as the loop does.

use super::task;
use crate::libs::config::Config;
use crate::libs::formatter::format_time;
use crate::libs::messages::Message;
use crate::libs::task::TaskGroup;
use crate::libs::tracker::{SessionState, Tracker};
use crate::libs::view::{compose, UnknownView, View, ViewName};
use crate::{msg_error, msg_info, msg_print, msg_success, msg_warning};
use anyhow::Result;
use std::str::FromStr;
use thiserror::Error;
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, BufReader};

/// A line of input in the interactive loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunCommand {
    Start,
    Pause,
    Resume,
    End,
    Add(String),
    Toggle(String),
    View(ViewName),
    Status,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RunCommandError {
    #[error("unknown command '{0}'")]
    Unknown(String),
    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),
    #[error(transparent)]
    View(#[from] UnknownView),
}

impl FromStr for RunCommand {
    type Err = RunCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "start" => RunCommand::Start,
            "pause" => RunCommand::Pause,
            "resume" => RunCommand::Resume,
            "end" | "stop" => RunCommand::End,
            // Blank titles are passed through; the tracker ignores them.
            "add" => RunCommand::Add(rest.to_string()),
            "toggle" | "done" => {
                if rest.is_empty() {
                    return Err(RunCommandError::MissingArgument("toggle"));
                }
                RunCommand::Toggle(rest.to_string())
            }
            "view" => {
                if rest.is_empty() {
                    RunCommand::View(ViewName::Home)
                } else {
                    RunCommand::View(rest.parse()?)
                }
            }
            "status" => RunCommand::Status,
            "help" | "?" => RunCommand::Help,
            "quit" | "exit" | "q" => RunCommand::Quit,
            _ => return Err(RunCommandError::Unknown(line.to_string())),
        };

        Ok(command)
    }
}

pub async fn cmd() -> Result<()> {
    let mut tracker = Tracker::from_config(&Config::read_or_default());

    msg_print!(Message::RunWelcome);
    run_loop(&mut tracker, BufReader::new(io::stdin())).await;

    Ok(())
}

/// Drives `tracker` from newline-separated commands until `quit` or the
/// end of `input`.
///
/// A line that is not valid UTF-8 is reported and skipped. A read error
/// ends the loop the same way `quit` does.
pub async fn run_loop<R>(tracker: &mut Tracker, input: R)
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.split(b'\n');

    loop {
        tokio::select! {
            _ = tracker.next_tick() => {
                tracker.on_tick();
            }
            segment = lines.next_segment() => {
                let bytes = match segment {
                    Ok(Some(bytes)) => bytes,
                    Ok(None) => {
                        quit(tracker);
                        break;
                    }
                    Err(e) => {
                        msg_error!(Message::InputReadFailed(e.to_string()));
                        quit(tracker);
                        break;
                    }
                };
                let line = match String::from_utf8(bytes) {
                    Ok(line) => line,
                    Err(e) => {
                        msg_error!(Message::InputReadFailed(e.to_string()));
                        continue;
                    }
                };
                if !dispatch(tracker, &line) {
                    quit(tracker);
                    break;
                }
            }
        }
    }
}

/// Parses and runs one input line. Returns `false` when the user quits.
fn dispatch(tracker: &mut Tracker, line: &str) -> bool {
    if line.trim().is_empty() {
        return true;
    }

    match line.parse::<RunCommand>() {
        Ok(RunCommand::Quit) => return false,
        Ok(command) => {
            tracing::debug!(?command, "run command");
            execute(tracker, command);
        }
        Err(RunCommandError::Unknown(input)) => msg_error!(Message::UnknownCommand(input)),
        Err(RunCommandError::MissingArgument(name)) => msg_error!(Message::MissingArgument(name.to_string())),
        Err(RunCommandError::View(UnknownView(name))) => msg_error!(Message::UnknownView(name)),
    }
    true
}

/// Applies one parsed command to the tracker and reports the outcome.
pub fn execute(tracker: &mut Tracker, command: RunCommand) {
    match command {
        RunCommand::Start => match tracker.start() {
            Some(_) => msg_success!(Message::SessionStarted),
            None => msg_info!(Message::SessionAlreadyActive),
        },
        RunCommand::Pause => {
            if tracker.pause() {
                msg_info!(Message::SessionPaused(format_time(tracker.elapsed())));
            } else {
                msg_info!(Message::SessionNotRunning);
            }
        }
        RunCommand::Resume => {
            if tracker.resume() {
                msg_info!(Message::SessionResumed(format_time(tracker.elapsed())));
            } else {
                msg_info!(Message::SessionNotPaused);
            }
        }
        RunCommand::End => match tracker.end() {
            Some(session) => msg_success!(Message::SessionEnded {
                duration: format_time(session.duration),
                tasks: session.completion().to_string(),
            }),
            None => msg_info!(Message::NoActiveSession),
        },
        RunCommand::Add(title) => task::add(tracker, &title),
        RunCommand::Toggle(reference) => task::toggle(tracker, &reference),
        RunCommand::View(name) => View::print(&compose(name, &tracker.snapshot())),
        RunCommand::Status => msg_print!(Message::Status {
            state: tracker.state().to_string(),
            timer: format_time(tracker.elapsed()),
            tasks: tracker.tasks().completion().to_string(),
        }),
        RunCommand::Help => msg_print!(Message::RunHelp),
        RunCommand::Quit => {}
    }
}

fn quit(tracker: &Tracker) {
    if tracker.state() != SessionState::Idle {
        msg_warning!(Message::SessionDiscarded(format_time(tracker.elapsed())));
    }
}
