//! View composer: derives display data from tracker state.
//!
//! Composition is a pure read of a [`TrackerSnapshot`]; nothing here writes
//! to the store. Each named view has its own data type so callers can
//! render or inspect it, and [`View`] turns them into terminal tables.

use super::formatter::{format_date, format_time};
use super::messages::Message;
use super::session::{SessionHistory, RECENT_SESSIONS_LIMIT};
use super::task::{Completion, Task, TaskGroup};
use super::tracker::{SessionState, TrackerSnapshot};
use prettytable::{row, Table};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The closed set of screens the user can switch between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ViewName {
    Home,
    Tasks,
    Inbox,
    Reporting,
    Portfolios,
    Goals,
}

impl ViewName {
    pub const ALL: [ViewName; 6] = [
        ViewName::Home,
        ViewName::Tasks,
        ViewName::Inbox,
        ViewName::Reporting,
        ViewName::Portfolios,
        ViewName::Goals,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewName::Home => "home",
            ViewName::Tasks => "tasks",
            ViewName::Inbox => "inbox",
            ViewName::Reporting => "reporting",
            ViewName::Portfolios => "portfolios",
            ViewName::Goals => "goals",
        }
    }
}

impl fmt::Display for ViewName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown view '{0}'")]
pub struct UnknownView(pub String);

impl FromStr for ViewName {
    type Err = UnknownView;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        ViewName::ALL
            .into_iter()
            .find(|v| v.as_str() == name)
            .ok_or_else(|| UnknownView(s.trim().to_string()))
    }
}

/// One task line, numbered from 1 in list order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    pub position: usize,
    pub id: String,
    pub title: String,
    pub completed: bool,
    pub created: String,
}

impl TaskRow {
    fn from_tasks(tasks: &[Task]) -> Vec<TaskRow> {
        tasks
            .iter()
            .enumerate()
            .map(|(index, t)| TaskRow {
                position: index + 1,
                id: t.id.clone(),
                title: t.title.clone(),
                completed: t.completed,
                created: format_date(&t.created_at),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeView {
    pub timer: String,
    pub state: SessionState,
    pub session_id: Option<String>,
    pub tasks: Vec<TaskRow>,
    pub total_sessions: usize,
    pub tasks_completed: Completion,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TasksView {
    pub tasks: Vec<TaskRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentSession {
    pub id: String,
    pub date: String,
    pub duration: String,
    pub completion: Completion,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportingView {
    pub total_seconds: u64,
    pub total_time: String,
    pub sessions: usize,
    pub tasks_completed: usize,
    pub completion: Completion,
    pub recent: Vec<RecentSession>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposedView {
    Home(HomeView),
    Tasks(TasksView),
    Reporting(ReportingView),
    ComingSoon(ViewName),
}

/// Builds the display data for `view`.
pub fn compose(view: ViewName, snapshot: &TrackerSnapshot<'_>) -> ComposedView {
    match view {
        ViewName::Home => ComposedView::Home(HomeView {
            timer: format_time(snapshot.elapsed),
            state: snapshot.state,
            session_id: snapshot.current_session.map(|s| s.id.clone()),
            tasks: TaskRow::from_tasks(snapshot.tasks),
            total_sessions: snapshot.sessions.len(),
            tasks_completed: snapshot.tasks.completion(),
        }),
        ViewName::Tasks => ComposedView::Tasks(TasksView {
            tasks: TaskRow::from_tasks(snapshot.tasks),
        }),
        ViewName::Reporting => {
            let total_seconds = snapshot.sessions.total_duration();
            let completion = snapshot.sessions.total_completion();
            ComposedView::Reporting(ReportingView {
                total_seconds,
                total_time: format_time(total_seconds),
                sessions: snapshot.sessions.len(),
                tasks_completed: completion.completed,
                completion,
                recent: snapshot
                    .sessions
                    .recent(RECENT_SESSIONS_LIMIT)
                    .into_iter()
                    .map(|s| RecentSession {
                        id: s.id.clone(),
                        date: format_date(&s.start_time),
                        duration: format_time(s.duration),
                        completion: s.completion(),
                    })
                    .collect(),
            })
        }
        ViewName::Inbox | ViewName::Portfolios | ViewName::Goals => ComposedView::ComingSoon(view),
    }
}

pub struct View {}

impl View {
    /// Renders a composed view as terminal text.
    pub fn render(composed: &ComposedView) -> String {
        match composed {
            ComposedView::Home(home) => Self::home(home),
            ComposedView::Tasks(tasks) => Self::tasks(tasks),
            ComposedView::Reporting(report) => Self::reporting(report),
            ComposedView::ComingSoon(name) => format!("{}\n", Message::ViewComingSoon(name.to_string())),
        }
    }

    pub fn print(composed: &ComposedView) {
        print!("{}", Self::render(composed));
    }

    fn home(home: &HomeView) -> String {
        let mut out = String::new();

        let mut timer = Table::new();
        timer.add_row(row![Message::SessionTimerHeader, home.timer, home.state]);
        out.push_str(&timer.to_string());

        out.push_str(&format!("\n{}\n", Message::CurrentSessionTasksHeader));
        out.push_str(&Self::task_table(&home.tasks, false));

        let mut stats = Table::new();
        stats.set_titles(row![Message::SessionStatsHeader, ""]);
        stats.add_row(row![Message::TotalSessionsLabel, home.total_sessions]);
        stats.add_row(row![Message::TasksCompletedLabel, home.tasks_completed]);
        stats.add_row(row![Message::CurrentSessionLabel, home.timer]);
        out.push('\n');
        out.push_str(&stats.to_string());

        out
    }

    fn tasks(view: &TasksView) -> String {
        format!("{}\n{}", Message::AllTasksHeader, Self::task_table(&view.tasks, true))
    }

    fn reporting(report: &ReportingView) -> String {
        let mut out = String::new();

        let mut totals = Table::new();
        totals.set_titles(row![Message::SessionAnalyticsHeader, ""]);
        totals.add_row(row![Message::TotalTimeLabel, report.total_time]);
        totals.add_row(row![Message::SessionsLabel, report.sessions]);
        totals.add_row(row![Message::TasksCompletedLabel, report.tasks_completed]);
        totals.add_row(row![Message::CompletionLabel, report.completion]);
        out.push_str(&totals.to_string());

        out.push_str(&format!("\n{}\n", Message::RecentSessionsHeader));
        if report.recent.is_empty() {
            out.push_str(&format!("{}\n", Message::NoSessions));
            return out;
        }

        let mut recent = Table::new();
        recent.set_titles(row!["DATE", "DURATION", "TASKS"]);
        for session in &report.recent {
            recent.add_row(row![session.date, session.duration, session.completion]);
        }
        out.push_str(&recent.to_string());

        out
    }

    fn task_table(tasks: &[TaskRow], with_dates: bool) -> String {
        if tasks.is_empty() {
            return format!("{}\n", Message::NoTasks);
        }

        let mut table = Table::new();
        if with_dates {
            table.set_titles(row!["#", "DONE", "TITLE", "CREATED", "ID"]);
        } else {
            table.set_titles(row!["#", "DONE", "TITLE"]);
        }
        for task in tasks {
            let done = if task.completed { "[x]" } else { "[ ]" };
            if with_dates {
                table.add_row(row![task.position, done, task.title, task.created, task.id]);
            } else {
                table.add_row(row![task.position, done, task.title]);
            }
        }
        table.to_string()
    }
}
