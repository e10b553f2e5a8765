//! # Focus Flow
//!
//! A command-line session timer with a per-session task list.
//!
//! ## Features
//!
//! - **Session Timer**: stopwatch-style sessions that can be paused and resumed
//! - **Task Logging**: tasks added during a session are saved with it when it ends
//! - **Session Analytics**: total time, completion ratios and recent sessions
//! - **Local Persistence**: task list and session history survive restarts
//!
//! ## Usage
//!
//! ```rust,no_run
//! use focusflow::commands::Cli;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
