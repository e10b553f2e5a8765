pub mod init;
pub mod run;
pub mod task;
pub mod view;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Add, toggle or list tasks", arg_required_else_help = true)]
    Task(task::TaskArgs),
    #[command(about = "Show one of the views")]
    View(view::ViewArgs),
    #[command(about = "Run an interactive session")]
    Run,
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Task(args) => task::cmd(args),
            Commands::View(args) => view::cmd(args),
            Commands::Run => run::cmd().await,
        }
    }
}
