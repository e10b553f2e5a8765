use crate::libs::config::Config;
use crate::libs::tracker::Tracker;
use crate::libs::view::{compose, View, ViewName};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ViewArgs {
    /// View to show
    #[arg(value_enum, default_value_t = ViewName::Home)]
    name: ViewName,
}

pub fn cmd(view_args: ViewArgs) -> Result<()> {
    let tracker = Tracker::from_config(&Config::read_or_default());
    View::print(&compose(view_args.name, &tracker.snapshot()));

    Ok(())
}
