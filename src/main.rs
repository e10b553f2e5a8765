use anyhow::Result;
use focusflow::commands::Cli;
use focusflow::libs::logging;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    logging::init();
    Cli::menu().await
}
