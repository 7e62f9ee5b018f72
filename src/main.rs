use anyhow::Result;
use clap::Parser;
use resume_scout::cli::{handle_command, Cli};
use resume_scout::core::{logging, ConfigManager};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config first: it names the log file
    let config = ConfigManager::load(cli.config.as_deref())?;
    logging::init(&config.logging, cli.verbose)?;

    info!("Starting resume-scout {}", env!("CARGO_PKG_VERSION"));
    handle_command(cli, config).await
}
