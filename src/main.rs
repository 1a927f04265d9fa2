mod action;
mod app;
mod cli;
mod components;
mod config;
mod error;
mod github;
mod input;
mod logging;
mod util;

use cli::Cli;
use color_eyre::eyre::Result;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    // Parse CLI arguments
    let cli = Cli::parse_args();

    // Keep the guard alive so buffered log lines flush on exit
    let _guard = logging::init(&cli.log_level);

    let mut app = app::App::with_cli(&cli)?;
    app.run().await?;

    Ok(())
}
