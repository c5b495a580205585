use anyhow::Result;
use clap::Parser;
use crm_insights::{App, AppConfig};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod commands;
mod output;
pub mod ux_error;

use commands::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config = AppConfig::from_env()?;
    if let Commands::Knowledge(args) = &cli.command {
        return commands::knowledge::run(args, &config);
    }

    let app = App::from_config(config)?;

    match cli.command {
        Commands::Dashboard(args) => commands::dashboard::run(&app, args).await,
        Commands::Coach(args) => commands::coach::run(&app, args).await,
        Commands::Chat(args) => commands::chat::run(&app, args).await,
        Commands::Enrich(args) => commands::enrich::run(&app, args).await,
        Commands::Knowledge(_) => Ok(())
    }
}
