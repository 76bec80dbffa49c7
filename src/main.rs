use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use glean::app::AppContext;
use glean::cli::{commands, Cli, Commands};
use glean::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    let ctx = AppContext::new(config).await?;

    match cli.command {
        Commands::Serve { host, port } => {
            commands::serve(ctx, host, port).await?;
        }
        Commands::Scrape { query } => {
            commands::scrape(&ctx, &query).await?;
        }
        Commands::ScrapeMultiple { query, num_results } => {
            commands::scrape_multiple(&ctx, &query, num_results).await?;
        }
        Commands::Analyze { query, out } => {
            commands::analyze(&ctx, &query, &out).await?;
        }
    }

    Ok(())
}
