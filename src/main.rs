use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use refscope::cli::{Cli, Commands};
use refscope::config::Config;
use refscope::logging::init_logging;
use refscope::metrics;

#[tokio::main]
async fn main() -> Result<()> {
    let root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let config = Config::load(&root).unwrap_or_default();

    // The guard MUST be held until program exit to ensure logs are flushed
    let _logging_guard = init_logging(&config.logging, &root)?;

    tracing::debug!("refscope starting up");

    metrics::register_metrics();

    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve {
            symbol,
            mirror,
            commit,
            lang,
            json,
        } => {
            refscope::commands::resolve::run(&symbol, mirror, commit, &lang, json, &config)
                .await?;
        }
        Commands::Languages => {
            refscope::commands::languages::run().await?;
        }
        Commands::Stats => {
            refscope::commands::stats::run().await?;
        }
    }

    Ok(())
}
