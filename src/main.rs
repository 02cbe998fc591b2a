//! carprep - Main Entry Point

use clap::Parser;
use carprep::cli::{cmd_info, cmd_preprocess, cmd_split, Cli, Commands};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "carprep=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Preprocess(args) => cmd_preprocess(&args)?,
        Commands::Split(args) => cmd_split(&args)?,
        Commands::Info { data, config } => cmd_info(&data, config.as_deref())?,
    }

    Ok(())
}
