use crate::{
    config::load_config,
    env::EnvManager,
    error::CliError,
    load::{InputOptions, load_rows, parse_delimiter},
};
use clap::Parser;
use commands::Commands;
use connectors::starrocks::StreamLoadClient;
use engine_core::metrics::MetricsRegistry;
use std::{fs::File, io::BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod env;
mod error;
mod load;

#[derive(Parser)]
#[command(name = "stratum-load", version = "0.0.1", about = "StarRocks stream load client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<(), CliError> {
    // Initialize logger
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Load {
            config,
            input,
            env_file,
            delimiter,
            no_header,
            task_index,
            total_tasks,
        } => {
            let env = load_env(env_file.as_deref())?;
            let config = load_config(&config, &env)?;
            let options = InputOptions {
                delimiter: parse_delimiter(&delimiter)?,
                has_header: !no_header,
            };

            let registry = MetricsRegistry::new();
            let mut client = StreamLoadClient::new(config)?;
            client.open(task_index, total_tasks, &registry)?;

            let file = BufReader::new(File::open(&input)?);
            let snapshot = load_rows(&mut client, file, &options)?;

            let json = serde_json::to_string_pretty(&snapshot).map_err(CliError::JsonSerialize)?;
            println!("{json}");
        }
        Commands::Check { config, env_file } => {
            let env = load_env(env_file.as_deref())?;
            let config = load_config(&config, &env)?;
            info!(table = %config.table, columns = config.columns.len(), "Configuration is valid");
            println!("{}", config.load_url());
        }
    }

    Ok(())
}

fn load_env(env_file: Option<&str>) -> Result<EnvManager, CliError> {
    let mut env = EnvManager::new();
    if let Some(path) = env_file {
        env.load_from_file(path)?;
    }
    Ok(env)
}
