//! UpDog CLI
//!
//! Command-line client for the UpDog uptime monitoring service.

use std::path::PathBuf;

use clap::Parser;
use tracing::Level;
use updog_client::{load_config, Command, Config};

#[derive(Parser)]
#[command(name = "updog")]
#[command(about = "Client for the UpDog uptime monitoring service")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Service base URL (overrides config file)
    #[arg(long)]
    base_url: Option<String>,

    /// Log level
    #[arg(short, long, default_value = "warn")]
    log_level: Level,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(
        "Parsed command line arguments: config={:?}, base_url={:?}, log_level={:?}",
        args.config,
        args.base_url,
        args.log_level
    );

    let mut config = if let Some(config_path) = &args.config {
        tracing::debug!("Loading configuration from {:?}", config_path);
        match load_config(config_path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(2);
            }
        }
    } else {
        tracing::debug!("Using default configuration");
        Config::default()
    };

    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }

    if let Err(e) = config.validate() {
        eprintln!("{}", e);
        std::process::exit(2);
    }

    tracing::info!("Using UpDog service at {}", config.base_url);

    if let Err(e) = updog_client::run(config, args.command).await {
        tracing::debug!("Command failed: {:?}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
