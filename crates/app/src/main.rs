//! Tokri Admin CLI

use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tokri_app::config::LogFormat;

mod cli;

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    let cli = cli::Cli::parse();

    init_logging(&cli);

    if let Err(error) = cli.run().await {
        eprintln!("{error}");
        process::exit(1);
    }
}

fn init_logging(cli: &cli::Cli) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cli.config.logging.log_level));

    match cli.config.logging.log_format {
        LogFormat::Compact => tracing_subscriber::fmt().with_env_filter(filter).init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
    }
}
