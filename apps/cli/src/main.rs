use anyhow::Result;
use clap::Parser;
use dotenv::dotenv;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod context;

use cli::Cli;
use context::ClinicContext;
use shared_config::AppConfig;

fn main() -> Result<()> {
    // Loading Env Vars
    dotenv().ok();

    // Logs go to stderr so command output stays parseable
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = AppConfig::from_env();
    info!("Starting clinic CLI (availability: {:?})", config.availability_mode);

    let ctx = ClinicContext::open(config)?;

    if let Err(e) = commands::run(cli.command, &ctx) {
        error!("Command failed: {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
    Ok(())
}
