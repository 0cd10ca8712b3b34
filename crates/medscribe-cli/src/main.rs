//! Medscribe CLI - Extract structured medical entities from document text.

use anyhow::Context;
use clap::Parser;
use medscribe_cli::commands;
use medscribe_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Log to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;

    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Extract(args) => commands::execute_extract(args, &config, &formatter)?,
        Command::Patterns(args) => commands::execute_patterns(args, &config, &formatter)?,
        Command::Demo(args) => commands::execute_demo(args, &config, &formatter).await?,
    }

    Ok(())
}
