//! Seatrack CLI - Track a shipping booking through a browser agent.

use clap::Parser;
use seatrack_cli::commands;
use seatrack_cli::config::OutputFormat;
use seatrack_cli::{Cli, Config, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let color_enabled = !cli.no_color;
    if let Err(e) = run(cli).await {
        let formatter = Formatter::new(OutputFormat::Json, color_enabled);
        eprintln!("{}", formatter.error(&e.to_string()));
        if let Some(hint) = e.guidance() {
            eprintln!("{}", formatter.info(hint));
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> seatrack_cli::Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    commands::execute_track(cli, &config, &formatter).await
}

/// Log to stderr so stdout carries only the record
fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}
