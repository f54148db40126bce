use std::path::Path;

use clap::Parser;
use ticket_desk::cli::commands::Cli;
use ticket_desk::cli::handlers;
use ticket_desk::io::config_io::{API_URL_ENV, apply_overrides, load_config};
use ticket_desk::io::logging::{LogSink, init_tracing};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run(Cli::parse()).await {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config(cli.config.as_deref().map(Path::new))?;
    apply_overrides(
        &mut config,
        std::env::var(API_URL_ENV).ok(),
        cli.api_url.as_deref(),
    );

    match cli.command {
        None => {
            // No subcommand → launch the dashboard, which owns the terminal
            init_tracing(&config.log, LogSink::FileOnly)?;
            ticket_desk::tui::run(config).await
        }
        Some(command) => {
            init_tracing(&config.log, LogSink::Stderr)?;
            handlers::dispatch(command, &config, cli.json).await
        }
    }
}
