use clap::Parser;
use std::process;
use taskdeck::cli::{Action, Cli, Commands};
use taskdeck::cli_handlers;
use taskdeck::config::Config;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // stdout carries the MCP stream, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::new(&cli.state_dir);

    let result = match cli.command {
        Commands::Pm { action } => match action {
            Action::Serve => cli_handlers::handle_pm_serve(&config).await,
            Action::Tools => cli_handlers::handle_pm_tools(),
            Action::Call { operation, args } => {
                cli_handlers::handle_pm_call(&config, &operation, &args)
            }
        },
        Commands::Gantt { action } => match action {
            Action::Serve => cli_handlers::handle_gantt_serve(&config).await,
            Action::Tools => cli_handlers::handle_gantt_tools(),
            Action::Call { operation, args } => {
                cli_handlers::handle_gantt_call(&config, &operation, &args)
            }
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
