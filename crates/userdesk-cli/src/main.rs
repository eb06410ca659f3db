//! Userdesk CLI - Main entry point

use clap::Parser;
use std::process;
use tracing::error;
use userdesk_cli::{ApiClient, Cli, CliError, ClientConfig};
use userdesk_common::logging::{init_logging, LogConfig, LogLevel};

#[tokio::main]
async fn main() {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Verbose mode shows the tap's debug lines; otherwise only warnings and errors
    let level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Warn
    };
    let log_config = LogConfig::builder()
        .level(level)
        .log_file_prefix("userdesk")
        .build();
    let log_config = match log_config.clone().merge_env() {
        Ok(merged) => merged,
        Err(e) => {
            eprintln!("Warning: {}", CliError::from(e));
            log_config
        }
    };

    // The CLI works without logging, so a failed init is only a warning
    let _guard = match init_logging(&log_config) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: {}; continuing without logging", CliError::from(e));
            None
        }
    };

    if let Err(e) = execute(&cli).await {
        error!(error = %e, "Command failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn execute(cli: &Cli) -> userdesk_cli::Result<()> {
    let mut config = ClientConfig::from_env()?;
    cli.apply_to(&mut config);

    let client = ApiClient::new(&config)?;
    userdesk_cli::commands::run(&client, &cli.command).await
}
