//! PromptVault policy tool.
//!
//! Loads the authorization configuration, builds the rule table with the
//! same fail-fast validation the service performs at startup, and lets an
//! operator inspect the table or evaluate single requests.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use promptvault_core::config::{AppConfig, LoggingConfig};
use promptvault_core::error::AppError;

mod commands;
mod output;

use commands::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_configuration(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            output::print_error(&format!("Failed to load configuration: {e}"));
            std::process::exit(1);
        }
    };

    init_logging(&config.logging);

    if let Err(e) = cli.execute(&config).await {
        output::print_error(&e.to_string());
        std::process::exit(1);
    }
}

/// Load configuration from the base file, the `PROMPTVAULT_ENV` overlay,
/// and `PROMPTVAULT__*` environment variables.
fn load_configuration(base: &str) -> Result<AppConfig, AppError> {
    let env = std::env::var("PROMPTVAULT_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load_from(base, &env)
}

/// Initialize tracing. Output goes to stderr so command output stays parseable.
fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
