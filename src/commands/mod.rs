//! CLI command definitions and dispatch.

pub mod check;
pub mod rules;
pub mod validate;

use clap::{Parser, Subcommand};

use promptvault_core::config::AppConfig;
use promptvault_core::error::AppError;

use crate::output::OutputFormat;

/// PromptVault authorization policy tool
#[derive(Debug, Parser)]
#[command(name = "promptvault-policy", version, about, long_about = None)]
pub struct Cli {
    /// Base configuration file, without extension
    #[arg(short, long, default_value = "config/default")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the effective rule table
    Rules(rules::RulesArgs),
    /// Evaluate a single request and show the rule trace
    Check(check::CheckArgs),
    /// Build the rule table and report configuration errors
    Validate,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: &AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Rules(args) => rules::execute(args, config, self.format),
            Commands::Check(args) => check::execute(args, config, self.format).await,
            Commands::Validate => validate::execute(config, &self.config),
        }
    }
}
