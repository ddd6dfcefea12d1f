//! CLI command definitions and dispatch.

pub mod config;
pub mod secret;
pub mod serve;
pub mod token;

use clap::{Parser, Subcommand};

use admingate_core::config::AppConfig;
use admingate_core::error::AppError;

use crate::output::OutputFormat;

/// AdminGate: signed admin session gate
#[derive(Debug, Parser)]
#[command(name = "admingate", version, about, long_about = None)]
pub struct Cli {
    /// Path to a configuration file. Without it, `config/default.toml` and
    /// `config/<env>.toml` are read when present.
    #[arg(short, long)]
    pub config: Option<String>,

    /// Deployment environment
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the AdminGate server
    Serve(serve::ServeArgs),
    /// Sign, verify, and inspect session tokens
    Token(token::TokenArgs),
    /// Session secret utilities
    Secret(secret::SecretArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Serve(args) => serve::execute(args, self.load_config()?).await,
            Commands::Token(args) => token::execute(args, self, self.format),
            Commands::Secret(args) => secret::execute(args, self.format),
            Commands::Config(args) => config::execute(args, self, self.format),
        }
    }

    /// Load configuration from the selected file or the default locations,
    /// with the `ADMINGATE__` environment overlay applied.
    pub fn load_config(&self) -> Result<AppConfig, AppError> {
        match &self.config {
            Some(path) => AppConfig::load_from(path, &self.env),
            None => AppConfig::load(&self.env),
        }
    }
}
