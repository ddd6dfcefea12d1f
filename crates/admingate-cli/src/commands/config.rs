//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use admingate_core::error::AppError;

use super::Cli;
use crate::output::{self, OutputFormat};

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration with secrets masked
    Show,
    /// Check that the server would accept the configuration
    Validate,
}

/// Execute config commands
pub fn execute(args: &ConfigArgs, cli: &Cli, format: OutputFormat) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let config = cli.load_config()?.redacted();
            match format {
                OutputFormat::Table => {
                    let value = serde_json::to_value(&config)?;
                    output::print_list(&output::flatten(&value), format);
                }
                OutputFormat::Json => output::print_item(&config, format),
            }
        }
        ConfigCommand::Validate => {
            let config = cli.load_config()?;
            match config.validate() {
                Ok(()) => {
                    output::print_success("Configuration is valid");
                    output::print_kv("Listen", &config.server.bind_address());
                    output::print_kv("Environment", &config.server.environment);
                    output::print_kv(
                        "Secure cookies",
                        &config.server.is_production().to_string(),
                    );
                    output::print_kv(
                        "Backend API",
                        config.proxy.backend_url.as_deref().unwrap_or("(not configured)"),
                    );
                }
                Err(e) => {
                    output::print_error(&format!("Configuration invalid: {}", e));
                    return Err(e);
                }
            }
        }
    }
    Ok(())
}
