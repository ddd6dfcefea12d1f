//! Session secret generation.

use clap::{Args, Subcommand};
use rand::RngCore;
use serde::Serialize;

use admingate_core::config::MIN_SECRET_LENGTH;
use admingate_core::error::AppError;

use crate::output::{self, OutputFormat};

/// Arguments for secret commands
#[derive(Debug, Args)]
pub struct SecretArgs {
    /// Secret subcommand
    #[command(subcommand)]
    pub command: SecretCommand,
}

/// Secret subcommands
#[derive(Debug, Subcommand)]
pub enum SecretCommand {
    /// Generate a random session secret
    Generate {
        /// Number of random bytes (hex output is twice as long)
        #[arg(short, long, default_value_t = 32)]
        bytes: usize,
    },
}

#[derive(Debug, Serialize)]
struct GeneratedSecret {
    secret: String,
    env: String,
}

/// Hex-encoded random secret of `bytes` bytes.
pub fn generate(bytes: usize) -> Result<String, AppError> {
    // Hex doubles the length; the configured secret is the hex string.
    if bytes * 2 < MIN_SECRET_LENGTH {
        return Err(AppError::validation(format!(
            "at least {} bytes required",
            MIN_SECRET_LENGTH.div_ceil(2)
        )));
    }
    let mut buf = vec![0u8; bytes];
    rand::rng().fill_bytes(&mut buf);
    Ok(hex::encode(buf))
}

/// Execute secret commands
pub fn execute(args: &SecretArgs, format: OutputFormat) -> Result<(), AppError> {
    match &args.command {
        SecretCommand::Generate { bytes } => {
            let secret = generate(*bytes)?;
            match format {
                OutputFormat::Table => println!("{secret}"),
                OutputFormat::Json => output::print_item(
                    &GeneratedSecret {
                        env: "ADMINGATE__AUTH__SESSION_SECRET".to_string(),
                        secret,
                    },
                    format,
                ),
            }
        }
    }
    Ok(())
}
