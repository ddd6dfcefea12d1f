//! Session token tooling: sign, verify, inspect.

use chrono::{DateTime, Utc};
use clap::{ArgGroup, Args, Subcommand};
use serde::Serialize;

use admingate_auth::policy::now_millis;
use admingate_auth::token::{split_token, sync};
use admingate_auth::{SessionPayload, SessionPolicy, SessionSecret};
use admingate_core::config::MIN_SECRET_LENGTH;
use admingate_core::error::AppError;

use super::Cli;
use crate::output::{self, OutputFormat};

/// Arguments for token commands
#[derive(Debug, Args)]
pub struct TokenArgs {
    /// Token subcommand
    #[command(subcommand)]
    pub command: TokenCommand,
}

/// Token subcommands
#[derive(Debug, Subcommand)]
pub enum TokenCommand {
    /// Sign a payload with the configured secret
    #[command(group(ArgGroup::new("what").required(true).args(["payload", "admin"])))]
    Sign {
        /// Raw payload to sign
        #[arg(long)]
        payload: Option<String>,
        /// Sign an admin session payload
        #[arg(long)]
        admin: bool,
        /// Issue time in epoch milliseconds for `--admin` (default: now)
        #[arg(long, requires = "admin")]
        issued_at: Option<i64>,
    },
    /// Verify a token's signature and session policy
    Verify {
        /// Token to check
        token: String,
    },
    /// Decode a token without checking its signature
    Inspect {
        /// Token to decode
        token: String,
    },
}

#[derive(Debug, Serialize)]
struct SignedToken {
    token: String,
}

#[derive(Debug, Serialize)]
struct VerifyReport {
    valid: bool,
    payload: Option<String>,
    authorized: bool,
    reason: Option<String>,
    expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
struct InspectReport {
    payload: String,
    signature: String,
    signature_well_formed: bool,
    role: Option<String>,
    issued_at: Option<DateTime<Utc>>,
    expires_at: Option<DateTime<Utc>>,
    age_seconds: Option<i64>,
}

fn load_secret(cli: &Cli) -> Result<SessionSecret, AppError> {
    let config = cli.load_config()?;
    let secret = SessionSecret::from_config(&config.auth)?;
    if secret.expose().len() < MIN_SECRET_LENGTH {
        output::print_warning(&format!(
            "session secret is shorter than {MIN_SECRET_LENGTH} bytes; the server will refuse it"
        ));
    }
    Ok(secret)
}

fn to_datetime(ms: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(ms)
}

fn verify_report(token: &str, secret: &SessionSecret, now_ms: i64) -> VerifyReport {
    let Some(payload) = sync::verify(token, secret).into_payload() else {
        return VerifyReport {
            valid: false,
            payload: None,
            authorized: false,
            reason: Some("invalid_signature".to_string()),
            expires_at: None,
        };
    };

    match SessionPolicy::default().check_raw(&payload, now_ms) {
        Ok(session) => VerifyReport {
            valid: true,
            payload: Some(payload),
            authorized: true,
            reason: None,
            expires_at: to_datetime(session.expires_at_ms),
        },
        Err(denial) => VerifyReport {
            valid: true,
            payload: Some(payload),
            authorized: false,
            reason: Some(denial.to_string()),
            expires_at: None,
        },
    }
}

fn inspect_report(token: &str, now_ms: i64) -> Result<InspectReport, AppError> {
    let (payload, signature) = split_token(token)
        .ok_or_else(|| AppError::validation("not a token: expected <payload>.<signature>"))?;

    let parsed = SessionPayload::parse(payload);
    let max_age = SessionPolicy::default().max_age_ms();

    Ok(InspectReport {
        payload: payload.to_string(),
        signature: signature.to_string(),
        signature_well_formed: signature.len() == 64
            && signature
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b)),
        role: parsed.as_ref().map(|p| p.role.clone()),
        issued_at: parsed.as_ref().and_then(|p| to_datetime(p.issued_at_ms)),
        expires_at: parsed
            .as_ref()
            .and_then(|p| to_datetime(p.issued_at_ms.saturating_add(max_age))),
        age_seconds: parsed
            .as_ref()
            .and_then(|p| now_ms.checked_sub(p.issued_at_ms))
            .map(|ms| ms / 1000),
    })
}

/// Execute token commands
pub fn execute(args: &TokenArgs, cli: &Cli, format: OutputFormat) -> Result<(), AppError> {
    match &args.command {
        TokenCommand::Sign {
            payload,
            admin,
            issued_at,
        } => {
            let secret = load_secret(cli)?;
            let token = match payload {
                Some(payload) if !*admin => sync::sign(payload, &secret)?,
                _ => sync::issue_admin_token(&secret, issued_at.unwrap_or_else(now_millis))?,
            };
            match format {
                OutputFormat::Table => println!("{token}"),
                OutputFormat::Json => output::print_item(&SignedToken { token }, format),
            }
        }
        TokenCommand::Verify { token } => {
            let secret = load_secret(cli)?;
            let report = verify_report(token, &secret, now_millis());
            output::print_item(&report, format);
            if !report.authorized {
                return Err(AppError::authentication("token does not grant admin access"));
            }
        }
        TokenCommand::Inspect { token } => {
            let report = inspect_report(token, now_millis())?;
            output::print_item(&report, format);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use admingate_auth::MAX_SESSION_AGE_MS;

    const NOW: i64 = 1_700_000_000_000;

    fn secret() -> SessionSecret {
        SessionSecret::new("cli-test-secret-0123456789abcdef").unwrap()
    }

    #[test]
    fn test_verify_report_authorized() {
        let token = sync::issue_admin_token(&secret(), NOW - 1000).unwrap();
        let report = verify_report(&token, &secret(), NOW);
        assert!(report.valid);
        assert!(report.authorized);
        assert_eq!(
            report.expires_at.unwrap().timestamp_millis(),
            NOW - 1000 + MAX_SESSION_AGE_MS
        );
    }

    #[test]
    fn test_verify_report_expired() {
        let token = sync::issue_admin_token(&secret(), NOW - MAX_SESSION_AGE_MS - 1).unwrap();
        let report = verify_report(&token, &secret(), NOW);
        assert!(report.valid);
        assert!(!report.authorized);
        assert_eq!(report.reason.as_deref(), Some("expired"));
    }

    #[test]
    fn test_verify_report_bad_signature() {
        let report = verify_report("admin|1.deadbeef", &secret(), NOW);
        assert!(!report.valid);
        assert_eq!(report.reason.as_deref(), Some("invalid_signature"));
    }

    #[test]
    fn test_inspect_without_secret() {
        let token = sync::issue_admin_token(&secret(), NOW - 60_000).unwrap();
        let report = inspect_report(&token, NOW).unwrap();
        assert_eq!(report.role.as_deref(), Some("admin"));
        assert!(report.signature_well_formed);
        assert_eq!(report.age_seconds, Some(60));
    }

    #[test]
    fn test_inspect_malformed() {
        assert!(inspect_report("no-dot-here", NOW).is_err());
        let report = inspect_report("admin|soon.XYZ", NOW).unwrap();
        assert!(report.role.is_none());
        assert!(!report.signature_well_formed);
    }
}
