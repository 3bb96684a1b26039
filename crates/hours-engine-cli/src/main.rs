mod config;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use hours_engine::{Clock, FixedClock, SystemClock};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::config::Config;

#[derive(Parser)]
#[command(
    name = "hours",
    version,
    about = "Check and validate restaurant opening hours"
)]
struct Cli {
    /// Schedule file (.toml or .json)
    #[arg(short, long, global = true, env = "HOURS_CONFIG", default_value = "hours.toml")]
    config: PathBuf,

    /// IANA timezone overriding the one in the config file
    #[arg(long, global = true, env = "HOURS_TIMEZONE")]
    timezone: Option<String>,

    /// Log evaluation details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the customer-facing status message
    Status {
        #[command(flatten)]
        at: AtArgs,

        /// Print the full evaluation result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print "open" or "closed"; exits 1 when closed
    IsOpen {
        #[command(flatten)]
        at: AtArgs,
    },
    /// Print when the restaurant next opens
    Next {
        #[command(flatten)]
        at: AtArgs,
    },
    /// Check the schedule and report problems
    Validate {
        /// Exit non-zero when any warning is reported
        #[arg(long)]
        strict: bool,
    },
    /// Print the parsed schedule in normalized JSON form
    Show,
}

#[derive(Args)]
struct AtArgs {
    /// Evaluate at this RFC 3339 instant instead of now
    #[arg(long, value_name = "RFC3339")]
    at: Option<String>,
}

impl AtArgs {
    fn clock(&self) -> Result<Box<dyn Clock>> {
        match &self.at {
            Some(at) => {
                let clock = FixedClock::parse(at).context("Invalid --at value")?;
                Ok(Box::new(clock))
            }
            None => Ok(Box::new(SystemClock)),
        }
    }
}

/// Initialize logging to stderr; `RUST_LOG` takes precedence over `--verbose`.
fn init_logging(verbose: bool) -> Result<()> {
    let default_filter = if verbose { "debug" } else { "warn" };
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set up logging: {e}"))
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let config = Config::load(&cli.config)?;
    let evaluator = config.evaluator(cli.timezone.as_deref())?;
    let hours = &config.opening_hours;
    debug!(timezone = %evaluator.timezone(), "evaluator ready");

    match cli.command {
        Command::Status { at, json } => {
            let clock = at.clock()?;
            let result = evaluator.status_from_clock(hours, clock.as_ref());
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{}", result.status_message);
            }
        }
        Command::IsOpen { at } => {
            let now = at.clock()?.now();
            let open = evaluator.is_open_now(hours, now);
            info!(local = %evaluator.local_time(now), open, "checked availability");
            println!("{}", if open { "open" } else { "closed" });
            if !open {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Next { at } => {
            let now = at.clock()?.now();
            println!("{}", evaluator.next_opening_description(hours, now));
        }
        Command::Validate { strict } => {
            let warnings = hours.lint();
            for warning in &warnings {
                println!("warning: {warning}");
            }
            if warnings.is_empty() {
                println!("Schedule OK ({})", evaluator.timezone());
            } else if strict {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Show => {
            println!("{}", hours.to_json_pretty());
        }
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_at_args_parse_instant() {
        let at = AtArgs {
            at: Some("2026-02-18T12:00:00Z".to_string()),
        };
        assert_eq!(at.clock().unwrap().now().to_rfc3339(), "2026-02-18T12:00:00+00:00");
    }

    #[test]
    fn test_at_args_reject_bad_instant() {
        let at = AtArgs {
            at: Some("yesterday".to_string()),
        };
        assert!(at.clock().is_err());
    }
}
