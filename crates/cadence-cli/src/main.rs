//! `cadence` CLI: compute occurrences of a monthly schedule from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Next 6 occurrences after a reference point (definition on stdin)
//! cat backup.json | cadence series --from 2020-05-04T01:00:00 -n 6
//!
//! # Same, from a file, as JSON
//! cadence series -i backup.json --from 2020-05-04T01:00:00 --json
//!
//! # Check a definition, optionally against a reference point
//! cadence validate -i backup.json --at 2020-05-04T01:00:00
//! ```
//!
//! Schedule errors are results, not failures: `series` prints them in place of
//! occurrences and exits 0. `validate` exits 1 when the definition is rejected.

use std::io::{self, Read};
use std::process;

use anyhow::{Context, Result};
use cadence_engine::{Outcome, Schedule, ScheduleError};
use chrono::{NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "cadence",
    version,
    about = "Compute occurrences of monthly recurring schedules"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level used when RUST_LOG is not set (logs go to stderr)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the next occurrences of a schedule, one per line
    Series {
        /// Schedule definition file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Reference timestamp, e.g. 2020-05-04T01:00:00
        #[arg(long, value_parser = parse_timestamp)]
        from: NaiveDateTime,
        /// Number of outcomes to print
        #[arg(short = 'n', long, default_value_t = 10)]
        count: usize,
        /// Print a JSON array instead of plain lines
        #[arg(long)]
        json: bool,
    },
    /// Check a schedule definition
    Validate {
        /// Schedule definition file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Also check this reference timestamp against the end date
        #[arg(long, value_parser = parse_timestamp)]
        at: Option<NaiveDateTime>,
    },
}

/// One outcome as it appears in `--json` output: `{"ok": ts}` or `{"err": msg}`.
#[derive(Serialize)]
#[serde(rename_all = "lowercase")]
enum OutcomeDto {
    Ok(NaiveDateTime),
    Err(ScheduleError),
}

impl From<Outcome> for OutcomeDto {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Ok(occurrence) => OutcomeDto::Ok(occurrence),
            Err(err) => OutcomeDto::Err(err),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        Commands::Series {
            input,
            from,
            count,
            json,
        } => {
            let schedule = read_schedule(input.as_deref())?;
            tracing::info!(schedule = %schedule.name(), %from, count, "generating series");
            let outcomes = cadence_engine::series(&schedule, from, count);

            if json {
                let dtos: Vec<OutcomeDto> = outcomes.into_iter().map(OutcomeDto::from).collect();
                let rendered = serde_json::to_string_pretty(&dtos)?;
                println!("{}", rendered);
            } else {
                for outcome in outcomes {
                    println!("{}", render_outcome(&outcome));
                }
            }
        }
        Commands::Validate { input, at } => {
            let schedule = read_schedule(input.as_deref())?;
            let verdict = match at {
                Some(reference) => cadence_engine::validate(&schedule, reference),
                None => cadence_engine::validate_definition(&schedule),
            };
            match verdict {
                None => println!("valid"),
                Some(err) => {
                    println!("{}", err);
                    process::exit(1);
                }
            }
        }
    }

    Ok(())
}

/// Initialize tracing/logging on stderr.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// Accepts `YYYY-MM-DDTHH:MM:SS`, `YYYY-MM-DDTHH:MM` or a bare date (midnight).
fn parse_timestamp(raw: &str) -> std::result::Result<NaiveDateTime, String> {
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(timestamp);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|date| date.and_time(chrono::NaiveTime::MIN))
        .map_err(|e| format!("invalid timestamp '{}': {}", raw, e))
}

fn render_outcome(outcome: &Outcome) -> String {
    match outcome {
        Ok(occurrence) => occurrence.format("%Y-%m-%dT%H:%M:%S").to_string(),
        Err(err) => err.to_string(),
    }
}

fn read_schedule(path: Option<&str>) -> Result<Schedule> {
    let json = read_input(path)?;
    serde_json::from_str(&json).context("Failed to parse schedule definition")
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}
