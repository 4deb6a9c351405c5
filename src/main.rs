mod args;
mod config;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use calgen_core::ics::generate_ics;
use calgen_core::{Anchor, SystemClock, UuidGenerator};
use chrono::NaiveDate;
use clap::{ArgAction, ArgGroup, Parser};
use tracing_subscriber::EnvFilter;

use crate::config::Settings;

#[derive(Parser, Debug)]
#[command(name = "calgen", version)]
#[command(about = "Generate an iCalendar file from a list of day offsets")]
#[command(group(ArgGroup::new("date").required(true).args(["start", "event"])))]
struct Cli {
    /// Start date in format "YYYY-MM-DD" (offset 0)
    #[arg(short, long, value_parser = args::parse_date)]
    start: Option<NaiveDate>,

    /// Event date in format "YYYY-MM-DD" (the entry with the highest offset)
    #[arg(short, long, value_parser = args::parse_date)]
    event: Option<NaiveDate>,

    /// Path to input file
    #[arg(short, long, value_parser = args::existing_file)]
    input: PathBuf,

    /// Path to output file
    #[arg(short, long, value_parser = args::writable_file)]
    output: PathBuf,

    /// Config file (defaults to ~/.config/calgen/config.toml)
    #[arg(short, long, value_parser = args::existing_file)]
    config: Option<PathBuf>,

    /// Product identifier written to the calendar
    #[arg(long)]
    prodid: Option<String>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn anchor(&self) -> Result<Anchor> {
        match (self.start, self.event) {
            (Some(start), None) => Ok(Anchor::Start(start)),
            (None, Some(event)) => Ok(Anchor::Event(event)),
            _ => anyhow::bail!("Exactly one of --start or --event is required"),
        }
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return ExitCode::from(parse_error_status(&err));
        }
    };

    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Exit status for a clap error: 1 for bad arguments instead of clap's 2,
/// 0 for `--help` and `--version`, which clap reports as errors too.
fn parse_error_status(err: &clap::Error) -> u8 {
    if err.use_stderr() { 1 } else { 0 }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let anchor = cli.anchor()?;
    let options = Settings::load(cli.config.as_deref())?.into_options(cli.prodid.clone())?;

    let input = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("Could not read input file {}", cli.input.display()))?;

    let document =
        calgen_core::generate(&input, anchor, &options, &SystemClock, &mut UuidGenerator)?;

    output::write_atomic(&cli.output, generate_ics(&document).as_bytes())?;

    tracing::info!(
        events = document.len(),
        path = %cli.output.display(),
        "wrote calendar"
    );

    Ok(())
}
