use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Deserialize;

/// Preview, validate and canonicalize recurring report schedules
#[derive(Parser, Debug)]
#[command(name = "cadence", author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Print the canonical form of a recurrence rule
    Canonicalize(CanonicalizeCommand),
    /// Check a schedule's zone, anchor, rule and end boundary
    Validate(ValidateCommand),
    /// List the future occurrences of a schedule
    Expand(ExpandCommand),
    /// Show the next run of a schedule
    Next(NextCommand),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Plain,
}

/// Where the schedule comes from: a JSON record or individual flags.
#[derive(Args, Debug, Clone)]
pub struct ScheduleArgs {
    /// Schedule record as JSON
    #[arg(long, conflicts_with_all = ["rule", "dtstart", "timezone", "rdate", "exdate"])]
    pub file: Option<PathBuf>,

    /// Recurrence rule, e.g. 'FREQ=DAILY;COUNT=5'
    #[arg(long, required_unless_present = "file")]
    pub rule: Option<String>,

    /// Anchor as local time, YYYY-MM-DDTHH:MM:SS
    #[arg(long, required_unless_present = "file")]
    pub dtstart: Option<String>,

    /// IANA timezone name, e.g. 'Europe/Berlin' (defaults to UTC)
    #[arg(long)]
    pub timezone: Option<String>,

    /// Extra occurrence as local time (repeatable)
    #[arg(long)]
    pub rdate: Vec<String>,

    /// Excluded occurrence as local time (repeatable)
    #[arg(long)]
    pub exdate: Vec<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct CanonicalizeCommand {
    /// The rule text, KEY=value pairs separated by ';'
    pub rule: String,
}

#[derive(Parser, Debug, Clone)]
pub struct ValidateCommand {
    #[command(flatten)]
    pub schedule: ScheduleArgs,
}

#[derive(Parser, Debug, Clone)]
pub struct ExpandCommand {
    #[command(flatten)]
    pub schedule: ScheduleArgs,

    /// Current time, YYYY-MM-DDTHH:MM:SSZ (defaults to the system clock)
    #[arg(long)]
    pub now: Option<String>,

    /// Maximum cursor evaluations
    #[arg(long)]
    pub max_candidates: Option<usize>,

    #[arg(long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Print expansion statistics after the occurrences
    #[arg(long)]
    pub summary: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct NextCommand {
    #[command(flatten)]
    pub schedule: ScheduleArgs,

    /// Current time, YYYY-MM-DDTHH:MM:SSZ (defaults to the system clock)
    #[arg(long)]
    pub now: Option<String>,

    /// Maximum cursor evaluations
    #[arg(long)]
    pub max_candidates: Option<usize>,

    #[arg(long, value_enum)]
    pub output: Option<OutputFormat>,
}
