//! Command-line argument definitions.

use std::path::PathBuf;

use clap::Parser;

/// Hierarchical timesheet reports.
///
/// Reads lines of `start<TAB>end<TAB>task<TAB>subtask...` (the start time may
/// be omitted to continue from the previous line) and prints the time spent
/// per task, with sub-task totals rolled up into their parents.
#[derive(Debug, Parser)]
#[command(name = "timesheet", version, about, long_about = None)]
pub struct Cli {
    /// Timesheet file to read, or `-` for stdin.
    pub file: PathBuf,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Blacklist file, overriding the configured one.
    #[arg(short, long)]
    pub blacklist: Option<PathBuf>,

    /// Round each task's own time to the configured interval.
    #[arg(short, long)]
    pub round: bool,
}
