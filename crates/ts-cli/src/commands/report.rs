//! Report command: parse a timesheet and render the task tree.

use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use ts_core::{Blacklist, DocumentParser};

use crate::Config;

/// Options for one report run.
#[derive(Debug, Clone, Default)]
pub struct ReportOptions<'a> {
    /// Blacklist file overriding `Config::blacklist_file`.
    pub blacklist_file: Option<&'a Path>,
    /// Snap own durations with `Config::rounding`.
    pub round: bool,
}

/// Builds the blacklist from the configured file and inline names.
///
/// A missing file is not an error: it simply contributes no names.
pub fn load_blacklist(config: &Config, file: Option<&Path>) -> Result<Blacklist> {
    let path = file.unwrap_or(config.blacklist_file.as_path());
    let mut blacklist = match std::fs::read_to_string(path) {
        Ok(text) => Blacklist::from_lines(&text),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = ?path, "no blacklist file");
            Blacklist::new()
        }
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read blacklist {}", path.display()));
        }
    };
    blacklist.extend(&config.blacklist);

    tracing::debug!(entries = blacklist.len(), "loaded blacklist");
    Ok(blacklist)
}

/// Reads the timesheet at `path`, or stdin when `path` is `-`.
pub fn read_timesheet(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("failed to read timesheet from stdin")?;
        return Ok(text);
    }

    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Renders the report for `text` with the given configuration.
pub fn render(text: &str, config: &Config, blacklist: Blacklist, round: bool) -> Result<String> {
    let parser = DocumentParser::new(config.line_parser(), blacklist);
    let mut root = parser.parse(text)?;
    if round {
        root = root.rounded(&config.rounding());
    }
    Ok(config.report_formatter().format(&root))
}

/// Runs the report command, writing the report to `writer`.
pub fn run<W: Write>(
    writer: &mut W,
    config: &Config,
    path: &Path,
    options: &ReportOptions<'_>,
) -> Result<()> {
    config.validate().context("invalid configuration")?;

    let blacklist = load_blacklist(config, options.blacklist_file)?;
    let text = read_timesheet(path)?;
    let report = render(&text, config, blacklist, options.round)
        .with_context(|| format!("failed to parse {}", path.display()))?;

    writeln!(writer, "{report}")?;
    Ok(())
}
