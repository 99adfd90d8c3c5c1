//! Configuration loading and management.

use std::path::{Path, PathBuf};

use anyhow::{Result, ensure};
use chrono::Duration;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use ts_core::duration::DEFAULT_DURATION_FORMAT;
use ts_core::report::DEFAULT_INDENT;
use ts_core::{
    DEFAULT_TIME_FORMATS, Delimiter, DurationFormat, LineParser, ReportFormatter, Rounding,
    TimeParser,
};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Field separator within a line.
    pub delimiter: char,

    /// Treat whitespace around the delimiter as part of it.
    pub whitespace_tolerant: bool,

    /// Accepted time formats, tried in order.
    pub time_formats: Vec<String>,

    /// Indentation per nesting level in the report.
    pub indent: String,

    /// Duration template, see `ts_core::DurationFormat`.
    pub duration_format: String,

    /// Newline-delimited file of top-level tasks to leave out.
    pub blacklist_file: PathBuf,

    /// Additional blacklisted task names.
    pub blacklist: Vec<String>,

    /// Rounding granularity for `--round`.
    pub round_interval_minutes: i64,

    /// Smallest rounded duration for `--round`.
    pub round_minimum_minutes: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            delimiter: '\t',
            whitespace_tolerant: true,
            time_formats: DEFAULT_TIME_FORMATS.iter().map(|f| (*f).to_string()).collect(),
            indent: DEFAULT_INDENT.to_string(),
            duration_format: DEFAULT_DURATION_FORMAT.to_string(),
            blacklist_file: PathBuf::from("blacklist"),
            blacklist: Vec::new(),
            round_interval_minutes: 15,
            round_minimum_minutes: 15,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (TIMESHEET_*)
        figment = figment.merge(Env::prefixed("TIMESHEET_"));

        figment.extract()
    }

    /// Rejects settings the parser cannot work with.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            !self.time_formats.is_empty(),
            "time_formats must list at least one format"
        );
        ensure!(
            self.round_interval_minutes > 0,
            "round_interval_minutes must be positive, got {}",
            self.round_interval_minutes
        );
        ensure!(
            self.round_minimum_minutes >= 0,
            "round_minimum_minutes cannot be negative, got {}",
            self.round_minimum_minutes
        );
        Ok(())
    }

    pub fn line_parser(&self) -> LineParser {
        let delimiter = if self.whitespace_tolerant {
            Delimiter::whitespace_tolerant(self.delimiter)
        } else {
            Delimiter::strict(self.delimiter)
        };
        LineParser::new(TimeParser::new(self.time_formats.iter().cloned()), delimiter)
    }

    pub fn report_formatter(&self) -> ReportFormatter {
        ReportFormatter::new(
            self.indent.clone(),
            DurationFormat::new(self.duration_format.clone()),
        )
    }

    pub fn rounding(&self) -> Rounding {
        Rounding {
            interval: Duration::minutes(self.round_interval_minutes),
            minimum: Duration::minutes(self.round_minimum_minutes),
        }
    }
}

/// Returns the platform-specific config directory for timesheet.
///
/// On Linux: `~/.config/timesheet`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("timesheet"))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_dirs_config_path_ends_with_timesheet() {
        let path = dirs_config_path().unwrap();
        assert_eq!(path.file_name().unwrap(), "timesheet");
    }

    #[test]
    fn test_default_config_matches_core_defaults() {
        let config = Config::default();
        assert_eq!(config.delimiter, '\t');
        assert_eq!(config.time_formats, ["%I:%M %p", "%H:%M", "%H.%M"]);
        assert_eq!(config.report_formatter(), ReportFormatter::default());
        assert_eq!(config.rounding(), Rounding::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
delimiter = ","
whitespace_tolerant = false
time_formats = ["%H%M"]
indent = "  "
blacklist = ["Lunch", "Break"]
round_interval_minutes = 30
"#
        )
        .unwrap();
        file.flush().unwrap();

        let config = Config::load_from(Some(file.path())).unwrap();
        assert_eq!(config.delimiter, ',');
        assert!(!config.whitespace_tolerant);
        assert_eq!(config.time_formats, ["%H%M"]);
        assert_eq!(config.indent, "  ");
        assert_eq!(config.blacklist, ["Lunch", "Break"]);
        assert_eq!(config.round_interval_minutes, 30);
        assert_eq!(config.round_minimum_minutes, 15);

        let parsed = config.line_parser().parse("0900,0930,Work", None).unwrap();
        assert_eq!(parsed.duration(), Duration::minutes(30));
    }

    #[test]
    fn test_validate_rejects_empty_formats_and_bad_rounding() {
        let config = Config {
            time_formats: Vec::new(),
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            round_interval_minutes: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            round_minimum_minutes: -5,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
