//! Parsing a single timesheet line into a task chain.
//!
//! A line holds either `start <sep> end <sep> task <sep> subtask...` or,
//! when the start time is omitted, `end <sep> task <sep> subtask...` with
//! the start taken from the previous line's end.

use chrono::{Duration, NaiveTime};
use regex::Regex;
use thiserror::Error;

use crate::task::TaskNode;
use crate::time::TimeParser;

/// Errors for one line. Line numbers are added by the document parser.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LineError {
    /// Not enough fields for a time and at least one task name.
    #[error("insufficient items in task line: {line:?}")]
    InsufficientFields { line: String },

    /// A mandatory time field is unparseable or no start time is available.
    #[error("invalid time {field:?} in task line")]
    InvalidTime { field: String },

    /// The end time lies before the start time.
    #[error("end time {end} is before start time {start}")]
    EndBeforeStart { start: NaiveTime, end: NaiveTime },
}

/// How fields are separated within a line.
#[derive(Debug, Clone)]
pub struct Delimiter {
    separator: char,
    tolerant: Option<Regex>,
}

impl Default for Delimiter {
    fn default() -> Self {
        Self::whitespace_tolerant('\t')
    }
}

impl Delimiter {
    /// Splits on every occurrence of `separator` exactly.
    pub const fn strict(separator: char) -> Self {
        Self {
            separator,
            tolerant: None,
        }
    }

    /// Splits on any whitespace run containing at least one `separator`.
    pub fn whitespace_tolerant(separator: char) -> Self {
        let escaped = regex::escape(separator.encode_utf8(&mut [0; 4]));
        let pattern = format!(r"\s*{escaped}\s*");
        Self {
            separator,
            tolerant: Some(Regex::new(&pattern).unwrap()),
        }
    }

    pub const fn separator(&self) -> char {
        self.separator
    }

    pub const fn is_whitespace_tolerant(&self) -> bool {
        self.tolerant.is_some()
    }

    /// Splits `line` into trimmed, non-empty fields.
    pub fn split<'a>(&self, line: &'a str) -> Vec<&'a str> {
        let parts: Box<dyn Iterator<Item = &'a str>> = match &self.tolerant {
            Some(re) => Box::new(re.split(line)),
            None => Box::new(line.split(self.separator)),
        };
        parts.map(str::trim).filter(|part| !part.is_empty()).collect()
    }
}

/// The result of parsing one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    /// Single-branch chain; only its deepest node carries time.
    pub chain: TaskNode,
    pub start: NaiveTime,
    /// Becomes the next line's implicit start time.
    pub end: NaiveTime,
}

impl ParsedLine {
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// Turns lines into task chains.
#[derive(Debug, Clone, Default)]
pub struct LineParser {
    times: TimeParser,
    delimiter: Delimiter,
}

impl LineParser {
    pub const fn new(times: TimeParser, delimiter: Delimiter) -> Self {
        Self { times, delimiter }
    }

    pub const fn time_parser(&self) -> &TimeParser {
        &self.times
    }

    pub const fn delimiter(&self) -> &Delimiter {
        &self.delimiter
    }

    /// Parses `line`, using `previous_end` as the start time when the line
    /// omits one. An explicit start time always takes precedence.
    pub fn parse(
        &self,
        line: &str,
        previous_end: Option<NaiveTime>,
    ) -> Result<ParsedLine, LineError> {
        let insufficient = || LineError::InsufficientFields {
            line: line.to_string(),
        };

        let parts = self.delimiter.split(line);
        let [first, second, ..] = parts.as_slice() else {
            return Err(insufficient());
        };

        let first_time = self
            .times
            .parse(first)
            .map_err(|_| LineError::InvalidTime {
                field: (*first).to_string(),
            })?;

        let (start, end, names) = match self.times.parse(second) {
            Ok(second_time) => (first_time, second_time, &parts[2..]),
            Err(_) => {
                let start = previous_end.ok_or_else(|| LineError::InvalidTime {
                    field: (*second).to_string(),
                })?;
                (start, first_time, &parts[1..])
            }
        };

        if end < start {
            return Err(LineError::EndBeforeStart { start, end });
        }

        let chain =
            TaskNode::from_chain(names.iter().copied(), end - start).ok_or_else(insufficient)?;

        tracing::trace!(%start, %end, task = chain.name(), "parsed line");

        Ok(ParsedLine { chain, start, end })
    }
}
