//! Core parsing and aggregation for timesheets.
//!
//! This crate contains:
//! - Time parsing: ordered time-of-day formats, first match wins
//! - Line parsing: fields to a task chain, with start-time continuation
//! - The task tree: case-insensitive merge and bottom-up rollup
//! - Reporting: indented own/total durations

pub mod document;
pub mod duration;
pub mod line;
pub mod report;
pub mod task;
pub mod time;

pub use document::{Blacklist, DocumentParser, TaskParseError, strip_comments};
pub use duration::{DurationFormat, Rounding, format_duration};
pub use line::{Delimiter, LineError, LineParser, ParsedLine};
pub use report::ReportFormatter;
pub use task::TaskNode;
pub use time::{DEFAULT_TIME_FORMATS, TimeFormatError, TimeParser};
