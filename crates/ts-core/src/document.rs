//! Whole-document parsing: comments, continuation and the blacklist.

use std::borrow::Cow;
use std::collections::HashSet;
use std::sync::LazyLock;

use chrono::NaiveTime;
use regex::{Captures, Regex};
use thiserror::Error;

use crate::line::{LineError, LineParser};
use crate::task::TaskNode;

static BLOCK_COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").unwrap());

static LINE_COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"//[^\n]*").unwrap());

/// A line of the document failed to parse.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("error on line {line}: {source}")]
pub struct TaskParseError {
    /// 1-based line number in the raw document, blank lines included.
    pub line: usize,
    #[source]
    pub source: LineError,
}

/// Removes `/* ... */` block comments, then `//` line comments.
///
/// Line breaks inside block comments survive so that line numbers in the
/// stripped text still match the raw document.
pub fn strip_comments(text: &str) -> Cow<'_, str> {
    let without_blocks = BLOCK_COMMENT_RE.replace_all(text, |caps: &Captures<'_>| {
        "\n".repeat(caps[0].matches('\n').count())
    });

    if !LINE_COMMENT_RE.is_match(&without_blocks) {
        return without_blocks;
    }
    Cow::Owned(
        LINE_COMMENT_RE
            .replace_all(&without_blocks, "")
            .into_owned(),
    )
}

/// Top-level task names excluded from aggregation, matched ignoring case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blacklist {
    names: HashSet<String>,
}

impl Blacklist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses newline-delimited names, skipping blank entries.
    pub fn from_lines(text: &str) -> Self {
        text.lines().collect()
    }

    /// Adds a name. Blank names are ignored.
    pub fn insert(&mut self, name: &str) {
        let name = name.trim();
        if !name.is_empty() {
            self.names.insert(name.to_lowercase());
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(&name.trim().to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for Blacklist {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut blacklist = Self::new();
        blacklist.extend(iter);
        blacklist
    }
}

impl<S: AsRef<str>> Extend<S> for Blacklist {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for name in iter {
            self.insert(name.as_ref());
        }
    }
}

/// Parses a whole timesheet into an aggregate task tree.
#[derive(Debug, Clone, Default)]
pub struct DocumentParser {
    lines: LineParser,
    blacklist: Blacklist,
}

impl DocumentParser {
    pub const fn new(lines: LineParser, blacklist: Blacklist) -> Self {
        Self { lines, blacklist }
    }

    pub const fn blacklist(&self) -> &Blacklist {
        &self.blacklist
    }

    /// Parses `text` and returns the root of the aggregate tree.
    ///
    /// Blank lines are skipped without affecting the running end time.
    /// Blacklisted chains still advance it. The first bad line aborts the
    /// whole parse.
    pub fn parse(&self, text: &str) -> Result<TaskNode, TaskParseError> {
        let text = strip_comments(text);
        let mut root = TaskNode::root();
        let mut previous_end: Option<NaiveTime> = None;
        let mut parsed = 0usize;
        let mut skipped = 0usize;

        for (index, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            let entry = self
                .lines
                .parse(line, previous_end)
                .map_err(|source| TaskParseError {
                    line: index + 1,
                    source,
                })?;
            previous_end = Some(entry.end);

            if self.blacklist.contains(entry.chain.name()) {
                tracing::debug!(line = index + 1, task = entry.chain.name(), "skipping blacklisted task");
                skipped += 1;
                continue;
            }

            root.merge(entry.chain);
            parsed += 1;
        }

        tracing::debug!(
            parsed,
            skipped,
            top_level = root.children().count(),
            "parsed timesheet"
        );

        Ok(root)
    }
}
