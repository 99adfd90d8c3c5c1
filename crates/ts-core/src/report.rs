//! Indented text rendering of a task tree.

use std::fmt::Write;

use crate::duration::DurationFormat;
use crate::task::TaskNode;

/// Indentation used by [`ReportFormatter::default`] for each nesting level.
pub const DEFAULT_INDENT: &str = "    ";

/// Renders a task tree as an indented report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFormatter {
    indent: String,
    durations: DurationFormat,
}

impl Default for ReportFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_INDENT, DurationFormat::default())
    }
}

impl ReportFormatter {
    pub fn new(indent: impl Into<String>, durations: DurationFormat) -> Self {
        Self {
            indent: indent.into(),
            durations,
        }
    }

    /// Renders the total of `root` followed by every task beneath it.
    ///
    /// Each task line reads `name (own)` for leaves and `name (own/total)`
    /// for tasks with sub-tasks. The result has no trailing newline.
    pub fn format(&self, root: &TaskNode) -> String {
        let mut output = String::new();
        write!(
            output,
            "Total time: {}",
            self.durations.format(root.total_duration())
        )
        .unwrap();

        if root.has_children() {
            writeln!(output).unwrap();
        }
        for task in root.children() {
            self.write_task(&mut output, task, 0);
        }

        output
    }

    fn write_task(&self, output: &mut String, task: &TaskNode, depth: usize) {
        write!(
            output,
            "\n{}{} ({}",
            self.indent.repeat(depth),
            task.name(),
            self.durations.format(task.own_duration())
        )
        .unwrap();
        if task.has_children() {
            write!(output, "/{}", self.durations.format(task.total_duration())).unwrap();
        }
        output.push(')');

        for child in task.children() {
            self.write_task(output, child, depth + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use insta::assert_snapshot;

    use super::*;
    use crate::document::{Blacklist, DocumentParser};
    use crate::line::LineParser;

    fn report(text: &str) -> String {
        let root = DocumentParser::default().parse(text).unwrap();
        ReportFormatter::default().format(&root)
    }

    #[test]
    fn renders_nested_tasks() {
        let output = report("9:00\t9:45\tWork\tEmail\n9:45\t10:30\tWork\tMeeting\n");
        assert_snapshot!(output, @r"
        Total time: 1:30

        Work (0:00/1:30)
            Email (0:45)
            Meeting (0:45)
        ");
    }

    #[test]
    fn first_seen_casing_is_displayed() {
        let output = report("9:00\t9:20\tProject\n9:40\tPROJECT\tDocs\n10:00\tproject\tdocs\n");
        assert_snapshot!(output, @r"
        Total time: 1:00

        Project (0:20/1:00)
            Docs (0:40)
        ");
    }

    #[test]
    fn blacklisted_tasks_are_absent() {
        let parser = DocumentParser::new(LineParser::default(), Blacklist::from_lines("lunch"));
        let root = parser.parse("9:00\t9:45\tLunch\n9:45\t10:00\tWork\n").unwrap();
        let output = ReportFormatter::default().format(&root);

        assert!(!output.contains("Lunch"));
        assert_snapshot!(output, @r"
        Total time: 0:15

        Work (0:15)
        ");
    }

    #[test]
    fn empty_tree_is_header_only() {
        let output = ReportFormatter::default().format(&TaskNode::root());
        assert_eq!(output, "Total time: 0:00");
    }

    #[test]
    fn custom_indent_and_duration_format() {
        let mut root = TaskNode::root();
        root.merge(TaskNode::from_chain(["A", "B", "C"], Duration::minutes(75)).unwrap());

        let formatter = ReportFormatter::new("..", DurationFormat::new("{hours}h{minutes:02}"));
        assert_eq!(
            formatter.format(&root),
            "Total time: 1h15\n\nA (0h00/1h15)\n..B (0h00/1h15)\n....C (1h15)"
        );
    }

    #[test]
    fn leaf_durations_in_report_sum_to_total() {
        let output = report("8:00\t8:50\tA\tB\n9:05\tA\tC\n9:30\tD\n");
        let leaf_minutes: i64 = output
            .lines()
            .skip(2)
            .filter(|line| !line.contains('/'))
            .map(|line| {
                let inner = line.rsplit_once('(').unwrap().1.trim_end_matches(')');
                let (h, m) = inner.split_once(':').unwrap();
                h.parse::<i64>().unwrap() * 60 + m.parse::<i64>().unwrap()
            })
            .sum();
        assert_eq!(leaf_minutes, 90);
        assert!(output.starts_with("Total time: 1:30\n"));
    }
}
