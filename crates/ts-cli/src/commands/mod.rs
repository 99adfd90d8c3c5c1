//! CLI subcommand implementations.

pub mod report;
