//! CLI support for tally-lang
//!
//! Provides programmatic access to the `tally` command so the same query runs
//! can be embedded in other tools.

mod docs;
mod run;

pub use docs::{DocTopic, function_list, get_doc_topic, get_docs_overview};
pub use run::{RunOptions, execute_check, execute_run, open_input, render};

use std::io;

use clap::ValueEnum;

/// Record source format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum InputType {
    /// Comma-separated values with a header row
    #[default]
    Csv,
    /// Tab-separated values with a header row
    Tsv,
}

impl InputType {
    pub fn delimiter(&self) -> u8 {
        match self {
            InputType::Csv => b',',
            InputType::Tsv => b'\t',
        }
    }
}

/// Result rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputType {
    Csv,
    /// Aligned ASCII grid
    #[default]
    Table,
    /// Array of objects keyed by column name
    Json,
    /// Number of result rows
    Count,
}

/// Errors that can occur during CLI operations
#[derive(Debug)]
pub enum CliError {
    /// Query did not parse
    Parse(crate::ParseError),
    /// Query failed while running
    Eval(crate::EvalError),
    /// CSV read or write error
    Csv(csv::Error),
    /// JSON rendering error
    Json(serde_json::Error),
    /// IO error
    Io(io::Error),
    /// Stdin is a terminal and no input file was given
    NoInput,
    /// Unknown documentation topic
    UnknownTopic(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Parse(e) => write!(f, "Parse error: {}", e),
            CliError::Eval(e) => write!(f, "Evaluation error: {}", e),
            CliError::Csv(e) => write!(f, "CSV error: {}", e),
            CliError::Json(e) => write!(f, "JSON error: {}", e),
            CliError::Io(e) => write!(f, "IO error: {}", e),
            CliError::NoInput => write!(f, "No input provided. Use --input or pipe CSV to stdin."),
            CliError::UnknownTopic(t) => {
                write!(f, "Unknown topic: '{}'\nRun 'tally syntax' to see available topics.", t)
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Parse(e) => Some(e),
            CliError::Eval(e) => Some(e),
            CliError::Csv(e) => Some(e),
            CliError::Json(e) => Some(e),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<crate::ParseError> for CliError {
    fn from(e: crate::ParseError) -> Self {
        CliError::Parse(e)
    }
}

impl From<crate::EvalError> for CliError {
    fn from(e: crate::EvalError) -> Self {
        CliError::Eval(e)
    }
}

impl From<csv::Error> for CliError {
    fn from(e: csv::Error) -> Self {
        CliError::Csv(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Json(e)
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}
