//! Output formatting for CLI commands
//!
//! Handlers build a serializable payload and the text a person would read,
//! then let [`Output::emit`] pick one. JSON goes out as a single line so
//! scripts can read it with one `read`.

use anyhow::{Context, Result};
use serde::Serialize;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Output helper for consistent formatting
pub struct Output {
    format: OutputFormat,
    verbose: bool,
}

impl Output {
    pub fn new(format: OutputFormat, verbose: bool) -> Self {
        Self { format, verbose }
    }

    /// Renders a command result without printing it
    ///
    /// `text` is only built in text mode; a trailing newline is added when
    /// missing.
    pub fn render<T, F>(&self, data: &T, text: F) -> Result<String>
    where
        T: Serialize,
        F: FnOnce() -> String,
    {
        let mut out = match self.format {
            OutputFormat::Text => text(),
            OutputFormat::Json => serde_json::to_string(data).context("serializing output")?,
        };
        if !out.ends_with('\n') {
            out.push('\n');
        }
        Ok(out)
    }

    /// Prints a command result in the selected format
    pub fn emit<T, F>(&self, data: &T, text: F) -> Result<()>
    where
        T: Serialize,
        F: FnOnce() -> String,
    {
        print!("{}", self.render(data, text)?);
        Ok(())
    }

    /// Returns true if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Prints a verbose debug message (only when --verbose is set)
    pub fn verbose(&self, message: &str) {
        if self.verbose {
            eprintln!("[verbose] {}", message);
        }
    }

    /// Prints a verbose debug message with context (only when --verbose is set)
    pub fn verbose_ctx(&self, context: &str, message: &str) {
        if self.verbose {
            eprintln!("[verbose:{}] {}", context, message);
        }
    }
}
