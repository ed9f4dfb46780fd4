//! Run summary output.

use std::io::{self, Write};

/// Writes user-facing progress to stdout and warnings to stderr.
#[derive(Debug, Clone, Copy)]
pub struct OutputManager {
    quiet: bool,
}

impl OutputManager {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    /// Print a success line unless quiet.
    pub fn success(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        writeln!(io::stdout().lock(), "✓ {}", message)
    }

    /// Print an indented detail line unless quiet.
    pub fn indent(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        writeln!(io::stdout().lock(), "  {}", message)
    }

    /// Print a warning. Warnings are shown even when quiet.
    pub fn warn(&self, message: &str) -> io::Result<()> {
        writeln!(io::stderr().lock(), "⚠ {}", message)
    }
}
