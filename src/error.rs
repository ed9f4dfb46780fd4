//! Error types for the command line front end.
//!
//! Wraps core [`crate::bundler::Error`] values together with CLI and config
//! loading failures, and maps each to recovery suggestions.

use crate::bundler::Error as CoreError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for front end operations
pub type Result<T> = std::result::Result<T, BundlerError>;

/// Main error type for all front end operations
#[derive(Error, Debug)]
pub enum BundlerError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// Packaging config could not be loaded
    #[error("Config error in {}: {reason}", .path.display())]
    Config {
        /// Config file
        path: PathBuf,
        /// What went wrong
        reason: String,
    },

    /// Manifest generation errors
    #[error("{0}")]
    Bundler(#[from] CoreError),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },
}

impl BundlerError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            BundlerError::Cli(_) => vec!["Run with --help to see valid arguments".to_string()],
            BundlerError::Config { path, .. } => vec![format!(
                "Check the packaging config at {}",
                path.display()
            )],
            BundlerError::Bundler(error) => match error {
                CoreError::CorruptRegistry { path, .. } => vec![
                    format!(
                        "Restore {} from version control or a previous release",
                        path.display()
                    ),
                    "Only if no installer was ever shipped from it, rerun with --fresh-registry"
                        .to_string(),
                ],
                CoreError::InvalidPattern { .. } => {
                    vec!["Ignore patterns use Rust regex syntax and match from the start of the path".to_string()]
                }
                CoreError::InvalidGuid { .. } => {
                    vec!["GUIDs look like 19671260-92a2-437d-bb3a-d47e91e3cf23".to_string()]
                }
                CoreError::Walk { .. } | CoreError::Fs { .. } => {
                    vec!["Check that every group root exists and is readable".to_string()]
                }
                _ => vec!["Check the error message above for specific details".to_string()],
            },
        }
    }
}
