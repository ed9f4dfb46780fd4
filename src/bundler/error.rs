//! Error types for manifest generation.
//!
//! Every failure that can stop a run is represented here. Configuration
//! problems, unreadable group roots and corrupt registries all abort before
//! any output file is touched.

use std::{
    fmt::Display,
    io,
    path::{Path, PathBuf},
};
use thiserror::Error as DeriveError;

/// Result type alias for manifest operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the manifest generator.
#[derive(Debug, DeriveError)]
#[non_exhaustive]
pub enum Error {
    /// Filesystem operation failed, with the operation and path involved.
    #[error("{context} {}: {error}", .path.display())]
    Fs {
        /// What was being done
        context: &'static str,
        /// Path being operated on
        path: PathBuf,
        /// Underlying error
        #[source]
        error: io::Error,
    },

    /// Bare I/O error.
    #[error("{0}")]
    IoError(#[from] io::Error),

    /// JSON (de)serialization error.
    #[error("{0}")]
    JsonError(#[from] serde_json::Error),

    /// TOML deserialization error.
    #[error("{0}")]
    TomlError(#[from] toml::de::Error),

    /// An `ignore` pattern failed to compile.
    #[error("invalid ignore pattern `{pattern}` in group `{group}`: {error}")]
    InvalidPattern {
        /// Group declaring the pattern
        group: String,
        /// Pattern source text
        pattern: String,
        /// Compilation error
        #[source]
        error: regex::Error,
    },

    /// A field that must carry a GUID does not.
    #[error("`{field}` is not a valid GUID: `{value}`")]
    InvalidGuid {
        /// Config field name
        field: String,
        /// Offending value
        value: String,
    },

    /// A version string MSI cannot represent.
    #[error("invalid product version `{version}`: {reason}")]
    InvalidVersion {
        /// Offending version string
        version: String,
        /// Why it was rejected
        reason: String,
    },

    /// Required configuration value absent.
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    /// The GUID registry exists but cannot be parsed.
    #[error(
        "GUID registry {} is corrupt: {error} (rerun with --fresh-registry to discard it)",
        .path.display()
    )]
    CorruptRegistry {
        /// Registry file
        path: PathBuf,
        /// Parse error
        #[source]
        error: serde_json::Error,
    },

    /// Directory traversal of a group failed.
    #[error("failed to scan group `{group}`: {error}")]
    Walk {
        /// Group being scanned
        group: String,
        /// Traversal error
        #[source]
        error: walkdir::Error,
    },

    /// A scanned path is not valid UTF-8 and cannot become a registry key.
    #[error("path is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(PathBuf),

    /// Path prefix stripping failed.
    #[error("{0}")]
    StripPrefix(#[from] std::path::StripPrefixError),

    /// XML serialization failed.
    #[error("failed to write WiX source: {0}")]
    Xml(String),

    /// Anything else.
    #[error("{0}")]
    GenericError(String),
}

/// Attaches filesystem context to I/O results.
pub trait ErrorExt<T> {
    /// Wrap the error with the operation being performed and the path.
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.as_ref().to_path_buf(),
            error,
        })
    }
}

/// Converts options and foreign results into [`Error::GenericError`].
pub trait Context<T> {
    /// Attach a message describing what was expected.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static;
}

impl<T> Context<T> for Option<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }
}

impl<T, E: Display> Context<T> for std::result::Result<T, E> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.map_err(|e| Error::GenericError(format!("{context}: {e}")))
    }
}

/// Return early with a [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::bundler::Error::GenericError(format!($msg)))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($fmt, $($arg)*)))
    };
}
