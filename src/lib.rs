//! WiX installer source generator with stable component GUIDs
//!
//! This library walks source directory groups and produces:
//! - a WiX v3 `.wxs` manifest with one component per file
//! - a JSON GUID registry that keeps component GUIDs stable across releases
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;
pub mod metadata;

// Re-export commonly used types
pub use error::{BundlerError, CliError, Result};
