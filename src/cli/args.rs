//! Command line argument parsing and validation.

use crate::bundler::RegistryLoadPolicy;
use crate::metadata::LoadOptions;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// WiX source generator with stable component GUIDs
#[derive(Parser, Debug)]
#[command(
    name = "kodegen_bundler_wix",
    version,
    about = "Generate WiX installer source with stable component GUIDs",
    long_about = "Scans the source groups named in a packaging config and writes a WiX .wxs
manifest plus the GUID registry (<BASE>.uuid.json) that keeps component GUIDs
stable across releases. Commit the registry next to the config.

Usage:
  kodegen_bundler_wix --config packaging.toml
  kodegen_bundler_wix --config packaging.toml --output dist/app-1.0 --registry packaging.uuid.json"
)]
pub struct Args {
    /// Packaging config (.toml or .json)
    #[arg(short, long, value_name = "FILE")]
    pub config: PathBuf,

    /// Output path without extension; writes <BASE>.wxs
    ///
    /// Defaults to the config path without its extension.
    #[arg(short, long, value_name = "BASE")]
    pub output: Option<PathBuf>,

    /// GUID registry file
    ///
    /// Defaults to <BASE>.uuid.json.
    #[arg(short, long, value_name = "FILE")]
    pub registry: Option<PathBuf>,

    /// Spaces per indentation level in both outputs
    #[arg(long, value_name = "N")]
    pub indent: Option<usize>,

    /// Start from an empty registry if the existing one cannot be parsed
    ///
    /// Every component then gets a new GUID. Only safe if no installer was
    /// ever shipped from the old registry.
    #[arg(long)]
    pub fresh_registry: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress the run summary
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.config.as_os_str().is_empty() {
            return Err("Config path cannot be empty".to_string());
        }
        if let Some(indent) = self.indent
            && indent > 16
        {
            return Err(format!("Indent must be at most 16 spaces, got {}", indent));
        }
        if let Some(output) = &self.output
            && output.file_name().is_none()
        {
            return Err(format!("Output base {} has no file name", output.display()));
        }
        Ok(())
    }

    /// Default log filter for the requested verbosity.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }

    /// Overrides forwarded to [`crate::metadata::load_config`].
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            output_base: self.output.clone(),
            registry_path: self.registry.clone(),
            indent: self.indent,
            registry_policy: if self.fresh_registry {
                RegistryLoadPolicy::StartFresh
            } else {
                RegistryLoadPolicy::Strict
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let args = Args::try_parse_from(["kodegen_bundler_wix", "--config", "app.toml"]).unwrap();
        assert!(args.validate().is_ok());
        assert_eq!(args.log_filter(), "warn");

        let options = args.load_options();
        assert_eq!(options.registry_policy, RegistryLoadPolicy::Strict);
        assert!(options.output_base.is_none());
    }

    #[test]
    fn test_parse_overrides() {
        let args = Args::try_parse_from([
            "kodegen_bundler_wix",
            "-c",
            "app.toml",
            "-o",
            "dist/app",
            "--indent",
            "4",
            "--fresh-registry",
            "-vv",
        ])
        .unwrap();
        assert_eq!(args.log_filter(), "debug");

        let options = args.load_options();
        assert_eq!(options.output_base, Some(PathBuf::from("dist/app")));
        assert_eq!(options.indent, Some(4));
        assert_eq!(options.registry_policy, RegistryLoadPolicy::StartFresh);
    }

    #[test]
    fn test_validate_rejects_huge_indent() {
        let args =
            Args::try_parse_from(["kodegen_bundler_wix", "-c", "a.toml", "--indent", "40"]).unwrap();
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_config_is_required() {
        assert!(Args::try_parse_from(["kodegen_bundler_wix"]).is_err());
    }
}
