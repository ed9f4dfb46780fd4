//! Command line interface for the WiX source generator.

mod args;
mod output;

pub use args::Args;
pub use output::OutputManager;

use crate::bundler::{BundledArtifact, Bundler};
use crate::error::{CliError, Result};
use crate::metadata;

/// Main CLI entry point.
///
/// Returns the process exit code on success.
pub fn run(args: &Args) -> Result<i32> {
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    let settings = metadata::load_config(&args.config, args.load_options())?;
    log::info!(
        "Generating WiX source for {} {} ({} groups)",
        settings.product_name(),
        settings.version_string(),
        settings.groups().len()
    );

    let artifact = Bundler::new(settings).bundle()?;
    // The outputs are written; a closed stdout must not fail the run.
    if let Err(e) = report(&artifact, OutputManager::new(args.quiet)) {
        log::debug!("Failed to print run summary: {}", e);
    }

    Ok(0)
}

fn report(artifact: &BundledArtifact, output: OutputManager) -> std::io::Result<()> {
    for path in &artifact.paths {
        output.success(&format!("Wrote {}", path.display()))?;
    }
    output.indent(&format!(
        "{} components, {} new GUIDs, sha256 {}",
        artifact.components,
        artifact.minted.len(),
        artifact.checksum
    ))?;
    for report in &artifact.reports {
        output.indent(&format!(
            "group {}: {} files, {} ignored, {} shortcuts",
            report.group, report.files, report.ignored, report.shortcuts
        ))?;
        for key in &report.unmatched_shortcuts {
            output.warn(&format!(
                "group {}: shortcut for {} matched no file",
                report.group, key
            ))?;
        }
    }
    Ok(())
}
