//! Main bundler orchestration.
//!
//! This module provides the [`Bundler`] orchestrator that runs manifest
//! generation and collects the resulting artifact metadata.

use crate::bundler::{
    BundledArtifact, Result, Settings, error::ErrorExt, platform::windows::wix,
};

use super::{checksum::calculate_sha256, tool_detection::WIX_TOOLSET};

/// Main bundler orchestrator.
///
/// Owns the settings for one run. A run reads the GUID registry once at the
/// start and rewrites it once at the end, so at most one run may target a
/// given registry file at a time.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_wix::bundler::{Bundler, Settings};
///
/// # fn example(settings: Settings) -> kodegen_bundler_wix::bundler::Result<()> {
/// let artifact = Bundler::new(settings).bundle()?;
/// println!("Wrote {} components", artifact.components);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Bundler {
    settings: Settings,
}

impl Bundler {
    /// Creates a new bundler with the given settings.
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Generates the WiX source and GUID registry.
    ///
    /// # Returns
    ///
    /// A [`BundledArtifact`] listing the manifest and registry paths, the
    /// manifest size and SHA-256 checksum, and per-group scan reports.
    pub fn bundle(&self) -> Result<BundledArtifact> {
        let output = wix::bundle_project(&self.settings)?;

        let size = std::fs::metadata(&output.manifest_path)
            .fs_context("reading manifest metadata", &output.manifest_path)?
            .len();
        let checksum = calculate_sha256(&output.manifest_path)?;

        match *WIX_TOOLSET {
            Some(toolset) => log::info!(
                "Compile the installer with: {}",
                toolset.compile_hint(&output.manifest_path)
            ),
            None => log::info!("WiX toolset not found in PATH; install it to compile the .wxs"),
        }

        Ok(BundledArtifact {
            paths: vec![output.manifest_path, output.registry_path],
            size,
            checksum,
            components: output.components,
            minted: output.minted,
            reports: output.reports,
        })
    }

    /// Returns a reference to the bundler settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}
