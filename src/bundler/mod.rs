//! WiX installer manifest generation.
//!
//! Walks configured source groups, maps every file into the installation
//! layout and emits a WiX v3 source file plus the archival GUID registry
//! that keeps component GUIDs stable across runs and product versions.
//!
//! # Configuration
//!
//! Generation is configured by a packaging file (see
//! [`crate::metadata::load_config`]):
//!
//! ```toml
//! name = "Mailpile"
//! version = "1.0.0"
//! manufacturer = "Mailpile ehf."
//! product_id = "19671260-92a2-437d-bb3a-d47e91e3cf23"
//! upgrade_code = "4685a239-2c80-4f51-8476-791316d2df3d"
//!
//! [groups.mailpile]
//! root = "/src/Mailpile"
//! ignore = ['.*\.py(?:c|o)$', '.*\.git.*']
//! ```
//!
//! # Integration
//!
//! ```no_run
//! use kodegen_bundler_wix::bundler::Bundler;
//! use kodegen_bundler_wix::metadata::load_config;
//!
//! let settings = load_config("packaging.toml".as_ref(), Default::default())?;
//! let artifact = Bundler::new(settings).bundle()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod builder;
pub mod error;
pub mod platform;
mod settings;
mod utils;

// Public re-exports
pub use builder::Bundler;
pub use error::{Error, Result};
pub use platform::windows::wix::{
    manifest::Manifest, registry::GuidRegistry, scan::ScanReport,
};
pub use settings::{
    GroupSettings, KeySeparator, ProductSettings, RegistryLoadPolicy, Settings, SettingsBuilder,
    ShortcutSettings, WixSettings,
};

/// Result of a generation run.
///
/// # Fields
///
/// - `paths`: the `.wxs` manifest followed by the GUID registry
/// - `size`: manifest size in bytes
/// - `checksum`: SHA-256 of the manifest
#[derive(Debug, Clone)]
pub struct BundledArtifact {
    /// Paths to all files written by this run.
    pub paths: Vec<std::path::PathBuf>,

    /// Size of the manifest in bytes.
    pub size: u64,

    /// SHA-256 checksum of the manifest.
    pub checksum: String,

    /// Number of file components in the manifest.
    pub components: usize,

    /// Registry keys that received a new GUID in this run.
    pub minted: Vec<String>,

    /// Per-group scan results, in scan order.
    pub reports: Vec<ScanReport>,
}
