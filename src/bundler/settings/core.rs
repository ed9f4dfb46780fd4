//! Core Settings struct and implementations.

use super::{GroupSettings, ProductSettings, WixSettings};
use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

/// Main settings for a manifest run.
///
/// Constructed via [`SettingsBuilder`](super::SettingsBuilder), which
/// validates everything up front. Immutable once built.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_wix::bundler::{GroupSettings, ProductSettings, SettingsBuilder};
/// use std::collections::BTreeMap;
///
/// # fn example() -> kodegen_bundler_wix::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .output_base("target/wix/mailpile")
///     .product(ProductSettings {
///         name: "Mailpile".into(),
///         version: "1.0.0".into(),
///         manufacturer: "Mailpile ehf.".into(),
///         product_id: "*".into(),
///         upgrade_code: "4685a239-2c80-4f51-8476-791316d2df3d".into(),
///         ..Default::default()
///     })
///     .group(GroupSettings::new("app", "/src/app", &[], BTreeMap::new())?)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Settings {
    /// Product metadata.
    product: ProductSettings,

    /// WiX generation options.
    wix: WixSettings,

    /// Groups in scan order.
    groups: Vec<GroupSettings>,

    /// Output path without extension; `.wxs` is appended.
    output_base: PathBuf,

    /// Explicit registry location.
    ///
    /// None means `<output_base>.uuid.json`.
    registry_path: Option<PathBuf>,
}

impl Settings {
    pub fn product(&self) -> &ProductSettings {
        &self.product
    }

    /// Returns the product name.
    pub fn product_name(&self) -> &str {
        &self.product.name
    }

    /// Returns the version string.
    pub fn version_string(&self) -> &str {
        &self.product.version
    }

    pub fn wix_settings(&self) -> &WixSettings {
        &self.wix
    }

    pub fn groups(&self) -> &[GroupSettings] {
        &self.groups
    }

    /// Path of the generated WiX source.
    pub fn manifest_path(&self) -> PathBuf {
        with_suffix(&self.output_base, ".wxs")
    }

    /// Path of the GUID registry read at start and rewritten at the end.
    pub fn registry_path(&self) -> PathBuf {
        self.registry_path
            .clone()
            .unwrap_or_else(|| with_suffix(&self.output_base, ".uuid.json"))
    }

    /// Creates a new Settings instance (used by SettingsBuilder).
    pub(super) fn new(
        product: ProductSettings,
        wix: WixSettings,
        groups: Vec<GroupSettings>,
        output_base: PathBuf,
        registry_path: Option<PathBuf>,
    ) -> Self {
        Self {
            product,
            wix,
            groups,
            output_base,
            registry_path,
        }
    }
}

fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut path = OsString::from(base.as_os_str());
    path.push(suffix);
    PathBuf::from(path)
}
