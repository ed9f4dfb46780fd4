//! Builder for constructing Settings.

use super::{GroupSettings, ProductSettings, Settings, WixSettings};
use crate::bundler::{
    error::{Error, Result},
    platform::windows::wix::utils,
};
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

/// Builder for constructing [`Settings`].
///
/// All configuration errors surface from [`build`](Self::build), before any
/// directory is scanned or any file written.
///
/// # See Also
///
/// - [`Settings`] - The built settings struct
#[derive(Default)]
pub struct SettingsBuilder {
    product: Option<ProductSettings>,
    wix: WixSettings,
    groups: Vec<GroupSettings>,
    output_base: Option<PathBuf>,
    registry_path: Option<PathBuf>,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets product metadata.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn product(mut self, product: ProductSettings) -> Self {
        self.product = Some(product);
        self
    }

    /// Sets WiX generation options.
    ///
    /// Default: [`WixSettings::default`]
    pub fn wix_settings(mut self, wix: WixSettings) -> Self {
        self.wix = wix;
        self
    }

    /// Adds a group. Groups are scanned in the order added.
    pub fn group(mut self, group: GroupSettings) -> Self {
        self.groups.push(group);
        self
    }

    pub fn groups(mut self, groups: impl IntoIterator<Item = GroupSettings>) -> Self {
        self.groups.extend(groups);
        self
    }

    /// Sets the output path without extension.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn output_base<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output_base = Some(path.as_ref().to_path_buf());
        self
    }

    /// Overrides the GUID registry location.
    ///
    /// Default: `<output_base>.uuid.json`
    pub fn registry_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.registry_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// - missing `product` or `output_base`, or an empty product name,
    ///   version or manufacturer
    /// - `product_id` neither a GUID nor `*`, `upgrade_code` not a GUID
    /// - a version MSI cannot represent
    /// - two groups whose root directories share a name, which would map
    ///   them onto the same masked paths
    pub fn build(self) -> Result<Settings> {
        let product = self.product.ok_or(Error::MissingField("product"))?;
        let output_base = self.output_base.ok_or(Error::MissingField("output_base"))?;

        if product.name.trim().is_empty() {
            return Err(Error::MissingField("name"));
        }
        if product.manufacturer.trim().is_empty() {
            return Err(Error::MissingField("manufacturer"));
        }
        if product.version.trim().is_empty() {
            return Err(Error::MissingField("version"));
        }
        utils::validate_product_version(&product.version)?;
        utils::validate_guid("product_id", &product.product_id, true)?;
        utils::validate_guid("upgrade_code", &product.upgrade_code, false)?;

        let mut seen: HashMap<&std::ffi::OsStr, &str> = HashMap::new();
        for group in &self.groups {
            let dir_name = group.root().file_name().unwrap_or_default();
            if let Some(other) = seen.insert(dir_name, group.name()) {
                return Err(Error::GenericError(format!(
                    "groups `{}` and `{}` both install into `{}`",
                    other,
                    group.name(),
                    dir_name.to_string_lossy()
                )));
            }
        }

        Ok(Settings::new(
            product,
            self.wix,
            self.groups,
            output_base,
            self.registry_path,
        ))
    }
}
