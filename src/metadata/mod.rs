//! Packaging config loading.
//!
//! Reads a TOML or JSON packaging file and turns it into validated
//! [`Settings`]. Every configuration error surfaces here, before any group
//! is scanned.

use crate::bundler::{
    GroupSettings, ProductSettings, RegistryLoadPolicy, Settings, SettingsBuilder,
    ShortcutSettings, WixSettings,
};
use crate::error::{BundlerError, Result};
use path_absolutize::Absolutize;
use serde::Deserialize;
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

/// Top level of the packaging file.
#[derive(Debug, Deserialize)]
struct PackagingConfig {
    #[serde(flatten)]
    product: ProductSettings,

    #[serde(default)]
    wix: WixSettings,

    #[serde(default)]
    groups: BTreeMap<String, GroupConfig>,
}

/// `[groups.<name>]` table.
#[derive(Debug, Deserialize)]
struct GroupConfig {
    /// Reserved for per-group tracking; validated when present.
    #[serde(default)]
    uuid: Option<String>,

    root: PathBuf,

    #[serde(default)]
    ignore: Vec<String>,

    #[serde(default)]
    shortcuts: BTreeMap<String, ShortcutSettings>,
}

/// Command line overrides applied on top of the packaging file.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Output path without extension.
    ///
    /// Default: the config path without its extension.
    pub output_base: Option<PathBuf>,

    /// GUID registry location.
    ///
    /// Default: `<output_base>.uuid.json`
    pub registry_path: Option<PathBuf>,

    /// Indent width, overriding `[wix] indent`.
    pub indent: Option<usize>,

    /// Handling of a corrupt or unreadable registry.
    pub registry_policy: RegistryLoadPolicy,
}

/// Load and validate the packaging file at `path`.
///
/// Files ending in `.json` are parsed as JSON, anything else as TOML.
/// Relative group roots resolve against the config file's directory.
/// Groups are scanned in name order.
pub fn load_config(path: &Path, options: LoadOptions) -> Result<Settings> {
    let config_error = |reason: String| BundlerError::Config {
        path: path.to_path_buf(),
        reason,
    };

    let content = std::fs::read_to_string(path)
        .map_err(|e| config_error(format!("failed to read: {}", e)))?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let config: PackagingConfig = if is_json {
        serde_json::from_str(&content).map_err(|e| config_error(e.to_string()))?
    } else {
        toml::from_str(&content).map_err(|e| config_error(e.to_string()))?
    };

    let config_path = path
        .absolutize()
        .map_err(|e| config_error(format!("failed to resolve path: {}", e)))?;
    let config_dir = config_path
        .parent()
        .ok_or_else(|| config_error("config path has no parent directory".to_string()))?;

    let mut groups = Vec::with_capacity(config.groups.len());
    for (name, group) in config.groups {
        let root = group
            .root
            .absolutize_from(config_dir)
            .map_err(|e| config_error(format!("group `{}` root: {}", name, e)))?
            .into_owned();

        let mut settings = GroupSettings::new(name.as_str(), root, &group.ignore, group.shortcuts)?;
        if let Some(value) = group.uuid {
            let uuid = uuid::Uuid::parse_str(&value).map_err(|_| {
                crate::bundler::Error::InvalidGuid {
                    field: format!("groups.{}.uuid", name),
                    value: value.clone(),
                }
            })?;
            settings = settings.with_uuid(uuid);
        }
        log::debug!(
            "Group '{}': root {}, {} ignore patterns, {} shortcuts",
            settings.name(),
            settings.root().display(),
            settings.patterns().len(),
            settings.shortcuts().len()
        );
        groups.push(settings);
    }

    if groups.is_empty() {
        log::warn!("No groups configured in {}; the manifest will hold no files", path.display());
    }

    let mut wix = config.wix;
    if let Some(indent) = options.indent {
        wix.indent = indent;
    }
    wix.registry_policy = options.registry_policy;

    let output_base = options
        .output_base
        .unwrap_or_else(|| path.with_extension(""));

    let mut builder = SettingsBuilder::new()
        .product(config.product)
        .wix_settings(wix)
        .groups(groups)
        .output_base(output_base);
    if let Some(registry_path) = options.registry_path {
        builder = builder.registry_path(registry_path);
    }

    Ok(builder.build()?)
}
