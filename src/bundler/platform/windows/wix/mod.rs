//! Windows WiX source generation.
//!
//! Produces a WiX v3 `.wxs` manifest describing every file of the configured
//! groups, together with the archival GUID registry that keeps component
//! GUIDs stable across runs and product versions.
//!
//! # Module Organization
//!
//! - `path` - group-relative path keys
//! - `mangle` - deterministic element ids
//! - `registry` - persistent component GUID registry
//! - `tree` - logical installation directory tree
//! - `manifest` - typed WiX elements
//! - `scan` - group traversal
//! - `writer` - XML serialization
//! - `utils` - version and GUID validation

pub mod mangle;
pub mod manifest;
pub mod path;
pub mod registry;
pub mod scan;
pub mod tree;
pub mod utils;
pub mod writer;

use crate::bundler::{
    error::Result,
    settings::Settings,
    utils::fs::write_files_atomic,
};
use manifest::{
    Feature, Manifest, Media, MenuComponent, Package, Product, Property, RegistryValue,
    RemoveFolder,
};
use registry::{GuidRegistry, MENU_COMPONENT_KEY};
use scan::{GroupScanner, ScanReport};
use std::path::PathBuf;
use tree::LogicalTree;

/// Directory id of the product install directory.
pub const INSTALL_DIR_ID: &str = "INSTALLDIR";

/// Id of the start menu directory and its component.
pub const MENU_DIR_ID: &str = "ProgramMenuDir";

/// A manifest assembled in memory together with per-group scan results.
#[derive(Clone, Debug)]
pub struct Assembly {
    pub manifest: Manifest,
    pub reports: Vec<ScanReport>,
}

/// Files written by [`bundle_project`].
#[derive(Clone, Debug)]
pub struct WixOutput {
    pub manifest_path: PathBuf,
    pub registry_path: PathBuf,
    pub reports: Vec<ScanReport>,
    /// Registry keys that received a new GUID in this run.
    pub minted: Vec<String>,
    pub components: usize,
}

/// Generate the WiX source and GUID registry for `settings`.
///
/// # Process
///
/// 1. Load the GUID registry (missing file starts empty)
/// 2. Build the fixed product skeleton
/// 3. Scan every group into the logical tree
/// 4. Render manifest and registry in memory
/// 5. Replace each file atomically, registry first
///
/// Nothing is written unless every step before succeeds. The registry is
/// replaced before the manifest, so a manifest on disk never carries a GUID
/// the registry has not archived.
pub fn bundle_project(settings: &Settings) -> Result<WixOutput> {
    log::info!("Generating WiX source for {}", settings.product_name());

    let wix = settings.wix_settings();
    let registry_path = settings.registry_path();
    let manifest_path = settings.manifest_path();

    let mut registry = GuidRegistry::load(&registry_path, wix.registry_policy)?;
    let assembly = assemble(settings, &mut registry)?;

    let manifest_bytes = writer::render(&assembly.manifest, wix.indent)?;
    let registry_bytes = registry.to_json(wix.indent)?;

    write_files_atomic(&[
        (registry_path.as_path(), registry_bytes.as_slice()),
        (manifest_path.as_path(), manifest_bytes.as_slice()),
    ])?;

    log::info!(
        "Wrote {} ({} components) and {} ({} GUIDs, {} new)",
        manifest_path.display(),
        assembly.manifest.component_count(),
        registry_path.display(),
        registry.len(),
        registry.minted().len()
    );

    Ok(WixOutput {
        manifest_path,
        registry_path,
        components: assembly.manifest.component_count(),
        reports: assembly.reports,
        minted: registry.minted().to_vec(),
    })
}

/// Build the skeleton and scan every group, mutating only `registry`.
pub fn assemble(settings: &Settings, registry: &mut GuidRegistry) -> Result<Assembly> {
    let mut manifest = skeleton(settings, registry);
    let separator = settings.wix_settings().key_separator;

    let mut reports = Vec::with_capacity(settings.groups().len());
    for group in settings.groups() {
        let mut scanner = GroupScanner::new(
            registry,
            &mut manifest.tree,
            &mut manifest.feature,
            &mut manifest.menu,
            separator,
        );
        let report = scanner.scan(group)?;
        log::info!(
            "Group '{}': {} files, {} ignored, {} shortcuts",
            report.group,
            report.files,
            report.ignored,
            report.shortcuts
        );
        reports.push(report);
    }

    Ok(Assembly { manifest, reports })
}

/// Fixed product structure:
///
/// ```text
/// TARGETDIR
/// ├── ProgramFilesFolder / <manufacturer> / <install dir>   <- groups land here
/// └── ProgramMenuFolder / <name> <version>                  <- menu component
/// ```
fn skeleton(settings: &Settings, registry: &mut GuidRegistry) -> Manifest {
    let product = settings.product();
    let wix = settings.wix_settings();
    let title = product.title();

    let mut tree = LogicalTree::new("TARGETDIR", Some("SourceDir"), wix.key_separator);
    let root = tree.root();

    let program_files = tree.add_directory(root, "ProgramFilesFolder", Some("ProgramFiles"));
    let manufacturer =
        tree.add_directory(program_files, "ManufacturerFolder", Some(product.manufacturer.as_str()));
    let install_dir =
        tree.add_directory(manufacturer, INSTALL_DIR_ID, Some(product.install_dir_name()));
    tree.set_install_root(install_dir);

    let menu_folder = tree.add_directory(root, "ProgramMenuFolder", None);
    let menu_dir = tree.add_directory(menu_folder, MENU_DIR_ID, Some(title.as_str()));
    tree.attach_menu(menu_dir);

    let menu = MenuComponent {
        id: MENU_DIR_ID.to_string(),
        guid: registry.get_or_create(MENU_COMPONENT_KEY),
        registry_value: RegistryValue {
            root: "HKCU".to_string(),
            key: "Software\\[Manufacturer]\\[ProductName]".to_string(),
            value_type: "string".to_string(),
            value: "1".to_string(),
        },
        remove_folder: RemoveFolder {
            id: MENU_DIR_ID.to_string(),
            on: "uninstall".to_string(),
        },
        shortcuts: Vec::new(),
    };

    let mut feature = Feature {
        id: "Complete".to_string(),
        title: title.clone(),
        description: format!("Complete {} Install", product.name),
        component_refs: Vec::new(),
    };
    feature.add_component(MENU_DIR_ID);

    Manifest {
        product: Product {
            id: product.product_id.clone(),
            name: title.clone(),
            language: product.language_code.clone(),
            codepage: product.codepage.clone(),
            version: product.version.clone(),
            manufacturer: product.manufacturer.clone(),
            upgrade_code: product.upgrade_code.clone(),
        },
        package: Package {
            keywords: "Installer".to_string(),
            description: product
                .description
                .clone()
                .unwrap_or_else(|| format!("{title} Installer")),
            comments: product.comments.clone(),
            manufacturer: product.manufacturer.clone(),
            installer_version: product.installer_version.clone(),
            languages: product.language_code.clone(),
            summary_codepage: product.codepage.clone(),
        },
        media: Media {
            id: "1".to_string(),
            cabinet: wix.cabinet.clone(),
            embed_cab: true,
            disk_prompt: "CD-ROM #1".to_string(),
        },
        properties: vec![Property {
            id: "DiskPrompt".to_string(),
            value: wix
                .disk_prompt
                .clone()
                .unwrap_or_else(|| format!("{title} Media [1]")),
        }],
        tree,
        menu,
        feature,
    }
}
