//! Typed WiX source elements.
//!
//! One struct per element kind, rendered by [`super::writer`]. The directory
//! hierarchy itself lives in [`super::tree::LogicalTree`].

use super::tree::LogicalTree;
use std::path::PathBuf;

/// WiX v3 source namespace.
pub const WIX_NAMESPACE: &str = "http://schemas.microsoft.com/wix/2006/wi";

/// Complete manifest ready for serialization.
#[derive(Clone, Debug)]
pub struct Manifest {
    pub product: Product,
    pub package: Package,
    pub media: Media,
    pub properties: Vec<Property>,
    pub tree: LogicalTree,
    pub menu: MenuComponent,
    pub feature: Feature,
}

impl Manifest {
    /// Number of file components (the menu component is not counted).
    pub fn component_count(&self) -> usize {
        self.tree.component_count()
    }
}

/// `<Product>` attributes.
#[derive(Clone, Debug)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub language: String,
    pub codepage: String,
    pub version: String,
    pub manufacturer: String,
    pub upgrade_code: String,
}

/// `<Package>` summary information.
#[derive(Clone, Debug)]
pub struct Package {
    pub keywords: String,
    pub description: String,
    pub comments: Option<String>,
    pub manufacturer: String,
    pub installer_version: String,
    pub languages: String,
    pub summary_codepage: String,
}

/// `<Media>` record; a single embedded cabinet.
#[derive(Clone, Debug)]
pub struct Media {
    pub id: String,
    pub cabinet: String,
    pub embed_cab: bool,
    pub disk_prompt: String,
}

#[derive(Clone, Debug)]
pub struct Property {
    pub id: String,
    pub value: String,
}

/// `<Feature>` aggregating every component.
#[derive(Clone, Debug)]
pub struct Feature {
    pub id: String,
    pub title: String,
    pub description: String,
    pub component_refs: Vec<ComponentRef>,
}

impl Feature {
    pub fn add_component(&mut self, id: impl Into<String>) {
        self.component_refs.push(ComponentRef { id: id.into() });
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComponentRef {
    pub id: String,
}

/// Installable unit wrapping exactly one file.
#[derive(Clone, Debug)]
pub struct Component {
    pub id: String,
    pub guid: String,
    pub file: File,
}

/// `<File>` inside a [`Component`].
#[derive(Clone, Debug)]
pub struct File {
    pub id: String,
    pub name: String,
    pub disk_id: String,
    /// Absolute source path, copied in when the package is compiled.
    pub source: PathBuf,
}

/// The fixed start menu component holding shortcuts.
#[derive(Clone, Debug)]
pub struct MenuComponent {
    pub id: String,
    pub guid: String,
    pub registry_value: RegistryValue,
    pub remove_folder: RemoveFolder,
    pub shortcuts: Vec<Shortcut>,
}

/// HKCU key path marker for the per-user menu component.
#[derive(Clone, Debug)]
pub struct RegistryValue {
    pub root: String,
    pub key: String,
    pub value_type: String,
    pub value: String,
}

/// Removes the menu folder on uninstall.
#[derive(Clone, Debug)]
pub struct RemoveFolder {
    pub id: String,
    pub on: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Shortcut {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub working_directory: Option<String>,
    /// `[#File_...]` reference to the target file.
    pub target: String,
}
