//! WiX source serialization.
//!
//! Renders a [`Manifest`] as an indented, UTF-8, namespace-declared XML
//! document in a single pass. Attribute order is fixed per element so the
//! output is byte-for-byte reproducible.

use super::{
    manifest::{Component, Manifest, MenuComponent, WIX_NAMESPACE},
    tree::{DirEntry, DirId, LogicalTree},
};
use crate::bundler::error::{Error, Result};
use quick_xml::{
    Writer,
    events::{BytesDecl, BytesEnd, BytesStart, Event},
};
use std::fmt::Display;

fn xml_error(e: impl Display) -> Error {
    Error::Xml(e.to_string())
}

/// Render `manifest` with `indent` spaces per level.
pub fn render(manifest: &Manifest, indent: usize) -> Result<Vec<u8>> {
    let mut out = XmlOut {
        writer: Writer::new_with_indent(Vec::new(), b' ', indent),
    };

    out.event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    out.start("Wix", &[("xmlns", WIX_NAMESPACE)])?;

    let product = &manifest.product;
    out.start(
        "Product",
        &[
            ("Id", product.id.as_str()),
            ("Name", product.name.as_str()),
            ("Language", product.language.as_str()),
            ("Codepage", product.codepage.as_str()),
            ("Version", product.version.as_str()),
            ("Manufacturer", product.manufacturer.as_str()),
            ("UpgradeCode", product.upgrade_code.as_str()),
        ],
    )?;

    let package = &manifest.package;
    let mut attrs = vec![
        ("Id", "*"),
        ("Keywords", package.keywords.as_str()),
        ("Description", package.description.as_str()),
    ];
    if let Some(comments) = &package.comments {
        attrs.push(("Comments", comments.as_str()));
    }
    attrs.extend([
        ("Manufacturer", package.manufacturer.as_str()),
        ("InstallerVersion", package.installer_version.as_str()),
        ("Languages", package.languages.as_str()),
        ("Compressed", "yes"),
        ("SummaryCodepage", package.summary_codepage.as_str()),
    ]);
    out.empty("Package", &attrs)?;

    let media = &manifest.media;
    out.empty(
        "Media",
        &[
            ("Id", media.id.as_str()),
            ("Cabinet", media.cabinet.as_str()),
            ("EmbedCab", yes_no(media.embed_cab)),
            ("DiskPrompt", media.disk_prompt.as_str()),
        ],
    )?;

    for property in &manifest.properties {
        out.empty("Property", &[("Id", property.id.as_str()), ("Value", property.value.as_str())])?;
    }

    out.directory(&manifest.tree, manifest.tree.root(), &manifest.menu)?;

    let feature = &manifest.feature;
    let attrs = [
        ("Id", feature.id.as_str()),
        ("Title", feature.title.as_str()),
        ("Description", feature.description.as_str()),
    ];
    if feature.component_refs.is_empty() {
        out.empty("Feature", &attrs)?;
    } else {
        out.start("Feature", &attrs)?;
        for component_ref in &feature.component_refs {
            out.empty("ComponentRef", &[("Id", component_ref.id.as_str())])?;
        }
        out.end("Feature")?;
    }

    out.end("Product")?;
    out.end("Wix")?;

    let mut bytes = out.writer.into_inner();
    bytes.push(b'\n');
    Ok(bytes)
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

struct XmlOut {
    writer: Writer<Vec<u8>>,
}

impl XmlOut {
    fn event(&mut self, event: Event<'_>) -> Result<()> {
        self.writer.write_event(event).map_err(xml_error)
    }

    fn element<'a>(name: &'a str, attrs: &[(&str, &str)]) -> BytesStart<'a> {
        let mut element = BytesStart::new(name);
        for &attr in attrs {
            element.push_attribute(attr);
        }
        element
    }

    fn start(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        self.event(Event::Start(Self::element(name, attrs)))
    }

    fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        self.event(Event::Empty(Self::element(name, attrs)))
    }

    fn end(&mut self, name: &str) -> Result<()> {
        self.event(Event::End(BytesEnd::new(name)))
    }

    fn directory(&mut self, tree: &LogicalTree, dir: DirId, menu: &MenuComponent) -> Result<()> {
        let node = tree.node(dir);
        let mut attrs = vec![("Id", node.id.as_str())];
        if let Some(name) = &node.name {
            attrs.push(("Name", name.as_str()));
        }

        if node.entries.is_empty() {
            return self.empty("Directory", &attrs);
        }

        self.start("Directory", &attrs)?;
        for entry in &node.entries {
            match entry {
                DirEntry::Directory(child) => self.directory(tree, *child, menu)?,
                DirEntry::Component(component) => self.component(component)?,
                DirEntry::Menu => self.menu(menu)?,
            }
        }
        self.end("Directory")
    }

    fn component(&mut self, component: &Component) -> Result<()> {
        self.start(
            "Component",
            &[("Id", component.id.as_str()), ("Guid", component.guid.as_str())],
        )?;
        let file = &component.file;
        let source = file.source.to_string_lossy();
        self.empty(
            "File",
            &[
                ("Id", file.id.as_str()),
                ("Name", file.name.as_str()),
                ("DiskId", file.disk_id.as_str()),
                ("Source", source.as_ref()),
                ("KeyPath", "yes"),
            ],
        )?;
        self.end("Component")
    }

    fn menu(&mut self, menu: &MenuComponent) -> Result<()> {
        self.start("Component", &[("Id", menu.id.as_str()), ("Guid", menu.guid.as_str())])?;

        let value = &menu.registry_value;
        self.empty(
            "RegistryValue",
            &[
                ("Root", value.root.as_str()),
                ("Key", value.key.as_str()),
                ("Type", value.value_type.as_str()),
                ("Value", value.value.as_str()),
                ("KeyPath", "yes"),
            ],
        )?;
        self.empty(
            "RemoveFolder",
            &[("Id", menu.remove_folder.id.as_str()), ("On", menu.remove_folder.on.as_str())],
        )?;

        for shortcut in &menu.shortcuts {
            let mut attrs = vec![("Id", shortcut.id.as_str()), ("Name", shortcut.name.as_str())];
            if let Some(description) = &shortcut.description {
                attrs.push(("Description", description.as_str()));
            }
            if let Some(working_directory) = &shortcut.working_directory {
                attrs.push(("WorkingDirectory", working_directory.as_str()));
            }
            attrs.push(("Target", shortcut.target.as_str()));
            self.empty("Shortcut", &attrs)?;
        }

        self.end("Component")
    }
}
