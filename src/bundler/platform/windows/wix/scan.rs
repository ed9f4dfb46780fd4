//! Group scanning.
//!
//! Walks a group root and, for every retained file, places a component with
//! its file under the matching logical directory, references it from the
//! feature and attaches any configured shortcut to the menu component.

use super::{
    mangle,
    manifest::{Component, Feature, File, MenuComponent, Shortcut},
    path::MaskedPath,
    registry::GuidRegistry,
    tree::LogicalTree,
};
use crate::bundler::{
    error::{Context, Error, ErrorExt, Result},
    settings::{GroupSettings, KeySeparator},
};
use std::{collections::BTreeSet, path::Path};
use walkdir::WalkDir;

/// Outcome of scanning one group.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScanReport {
    pub group: String,
    /// Components created.
    pub files: usize,
    /// Files skipped by ignore patterns.
    pub ignored: usize,
    /// Shortcuts attached to the menu component.
    pub shortcuts: usize,
    /// Configured shortcut keys no scanned file matched.
    pub unmatched_shortcuts: Vec<String>,
}

/// Scanner borrowing the run's registry, tree, feature and menu component.
pub struct GroupScanner<'a> {
    registry: &'a mut GuidRegistry,
    tree: &'a mut LogicalTree,
    feature: &'a mut Feature,
    menu: &'a mut MenuComponent,
    separator: KeySeparator,
}

impl<'a> GroupScanner<'a> {
    pub fn new(
        registry: &'a mut GuidRegistry,
        tree: &'a mut LogicalTree,
        feature: &'a mut Feature,
        menu: &'a mut MenuComponent,
        separator: KeySeparator,
    ) -> Self {
        Self {
            registry,
            tree,
            feature,
            menu,
            separator,
        }
    }

    /// Scan `group` depth-first in file name order.
    ///
    /// # Errors
    ///
    /// A missing root, an unreadable directory ([`Error::Walk`]) or an
    /// unreadable file ([`Error::Fs`]) aborts the scan. A partial group would
    /// silently drop installable files.
    pub fn scan(&mut self, group: &GroupSettings) -> Result<ScanReport> {
        let root = group.root();
        let mask = root
            .parent()
            .context(format!("group root {} has no parent", root.display()))?;

        let metadata = std::fs::metadata(root).fs_context("reading group root", root)?;
        if !metadata.is_dir() {
            crate::bail!(
                "group '{}' root {} is not a directory",
                group.name(),
                root.display()
            );
        }

        log::info!("Scanning group '{}' at {}", group.name(), root.display());

        let mut report = ScanReport {
            group: group.name().to_string(),
            ..Default::default()
        };
        let mut matched = BTreeSet::new();

        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter();

        for entry in walker {
            let entry = entry.map_err(|error| Error::Walk {
                group: group.name().to_string(),
                error,
            })?;

            let is_file = entry.file_type().is_file()
                || (entry.file_type().is_symlink() && entry.path().is_file());
            if !is_file {
                continue;
            }

            let path = MaskedPath::from_fs(mask, entry.path())?;
            let key = path.key(self.separator);

            if group.is_ignored(&key) {
                log::info!("Ignoring \"{}\"", key);
                report.ignored += 1;
                continue;
            }
            log::debug!("Processing file \"{}\"", key);

            let file_id = self.add_file(&path, &key, entry.path())?;
            report.files += 1;

            if let Some(settings) = group.shortcuts().get(&path) {
                let shortcut = Shortcut {
                    id: settings
                        .id
                        .clone()
                        .unwrap_or_else(|| mangle::shortcut_id(&key)),
                    name: settings.name.clone(),
                    description: settings.description.clone(),
                    working_directory: settings.working_directory.clone(),
                    target: format!("[#{}]", file_id),
                };
                log::info!("Created shortcut '{}' for '{}'", shortcut.name, key);
                self.menu.shortcuts.push(shortcut);
                matched.insert(path);
                report.shortcuts += 1;
            }
        }

        for path in group.shortcuts().keys() {
            if !matched.contains(path) {
                let key = path.key(self.separator);
                log::warn!(
                    "Shortcut '{}' in group '{}' matches no scanned file; it was not created",
                    key,
                    group.name()
                );
                report.unmatched_shortcuts.push(key);
            }
        }

        Ok(report)
    }

    /// Add the component for one file; returns its `File` element id.
    fn add_file(&mut self, path: &MaskedPath, key: &str, source: &Path) -> Result<String> {
        let parent = path.parent().unwrap_or_default();
        let file_name = path
            .file_name()
            .context(format!("scanned path {} has no file name", source.display()))?
            .to_string();

        // Source must be readable when the installer is compiled
        std::fs::File::open(source).fs_context("opening source file", source)?;

        let dir = self.tree.ensure_directory(&parent);
        let component_id = mangle::component_id(key);
        let file_id = mangle::file_id(key);

        let component = Component {
            id: component_id.clone(),
            guid: self.registry.get_or_create(key),
            file: File {
                id: file_id.clone(),
                name: file_name,
                disk_id: "1".to_string(),
                source: source.to_path_buf(),
            },
        };
        self.tree.attach_component(dir, component);
        self.feature.add_component(component_id);

        Ok(file_id)
    }
}
