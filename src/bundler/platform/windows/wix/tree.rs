//! Logical installation directory tree.
//!
//! Nodes live in an arena owned by the tree and are addressed by [`DirId`].
//! Directories under the install root are materialized lazily from masked
//! paths and cached for the rest of the run, so every directory appears
//! exactly once no matter how many files reference it.

use super::{
    mangle,
    manifest::Component,
    path::MaskedPath,
};
use crate::bundler::settings::KeySeparator;
use std::collections::HashMap;

/// Handle to a directory node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DirId(usize);

/// Child entry of a directory, kept in insertion order.
#[derive(Clone, Debug)]
pub enum DirEntry {
    Directory(DirId),
    Component(Component),
    /// Position of the start menu component, rendered from the manifest.
    Menu,
}

/// One `<Directory>` element.
#[derive(Clone, Debug)]
pub struct DirectoryNode {
    pub id: String,
    pub name: Option<String>,
    pub entries: Vec<DirEntry>,
}

/// Arena of directory nodes rooted at `TARGETDIR`.
#[derive(Clone, Debug)]
pub struct LogicalTree {
    nodes: Vec<DirectoryNode>,
    cache: HashMap<MaskedPath, DirId>,
    install_root: DirId,
    separator: KeySeparator,
}

impl LogicalTree {
    /// New tree holding only its top-level node.
    ///
    /// The top-level node also serves as install root until
    /// [`set_install_root`](Self::set_install_root) is called.
    pub fn new(root_id: &str, root_name: Option<&str>, separator: KeySeparator) -> Self {
        let root = DirectoryNode {
            id: root_id.to_string(),
            name: root_name.map(String::from),
            entries: Vec::new(),
        };
        Self {
            nodes: vec![root],
            cache: HashMap::new(),
            install_root: DirId(0),
            separator,
        }
    }

    pub fn root(&self) -> DirId {
        DirId(0)
    }

    #[cfg(test)]
    pub fn install_root(&self) -> DirId {
        self.install_root
    }

    /// Directory that masked paths are placed under.
    pub fn set_install_root(&mut self, dir: DirId) {
        self.install_root = dir;
    }

    /// Append a fixed, explicitly named directory under `parent`.
    pub fn add_directory(&mut self, parent: DirId, id: &str, name: Option<&str>) -> DirId {
        let dir = DirId(self.nodes.len());
        self.nodes.push(DirectoryNode {
            id: id.to_string(),
            name: name.map(String::from),
            entries: Vec::new(),
        });
        self.nodes[parent.0].entries.push(DirEntry::Directory(dir));
        dir
    }

    /// Node for `path`, creating any missing ancestors under the install root.
    pub fn ensure_directory(&mut self, path: &MaskedPath) -> DirId {
        let mut missing = Vec::new();
        let mut cursor = path.clone();
        let mut parent = loop {
            if cursor.is_root() {
                break self.install_root;
            }
            if let Some(&dir) = self.cache.get(&cursor) {
                break dir;
            }
            let next = cursor.parent().unwrap_or_default();
            missing.push(cursor);
            cursor = next;
        };

        for path in missing.into_iter().rev() {
            let key = path.key(self.separator);
            let name = path.file_name().map(String::from);
            let dir = DirId(self.nodes.len());
            self.nodes.push(DirectoryNode {
                id: mangle::directory_id(&key),
                name,
                entries: Vec::new(),
            });
            self.nodes[parent.0].entries.push(DirEntry::Directory(dir));
            self.cache.insert(path, dir);
            parent = dir;
        }

        parent
    }

    pub fn attach_component(&mut self, dir: DirId, component: Component) {
        self.nodes[dir.0].entries.push(DirEntry::Component(component));
    }

    /// Mark where the start menu component is rendered.
    pub fn attach_menu(&mut self, dir: DirId) {
        self.nodes[dir.0].entries.push(DirEntry::Menu);
    }

    pub fn node(&self, dir: DirId) -> &DirectoryNode {
        &self.nodes[dir.0]
    }

    #[cfg(test)]
    /// Cached node for `path`, if it was materialized.
    pub fn lookup(&self, path: &MaskedPath) -> Option<DirId> {
        self.cache.get(path).copied()
    }

    #[cfg(test)]
    /// Every directory node, fixed ones included.
    pub fn directory_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn component_count(&self) -> usize {
        self.components().count()
    }

    /// All file components in node order.
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.nodes.iter().flat_map(|node| {
            node.entries.iter().filter_map(|entry| match entry {
                DirEntry::Component(component) => Some(component),
                _ => None,
            })
        })
    }
}
