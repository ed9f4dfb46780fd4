//! Source groups scanned into the install directory.

use crate::bundler::{
    error::{Error, ErrorExt, Result},
    platform::windows::wix::path::MaskedPath,
};
use path_absolutize::Absolutize;
use regex::Regex;
use serde::Deserialize;
use std::{collections::BTreeMap, path::PathBuf};

/// Start menu shortcut for one file of a group.
///
/// # Configuration
///
/// ```toml
/// [groups.scripts.shortcuts."bin/launch.bat"]
/// id = "AppMenuShortcut"
/// name = "App"
/// description = "Launch the app"
/// working_directory = "INSTALLDIR"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ShortcutSettings {
    /// Shortcut element id.
    ///
    /// Default: None (mangled from the file's masked path)
    #[serde(default)]
    pub id: Option<String>,

    /// Name shown in the start menu.
    pub name: String,

    /// Tooltip text.
    #[serde(default)]
    pub description: Option<String>,

    /// Id of the directory the shortcut starts in.
    #[serde(default)]
    pub working_directory: Option<String>,
}

/// One configured source tree.
///
/// The root directory and its contents land in the install directory as
/// `<install dir>/<root dir name>/...`.
#[derive(Debug, Clone)]
pub struct GroupSettings {
    name: String,
    uuid: Option<uuid::Uuid>,
    root: PathBuf,
    patterns: Vec<String>,
    ignore: Vec<Regex>,
    shortcuts: BTreeMap<MaskedPath, ShortcutSettings>,
}

impl GroupSettings {
    /// Validate and compile a group.
    ///
    /// A relative `root` is resolved against the current directory.
    ///
    /// Each ignore pattern is anchored at the start of the masked path, so
    /// `.*\.pyc$` ignores every `.pyc` file while `lib/` only matches a
    /// top-level `lib` directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPattern`] for a pattern that does not compile,
    /// or a generic error for an empty name, a root without a parent, or an
    /// unnamed shortcut.
    pub fn new(
        name: impl Into<String>,
        root: impl Into<PathBuf>,
        ignore: &[String],
        shortcuts: BTreeMap<String, ShortcutSettings>,
    ) -> Result<Self> {
        let name = name.into();
        let root: PathBuf = root.into();
        let root = root
            .absolutize()
            .fs_context("resolving group root", &root)?
            .into_owned();

        if name.trim().is_empty() {
            return Err(Error::GenericError("group name cannot be empty".into()));
        }
        if root.parent().is_none() || root.file_name().is_none() {
            return Err(Error::GenericError(format!(
                "group `{}` root {} must be a directory below a parent",
                name,
                root.display()
            )));
        }

        let ignore_regexes = ignore
            .iter()
            .map(|pattern| {
                Regex::new(&format!("^(?:{pattern})")).map_err(|error| Error::InvalidPattern {
                    group: name.clone(),
                    pattern: pattern.clone(),
                    error,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut normalized = BTreeMap::new();
        for (key, shortcut) in shortcuts {
            if shortcut.name.trim().is_empty() {
                return Err(Error::GenericError(format!(
                    "shortcut `{}` in group `{}` has an empty name",
                    key, name
                )));
            }
            normalized.insert(MaskedPath::parse(&key), shortcut);
        }

        Ok(Self {
            name,
            uuid: None,
            root,
            patterns: ignore.to_vec(),
            ignore: ignore_regexes,
            shortcuts: normalized,
        })
    }

    /// Attach the reserved group GUID.
    pub fn with_uuid(mut self, uuid: uuid::Uuid) -> Self {
        self.uuid = Some(uuid);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Reserved per-group GUID; validated but not emitted.
    pub fn uuid(&self) -> Option<uuid::Uuid> {
        self.uuid
    }

    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    /// Ignore patterns as configured.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Whether the masked path key matches any ignore pattern.
    pub fn is_ignored(&self, key: &str) -> bool {
        self.ignore.iter().any(|re| re.is_match(key))
    }

    pub fn shortcuts(&self) -> &BTreeMap<MaskedPath, ShortcutSettings> {
        &self.shortcuts
    }
}
