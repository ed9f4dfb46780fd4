//! Archival GUID registry.
//!
//! Windows Installer tracks every component by GUID, and a component's GUID
//! must never change once shipped. The registry maps each masked path key to
//! the GUID first issued for it and is persisted between runs.
//!
//! Entries are only ever added. A GUID for a file that was later removed or
//! renamed stays in the registry forever: reissuing it for different content
//! would break component rules, so stale entries are kept rather than purged.

use crate::bundler::{
    error::{Error, ErrorExt, Result},
    settings::RegistryLoadPolicy,
};
use serde::Serialize;
use std::{collections::BTreeMap, io, path::Path};

/// Registry key of the fixed start menu component.
pub const MENU_COMPONENT_KEY: &str = "\\windows\\ProgramMenuDir";

/// Path key to component GUID map.
#[derive(Clone, Debug, Default)]
pub struct GuidRegistry {
    entries: BTreeMap<String, String>,
    minted: Vec<String>,
}

impl GuidRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry seeded with previously archived entries.
    pub fn from_entries(entries: BTreeMap<String, String>) -> Self {
        Self {
            entries,
            minted: Vec::new(),
        }
    }

    /// Load the registry persisted at `path`.
    ///
    /// A missing file starts an empty registry with a warning. An unreadable
    /// or corrupt file is an error under [`RegistryLoadPolicy::Strict`]; with
    /// [`RegistryLoadPolicy::StartFresh`] it is discarded with a warning.
    pub fn load(path: &Path, policy: RegistryLoadPolicy) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::warn!(
                    "No GUID registry at {}; starting fresh, every component gets a new GUID",
                    path.display()
                );
                return Ok(Self::new());
            }
            Err(e) => {
                return match policy {
                    RegistryLoadPolicy::Strict => {
                        Err(e).fs_context("reading GUID registry", path)
                    }
                    RegistryLoadPolicy::StartFresh => {
                        log::warn!(
                            "Discarding unreadable GUID registry {}: {}",
                            path.display(),
                            e
                        );
                        Ok(Self::new())
                    }
                };
            }
        };

        match serde_json::from_str::<BTreeMap<String, String>>(&content) {
            Ok(entries) => {
                log::debug!(
                    "Loaded {} archived GUIDs from {}",
                    entries.len(),
                    path.display()
                );
                Ok(Self::from_entries(entries))
            }
            Err(error) => match policy {
                RegistryLoadPolicy::Strict => Err(Error::CorruptRegistry {
                    path: path.to_path_buf(),
                    error,
                }),
                RegistryLoadPolicy::StartFresh => {
                    log::warn!(
                        "Discarding corrupt GUID registry {} ({}); archived GUIDs will be replaced",
                        path.display(),
                        error
                    );
                    Ok(Self::new())
                }
            },
        }
    }

    /// Archived GUID for `key`, issuing and recording a new one on first sight.
    pub fn get_or_create(&mut self, key: &str) -> String {
        if let Some(guid) = self.entries.get(key) {
            return guid.clone();
        }

        let guid = uuid::Uuid::new_v4().to_string();
        log::warn!("Creating new GUID for '{}': '{}'", key, guid);
        self.entries.insert(key.to_string(), guid.clone());
        self.minted.push(key.to_string());
        guid
    }

    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys that received a new GUID during this run, in issue order.
    pub fn minted(&self) -> &[String] {
        &self.minted
    }

    /// Serialize the full registry, sorted by key, pretty-printed.
    pub fn to_json(&self, indent: usize) -> Result<Vec<u8>> {
        let indent = " ".repeat(indent);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
        let mut out = Vec::new();
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        self.entries.serialize(&mut serializer)?;
        out.push(b'\n');
        Ok(out)
    }
}
