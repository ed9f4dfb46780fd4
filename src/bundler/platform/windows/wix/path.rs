//! Group-relative path keys.
//!
//! A [`MaskedPath`] is a file or directory path relative to its group root's
//! parent. It is the single key used for registry lookups, element id
//! mangling, directory caching and shortcut matching, so it is normalized
//! once: segments are stored individually and only joined with the
//! configured separator when a string key is needed.

use crate::bundler::{
    error::{Error, Result},
    settings::KeySeparator,
};
use std::{
    fmt,
    path::{Component, Path},
};

/// Normalized group-relative path.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaskedPath {
    segments: Vec<String>,
}

impl MaskedPath {
    /// The empty path, which resolves to the install directory itself.
    pub fn root() -> Self {
        Self::default()
    }

    /// Strip `mask` from `path` and normalize the remainder.
    ///
    /// Fails if `path` is not under `mask` or contains non-UTF-8 segments.
    pub fn from_fs(mask: &Path, path: &Path) -> Result<Self> {
        let relative = path.strip_prefix(mask)?;
        let mut segments = Vec::new();
        for component in relative.components() {
            match component {
                Component::Normal(segment) => {
                    let segment = segment
                        .to_str()
                        .ok_or_else(|| Error::NonUtf8Path(path.to_path_buf()))?;
                    segments.push(segment.to_string());
                }
                Component::CurDir => {}
                other => {
                    return Err(Error::GenericError(format!(
                        "unexpected path component {:?} in {}",
                        other,
                        path.display()
                    )));
                }
            }
        }
        Ok(Self { segments })
    }

    /// Parse a configured key, accepting either separator style.
    pub fn parse(key: &str) -> Self {
        let segments = key
            .split(['/', '\\'])
            .filter(|s| !s.is_empty() && *s != ".")
            .map(String::from)
            .collect();
        Self { segments }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Containing path, or `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        let (_, rest) = self.segments.split_last()?;
        Some(Self {
            segments: rest.to_vec(),
        })
    }

    /// Last segment, used as the element display name.
    pub fn file_name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    #[cfg(test)]
    pub fn join(&self, segment: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.to_string());
        Self { segments }
    }

    #[cfg(test)]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Render as a registry/mangling key.
    pub fn key(&self, separator: KeySeparator) -> String {
        self.segments.join(separator.as_str())
    }
}

impl fmt::Display for MaskedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key(KeySeparator::Slash))
    }
}
