//! WiX output settings.

use serde::Deserialize;

/// Separator used when a masked path is rendered as a registry key.
///
/// Registries written on Windows by older tooling use backslash keys; pick
/// [`KeySeparator::Backslash`] to keep reusing their GUIDs.
///
/// # Configuration
///
/// ```toml
/// [wix]
/// key_separator = "\\"
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Deserialize)]
pub enum KeySeparator {
    /// `app/lib/helper.bin`
    #[default]
    #[serde(rename = "/")]
    Slash,

    /// `app\lib\helper.bin`
    #[serde(rename = "\\")]
    Backslash,
}

impl KeySeparator {
    pub fn as_str(self) -> &'static str {
        match self {
            KeySeparator::Slash => "/",
            KeySeparator::Backslash => "\\",
        }
    }
}

/// What to do when the GUID registry exists but cannot be read or parsed.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum RegistryLoadPolicy {
    /// Abort the run. Silently dropping archived GUIDs would break upgrades.
    #[default]
    Strict,

    /// Discard the broken registry with a warning and issue new GUIDs.
    StartFresh,
}

/// WiX source generation settings.
///
/// # Configuration
///
/// ```toml
/// [wix]
/// cabinet = "mailpile.cab"
/// disk_prompt = "Mailpile 1.0 Media [1]"
/// key_separator = "/"
/// ```
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct WixSettings {
    /// Cabinet file name for the single embedded media record.
    ///
    /// Default: `media1.cab`
    pub cabinet: String,

    /// Value of the `DiskPrompt` property.
    ///
    /// Default: None (`"<name> <version> Media [1]"`)
    pub disk_prompt: Option<String>,

    /// Separator for registry keys and element id hashing.
    ///
    /// Default: [`KeySeparator::Slash`]
    pub key_separator: KeySeparator,

    /// Indent width in spaces for both output files.
    ///
    /// Default: 2
    pub indent: usize,

    /// Handling of an unreadable or corrupt GUID registry.
    ///
    /// Only settable from the command line.
    #[serde(skip)]
    pub registry_policy: RegistryLoadPolicy,
}

impl Default for WixSettings {
    fn default() -> Self {
        Self {
            cabinet: "media1.cab".to_string(),
            disk_prompt: None,
            key_separator: KeySeparator::Slash,
            indent: 2,
            registry_policy: RegistryLoadPolicy::Strict,
        }
    }
}
