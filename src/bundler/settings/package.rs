//! Product metadata.

use serde::Deserialize;

/// Product metadata written to `<Product>` and `<Package>`.
///
/// Maps from the top level of the packaging config file.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_wix::bundler::ProductSettings;
///
/// let product = ProductSettings {
///     name: "Mailpile".into(),
///     version: "1.0.0".into(),
///     manufacturer: "Mailpile ehf.".into(),
///     product_id: "19671260-92a2-437d-bb3a-d47e91e3cf23".into(),
///     upgrade_code: "4685a239-2c80-4f51-8476-791316d2df3d".into(),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ProductSettings {
    /// Product display name, without the version.
    pub name: String,

    /// Product version, 1 to 4 numeric parts (MSI `ProductVersion`).
    pub version: String,

    /// Publisher shown in Add/Remove Programs; also names the
    /// `Program Files` subdirectory.
    pub manufacturer: String,

    /// Product code GUID, or `*` to let the WiX compiler generate one.
    pub product_id: String,

    /// Upgrade code GUID. Must stay identical across every version.
    pub upgrade_code: String,

    /// Windows language id.
    ///
    /// Default: "1033" (en-US)
    #[serde(default = "default_language_code")]
    pub language_code: String,

    /// Codepage for the product and summary information.
    ///
    /// Default: "1252"
    #[serde(default = "default_codepage")]
    pub codepage: String,

    /// Minimum Windows Installer version times 100.
    ///
    /// Default: "200"
    #[serde(default = "default_installer_version")]
    pub installer_version: String,

    /// Package description.
    ///
    /// Default: None (`"<name> <version> Installer"`)
    #[serde(default)]
    pub description: Option<String>,

    /// Package comments, typically a license line.
    ///
    /// Default: None
    #[serde(default)]
    pub comments: Option<String>,

    /// Name of the install directory under the manufacturer directory.
    ///
    /// Default: None (uses `name`)
    #[serde(default)]
    pub install_dir_name: Option<String>,
}

fn default_language_code() -> String {
    "1033".to_string()
}

fn default_codepage() -> String {
    "1252".to_string()
}

fn default_installer_version() -> String {
    "200".to_string()
}

impl Default for ProductSettings {
    fn default() -> Self {
        Self {
            name: String::new(),
            version: String::new(),
            manufacturer: String::new(),
            product_id: String::new(),
            upgrade_code: String::new(),
            language_code: default_language_code(),
            codepage: default_codepage(),
            installer_version: default_installer_version(),
            description: None,
            comments: None,
            install_dir_name: None,
        }
    }
}

impl ProductSettings {
    /// `"<name> <version>"`, used for titles and the menu folder.
    pub fn title(&self) -> String {
        format!("{} {}", self.name, self.version)
    }

    pub fn install_dir_name(&self) -> &str {
        self.install_dir_name.as_deref().unwrap_or(&self.name)
    }
}
