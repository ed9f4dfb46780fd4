//! End-to-end manifest generation over real directory trees.

use kodegen_bundler_wix::bundler::{
    BundledArtifact, Bundler, Error, platform::windows::wix::mangle,
    platform::windows::wix::registry::MENU_COMPONENT_KEY,
};
use kodegen_bundler_wix::metadata::{LoadOptions, load_config};
use kodegen_bundler_wix::BundlerError;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const HEADER: &str = r#"
name = "App"
version = "1.0.0"
manufacturer = "Acme"
product_id = "19671260-92a2-437d-bb3a-d47e91e3cf23"
upgrade_code = "4685a239-2c80-4f51-8476-791316d2df3d"
"#;

struct Project {
    dir: TempDir,
}

impl Project {
    /// Project with `src/app/main.bin` and `src/app/lib/helper.bin`.
    fn new() -> Self {
        let project = Self {
            dir: tempfile::tempdir().unwrap(),
        };
        project.file("src/app/main.bin", "main");
        project.file("src/app/lib/helper.bin", "helper");
        project
    }

    fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    fn file(&self, relative: &str, content: &str) {
        let path = self.path(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn config(&self, body: &str) -> PathBuf {
        let path = self.path("app.toml");
        fs::write(&path, format!("{HEADER}\n{body}")).unwrap();
        path
    }

    fn generate(&self, body: &str) -> kodegen_bundler_wix::Result<BundledArtifact> {
        let settings = load_config(&self.config(body), LoadOptions::default())?;
        Ok(Bundler::new(settings).bundle()?)
    }

    fn manifest(&self) -> String {
        fs::read_to_string(self.path("app.wxs")).unwrap()
    }

    fn registry(&self) -> BTreeMap<String, String> {
        let content = fs::read_to_string(self.path("app.uuid.json")).unwrap();
        serde_json::from_str(&content).unwrap()
    }
}

const APP_GROUP: &str = r#"
[groups.app]
root = "src/app"
"#;

#[test]
fn test_single_group_manifest() {
    let project = Project::new();
    let artifact = project.generate(APP_GROUP).unwrap();

    assert_eq!(artifact.components, 2);
    assert_eq!(artifact.paths, vec![project.path("app.wxs"), project.path("app.uuid.json")]);
    assert_eq!(artifact.reports[0].files, 2);

    let wxs = project.manifest();
    assert!(wxs.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
    assert!(wxs.ends_with("</Wix>\n"));
    for key in ["app/main.bin", "app/lib/helper.bin"] {
        assert!(wxs.contains(&format!("<Component Id=\"{}\"", mangle::component_id(key))));
        assert!(wxs.contains(&format!("<File Id=\"{}\"", mangle::file_id(key))));
        assert!(wxs.contains(&format!("<ComponentRef Id=\"{}\"/>", mangle::component_id(key))));
    }
    assert!(wxs.contains(&format!(
        "<Directory Id=\"{}\" Name=\"app\">",
        mangle::directory_id("app")
    )));
    assert!(wxs.contains(&format!(
        "<Directory Id=\"{}\" Name=\"lib\">",
        mangle::directory_id("app/lib")
    )));

    // lib is nested inside app, which is nested inside INSTALLDIR
    let install = wxs.find("Id=\"INSTALLDIR\"").unwrap();
    let app = wxs.find(&mangle::directory_id("app")).unwrap();
    let lib = wxs.find(&mangle::directory_id("app/lib")).unwrap();
    assert!(install < app && app < lib);

    let registry = project.registry();
    assert_eq!(registry.len(), 3);
    assert!(registry.contains_key(MENU_COMPONENT_KEY));
    for key in ["app/main.bin", "app/lib/helper.bin"] {
        let guid = &registry[key];
        assert!(uuid::Uuid::parse_str(guid).is_ok(), "{key} -> {guid}");
        assert!(wxs.contains(&format!("Guid=\"{guid}\"")));
    }
    assert_eq!(artifact.minted.len(), 3);
}

#[test]
fn test_skeleton_and_menu_component() {
    let project = Project::new();
    project.generate(APP_GROUP).unwrap();
    let wxs = project.manifest();

    assert!(wxs.contains("<Wix xmlns=\"http://schemas.microsoft.com/wix/2006/wi\">"));
    assert!(wxs.contains("Name=\"App 1.0.0\""));
    assert!(wxs.contains("UpgradeCode=\"4685a239-2c80-4f51-8476-791316d2df3d\""));
    assert!(wxs.contains("<Directory Id=\"TARGETDIR\" Name=\"SourceDir\">"));
    assert!(wxs.contains("<Directory Id=\"ManufacturerFolder\" Name=\"Acme\">"));
    assert!(wxs.contains("<Directory Id=\"INSTALLDIR\" Name=\"App\">"));
    assert!(wxs.contains("<Directory Id=\"ProgramMenuDir\" Name=\"App 1.0.0\">"));
    assert!(wxs.contains("<RemoveFolder Id=\"ProgramMenuDir\" On=\"uninstall\"/>"));
    assert!(wxs.contains("Key=\"Software\\[Manufacturer]\\[ProductName]\""));

    // Menu component is always the first feature reference
    let refs: Vec<&str> = wxs.matches("<ComponentRef Id=\"").collect();
    assert_eq!(refs.len(), 3);
    let first_ref = wxs.find("<ComponentRef").unwrap();
    assert!(wxs[first_ref..].starts_with("<ComponentRef Id=\"ProgramMenuDir\"/>"));
}

#[test]
fn test_exclusion_removes_everything() {
    let project = Project::new();
    let artifact = project
        .generate(
            r#"
[groups.app]
root = "src/app"
ignore = ['.*\.bin$']
"#,
        )
        .unwrap();

    assert_eq!(artifact.components, 0);
    assert_eq!(artifact.reports[0].ignored, 2);

    let wxs = project.manifest();
    assert!(!wxs.contains("<File "));
    assert_eq!(wxs.matches("<ComponentRef ").count(), 1);
    assert!(wxs.contains("<ComponentRef Id=\"ProgramMenuDir\"/>"));

    let registry = project.registry();
    assert_eq!(registry.keys().collect::<Vec<_>>(), vec![MENU_COMPONENT_KEY]);
}

#[test]
fn test_exclusion_is_anchored_at_start() {
    let project = Project::new();

    // Does not match at position 0 of "app/lib/helper.bin"
    let artifact = project
        .generate("[groups.app]\nroot = \"src/app\"\nignore = ['lib/']\n")
        .unwrap();
    assert_eq!(artifact.components, 2);

    let artifact = project
        .generate("[groups.app]\nroot = \"src/app\"\nignore = ['app/lib/']\n")
        .unwrap();
    assert_eq!(artifact.components, 1);
    assert!(!project.manifest().contains(&mangle::directory_id("app/lib")));
}

#[test]
fn test_existing_registry_entry_preserved() {
    let project = Project::new();
    fs::write(project.path("app.uuid.json"), r#"{"app/main.bin": "X"}"#).unwrap();

    let artifact = project.generate(APP_GROUP).unwrap();
    assert!(!artifact.minted.contains(&"app/main.bin".to_string()));

    let wxs = project.manifest();
    assert!(wxs.contains(&format!(
        "<Component Id=\"{}\" Guid=\"X\">",
        mangle::component_id("app/main.bin")
    )));
    assert_eq!(project.registry()["app/main.bin"], "X");
}

#[test]
fn test_rerun_is_byte_identical() {
    let project = Project::new();
    project.generate(APP_GROUP).unwrap();
    let wxs = fs::read(project.path("app.wxs")).unwrap();
    let json = fs::read(project.path("app.uuid.json")).unwrap();

    let artifact = project.generate(APP_GROUP).unwrap();
    assert!(artifact.minted.is_empty());
    assert_eq!(fs::read(project.path("app.wxs")).unwrap(), wxs);
    assert_eq!(fs::read(project.path("app.uuid.json")).unwrap(), json);
}

#[test]
fn test_guids_survive_added_and_removed_files() {
    let project = Project::new();
    project.generate(APP_GROUP).unwrap();
    let before = project.registry();

    project.file("src/app/aaa/new.bin", "new");
    project.file("src/app/zzz.bin", "new");
    fs::remove_file(project.path("src/app/lib/helper.bin")).unwrap();

    let artifact = project.generate(APP_GROUP).unwrap();
    let after = project.registry();

    assert_eq!(artifact.components, 3);
    assert_eq!(
        artifact.minted,
        vec!["app/aaa/new.bin".to_string(), "app/zzz.bin".to_string()]
    );
    // Removed files keep their archived GUID
    for (key, guid) in &before {
        assert_eq!(after.get(key), Some(guid), "{key}");
    }
    assert!(!project.manifest().contains(&mangle::component_id("app/lib/helper.bin")));
}

#[test]
fn test_shortcuts_attach_to_menu_component() {
    let project = Project::new();
    let artifact = project
        .generate(
            r#"
[groups.app]
root = "src/app"

[groups.app.shortcuts.'app\main.bin']
id = "AppShortcut"
name = "App"
description = "Launch App"
working_directory = "INSTALLDIR"

[groups.app.shortcuts."app/missing.exe"]
name = "Missing"
"#,
        )
        .unwrap();

    let report = &artifact.reports[0];
    assert_eq!(report.shortcuts, 1);
    assert_eq!(report.unmatched_shortcuts, vec!["app/missing.exe".to_string()]);

    let wxs = project.manifest();
    assert!(wxs.contains(&format!(
        "<Shortcut Id=\"AppShortcut\" Name=\"App\" Description=\"Launch App\" WorkingDirectory=\"INSTALLDIR\" Target=\"[#{}]\"/>",
        mangle::file_id("app/main.bin")
    )));
    assert!(!wxs.contains("Name=\"Missing\""));

    // Shortcuts live inside the menu component, after RemoveFolder
    let remove = wxs.find("<RemoveFolder").unwrap();
    let shortcut = wxs.find("<Shortcut ").unwrap();
    assert!(remove < shortcut);
}

#[test]
fn test_shared_directories_emitted_once() {
    let project = Project::new();
    project.file("src/app/lib/other.bin", "other");
    project.file("src/docs/readme.txt", "docs");

    let artifact = project
        .generate(
            r#"
[groups.app]
root = "src/app"

[groups.docs]
root = "src/docs"
"#,
        )
        .unwrap();

    assert_eq!(artifact.components, 4);
    assert_eq!(artifact.reports.len(), 2);

    let wxs = project.manifest();
    assert_eq!(wxs.matches("Name=\"lib\"").count(), 1);
    assert_eq!(wxs.matches("Name=\"docs\"").count(), 1);
    assert!(wxs.contains(&mangle::component_id("docs/readme.txt")));
}

#[test]
fn test_backslash_key_separator() {
    let project = Project::new();
    project
        .generate("[wix]\nkey_separator = \"\\\\\"\n\n[groups.app]\nroot = \"src/app\"\n")
        .unwrap();

    let registry = project.registry();
    assert!(registry.contains_key("app\\lib\\helper.bin"));
    assert!(project
        .manifest()
        .contains(&mangle::component_id("app\\lib\\helper.bin")));
}

#[test]
fn test_indent_applies_to_both_outputs() {
    let project = Project::new();
    let options = LoadOptions {
        indent: Some(4),
        ..Default::default()
    };
    let settings = load_config(&project.config(APP_GROUP), options).unwrap();
    Bundler::new(settings).bundle().unwrap();

    assert!(project.manifest().contains("\n    <Product "));
    let json = fs::read_to_string(project.path("app.uuid.json")).unwrap();
    assert!(json.contains("\n    \"app/main.bin\": "));
    assert!(json.ends_with("}\n"));
}

#[test]
fn test_missing_root_writes_nothing() {
    let project = Project::new();
    let result = project.generate("[groups.gone]\nroot = \"src/gone\"\n");

    assert!(matches!(
        result,
        Err(BundlerError::Bundler(Error::Fs { .. }))
    ));
    assert!(!project.path("app.wxs").exists());
    assert!(!project.path("app.uuid.json").exists());
}

#[test]
fn test_corrupt_registry_is_fatal_unless_fresh() {
    let project = Project::new();
    fs::write(project.path("app.uuid.json"), "{ not json").unwrap();

    let result = project.generate(APP_GROUP);
    assert!(matches!(
        result,
        Err(BundlerError::Bundler(Error::CorruptRegistry { .. }))
    ));
    assert!(!project.path("app.wxs").exists());

    let options = LoadOptions {
        registry_policy: kodegen_bundler_wix::bundler::RegistryLoadPolicy::StartFresh,
        ..Default::default()
    };
    let settings = load_config(&project.config(APP_GROUP), options).unwrap();
    let artifact = Bundler::new(settings).bundle().unwrap();
    assert_eq!(artifact.minted.len(), 3);
    assert_eq!(project.registry().len(), 3);
}

#[test]
fn test_group_roots_with_same_name_rejected() {
    let project = Project::new();
    project.file("other/app/x.bin", "x");
    let result = project.generate(
        r#"
[groups.one]
root = "src/app"

[groups.two]
root = "other/app"
"#,
    );
    assert!(matches!(
        result,
        Err(BundlerError::Bundler(Error::GenericError(_)))
    ));
}

#[cfg(unix)]
#[test]
fn test_symlinked_file_included_but_directory_not_followed() {
    let project = Project::new();
    project.file("outside/dir/inner.bin", "inner");
    project.file("outside/target.bin", "target");
    std::os::unix::fs::symlink(project.path("outside/target.bin"), project.path("src/app/link.bin"))
        .unwrap();
    std::os::unix::fs::symlink(project.path("outside/dir"), project.path("src/app/linkdir"))
        .unwrap();

    let artifact = project.generate(APP_GROUP).unwrap();
    assert_eq!(artifact.components, 3);

    let wxs = project.manifest();
    assert!(wxs.contains(&mangle::component_id("app/link.bin")));
    assert!(!wxs.contains("inner.bin"));
}

#[test]
fn test_unreplaceable_registry_leaves_manifest_untouched() {
    let project = Project::new();
    fs::create_dir_all(project.path("app.uuid.json/occupied")).unwrap();

    let options = LoadOptions {
        registry_policy: kodegen_bundler_wix::bundler::RegistryLoadPolicy::StartFresh,
        ..Default::default()
    };
    let settings = load_config(&project.config(APP_GROUP), options).unwrap();
    let result = Bundler::new(settings).bundle();

    assert!(matches!(result, Err(Error::Fs { .. })));
    assert!(project.path("app.uuid.json").is_dir());
    assert!(!project.path("app.wxs").exists());
}

/// Restores permissions on drop so the temp dir can be removed.
#[cfg(unix)]
struct Locked(PathBuf, u32);

#[cfg(unix)]
impl Locked {
    fn new(path: PathBuf) -> Self {
        use std::os::unix::fs::PermissionsExt;
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o000)).unwrap();
        Self(path, mode)
    }

    /// Privileged users read through mode 000.
    fn is_enforced(&self) -> bool {
        if self.0.is_dir() {
            fs::read_dir(&self.0).is_err()
        } else {
            fs::File::open(&self.0).is_err()
        }
    }
}

#[cfg(unix)]
impl Drop for Locked {
    fn drop(&mut self) {
        use std::os::unix::fs::PermissionsExt;
        let _ = fs::set_permissions(&self.0, fs::Permissions::from_mode(self.1));
    }
}

#[cfg(unix)]
#[test]
fn test_unreadable_file_aborts_run() {
    let project = Project::new();
    let locked = Locked::new(project.path("src/app/main.bin"));
    if !locked.is_enforced() {
        eprintln!("skipping: permissions not enforced for this user");
        return;
    }

    let result = project.generate(APP_GROUP);
    assert!(matches!(
        result,
        Err(BundlerError::Bundler(Error::Fs { .. }))
    ));
    assert!(!project.path("app.wxs").exists());
    assert!(!project.path("app.uuid.json").exists());
}

#[cfg(unix)]
#[test]
fn test_unreadable_directory_aborts_run() {
    let project = Project::new();
    let locked = Locked::new(project.path("src/app/lib"));
    if !locked.is_enforced() {
        eprintln!("skipping: permissions not enforced for this user");
        return;
    }

    let result = project.generate(APP_GROUP);
    assert!(matches!(
        result,
        Err(BundlerError::Bundler(Error::Walk { .. }))
    ));
    assert!(!project.path("app.wxs").exists());
    assert!(!project.path("app.uuid.json").exists());
}
