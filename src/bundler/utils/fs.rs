//! File system utilities for output writing.
//!
//! Outputs are always replaced as whole files: each one is staged in a
//! temporary file next to its destination and then renamed over it.

use crate::bundler::error::{ErrorExt, Result};
use std::{io::Write, path::Path};
use tempfile::NamedTempFile;

/// Directory a file will be written into; `.` for bare file names.
fn destination_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Atomically replace each file in `files` with its contents, in order.
///
/// All files are staged before the first rename, so a failure while staging
/// leaves every destination untouched. Each rename is atomic on its own; if
/// one fails, earlier destinations are already replaced and later ones are
/// untouched. Callers order `files` so that any such prefix is consistent.
pub fn write_files_atomic(files: &[(&Path, &[u8])]) -> Result<()> {
    let mut staged = Vec::with_capacity(files.len());

    for &(path, contents) in files {
        let dir = destination_dir(path);
        std::fs::create_dir_all(dir).fs_context("creating output directory", dir)?;

        let mut temp = NamedTempFile::new_in(dir).fs_context("creating temporary file in", dir)?;
        temp.write_all(contents)
            .fs_context("writing temporary file for", path)?;
        temp.as_file()
            .sync_all()
            .fs_context("flushing temporary file for", path)?;
        staged.push((temp, path));
    }

    for (temp, path) in staged {
        temp.persist(path)
            .map_err(|e| e.error)
            .fs_context("replacing", path)?;
        log::debug!("Wrote {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_and_replaces_files() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("nested").join("a.wxs");
        let b = dir.path().join("b.json");
        std::fs::write(&b, b"old").unwrap();

        write_files_atomic(&[(a.as_path(), b"<Wix/>".as_slice()), (b.as_path(), b"{}".as_slice())])
            .unwrap();

        assert_eq!(std::fs::read(&a).unwrap(), b"<Wix/>");
        assert_eq!(std::fs::read(&b).unwrap(), b"{}");
        let leftovers = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 2);
    }

    #[test]
    fn test_failed_rename_leaves_later_files_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let blocked = dir.path().join("blocked.json");
        std::fs::create_dir_all(blocked.join("occupied")).unwrap();
        let later = dir.path().join("later.wxs");

        let result = write_files_atomic(&[
            (blocked.as_path(), b"{}".as_slice()),
            (later.as_path(), b"<Wix/>".as_slice()),
        ]);

        assert!(result.is_err());
        assert!(blocked.is_dir());
        assert!(!later.exists());
        // Staged temporaries are cleaned up
        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("blocked.json")]);
    }

    #[test]
    fn test_bare_file_name_uses_current_dir() {
        assert_eq!(destination_dir(Path::new("out.wxs")), Path::new("."));
        assert_eq!(destination_dir(Path::new("x/out.wxs")), Path::new("x"));
    }
}
