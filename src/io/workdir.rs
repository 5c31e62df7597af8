//! Filesystem operations scoped to the destination working directory.

use std::collections::BTreeSet;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use tracing::debug;

/// Names of the entries directly inside `dir` (shallow, no recursion).
pub fn list_top_level(dir: &Path) -> Result<BTreeSet<OsString>> {
    let mut entries = BTreeSet::new();
    for entry in fs::read_dir(dir).with_context(|| format!("list {}", dir.display()))? {
        let entry = entry.with_context(|| format!("read entry in {}", dir.display()))?;
        entries.insert(entry.file_name());
    }
    Ok(entries)
}

/// Create `dir/<name>` and move every entry in `movable` into it.
///
/// The subdirectory must not exist yet; there are no merge-into-existing
/// semantics. Entries keep their names and move as whole units. An empty
/// movable set still produces the (empty) subdirectory.
pub fn isolate(dir: &Path, name: &str, movable: &[OsString]) -> Result<PathBuf> {
    let target = dir.join(name);
    if target.exists() {
        return Err(anyhow!(
            "cannot isolate into {}: entry already exists",
            target.display()
        ));
    }
    fs::create_dir(&target).with_context(|| format!("create {}", target.display()))?;
    for entry in movable {
        let from = dir.join(entry);
        let to = target.join(entry);
        debug!(from = %from.display(), to = %to.display(), "moving entry");
        fs::rename(&from, &to)
            .with_context(|| format!("move {} into {}", from.display(), target.display()))?;
    }
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_top_level_is_shallow() {
        let temp = tempfile::tempdir().expect("tempdir");
        fs::write(temp.path().join("a.txt"), "a").expect("write");
        fs::create_dir(temp.path().join("sub")).expect("mkdir");
        fs::write(temp.path().join("sub/nested.txt"), "n").expect("write");

        let entries = list_top_level(temp.path()).expect("list");
        assert!(entries.contains(&OsString::from("a.txt")));
        assert!(entries.contains(&OsString::from("sub")));
        assert!(!entries.contains(&OsString::from("nested.txt")));
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn isolate_moves_entries_preserving_names() {
        let temp = tempfile::tempdir().expect("tempdir");
        fs::write(temp.path().join("kept.txt"), "kept").expect("write");
        fs::write(temp.path().join("moved.txt"), "moved").expect("write");
        fs::create_dir(temp.path().join("moved_dir")).expect("mkdir");
        fs::write(temp.path().join("moved_dir/inner.txt"), "inner").expect("write");

        let movable = vec![OsString::from("moved.txt"), OsString::from("moved_dir")];
        let target = isolate(temp.path(), "alpha", &movable).expect("isolate");

        assert_eq!(target, temp.path().join("alpha"));
        assert!(temp.path().join("kept.txt").exists());
        assert!(!temp.path().join("moved.txt").exists());
        assert!(temp.path().join("alpha/moved.txt").exists());
        assert!(temp.path().join("alpha/moved_dir/inner.txt").exists());
    }

    #[test]
    fn isolate_with_empty_set_creates_empty_directory() {
        let temp = tempfile::tempdir().expect("tempdir");
        let target = isolate(temp.path(), "alpha", &[]).expect("isolate");
        assert!(target.is_dir());
        assert!(list_top_level(&target).expect("list").is_empty());
    }

    #[test]
    fn isolate_refuses_existing_directory() {
        let temp = tempfile::tempdir().expect("tempdir");
        fs::create_dir(temp.path().join("alpha")).expect("mkdir");
        assert!(isolate(temp.path(), "alpha", &[]).is_err());
    }
}
