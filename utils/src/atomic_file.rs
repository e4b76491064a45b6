//! Crash-safe file persistence.
//!
//! Writes go to a temp file in the destination directory which is then renamed
//! over the target, so readers see either the old bytes or the new ones. Where
//! rename-over-existing fails the old file is parked as `<name>.bak` for the
//! duration of the swap; [`recover_bak_file`] undoes a swap interrupted by a crash.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileMode {
    /// Inherit the process umask.
    Default,
    /// Owner read/write only (0o600 on Unix, ignored elsewhere).
    #[default]
    OwnerOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileSyncPolicy {
    /// `fsync` the temp file, then best-effort sync the parent directory.
    Durable,
    SkipSync,
}

#[derive(Debug, Clone, Copy)]
pub struct AtomicWriteOptions {
    pub sync: FileSyncPolicy,
    pub mode: FileMode,
}

impl Default for AtomicWriteOptions {
    fn default() -> Self {
        Self {
            sync: FileSyncPolicy::Durable,
            mode: FileMode::OwnerOnly,
        }
    }
}

fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(ToOwned::to_owned).unwrap_or_default();
    name.push(".bak");
    path.with_file_name(name)
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Restore `<path>.bak` when `path` itself is missing.
///
/// That combination only exists if a process died between parking the old
/// file and renaming the new one into place.
pub fn recover_bak_file(path: &Path) {
    let backup = backup_path(path);
    if path.exists() || !backup.exists() {
        return;
    }
    match fs::rename(&backup, path) {
        Ok(()) => {
            tracing::warn!(
                path = %path.display(),
                "Recovered .bak file from interrupted atomic write"
            );
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), "Failed to recover .bak file: {e}");
        }
    }
}

pub fn atomic_write_with_options(
    path: impl AsRef<Path>,
    bytes: &[u8],
    options: AtomicWriteOptions,
) -> io::Result<()> {
    let path = path.as_ref();
    let parent = parent_dir(path);
    fs::create_dir_all(parent)?;

    let mut tmp = NamedTempFile::new_in(parent)?;
    apply_mode(tmp.path(), options.mode)?;
    tmp.write_all(bytes)?;
    if options.sync == FileSyncPolicy::Durable {
        tmp.as_file().sync_all()?;
    }

    if let Err(err) = tmp.persist(path) {
        if !path.exists() {
            return Err(err.error);
        }
        let backup = backup_path(path);
        let _ = fs::remove_file(&backup);
        fs::rename(path, &backup)?;
        if let Err(retry) = err.file.persist(path) {
            let _ = fs::rename(&backup, path);
            return Err(retry.error);
        }
        if let Err(e) = fs::remove_file(&backup) {
            tracing::warn!(
                path = %backup.display(),
                "Failed to remove .bak after atomic write: {e}"
            );
        }
    }

    if options.sync == FileSyncPolicy::Durable {
        sync_dir(parent);
    }
    Ok(())
}

/// Read a file written by [`atomic_write_with_options`], recovering an interrupted swap first.
///
/// A missing file is `Ok(None)`, not an error.
pub fn read_recovering(path: &Path) -> io::Result<Option<String>> {
    recover_bak_file(path);
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Delete `path` and any stale backup. Returns whether the main file existed.
pub fn remove_with_backup(path: &Path) -> io::Result<bool> {
    let _ = fs::remove_file(backup_path(path));
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

#[cfg(unix)]
fn apply_mode(path: &Path, mode: FileMode) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    match mode {
        FileMode::Default => Ok(()),
        FileMode::OwnerOnly => fs::set_permissions(path, fs::Permissions::from_mode(0o600)),
    }
}

#[cfg(not(unix))]
fn apply_mode(_path: &Path, _mode: FileMode) -> io::Result<()> {
    Ok(())
}

fn sync_dir(dir: &Path) {
    #[cfg(unix)]
    if let Err(e) = fs::File::open(dir).and_then(|d| d.sync_all()) {
        tracing::debug!(
            path = %dir.display(),
            "Parent directory sync_all failed (best-effort): {e}"
        );
    }
    #[cfg(not(unix))]
    let _ = dir;
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::{
        AtomicWriteOptions, FileMode, FileSyncPolicy, atomic_write_with_options, backup_path,
        read_recovering, remove_with_backup,
    };

    const FAST: AtomicWriteOptions = AtomicWriteOptions {
        sync: FileSyncPolicy::SkipSync,
        mode: FileMode::Default,
    };

    #[test]
    fn overwrites_existing_and_leaves_no_backup() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("state.json");

        atomic_write_with_options(&path, b"one", FAST).expect("write one");
        atomic_write_with_options(&path, b"two", FAST).expect("write two");

        assert_eq!(fs::read_to_string(&path).expect("read"), "two");
        assert!(!backup_path(&path).exists());
    }

    #[test]
    fn creates_missing_parent_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("deeper").join("state.json");
        atomic_write_with_options(&path, b"{}", FAST).expect("write");
        assert_eq!(fs::read_to_string(&path).expect("read"), "{}");
    }

    #[test]
    fn read_of_missing_file_is_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("absent.json");
        assert_eq!(read_recovering(&path).expect("read"), None);
    }

    #[test]
    fn read_restores_interrupted_swap() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("state.json");
        fs::write(backup_path(&path), "previous").expect("seed backup");

        assert_eq!(read_recovering(&path).expect("read").as_deref(), Some("previous"));
        assert!(path.exists());
        assert!(!backup_path(&path).exists());
    }

    #[test]
    fn remove_reports_whether_file_existed() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("state.json");
        atomic_write_with_options(&path, b"x", FAST).expect("write");
        fs::write(backup_path(&path), "stale").expect("seed backup");

        assert!(remove_with_backup(&path).expect("remove"));
        assert!(!path.exists());
        assert!(!backup_path(&path).exists());
        assert!(!remove_with_backup(&path).expect("second remove"));
    }

    #[cfg(unix)]
    #[test]
    fn owner_only_mode_is_applied() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("secure.json");
        let opts = AtomicWriteOptions {
            sync: FileSyncPolicy::SkipSync,
            mode: FileMode::OwnerOnly,
        };
        atomic_write_with_options(&path, b"secret", opts).expect("write");

        let mode = fs::metadata(&path).expect("metadata").permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
    }
}
