//! Directory trees shared by the scan and session tests.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A tree with two readable twins, an unreadable directory and an
/// unreadable (empty) file.
///
/// Permissions are restored on drop so the temp dir can be removed.
#[cfg(unix)]
pub struct LockedTree {
    pub dir: TempDir,
    pub locked_dir: PathBuf,
    pub locked_file: PathBuf,
}

#[cfg(unix)]
impl LockedTree {
    /// Build the tree, or `None` when permission bits are not enforced
    /// (running as root).
    pub fn new() -> Option<Self> {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("good.txt"), b"hello").unwrap();
        fs::write(dir.path().join("twin.txt"), b"hello").unwrap();

        let locked_dir = dir.path().join("locked");
        fs::create_dir(&locked_dir).unwrap();
        fs::write(locked_dir.join("inner.txt"), b"hidden").unwrap();
        let locked_file = dir.path().join("secret.txt");
        fs::write(&locked_file, b"").unwrap();

        let tree = Self {
            dir,
            locked_dir,
            locked_file,
        };
        set_mode(&tree.locked_dir, 0o000);
        set_mode(&tree.locked_file, 0o000);

        if fs::read_dir(&tree.locked_dir).is_ok() {
            return None;
        }
        Some(tree)
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

#[cfg(unix)]
impl Drop for LockedTree {
    fn drop(&mut self) {
        set_mode(&self.locked_dir, 0o755);
        set_mode(&self.locked_file, 0o644);
    }
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode)).unwrap();
}
