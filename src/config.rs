//! Shared constants and project path resolution

use anyhow::{bail, Result};
use std::env;
use std::path::{Path, PathBuf};

/// File the sync endpoint writes grabbed element metadata to,
/// relative to the project root
pub const GRAB_FILE_NAME: &str = ".grabbed_element";

/// Sync route served by the Vite plugin and the standalone server
pub const SYNC_ROUTE: &str = "/__grabby_sync";

/// Sync route used by generated Next.js API handlers
pub const NEXT_SYNC_ROUTE: &str = "/api/grabby-sync";

/// Route the standalone server exposes the inspector script on
pub const CLIENT_ROUTE: &str = "/grabby.js";

/// Default port for `grabby serve`
pub const DEFAULT_PORT: u16 = 4600;

/// Default bind address for `grabby serve`
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Resolve the project root to operate on.
///
/// Uses the current working directory unless an explicit directory was
/// given. Relative paths are resolved against the working directory.
pub fn project_root(dir: Option<&Path>) -> Result<PathBuf> {
    let root = match dir {
        Some(path) if path.is_absolute() => path.to_path_buf(),
        Some(path) => env::current_dir()?.join(path),
        None => env::current_dir()?,
    };

    if !root.is_dir() {
        bail!("Project directory not found: {}", root.display());
    }

    Ok(root)
}

/// Path of the grab output file inside a project
pub fn grab_file_path(root: &Path) -> PathBuf {
    root.join(GRAB_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_root_defaults_to_cwd() {
        let root = project_root(None).unwrap();
        assert_eq!(root, env::current_dir().unwrap());
    }

    #[test]
    fn test_project_root_rejects_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        assert!(project_root(Some(&missing)).is_err());
    }

    #[test]
    fn test_project_root_accepts_explicit_dir() {
        let dir = tempfile::tempdir().unwrap();
        let root = project_root(Some(dir.path())).unwrap();
        assert_eq!(root, dir.path());
    }

    #[test]
    fn test_grab_file_path() {
        let path = grab_file_path(Path::new("/tmp/project"));
        assert_eq!(path, Path::new("/tmp/project/.grabbed_element"));
    }
}
