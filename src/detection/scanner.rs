//! Memoized recursive directory listing and `MSBuild.exe` lookup.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

/// File name of the MSBuild executable, compared ignoring ASCII case.
pub(crate) const MSBUILD_EXE: &str = "MSBuild.exe";

/// Recursive file lister with a per-directory cache.
///
/// A directory is read from disk at most once per scanner; later calls with
/// the same path return the cached listing even if the tree has changed
/// since. The cache key is the path exactly as given.
#[derive(Debug, Default)]
pub(crate) struct DirectoryScanner {
    cache: HashMap<PathBuf, Vec<PathBuf>>,
}

impl DirectoryScanner {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// All files below `dir`, depth-first, entries in file-name order.
    ///
    /// Fails if `dir` (or a subdirectory) cannot be read. Entries whose
    /// metadata cannot be read, such as dangling symlinks, are skipped.
    pub(crate) fn list_files_recursive(&mut self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        if let Some(files) = self.cache.get(dir) {
            return Ok(files.clone());
        }

        let mut entries = std::fs::read_dir(dir)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<io::Result<Vec<_>>>()?;
        entries.sort();

        let mut files = Vec::new();
        for entry in entries {
            let metadata = match std::fs::metadata(&entry) {
                Ok(metadata) => metadata,
                Err(e) => {
                    tracing::debug!(
                        path = %entry.display(),
                        error = %e,
                        "skipping unreadable entry"
                    );
                    continue;
                }
            };
            if metadata.is_dir() {
                files.extend(self.list_files_recursive(&entry)?);
            } else {
                files.push(entry);
            }
        }

        self.cache.insert(dir.to_path_buf(), files.clone());
        Ok(files)
    }

    #[cfg(test)]
    pub(crate) fn is_cached(&self, dir: &Path) -> bool {
        self.cache.contains_key(dir)
    }
}

/// Every `MSBuild.exe` below `dir`, in scan order.
pub(crate) fn find_executables_under(
    scanner: &mut DirectoryScanner,
    dir: &Path,
) -> io::Result<Vec<PathBuf>> {
    Ok(scanner
        .list_files_recursive(dir)?
        .into_iter()
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.eq_ignore_ascii_case(MSBUILD_EXE))
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn test_lists_files_depth_first() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        touch(&root.join("b.txt"));
        touch(&root.join("a/inner/deep.txt"));
        touch(&root.join("a/top.txt"));

        let files = DirectoryScanner::new().list_files_recursive(root).unwrap();
        assert_eq!(
            files,
            vec![
                root.join("a/inner/deep.txt"),
                root.join("a/top.txt"),
                root.join("b.txt"),
            ]
        );
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let result = DirectoryScanner::new().list_files_recursive(&tmp.path().join("absent"));
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_second_scan_does_not_touch_disk() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("MSBuild");
        touch(&root.join("Current/Bin/MSBuild.exe"));

        let mut scanner = DirectoryScanner::new();
        let first = scanner.list_files_recursive(&root).unwrap();
        assert!(scanner.is_cached(&root));
        assert!(scanner.is_cached(&root.join("Current/Bin")));

        // Reading the directory again would now fail.
        fs::remove_dir_all(&root).unwrap();

        let second = scanner.list_files_recursive(&root).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_find_executables_case_insensitive() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        touch(&root.join("Current/Bin/MSBuild.exe"));
        touch(&root.join("Current/Bin/amd64/msbuild.EXE"));
        touch(&root.join("Current/Bin/MSBuild.dll"));
        touch(&root.join("Current/Bin/msbuild.exe.config"));

        let found = find_executables_under(&mut DirectoryScanner::new(), root).unwrap();
        assert_eq!(
            found,
            vec![
                root.join("Current/Bin/MSBuild.exe"),
                root.join("Current/Bin/amd64/msbuild.EXE"),
            ]
        );
    }

    #[test]
    fn test_find_executables_none() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("readme.md"));
        let found = find_executables_under(&mut DirectoryScanner::new(), tmp.path()).unwrap();
        assert!(found.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_skipped() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("MSBuild.exe"));
        std::os::unix::fs::symlink(tmp.path().join("gone"), tmp.path().join("link")).unwrap();

        let files = DirectoryScanner::new().list_files_recursive(tmp.path()).unwrap();
        assert_eq!(files, vec![tmp.path().join("MSBuild.exe")]);
    }
}
