//! Directory-convention strategies that need no external process.
//!
//! - Visual Studio 2017 edition folders under `Microsoft Visual Studio/2017`
//! - Versioned `MSBuild/<version>/Bin` folders used up to MSBuild 14.0

use crate::VersionKey;
use std::path::{Path, PathBuf};

/// Edition folders of a Visual Studio 2017 installation, highest priority
/// first. The first one present on disk wins.
pub(crate) const EDITION_PRECEDENCE: [&str; 4] =
    ["BuildTools", "Enterprise", "Professional", "Community"];

const VS2017_SUBPATH: [&str; 2] = ["Microsoft Visual Studio", "2017"];

fn exists(path: &Path) -> bool {
    std::fs::metadata(path).is_ok()
}

/// First Visual Studio 2017 edition folder present under `root`.
pub(crate) fn find_edition_folder(root: &Path) -> Option<PathBuf> {
    let vs2017 = VS2017_SUBPATH
        .iter()
        .fold(root.to_path_buf(), |path, part| path.join(part));

    let found = EDITION_PRECEDENCE
        .iter()
        .map(|edition| vs2017.join(edition))
        .find(|folder| exists(folder));
    if let Some(folder) = &found {
        tracing::debug!(path = %folder.display(), "found Visual Studio 2017 edition folder");
    }
    found
}

/// Newest `<root>/MSBuild/1*` folder that has a `Bin` directory.
///
/// Names are compared as strings and the last one is parsed as a version,
/// so `14.0` beats `12.0`. `None` if the `MSBuild` folder is missing,
/// nothing qualifies, or the winner is not a version.
pub(crate) fn find_versioned_directory(root: &Path) -> Option<VersionKey> {
    let msbuild_dir = root.join("MSBuild");
    let entries = match std::fs::read_dir(&msbuild_dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!(path = %msbuild_dir.display(), error = %e, "no legacy MSBuild folder");
            return None;
        }
    };

    let mut names: Vec<String> = entries
        .filter_map(Result::ok)
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.starts_with('1') && exists(&msbuild_dir.join(name).join("Bin")))
        .collect();
    names.sort();

    let latest = names.pop()?;
    match latest.parse::<VersionKey>() {
        Ok(version) => {
            tracing::debug!(version = %version, "found legacy MSBuild folder");
            Some(version)
        }
        Err(_) => {
            tracing::debug!(name = %latest, "legacy MSBuild folder is not a version");
            None
        }
    }
}
