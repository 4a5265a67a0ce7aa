//! Automatic version detection across installation layouts.

use super::installer::query_latest_install_path;
use super::legacy::{find_edition_folder, find_versioned_directory};
use super::probe::probe_and_register;
use super::scanner::{find_executables_under, DirectoryScanner};
use crate::{ToolHost, VersionKey, VersionRegistry};
use std::path::{Path, PathBuf};

/// Where the newest MSBuild lives and which version it is.
///
/// Strategies, in order:
///
/// 1. `vswhere.exe` under `root`
/// 2. Visual Studio 2017 edition folders under `root`
/// 3. Versioned `MSBuild/1*` folders under `root`
/// 4. `(root, 4.0)`
///
/// When 1 or 2 finds an installation, every `MSBuild.exe` in it is probed so
/// that newer versions (16.0 and up) become known to `registry`. The version
/// is then the newest one any probe reported, already registered or not, or
/// 15.0 if no probe produced a version.
pub(crate) async fn detect_version<H: ToolHost>(
    host: &H,
    registry: &mut VersionRegistry,
    scanner: &mut DirectoryScanner,
    root: &Path,
) -> (PathBuf, VersionKey) {
    let installation = match query_latest_install_path(host, root).await {
        Some(path) => Some(path),
        None => find_edition_folder(root),
    };

    if let Some(installation) = installation {
        let msbuild_home = installation.join("MSBuild");
        let executables = find_executables_under(scanner, &msbuild_home).unwrap_or_else(|e| {
            tracing::debug!(path = %msbuild_home.display(), error = %e, "no MSBuild directory");
            Vec::new()
        });
        let probed = probe_and_register(host, registry, &executables).await;
        let version = probed.first().copied().unwrap_or(VersionKey::VS2017);
        tracing::debug!(
            root = %installation.display(),
            version = %version,
            "detected MSBuild installation"
        );
        return (installation, version);
    }

    let version = find_versioned_directory(root).unwrap_or_else(|| {
        tracing::debug!(root = %root.display(), "no MSBuild installation found, assuming 4.0");
        VersionKey::FRAMEWORK_4
    });
    (root.to_path_buf(), version)
}
