//! Visual Studio installer query through `vswhere.exe`.

use crate::ToolHost;
use std::path::{Path, PathBuf};

/// Location of `vswhere.exe` relative to a Program Files directory.
const VSWHERE_SUBPATH: [&str; 3] = ["Microsoft Visual Studio", "Installer", "vswhere.exe"];

/// Component every usable installation must carry.
const MSBUILD_COMPONENT: &str = "Microsoft.Component.MSBuild";

const INSTALLATION_PATH_KEY: &str = "installationPath";

pub(crate) fn vswhere_path(root: &Path) -> PathBuf {
    VSWHERE_SUBPATH.iter().fold(root.to_path_buf(), |path, part| path.join(part))
}

/// Pull `installationPath` out of vswhere's `key: value` text output.
pub(crate) fn parse_installation_path(output: &str) -> Option<PathBuf> {
    output
        .lines()
        .find(|line| line.starts_with(INSTALLATION_PATH_KEY))
        .map(|line| {
            let value = &line[INSTALLATION_PATH_KEY.len()..];
            let value = value.strip_prefix(':').unwrap_or(value);
            PathBuf::from(value.trim())
        })
        .filter(|path| !path.as_os_str().is_empty())
}

/// Ask vswhere for the newest installation that ships MSBuild.
///
/// `None` when vswhere is missing, fails, times out or reports nothing;
/// the caller then moves on to the directory-based strategies.
pub(crate) async fn query_latest_install_path<H: ToolHost>(
    host: &H,
    root: &Path,
) -> Option<PathBuf> {
    let vswhere = vswhere_path(root);
    let output = match host
        .run(
            &vswhere,
            &["-latest", "-products", "*", "-requires", MSBUILD_COMPONENT],
        )
        .await
    {
        Ok(output) => output,
        Err(e) => {
            tracing::debug!(path = %vswhere.display(), "vswhere unavailable: {}", e);
            return None;
        }
    };

    let found = parse_installation_path(output.first_non_empty_stream()?);
    if let Some(path) = &found {
        tracing::debug!(path = %path.display(), "vswhere reported installation");
    }
    found
}
