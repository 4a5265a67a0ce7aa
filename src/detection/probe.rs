//! Version probing of discovered `MSBuild.exe` binaries.

use crate::{ProbeFailure, ToolHost, VersionKey, VersionRegistry};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Flag that makes MSBuild print its version and exit.
const VERSION_FLAG: &str = "/version";

fn version_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(\d+)\.(\d+)").expect("Invalid regex pattern"))
}

/// Parse the normalized version key from `MSBuild.exe /version` output.
///
/// MSBuild prints a banner followed by the full version on the last line:
///
/// - `16.11.2.50704` -> 16.0
/// - `Microsoft (R) Build Engine version 17.8.3\n17.8.3.51904` -> 17.0
///
/// Only the major component survives. 16.1 and 16.9 both become 16.0,
/// because the on-disk and registry layout is keyed by major version.
pub(crate) fn parse_version_output(output: &str) -> Result<VersionKey, ProbeFailure> {
    let last_line = output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .last()
        .ok_or(ProbeFailure::VersionParseFailed)?;

    let caps = version_pattern()
        .captures(last_line)
        .ok_or(ProbeFailure::VersionParseFailed)?;
    let major = caps[1]
        .parse::<u32>()
        .map_err(|_| ProbeFailure::VersionParseFailed)?;

    Ok(VersionKey::new(major, 0))
}

/// An executable together with the version it reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DiscoveredExecutable {
    pub(crate) path: PathBuf,
    pub(crate) version: VersionKey,
}

async fn probe_one<H: ToolHost>(
    host: &H,
    exe: &Path,
) -> Result<DiscoveredExecutable, ProbeFailure> {
    let output = host.run(exe, &[VERSION_FLAG]).await?;
    let version = parse_version_output(&output.stdout)?;
    Ok(DiscoveredExecutable {
        path: exe.to_path_buf(),
        version,
    })
}

/// Ask each executable for its version and register the unknown ones.
///
/// Returns every version that probed successfully, deduplicated, newest
/// first, whether or not the registry already knew it. A candidate that fails
/// to run or prints garbage is logged and does not stop the others.
pub(crate) async fn probe_and_register<H: ToolHost>(
    host: &H,
    registry: &mut VersionRegistry,
    executables: &[PathBuf],
) -> Vec<VersionKey> {
    let mut discovered = Vec::new();

    for exe in executables {
        match probe_one(host, exe).await {
            Ok(found) => {
                let key = found.version;
                if registry.register(key, key.to_string()) {
                    tracing::debug!(
                        path = %found.path.display(),
                        version = %key,
                        "registered MSBuild version"
                    );
                }
                discovered.push(key);
            }
            Err(e) => {
                tracing::warn!("Unable to query version of {}: {}", exe.display(), e);
            }
        }
    }

    discovered.sort();
    discovered.dedup();
    discovered.reverse();
    discovered
}
