//! Detection implementation submodule.
//!
//! Internal building blocks used by [`MsBuildFinder`](crate::MsBuildFinder):
//!
//! - `scanner`: memoized recursive listing and `MSBuild.exe` lookup
//! - `probe`: `MSBuild.exe /version` probing that grows the registry
//! - `installer`: `vswhere.exe` query for the newest installation
//! - `legacy`: Visual Studio 2017 edition folders and versioned folders
//! - `auto`: the fallback chain tying them together

mod auto;
mod installer;
mod legacy;
mod probe;
mod scanner;

#[cfg(test)]
pub(crate) mod testing;

pub(crate) use auto::detect_version;
pub(crate) use installer::query_latest_install_path;
pub(crate) use legacy::find_edition_folder;
pub(crate) use scanner::{find_executables_under, DirectoryScanner};
