//! Resolution result.

use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};

/// What the caller should run.
///
/// # Variants
///
/// - `Executable`: an absolute path to `MSBuild.exe` (Windows)
/// - `Command`: a bare command name looked up on `PATH` (`msbuild` or
///   `xbuild`), used on every other platform
///
/// # Example
///
/// ```rust
/// use msbuild_finder::ResolvedPath;
/// use std::process::Command;
///
/// fn build(resolved: &ResolvedPath) -> Command {
///     let mut cmd = Command::new(resolved.as_os_str());
///     cmd.arg("/nologo");
///     cmd
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ResolvedPath {
    /// Absolute path to an executable on disk.
    Executable(PathBuf),

    /// Logical command name resolved through `PATH` at launch time.
    Command(&'static str),
}

impl ResolvedPath {
    /// Mono's MSBuild port.
    pub const MSBUILD: Self = Self::Command("msbuild");

    /// Mono's legacy build driver.
    pub const XBUILD: Self = Self::Command("xbuild");

    /// The executable path, if this is a filesystem path.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Executable(path) => Some(path),
            Self::Command(_) => None,
        }
    }

    /// The command name, if this is a logical command.
    pub fn command(&self) -> Option<&'static str> {
        match self {
            Self::Command(name) => Some(*name),
            Self::Executable(_) => None,
        }
    }

    /// Suitable for `std::process::Command::new`.
    pub fn as_os_str(&self) -> &OsStr {
        match self {
            Self::Executable(path) => path.as_os_str(),
            Self::Command(name) => OsStr::new(name),
        }
    }
}

impl fmt::Display for ResolvedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Executable(path) => path.display().fmt(f),
            Self::Command(name) => f.write_str(name),
        }
    }
}
