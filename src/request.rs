//! Resolution request types.

use crate::{FinderError, VersionKey};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Host platform family, as far as MSBuild lookup cares.
///
/// Built from a Node-style platform identifier (`win32`, `linux`, `darwin`)
/// via [`Platform::from_identifier`]. Deserialization goes through the same
/// classification, and serialization writes an identifier that maps back to
/// the same variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Platform {
    /// Windows: MSBuild is located on disk.
    Windows,
    /// Linux or macOS: Mono's `msbuild`, else `xbuild`.
    Unix,
    /// Anything else: always `xbuild`.
    Other,
}

impl Platform {
    /// Classify a platform identifier.
    ///
    /// Identifiers containing `linux` or `darwin` are Unix-like, identifiers
    /// starting with `win` are Windows, everything else is `Other`.
    ///
    /// ```rust
    /// use msbuild_finder::Platform;
    ///
    /// assert_eq!(Platform::from_identifier("win32"), Platform::Windows);
    /// assert_eq!(Platform::from_identifier("darwin"), Platform::Unix);
    /// assert_eq!(Platform::from_identifier("xyz"), Platform::Other);
    /// ```
    pub fn from_identifier(identifier: &str) -> Self {
        if identifier.contains("linux") || identifier.contains("darwin") {
            Self::Unix
        } else if identifier.starts_with("win") {
            Self::Windows
        } else {
            Self::Other
        }
    }

    /// The platform this process is running on.
    pub fn current() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else if cfg!(any(target_os = "linux", target_os = "macos")) {
            Self::Unix
        } else {
            Self::Other
        }
    }
}

impl From<String> for Platform {
    fn from(value: String) -> Self {
        Self::from_identifier(&value)
    }
}

impl From<Platform> for String {
    fn from(value: Platform) -> Self {
        match value {
            Platform::Windows => "win32",
            Platform::Unix => "linux",
            Platform::Other => "other",
        }
        .to_string()
    }
}

/// Target architecture of the MSBuild binary.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumString,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Architecture {
    /// 32-bit MSBuild.
    X86,
    /// 64-bit MSBuild (`amd64` / `Framework64` directories).
    X64,
    /// No preference; treated like 32-bit.
    #[default]
    Unspecified,
}

impl Architecture {
    pub fn is_64_bit(&self) -> bool {
        matches!(self, Self::X64)
    }
}

/// Which tools version the caller asked for.
///
/// ```rust
/// use msbuild_finder::{RequestedVersion, VersionKey};
///
/// assert_eq!("auto".parse::<RequestedVersion>().unwrap(), RequestedVersion::Auto);
/// assert_eq!(
///     "14.0".parse::<RequestedVersion>().unwrap(),
///     RequestedVersion::Exact(VersionKey::new(14, 0))
/// );
/// assert!("-1".parse::<RequestedVersion>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RequestedVersion {
    /// Pick the newest installed version.
    Auto,
    /// A specific tools version.
    Exact(VersionKey),
}

impl From<VersionKey> for RequestedVersion {
    fn from(value: VersionKey) -> Self {
        Self::Exact(value)
    }
}

impl fmt::Display for RequestedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::Exact(key) => key.fmt(f),
        }
    }
}

impl FromStr for RequestedVersion {
    type Err = FinderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim() == "auto" {
            Ok(Self::Auto)
        } else {
            s.parse().map(Self::Exact)
        }
    }
}

impl TryFrom<String> for RequestedVersion {
    type Error = FinderError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RequestedVersion> for String {
    fn from(value: RequestedVersion) -> Self {
        value.to_string()
    }
}

/// Everything the finder needs to know about the wanted MSBuild.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionRequest {
    pub platform: Platform,

    #[serde(default)]
    pub architecture: Architecture,

    #[serde(rename = "tools_version")]
    pub requested_version: RequestedVersion,

    /// Windows directory holding `Microsoft.Net/Framework*`.
    ///
    /// Only used for versions older than 12.0. When `None`, `WINDIR` is read
    /// from the environment, falling back to `C:/Windows`.
    #[serde(default)]
    pub windows_directory: Option<PathBuf>,
}

impl ResolutionRequest {
    pub fn new(
        platform: Platform,
        architecture: Architecture,
        requested_version: RequestedVersion,
    ) -> Self {
        Self {
            platform,
            architecture,
            requested_version,
            windows_directory: None,
        }
    }

    pub fn with_windows_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.windows_directory = Some(dir.into());
        self
    }
}
