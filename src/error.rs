//! Error types for MSBuild resolution.
//!
//! [`FinderError`] is what `resolve` returns when no executable can be
//! produced. [`ProbeFailure`] describes why a single external process could
//! not be used; it never escapes resolution on its own.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that end a resolution.
///
/// Each variant maps to an actionable `fix_suggestion()`.
///
/// # Example
///
/// ```rust
/// use msbuild_finder::FinderError;
///
/// fn report(error: FinderError) {
///     eprintln!("Could not locate MSBuild: {}", error);
///     eprintln!("To fix: {}", error.fix_suggestion());
/// }
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FinderError {
    /// The requested version has no known display mapping.
    ///
    /// Either the text was not a version at all (e.g. `-1`), or the version
    /// is well formed but neither seeded nor discovered on this machine.
    #[error("No or invalid MSBuild version was supplied: {requested}")]
    UnknownVersion {
        /// The requested version as the caller wrote it.
        requested: String,
    },

    /// No `MSBuild.exe` matching the architecture exists under the
    /// installation root.
    #[error("Unable to find msbuild.exe under {}", search_root.display())]
    ExecutableNotFound {
        /// The `MSBuild` directory that was searched.
        search_root: PathBuf,
        /// Why the directory could not be listed, if that was the cause.
        #[source]
        source: Option<std::io::Error>,
    },

    /// The blocking wrapper could not start its runtime.
    #[error("Failed to start resolution runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

impl FinderError {
    /// Whether this is a configuration problem on the caller's side.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::UnknownVersion { .. })
    }

    /// Whether the requested version is known but not installed.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ExecutableNotFound { .. })
    }

    /// Get an actionable suggestion for fixing this error.
    ///
    /// # Example
    ///
    /// ```rust
    /// use msbuild_finder::FinderError;
    ///
    /// let error = FinderError::UnknownVersion { requested: "-1".to_string() };
    /// assert!(error.fix_suggestion().contains("auto"));
    /// ```
    pub fn fix_suggestion(&self) -> &'static str {
        match self {
            Self::UnknownVersion { .. } => {
                "Request a known tools version such as 4.0, 12.0, 14.0 or 15.0, or use \"auto\""
            }
            Self::ExecutableNotFound { .. } => {
                "Install the Visual Studio Build Tools with the MSBuild component for this architecture"
            }
            Self::Runtime(_) => "Call the async resolve() from an existing runtime instead",
        }
    }
}

/// Why a single external process produced nothing usable.
///
/// These are logged and skipped; one bad candidate never aborts a
/// detection pass.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProbeFailure {
    /// The process did not finish within the configured timeout.
    Timeout,

    /// Permission denied executing the process.
    PermissionDenied,

    /// The process could not be started.
    SpawnFailed,

    /// The output did not contain a recognizable version.
    VersionParseFailed,
}

impl ProbeFailure {
    /// Human-readable description of the failure.
    ///
    /// ```rust
    /// use msbuild_finder::ProbeFailure;
    ///
    /// assert_eq!(ProbeFailure::Timeout.description(), "Process timed out");
    /// ```
    pub fn description(&self) -> &'static str {
        match self {
            Self::Timeout => "Process timed out",
            Self::PermissionDenied => "Permission denied",
            Self::SpawnFailed => "Failed to start process",
            Self::VersionParseFailed => "Failed to parse version",
        }
    }
}

impl std::fmt::Display for ProbeFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_unknown_version_display() {
        let error = FinderError::UnknownVersion {
            requested: "-1".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "No or invalid MSBuild version was supplied: -1"
        );
        assert!(error.is_configuration());
        assert!(!error.is_not_found());
    }

    #[test]
    fn test_not_found_display() {
        let error = FinderError::ExecutableNotFound {
            search_root: PathBuf::from("/vs/2019/MSBuild"),
            source: None,
        };
        assert!(error.to_string().contains("/vs/2019/MSBuild"));
        assert!(error.is_not_found());
        assert!(error.source().is_none());
    }

    #[test]
    fn test_not_found_keeps_io_source() {
        let error = FinderError::ExecutableNotFound {
            search_root: PathBuf::from("/missing"),
            source: Some(std::io::Error::from(std::io::ErrorKind::NotFound)),
        };
        assert!(error.source().is_some());
    }

    #[test]
    fn test_all_variants_have_fix() {
        let errors = vec![
            FinderError::UnknownVersion {
                requested: "2.5".to_string(),
            },
            FinderError::ExecutableNotFound {
                search_root: PathBuf::from("/x"),
                source: None,
            },
            FinderError::Runtime(std::io::Error::other("no reactor")),
        ];

        for error in errors {
            assert!(
                !error.fix_suggestion().is_empty(),
                "fix_suggestion() should return non-empty string for {:?}",
                error
            );
        }
    }

    #[test]
    fn test_probe_failure_descriptions() {
        assert_eq!(ProbeFailure::Timeout.description(), "Process timed out");
        assert_eq!(
            ProbeFailure::PermissionDenied.description(),
            "Permission denied"
        );
        assert_eq!(
            ProbeFailure::SpawnFailed.description(),
            "Failed to start process"
        );
        assert_eq!(
            ProbeFailure::VersionParseFailed.to_string(),
            "Failed to parse version"
        );
    }
}
