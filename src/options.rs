//! Finder options configuration.
//!
//! This module provides the [`FindOptions`] struct for configuring
//! resolution behavior. Today that is the bound placed on every external
//! process the finder starts (`vswhere.exe`, `MSBuild.exe /version`).

use std::time::Duration;

/// Configuration options for MSBuild resolution.
///
/// # Default Behavior
///
/// The default timeout is 5 seconds. `vswhere.exe` and `MSBuild.exe /version`
/// normally answer well within a second, but a cold disk or an antivirus scan
/// on first launch can slow them down considerably.
///
/// A process that does not finish in time is killed and treated exactly like
/// a process that produced no output: the finder falls through to the next
/// discovery strategy.
///
/// # Example
///
/// ```rust
/// use msbuild_finder::FindOptions;
/// use std::time::Duration;
///
/// // Use default options (5 second timeout)
/// let opts = FindOptions::default();
///
/// // Use custom timeout
/// let opts = FindOptions {
///     timeout: Duration::from_secs(10),
/// };
/// ```
#[derive(Debug, Clone)]
pub struct FindOptions {
    /// Timeout for each external process invocation.
    ///
    /// Default: 5 seconds
    pub timeout: Duration,
}

impl Default for FindOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timeout() {
        let opts = FindOptions::default();
        assert_eq!(opts.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_custom_timeout() {
        let opts = FindOptions {
            timeout: Duration::from_millis(500),
        };
        assert_eq!(opts.timeout, Duration::from_millis(500));
    }
}
