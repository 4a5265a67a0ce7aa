//! Host interactions: environment, PATH lookup and external processes.
//!
//! Everything the finder needs from the outside world besides plain
//! directory listings goes through [`ToolHost`], so a different host can be
//! substituted when the real `vswhere.exe` or `MSBuild.exe` is unavailable.

use crate::{FindOptions, ProbeFailure};
use std::ffi::OsString;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

/// System fallback paths to check if a command is not found in PATH.
const FALLBACK_PATHS: &[&str] = &[
    "/usr/local/bin",
    "/usr/bin",
    "/Library/Frameworks/Mono.framework/Versions/Current/Commands",
];

/// Captured output of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Whether the process exited with status zero.
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// The first non-empty stream, stdout before stderr.
    ///
    /// Some tools write their answer to stderr, so callers that only care
    /// about "what did it say" use this.
    pub fn first_non_empty_stream(&self) -> Option<&str> {
        [self.stdout.as_str(), self.stderr.as_str()]
            .into_iter()
            .find(|stream| !stream.is_empty())
    }
}

/// The side effects MSBuild resolution depends on.
pub trait ToolHost {
    /// Read an environment variable.
    fn env_var(&self, key: &str) -> Option<OsString>;

    /// Look a command up on `PATH`.
    fn find_on_path(&self, name: &str) -> Option<PathBuf>;

    /// Run a program to completion and capture its output.
    ///
    /// Implementations must bound the run time and report an overrun as
    /// [`ProbeFailure::Timeout`].
    fn run(
        &self,
        program: &Path,
        args: &[&str],
    ) -> impl Future<Output = Result<CommandOutput, ProbeFailure>> + Send;
}

/// The real host: process environment, `which`, and tokio processes.
#[derive(Debug, Clone)]
pub struct SystemHost {
    timeout: Duration,
}

impl SystemHost {
    pub fn new(options: &FindOptions) -> Self {
        Self {
            timeout: options.timeout,
        }
    }
}

impl Default for SystemHost {
    fn default() -> Self {
        Self::new(&FindOptions::default())
    }
}

impl ToolHost for SystemHost {
    fn env_var(&self, key: &str) -> Option<OsString> {
        std::env::var_os(key).filter(|value| !value.is_empty())
    }

    fn find_on_path(&self, name: &str) -> Option<PathBuf> {
        // Primary: PATH lookup via which crate
        if let Ok(path) = which::which(name) {
            return Some(path);
        }

        // Fallback: common install locations not always in PATH
        FALLBACK_PATHS
            .iter()
            .map(|dir| PathBuf::from(dir).join(name))
            .find(|path| path.is_file())
    }

    async fn run(&self, program: &Path, args: &[&str]) -> Result<CommandOutput, ProbeFailure> {
        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let output = timeout(self.timeout, command.output())
            .await
            .map_err(|_| ProbeFailure::Timeout)?
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::PermissionDenied {
                    ProbeFailure::PermissionDenied
                } else {
                    ProbeFailure::SpawnFailed
                }
            })?;

        Ok(CommandOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_timeout_reaches_host() {
        let options = FindOptions {
            timeout: Duration::from_millis(750),
        };
        assert_eq!(SystemHost::new(&options).timeout, Duration::from_millis(750));
        assert_eq!(SystemHost::default().timeout, FindOptions::default().timeout);
    }

    #[test]
    fn test_first_non_empty_stream() {
        let output = CommandOutput {
            success: true,
            stdout: String::new(),
            stderr: "from stderr".to_string(),
        };
        assert_eq!(output.first_non_empty_stream(), Some("from stderr"));

        let output = CommandOutput {
            success: true,
            stdout: "from stdout".to_string(),
            stderr: "ignored".to_string(),
        };
        assert_eq!(output.first_non_empty_stream(), Some("from stdout"));

        assert_eq!(CommandOutput::default().first_non_empty_stream(), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_find_common_executable() {
        // ls should exist on any Unix system
        let result = SystemHost::default().find_on_path("ls");
        assert!(result.is_some());
    }

    #[test]
    fn test_find_nonexistent_executable() {
        let result = SystemHost::default().find_on_path("definitely_not_a_real_executable_12345");
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_run_nonexistent_program() {
        let host = SystemHost::default();
        let result = host
            .run(Path::new("/nonexistent/path/to/MSBuild.exe"), &["/version"])
            .await;
        assert_eq!(result, Err(ProbeFailure::SpawnFailed));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_captures_stdout() {
        let host = SystemHost::default();
        let output = host.run(Path::new("echo"), &["16.11.2.50704"]).await.unwrap();
        assert!(output.success);
        assert_eq!(output.stdout.trim(), "16.11.2.50704");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_times_out() {
        let host = SystemHost::new(&FindOptions {
            timeout: Duration::from_millis(50),
        });
        let result = host.run(Path::new("sleep"), &["5"]).await;
        assert_eq!(result, Err(ProbeFailure::Timeout));
    }
}
