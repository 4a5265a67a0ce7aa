//! Scriptable [`ToolHost`] for unit tests.

use crate::{CommandOutput, ProbeFailure, ToolHost};
use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Host whose environment, PATH and processes are all canned.
///
/// Programs without a scripted answer fail with `SpawnFailed`, like a
/// missing binary would.
#[derive(Debug, Default)]
pub(crate) struct FakeHost {
    env: HashMap<String, OsString>,
    on_path: Vec<String>,
    outputs: HashMap<PathBuf, Result<CommandOutput, ProbeFailure>>,
    runs: Mutex<Vec<(PathBuf, Vec<String>)>>,
}

impl FakeHost {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_env(mut self, key: &str, value: impl Into<OsString>) -> Self {
        self.env.insert(key.to_string(), value.into());
        self
    }

    pub(crate) fn with_on_path(mut self, name: &str) -> Self {
        self.on_path.push(name.to_string());
        self
    }

    pub(crate) fn with_output(mut self, program: impl Into<PathBuf>, stdout: &str) -> Self {
        self.outputs.insert(
            program.into(),
            Ok(CommandOutput {
                success: true,
                stdout: stdout.to_string(),
                stderr: String::new(),
            }),
        );
        self
    }

    pub(crate) fn with_stderr(mut self, program: impl Into<PathBuf>, stderr: &str) -> Self {
        self.outputs.insert(
            program.into(),
            Ok(CommandOutput {
                success: false,
                stdout: String::new(),
                stderr: stderr.to_string(),
            }),
        );
        self
    }

    pub(crate) fn with_failure(
        mut self,
        program: impl Into<PathBuf>,
        failure: ProbeFailure,
    ) -> Self {
        self.outputs.insert(program.into(), Err(failure));
        self
    }

    /// Every `run` call so far, in order.
    pub(crate) fn runs(&self) -> Vec<(PathBuf, Vec<String>)> {
        self.runs.lock().unwrap().clone()
    }
}

impl ToolHost for FakeHost {
    fn env_var(&self, key: &str) -> Option<OsString> {
        self.env.get(key).cloned()
    }

    fn find_on_path(&self, name: &str) -> Option<PathBuf> {
        self.on_path
            .iter()
            .any(|known| known == name)
            .then(|| PathBuf::from("/usr/bin").join(name))
    }

    async fn run(&self, program: &Path, args: &[&str]) -> Result<CommandOutput, ProbeFailure> {
        self.runs.lock().unwrap().push((
            program.to_path_buf(),
            args.iter().map(|arg| arg.to_string()).collect(),
        ));
        self.outputs
            .get(program)
            .cloned()
            .unwrap_or(Err(ProbeFailure::SpawnFailed))
    }
}
