//! Installer that records commands instead of running them.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use quickejs_core::{
    application::{ApplicationError, ports::{InstallCommand, PackageInstaller}},
    error::{QuickError, QuickResult},
};

/// Records every command. Optionally fails on the n-th call (0-based),
/// still recording it.
#[derive(Debug, Clone, Default)]
pub struct RecordingInstaller {
    calls: Arc<Mutex<Vec<(InstallCommand, PathBuf)>>>,
    fail_at: Option<usize>,
    diagnostic: String,
}

impl RecordingInstaller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the call with index `n` using `diagnostic` as the captured output.
    pub fn failing_at(n: usize, diagnostic: impl Into<String>) -> Self {
        Self {
            fail_at: Some(n),
            diagnostic: diagnostic.into(),
            ..Self::default()
        }
    }

    /// Commands seen so far, in call order.
    pub fn commands(&self) -> Vec<InstallCommand> {
        self.calls
            .lock()
            .map(|calls| calls.iter().map(|(cmd, _)| cmd.clone()).collect())
            .unwrap_or_default()
    }

    /// Working directories seen so far, in call order.
    pub fn directories(&self) -> Vec<PathBuf> {
        self.calls
            .lock()
            .map(|calls| calls.iter().map(|(_, dir)| dir.clone()).collect())
            .unwrap_or_default()
    }
}

impl PackageInstaller for RecordingInstaller {
    fn run(&self, command: &InstallCommand, project_dir: &Path) -> QuickResult<()> {
        let index = {
            let mut calls = self.calls.lock().map_err(|_| QuickError::Internal {
                message: "recording installer lock poisoned".into(),
            })?;
            calls.push((command.clone(), project_dir.to_path_buf()));
            calls.len() - 1
        };

        if self.fail_at == Some(index) {
            return Err(ApplicationError::InstallFailed {
                step: command.step,
                command: command.to_string(),
                diagnostic: self.diagnostic.clone(),
            }
            .into());
        }
        Ok(())
    }
}
