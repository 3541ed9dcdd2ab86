//! Runs npm, yarn or pnpm as a child process.

use std::path::Path;
use std::process::{Command, Output};

use quickejs_core::{
    application::{ApplicationError, ports::{InstallCommand, PackageInstaller}},
    error::QuickResult,
};
use tracing::{debug, warn};

/// Spawns the package manager and waits for it to exit.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessInstaller;

impl ProcessInstaller {
    pub fn new() -> Self {
        Self
    }

    /// The executable to spawn. Package managers ship as `.cmd` shims on
    /// Windows, which `Command` does not resolve on its own.
    fn executable(program: &str) -> String {
        if cfg!(windows) {
            format!("{program}.cmd")
        } else {
            program.to_string()
        }
    }
}

impl PackageInstaller for ProcessInstaller {
    fn run(&self, command: &InstallCommand, project_dir: &Path) -> QuickResult<()> {
        debug!(command = %command, cwd = %project_dir.display(), "Spawning package manager");

        let output = Command::new(Self::executable(&command.program))
            .args(&command.args)
            .current_dir(project_dir)
            .output()
            .map_err(|e| ApplicationError::InstallFailed {
                step: command.step,
                command: command.to_string(),
                diagnostic: format!("could not start {}: {e}", command.program),
            })?;

        if output.status.success() {
            return Ok(());
        }

        let diagnostic = diagnostic_of(&output);
        warn!(command = %command, status = %output.status, "Package manager failed");
        Err(ApplicationError::InstallFailed {
            step: command.step,
            command: command.to_string(),
            diagnostic,
        }
        .into())
    }
}

/// stderr, or stdout when stderr is blank (yarn reports errors there).
fn diagnostic_of(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if !stderr.is_empty() {
        return stderr;
    }
    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if stdout.is_empty() {
        format!("exited with {}", output.status)
    } else {
        stdout
    }
}
