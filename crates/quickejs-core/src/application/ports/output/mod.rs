//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `quickejs-adapters` crate provides implementations.

use std::fmt;
use std::path::Path;

use crate::application::error::InstallStep;
use crate::domain::PackageManager;
use crate::error::QuickResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `quickejs_adapters::filesystem::LocalFilesystem` (production)
/// - `quickejs_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> QuickResult<()>;

    /// Write content to a file.
    fn write_file(&self, path: &Path, content: &str) -> QuickResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> QuickResult<()>;
}

/// One package manager invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallCommand {
    pub step: InstallStep,
    pub program: String,
    pub args: Vec<String>,
}

impl InstallCommand {
    /// `npm install express dotenv`, `yarn add --dev nodemon`, ...
    pub fn new(manager: PackageManager, step: InstallStep, packages: &[&str]) -> Self {
        let dev = step == InstallStep::DevDependencies;
        let mut args: Vec<String> = manager
            .install_args(dev)
            .iter()
            .map(|arg| (*arg).to_string())
            .collect();
        args.extend(packages.iter().map(|name| (*name).to_string()));
        Self {
            step,
            program: manager.program().to_string(),
            args,
        }
    }
}

impl fmt::Display for InstallCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Port for running the package manager.
///
/// Implemented by:
/// - `quickejs_adapters::installer::ProcessInstaller` (spawns the program)
/// - `quickejs_adapters::installer::RecordingInstaller` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait PackageInstaller: Send + Sync {
    /// Run one command inside `project_dir`, blocking until it exits.
    ///
    /// A spawn failure or non-zero exit is an
    /// [`ApplicationError::InstallFailed`](crate::application::ApplicationError::InstallFailed).
    fn run(&self, command: &InstallCommand, project_dir: &Path) -> QuickResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_lines_per_manager() {
        let cmd = InstallCommand::new(
            PackageManager::Npm,
            InstallStep::Dependencies,
            &["express", "dotenv"],
        );
        assert_eq!(cmd.to_string(), "npm install express dotenv");

        let cmd = InstallCommand::new(PackageManager::Yarn, InstallStep::DevDependencies, &["nodemon"]);
        assert_eq!(cmd.to_string(), "yarn add --dev nodemon");

        let cmd = InstallCommand::new(PackageManager::Pnpm, InstallStep::DevDependencies, &["nodemon"]);
        assert_eq!(cmd.program, "pnpm");
        assert_eq!(cmd.args, vec!["add", "-D", "nodemon"]);
    }
}
