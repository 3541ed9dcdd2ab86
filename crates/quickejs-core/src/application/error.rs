//! Application layer errors.
//!
//! These errors represent failures in orchestration, not generation logic.
//! Generation errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Which of the two install steps failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallStep {
    Dependencies,
    DevDependencies,
}

impl std::fmt::Display for InstallStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Dependencies => "dependencies",
            Self::DevDependencies => "devDependencies",
        })
    }
}

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// Target directory is already present; nothing was written.
    #[error("Target already exists: {path}")]
    ProjectExists { path: PathBuf },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Rollback failed (best-effort cleanup failed).
    #[error("Rollback failed for {path}: {reason}")]
    RollbackFailed { path: PathBuf, reason: String },

    /// The package manager could not be started or exited non-zero.
    #[error("Install failed while adding {step} (`{command}`)")]
    InstallFailed {
        step: InstallStep,
        command: String,
        diagnostic: String,
    },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ProjectExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Choose a different project name".into(),
                "Or remove the existing directory first".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::RollbackFailed { path, .. } => vec![
                format!("A partial project may remain at {}", path.display()),
                "Remove it by hand before retrying".into(),
            ],
            Self::InstallFailed { command, .. } => vec![
                "The project files were written; only the install failed".into(),
                format!("Retry inside the project directory: {command}"),
                "Check that the package manager is installed and on PATH".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ProjectExists { .. } => ErrorCategory::Validation,
            Self::FilesystemError { .. } | Self::RollbackFailed { .. } => ErrorCategory::Internal,
            Self::InstallFailed { .. } => ErrorCategory::External,
        }
    }

    /// Process output captured from a failed install, if any.
    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            Self::InstallFailed { diagnostic, .. } if !diagnostic.trim().is_empty() => {
                Some(diagnostic)
            }
            _ => None,
        }
    }
}
