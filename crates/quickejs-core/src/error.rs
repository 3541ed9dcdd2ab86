//! Unified error handling for quickejs-core.
//!
//! Wraps domain and application errors with user-actionable suggestions and
//! the generation phase the failure belongs to.

use std::fmt;
use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for quickejs-core operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum QuickError {
    /// Errors from the domain layer (invalid input or a composition defect).
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (I/O and subprocess failures).
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl QuickError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Internal { .. } => vec![
                "This appears to be a bug in quick-ejs".into(),
                "Please report this issue at: https://github.com/quick-ejs/quick-ejs/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// The phase that failed.
    pub fn phase(&self) -> Phase {
        match self {
            Self::Application(ApplicationError::InstallFailed { .. }) => Phase::Installation,
            Self::Application(_) | Self::Internal { .. } => Phase::Generation,
            Self::Domain(e) if e.category() == crate::domain::ErrorCategory::Internal => {
                Phase::Generation
            }
            Self::Domain(_) => Phase::Configuration,
        }
    }

    /// Captured process output for installer failures.
    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            Self::Application(e) => e.diagnostic(),
            _ => None,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    /// A collaborator outside the process failed (package manager).
    External,
    Internal,
}

/// Stage of a `new` run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Configuration,
    Generation,
    Installation,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Configuration => "configuration",
            Self::Generation => "structure generation",
            Self::Installation => "dependency installation",
        })
    }
}

/// Convenient result type alias.
pub type QuickResult<T> = Result<T, QuickError>;
