use thiserror::Error;

/// Root domain error type.
///
/// Every variant is cloneable and carries enough context for the CLI to
/// print a suggestion.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Configuration
    // ========================================================================
    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown template '{0}'")]
    UnknownTemplate(String),

    #[error("Unknown package manager '{0}'")]
    UnknownPackageManager(String),

    #[error("Unknown deploy target '{0}'")]
    UnknownDeployTarget(String),

    // ========================================================================
    // Tree composition
    // ========================================================================
    #[error("Duplicate path in project tree: {path}")]
    DuplicatePath { path: String },

    #[error("Invalid path segment '{segment}' in {path}")]
    InvalidPathSegment { path: String, segment: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Project tree is empty")]
    EmptyTree,

    #[error("Unresolved placeholder '{placeholder}' in {path}")]
    UnresolvedPlaceholder { path: String, placeholder: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidProjectName { .. } => vec![
                "Use only letters, numbers, hyphens and underscores".into(),
                "Example: quick-ejs new my-app".into(),
            ],
            Self::UnknownTemplate(_) => vec!["Valid templates: ejs, html".into()],
            Self::UnknownPackageManager(_) => vec!["Valid package managers: npm, yarn, pnpm".into()],
            Self::UnknownDeployTarget(_) => vec!["Valid deploy targets: vercel".into()],
            Self::DuplicatePath { .. }
            | Self::InvalidPathSegment { .. }
            | Self::AbsolutePathNotAllowed { .. }
            | Self::EmptyTree
            | Self::UnresolvedPlaceholder { .. } => vec![
                "This is a bug in the generator".into(),
                "Please report this issue".into(),
            ],
            Self::InvalidConfig(msg) => vec![
                "Check your answers file or command-line flags".into(),
                format!("Details: {msg}"),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidProjectName { .. } | Self::InvalidConfig(_) => ErrorCategory::Validation,
            Self::UnknownTemplate(_)
            | Self::UnknownPackageManager(_)
            | Self::UnknownDeployTarget(_) => ErrorCategory::NotFound,
            _ => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_input_errors_are_not_internal() {
        let err = DomainError::InvalidProjectName {
            name: "a b".into(),
            reason: "space".into(),
        };
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert_eq!(
            DomainError::UnknownTemplate("pug".into()).category(),
            ErrorCategory::NotFound
        );
    }

    #[test]
    fn tree_errors_point_at_the_generator() {
        let err = DomainError::DuplicatePath { path: "server.js".into() };
        assert_eq!(err.category(), ErrorCategory::Internal);
        assert!(err.suggestions().iter().any(|s| s.contains("bug")));
    }
}
