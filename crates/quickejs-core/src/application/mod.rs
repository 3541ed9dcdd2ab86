//! Application layer for quick-ejs.
//!
//! This layer contains:
//! - **Services**: use case orchestration (`ScaffoldService`)
//! - **Ports**: interface definitions (traits) for external dependencies
//! - **Errors**: application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! generation logic itself. That lives in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{GenerationReport, ScaffoldService};

pub use ports::{Filesystem, InstallCommand, PackageInstaller};

pub use error::{ApplicationError, InstallStep};
