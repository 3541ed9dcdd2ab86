//! Application ports (traits) for external dependencies.
//!
//! Ports define what the application needs from the outside world. Adapters
//! in `quickejs-adapters` implement them.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: writing the project tree
//!   - `PackageInstaller`: running npm/yarn/pnpm

pub mod output;

pub use output::{Filesystem, InstallCommand, PackageInstaller};

#[cfg(test)]
pub use output::{MockFilesystem, MockPackageInstaller};
