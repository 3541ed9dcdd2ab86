//! Infrastructure adapters for quick-ejs.
//!
//! This crate implements the ports defined in `quickejs_core::application::ports`.
//! It contains all external I/O: writing the project tree and spawning the
//! package manager.

pub mod filesystem;
pub mod installer;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use installer::{ProcessInstaller, RecordingInstaller};
