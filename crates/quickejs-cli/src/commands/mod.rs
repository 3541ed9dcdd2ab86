//! Subcommand handlers. Each module exposes an `execute` entry point.

pub mod completions;
pub mod config;
pub mod init;
pub mod new;
