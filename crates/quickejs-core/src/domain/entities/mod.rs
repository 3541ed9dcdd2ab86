pub mod common;
pub mod config;
pub mod tree;

pub use crate::domain::DomainError;
pub use config::{ProjectConfig, ProjectConfigBuilder};
pub use tree::{Directory, DirectoryToCreate, FileToWrite, FsEntry, ProjectTree, TreeNode};
