// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for quick-ejs.
//!
//! Pure generation logic. All I/O (writing files, running the package
//! manager) goes through ports defined in the application layer.
//!
//! ## Rules
//!
//! - **No I/O**: no filesystem, network, or process calls
//! - **No logging**: observability belongs to the application and CLI layers
//! - **Deterministic**: the same config always yields the same tree
pub mod catalog;
pub mod composer;
pub mod entities;
pub mod error;
pub mod resolver;
pub mod value_objects;

mod validation;

pub use catalog::{Fragment, RenderContext};
pub use composer::{ENTRY_FILE, compose};
pub use entities::{
    Directory, DirectoryToCreate, FileToWrite, FsEntry, ProjectConfig, ProjectConfigBuilder,
    ProjectTree, TreeNode, common::RelativePath,
};
pub use error::{DomainError, ErrorCategory};
pub use resolver::{
    AuthHandlersHome, DerivedFacts, LayoutFlags, PACKAGE_REGISTRY, RouteWiring, pinned_version,
    resolve,
};
pub use validation::DomainValidator;
pub use value_objects::{DeployTarget, PackageManager, ProjectName, TemplateKind};

/// A resolved and composed project: what the CLI previews and the service
/// writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPlan {
    pub config: ProjectConfig,
    pub facts: DerivedFacts,
    pub tree: ProjectTree,
}

impl ProjectPlan {
    /// Resolve and compose in one step.
    pub fn build(config: ProjectConfig) -> Result<Self, DomainError> {
        DomainValidator::validate_config(&config)?;
        let facts = resolve(&config);
        let tree = compose(&config, &facts)?;
        DomainValidator::validate_tree(&tree)?;
        Ok(Self {
            config,
            facts,
            tree,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_carries_matching_facts_and_tree() {
        let config = ProjectConfig::builder("demo").database(true).build().unwrap();
        let plan = ProjectPlan::build(config.clone()).unwrap();
        assert_eq!(plan.facts, resolve(&config));
        assert!(plan.tree.contains_file("models/User.js"));
        assert!(plan.tree.contains_file(ENTRY_FILE));
    }
}
