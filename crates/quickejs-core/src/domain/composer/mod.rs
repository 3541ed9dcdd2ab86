//! Tree composer: config and derived facts in, complete project tree out.
//!
//! Every cross-file reference (imports, route mounts, manifest scripts,
//! README structure) is computed here from the same [`DerivedFacts`], so the
//! files agree with each other by construction.

mod manifest;
mod module;
mod pages;
mod persistence;
mod readme;
mod routing;
mod server;

use crate::domain::{
    catalog::unresolved_placeholder,
    entities::{ProjectConfig, ProjectTree},
    error::DomainError,
    resolver::DerivedFacts,
};

/// Entry file of every generated project.
pub const ENTRY_FILE: &str = "server.js";

/// Build the full tree for `config`.
///
/// # Errors
///
/// Only on a composition defect: two sections claiming one path, or a
/// fragment slot left unfilled.
pub fn compose(config: &ProjectConfig, facts: &DerivedFacts) -> Result<ProjectTree, DomainError> {
    let mut tree = ProjectTree::new();

    pages::add_static_assets(&mut tree)?;
    pages::add_pages(&mut tree, config)?;
    routing::add_routes(&mut tree, config, facts)?;
    routing::add_controllers(&mut tree, config, facts)?;
    persistence::add_persistence(&mut tree, config)?;

    tree.add_file(ENTRY_FILE, server::render(config, facts))?;
    tree.add_file("package.json", manifest::package_json(config, facts))?;
    tree.add_file(".env.example", manifest::env_sample(config))?;
    tree.add_file(".gitignore", manifest::ignore_list(config))?;
    tree.add_file("README.md", readme::render(config, facts))?;
    if let Some(target) = config.deploy_target() {
        let (name, content) = manifest::deploy_descriptor(target);
        tree.add_file(name, content)?;
    }

    check_placeholders(&tree)?;
    Ok(tree)
}

fn check_placeholders(tree: &ProjectTree) -> Result<(), DomainError> {
    for (path, content) in tree.files() {
        if let Some(placeholder) = unresolved_placeholder(content) {
            return Err(DomainError::UnresolvedPlaceholder {
                path,
                placeholder: placeholder.to_string(),
            });
        }
    }
    Ok(())
}
