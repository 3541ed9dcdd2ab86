use crate::domain::{
    entities::{ProjectConfig, ProjectTree},
    error::DomainError,
};

/// Centralized domain validation.
///
/// Entry points the application layer calls before acting on a value.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_config(config: &ProjectConfig) -> Result<(), DomainError> {
        config.validate()
    }

    pub fn validate_tree(tree: &ProjectTree) -> Result<(), DomainError> {
        tree.validate()
    }
}
