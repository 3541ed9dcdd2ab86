//! The `ProjectConfig` aggregate root and its builder.
//!
//! A `ProjectConfig` is the validated set of choices the user made. Once one
//! exists it is guaranteed consistent: the name is valid and `use_auth` is
//! never set without `use_database`.
//!
//! Two construction paths exist and both end in [`ProjectConfig::validate`]:
//! the builder (flags and prompts) and serde (answers files).
//!
//! # Domain purity
//!
//! This module must not import `tracing`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{
    error::DomainError,
    value_objects::{DeployTarget, PackageManager, ProjectName, TemplateKind},
};

// ── Aggregate root ────────────────────────────────────────────────────────────

/// A validated project configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "ConfigInput")]
pub struct ProjectConfig {
    project_name: ProjectName,
    template: TemplateKind,
    use_routes: bool,
    use_controllers: bool,
    use_database: bool,
    use_auth: bool,
    package_manager: PackageManager,
    deploy_target: Option<DeployTarget>,
}

impl ProjectConfig {
    /// Deploy target used when the caller does not choose one.
    pub const DEFAULT_DEPLOY_TARGET: Option<DeployTarget> = Some(DeployTarget::Vercel);

    /// Start building a config for `name`.
    pub fn builder(name: impl Into<String>) -> ProjectConfigBuilder {
        ProjectConfigBuilder::new(name)
    }

    pub fn project_name(&self) -> &ProjectName {
        &self.project_name
    }
    pub const fn template(&self) -> TemplateKind {
        self.template
    }
    pub const fn use_routes(&self) -> bool {
        self.use_routes
    }
    pub const fn use_controllers(&self) -> bool {
        self.use_controllers
    }
    pub const fn use_database(&self) -> bool {
        self.use_database
    }
    /// Always `false` when the database is disabled.
    pub const fn use_auth(&self) -> bool {
        self.use_auth
    }
    pub const fn package_manager(&self) -> PackageManager {
        self.package_manager
    }
    pub const fn deploy_target(&self) -> Option<DeployTarget> {
        self.deploy_target
    }

    /// Re-check invariants. Called by both construction paths.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.use_auth && !self.use_database {
            return Err(DomainError::InvalidConfig(
                "authentication requires the database".into(),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for ProjectConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}", self.project_name, self.template)?;
        for (on, label) in [
            (self.use_routes, "routes"),
            (self.use_controllers, "controllers"),
            (self.use_database, "mongodb"),
            (self.use_auth, "auth"),
        ] {
            if on {
                write!(f, " + {label}")?;
            }
        }
        write!(f, ", {})", self.package_manager)
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

/// Builder for [`ProjectConfig`]. Defaults match the interactive prompt
/// defaults: ejs, routes and controllers on, no database, npm, vercel.
#[derive(Debug, Clone)]
pub struct ProjectConfigBuilder {
    name: String,
    template: TemplateKind,
    use_routes: bool,
    use_controllers: bool,
    use_database: bool,
    use_auth: bool,
    package_manager: PackageManager,
    deploy_target: Option<DeployTarget>,
}

impl ProjectConfigBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            template: TemplateKind::default(),
            use_routes: true,
            use_controllers: true,
            use_database: false,
            use_auth: false,
            package_manager: PackageManager::default(),
            deploy_target: ProjectConfig::DEFAULT_DEPLOY_TARGET,
        }
    }

    pub fn template(mut self, template: TemplateKind) -> Self {
        self.template = template;
        self
    }

    pub fn routes(mut self, on: bool) -> Self {
        self.use_routes = on;
        self
    }

    pub fn controllers(mut self, on: bool) -> Self {
        self.use_controllers = on;
        self
    }

    pub fn database(mut self, on: bool) -> Self {
        self.use_database = on;
        self
    }

    /// Request authentication. Ignored at `build()` unless the database is on.
    pub fn auth(mut self, on: bool) -> Self {
        self.use_auth = on;
        self
    }

    pub fn package_manager(mut self, pm: PackageManager) -> Self {
        self.package_manager = pm;
        self
    }

    pub fn deploy_target(mut self, target: Option<DeployTarget>) -> Self {
        self.deploy_target = target;
        self
    }

    pub fn build(self) -> Result<ProjectConfig, DomainError> {
        let config = ProjectConfig {
            project_name: ProjectName::parse(self.name)?,
            template: self.template,
            use_routes: self.use_routes,
            use_controllers: self.use_controllers,
            use_database: self.use_database,
            // Auth implies database.
            use_auth: self.use_auth && self.use_database,
            package_manager: self.package_manager,
            deploy_target: self.deploy_target,
        };
        config.validate()?;
        Ok(config)
    }
}

// ── Serde input form ──────────────────────────────────────────────────────────

/// Raw answers as they appear in an answers file. Converted through the
/// builder so the same normalization applies.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ConfigInput {
    project_name: String,
    #[serde(default)]
    template: TemplateKind,
    #[serde(default = "default_true")]
    use_routes: bool,
    #[serde(default = "default_true")]
    use_controllers: bool,
    #[serde(default, alias = "useMongoDB")]
    use_database: bool,
    #[serde(default)]
    use_auth: bool,
    #[serde(default)]
    package_manager: PackageManager,
    #[serde(default = "default_deploy_target")]
    deploy_target: Option<DeployTarget>,
}

fn default_true() -> bool {
    true
}

fn default_deploy_target() -> Option<DeployTarget> {
    ProjectConfig::DEFAULT_DEPLOY_TARGET
}

impl TryFrom<ConfigInput> for ProjectConfig {
    type Error = DomainError;

    fn try_from(input: ConfigInput) -> Result<Self, Self::Error> {
        ProjectConfig::builder(input.project_name)
            .template(input.template)
            .routes(input.use_routes)
            .controllers(input.use_controllers)
            .database(input.use_database)
            .auth(input.use_auth)
            .package_manager(input.package_manager)
            .deploy_target(input.deploy_target)
            .build()
    }
}
