//! Scaffold Service - main application orchestrator.
//!
//! This service coordinates the whole `new` workflow:
//! 1. Resolve and compose the tree for a config
//! 2. Write it to the filesystem (rolled back on failure)
//! 3. Install dependencies (the tree is kept if this fails)

use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError, InstallStep,
        ports::{Filesystem, InstallCommand, PackageInstaller},
    },
    domain::{FsEntry, ProjectConfig, ProjectPlan},
    error::{QuickError, QuickResult},
};

/// What `generate` wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub project_dir: PathBuf,
    pub files: usize,
    pub directories: usize,
}

/// Main scaffolding service.
pub struct ScaffoldService {
    filesystem: Box<dyn Filesystem>,
    installer: Box<dyn PackageInstaller>,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use quickejs_core::application::ScaffoldService;
    ///
    /// let service = ScaffoldService::new(
    ///     Box::new(filesystem), // impl Filesystem
    ///     Box::new(installer),  // impl PackageInstaller
    /// );
    /// ```
    pub fn new(filesystem: Box<dyn Filesystem>, installer: Box<dyn PackageInstaller>) -> Self {
        Self {
            filesystem,
            installer,
        }
    }

    /// Resolve and compose without touching the filesystem.
    #[instrument(skip_all, fields(project = %config.project_name()))]
    pub fn plan(&self, config: ProjectConfig) -> QuickResult<ProjectPlan> {
        let plan = ProjectPlan::build(config)?;
        debug!(
            files = plan.tree.file_count(),
            directories = plan.tree.directory_count(),
            dependencies = ?plan.facts.dependencies,
            "Project planned"
        );
        Ok(plan)
    }

    /// Directory the project for `plan` is written to under `output_root`.
    pub fn project_dir(plan: &ProjectPlan, output_root: &Path) -> PathBuf {
        output_root.join(plan.config.project_name().as_str())
    }

    /// Write the plan's tree under `output_root/<name>`.
    ///
    /// Fails with [`ApplicationError::ProjectExists`] before writing anything
    /// if the directory is already present. If the project directory itself
    /// cannot be created the error is returned as is; any failure after that
    /// removes the partially written directory.
    #[instrument(
        skip_all,
        fields(
            project = %plan.config.project_name(),
            output_root = %output_root.display()
        )
    )]
    pub fn generate(&self, plan: &ProjectPlan, output_root: &Path) -> QuickResult<GenerationReport> {
        let project_dir = Self::project_dir(plan, output_root);

        if self.filesystem.exists(&project_dir) {
            return Err(ApplicationError::ProjectExists { path: project_dir }.into());
        }

        // Nothing exists yet, so there is nothing to roll back.
        self.filesystem.create_dir_all(&project_dir)?;

        match self.write_all(plan, &project_dir) {
            Ok(report) => {
                info!(
                    files = report.files,
                    directories = report.directories,
                    "Successfully wrote all files"
                );
                Ok(report)
            }
            Err(e) => {
                warn!(error = %e, "Write failed, attempting rollback");
                self.rollback(&project_dir, e)
            }
        }
    }

    /// The two package manager invocations for `plan`, in order.
    pub fn install_commands(plan: &ProjectPlan) -> Vec<InstallCommand> {
        let manager = plan.config.package_manager();
        vec![
            InstallCommand::new(manager, InstallStep::Dependencies, &plan.facts.dependencies),
            InstallCommand::new(
                manager,
                InstallStep::DevDependencies,
                &plan.facts.dev_dependencies,
            ),
        ]
    }

    /// Run the install commands in `project_dir`, stopping at the first
    /// failure. Written files are left in place.
    #[instrument(skip_all, fields(manager = %plan.config.package_manager()))]
    pub fn install(&self, plan: &ProjectPlan, project_dir: &Path) -> QuickResult<()> {
        for command in Self::install_commands(plan) {
            info!(command = %command, "Installing {}", command.step);
            self.installer.run(&command, project_dir)?;
        }
        info!("Dependencies installed");
        Ok(())
    }

    /// Plan, write and optionally install in one call.
    pub fn scaffold(
        &self,
        config: ProjectConfig,
        output_root: &Path,
        install: bool,
    ) -> QuickResult<GenerationReport> {
        let plan = self.plan(config)?;
        let report = self.generate(&plan, output_root)?;
        if install {
            self.install(&plan, &report.project_dir)?;
        }
        Ok(report)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn write_all(&self, plan: &ProjectPlan, project_dir: &Path) -> QuickResult<GenerationReport> {
        let mut files = 0;
        let mut directories = 0;
        for entry in plan.tree.entries() {
            let path = project_dir.join(entry.path());
            match &entry {
                FsEntry::Directory(_) => {
                    self.filesystem.create_dir_all(&path)?;
                    directories += 1;
                }
                FsEntry::File(file) => {
                    debug!(path = %file.path, bytes = file.size(), "Writing file");
                    self.filesystem.write_file(&path, &file.content)?;
                    files += 1;
                }
            }
        }

        Ok(GenerationReport {
            project_dir: project_dir.to_path_buf(),
            files,
            directories,
        })
    }

    /// Best-effort rollback; returns the error to surface.
    fn rollback<T>(&self, root: &Path, cause: QuickError) -> QuickResult<T> {
        match self.filesystem.remove_dir_all(root) {
            Ok(()) => {
                info!("Rollback successful");
                Err(cause)
            }
            Err(e) => {
                warn!(error = %e, path = %root.display(), "Rollback failed");
                Err(ApplicationError::RollbackFailed {
                    path: root.to_path_buf(),
                    reason: format!("{e} (after: {cause})"),
                }
                .into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{MockFilesystem, MockPackageInstaller};
    use mockall::Sequence;
    use mockall::predicate::eq;

    fn plan() -> ProjectPlan {
        ProjectPlan::build(ProjectConfig::builder("demo").build().unwrap()).unwrap()
    }

    fn io_error(path: &Path) -> QuickError {
        ApplicationError::FilesystemError {
            path: path.to_path_buf(),
            reason: "disk full".into(),
        }
        .into()
    }

    #[test]
    fn existing_directory_fails_before_any_write() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .with(eq(PathBuf::from("/out/demo")))
            .return_const(true);
        fs.expect_create_dir_all().never();
        fs.expect_write_file().never();
        fs.expect_remove_dir_all().never();

        let service = ScaffoldService::new(Box::new(fs), Box::new(MockPackageInstaller::new()));
        let err = service.generate(&plan(), Path::new("/out")).unwrap_err();
        assert_eq!(
            err,
            QuickError::Application(ApplicationError::ProjectExists {
                path: PathBuf::from("/out/demo")
            })
        );
    }

    #[test]
    fn write_failure_rolls_back() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().returning(|path, _| Err(io_error(path)));
        fs.expect_remove_dir_all()
            .with(eq(PathBuf::from("/out/demo")))
            .times(1)
            .returning(|_| Ok(()));

        let service = ScaffoldService::new(Box::new(fs), Box::new(MockPackageInstaller::new()));
        let err = service.generate(&plan(), Path::new("/out")).unwrap_err();
        assert!(matches!(
            err,
            QuickError::Application(ApplicationError::FilesystemError { .. })
        ));
    }

    #[test]
    fn root_creation_failure_is_reported_without_rollback() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        fs.expect_create_dir_all()
            .with(eq(PathBuf::from("/out/demo")))
            .times(1)
            .returning(|path| Err(io_error(path)));
        fs.expect_write_file().never();
        fs.expect_remove_dir_all().never();

        let service = ScaffoldService::new(Box::new(fs), Box::new(MockPackageInstaller::new()));
        let err = service.generate(&plan(), Path::new("/out")).unwrap_err();
        assert_eq!(
            err,
            QuickError::Application(ApplicationError::FilesystemError {
                path: PathBuf::from("/out/demo"),
                reason: "disk full".into(),
            })
        );
    }

    #[test]
    fn failed_rollback_is_reported() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().returning(|path, _| Err(io_error(path)));
        fs.expect_remove_dir_all().returning(|path| Err(io_error(path)));

        let service = ScaffoldService::new(Box::new(fs), Box::new(MockPackageInstaller::new()));
        let err = service.generate(&plan(), Path::new("/out")).unwrap_err();
        assert!(matches!(
            err,
            QuickError::Application(ApplicationError::RollbackFailed { .. })
        ));
    }

    #[test]
    fn generate_reports_counts() {
        let plan = plan();
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file()
            .times(plan.tree.file_count())
            .returning(|_, _| Ok(()));

        let service = ScaffoldService::new(Box::new(fs), Box::new(MockPackageInstaller::new()));
        let report = service.generate(&plan, Path::new("/out")).unwrap();
        assert_eq!(report.files, plan.tree.file_count());
        assert_eq!(report.directories, plan.tree.directory_count());
        assert_eq!(report.project_dir, PathBuf::from("/out/demo"));
    }

    #[test]
    fn install_runs_runtime_then_dev() {
        let mut seq = Sequence::new();
        let mut installer = MockPackageInstaller::new();
        installer
            .expect_run()
            .withf(|cmd, _| cmd.step == InstallStep::Dependencies)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        installer
            .expect_run()
            .withf(|cmd, _| cmd.to_string() == "npm install --save-dev nodemon")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));

        let service = ScaffoldService::new(Box::new(MockFilesystem::new()), Box::new(installer));
        service.install(&plan(), Path::new("/out/demo")).unwrap();
    }

    #[test]
    fn install_stops_after_first_failure() {
        let mut installer = MockPackageInstaller::new();
        installer.expect_run().times(1).returning(|cmd, _| {
            Err(ApplicationError::InstallFailed {
                step: cmd.step,
                command: cmd.to_string(),
                diagnostic: "ERR!".into(),
            }
            .into())
        });

        let service = ScaffoldService::new(Box::new(MockFilesystem::new()), Box::new(installer));
        let err = service.install(&plan(), Path::new("/out/demo")).unwrap_err();
        assert_eq!(err.diagnostic(), Some("ERR!"));
    }

    #[test]
    fn install_commands_follow_resolver_lists() {
        let plan = ProjectPlan::build(
            ProjectConfig::builder("demo")
                .database(true)
                .auth(true)
                .package_manager(crate::domain::PackageManager::Pnpm)
                .build()
                .unwrap(),
        )
        .unwrap();
        let commands = ScaffoldService::install_commands(&plan);
        assert_eq!(
            commands[0].to_string(),
            "pnpm add express dotenv ejs mongoose bcryptjs jsonwebtoken"
        );
        assert_eq!(commands[1].to_string(), "pnpm add -D nodemon");
    }
}
