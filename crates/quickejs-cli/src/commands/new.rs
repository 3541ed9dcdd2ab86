//! Implementation of the `quick-ejs new` command.
//!
//! Responsibility: turn flags, an answers file and prompts into a
//! `ProjectConfig`, call the core scaffold service, and display results.
//! No generation logic lives here.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument};

use quickejs_adapters::{LocalFilesystem, ProcessInstaller};
use quickejs_core::{
    application::{ApplicationError, Filesystem, InstallCommand, ScaffoldService},
    domain::{DeployTarget, PackageManager, ProjectConfig, ProjectPlan, TemplateKind},
};

use crate::{
    cli::{GlobalArgs, NewArgs, OutputFormat},
    config::{AppConfig, Defaults},
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
    prompts::{self, Prompter},
};

/// Name offered when none was given.
const DEFAULT_NAME: &str = "my-app";

/// Execute the `quick-ejs new` command.
///
/// Dispatch sequence:
/// 1. Resolve the configuration (answers file, flags, prompts, defaults)
/// 2. Plan the project tree
/// 3. Early-exit if `--dry-run`
/// 4. Write the tree (fails before writing if the directory exists)
/// 5. Install dependencies unless `--skip-install`
/// 6. Print next-steps guidance
#[instrument(skip_all, fields(name = args.name.as_deref().unwrap_or("")))]
pub fn execute(
    args: NewArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    // 1. Resolve configuration
    let output_root = args.output.clone().unwrap_or_else(|| PathBuf::from("."));
    let (project, prompter) = resolve_config(&args, &config.defaults, &output_root)?;
    debug!(config = %project, "Configuration resolved");

    let service = ScaffoldService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(ProcessInstaller::new()),
    );

    // 2. Plan
    let plan = service.plan(project).with_cli_context(|| "planning project")?;
    let project_dir = ScaffoldService::project_dir(&plan, &output_root);

    // 3. Dry run: describe but do not write.
    if args.dry_run {
        return show_dry_run(&plan, &project_dir, &output);
    }

    // Answers typed at a prompt get one last look.
    if let Some(prompter) = prompter.filter(|_| !global.quiet) {
        show_configuration(&plan, &project_dir, &output)?;
        if !prompter.confirm("Create this project?", true)? {
            return Err(CliError::Cancelled);
        }
    }

    // 4. Write
    output.header(&format!("Creating '{}'...", plan.config.project_name()))?;
    info!(path = %project_dir.display(), "Scaffold started");
    let report = service
        .generate(&plan, &output_root)
        .with_cli_context(|| "writing project")?;
    output.success(&format!(
        "Wrote {} files in {} directories",
        report.files, report.directories
    ))?;

    // 5. Install
    let installed = !args.skip_install;
    if installed {
        let manager = plan.config.package_manager();
        let spinner = output.spinner(format!("Installing dependencies with {manager}..."));
        let result = service.install(&plan, &report.project_dir);
        spinner.finish_and_clear();
        result.with_cli_context(|| "installing dependencies")?;
        output.success("Dependencies installed")?;
    }

    info!(project = %plan.config.project_name(), "Scaffold completed");

    // 6. Success + next steps
    if output.format() == OutputFormat::Json {
        output.json(&Summary {
            project_dir: &report.project_dir,
            files: report.files,
            directories: report.directories,
            installed,
        })?;
        return Ok(());
    }

    output.success(&format!(
        "Project '{}' created!",
        plan.config.project_name()
    ))?;
    output.print("")?;
    output.list("Next steps:", next_steps(&plan, &report.project_dir, installed))?;

    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Summary<'a> {
    project_dir: &'a Path,
    files: usize,
    directories: usize,
    installed: bool,
}

// ── Configuration resolution ──────────────────────────────────────────────────

/// Answers gathered so far; `None` means "not decided yet".
#[derive(Debug, Default, Clone, PartialEq)]
struct Draft {
    name: Option<String>,
    template: Option<TemplateKind>,
    routes: Option<bool>,
    controllers: Option<bool>,
    database: Option<bool>,
    auth: Option<bool>,
    package_manager: Option<PackageManager>,
    deploy: Option<Option<DeployTarget>>,
}

impl Draft {
    fn from_args(args: &NewArgs) -> Self {
        Self {
            name: args.name.clone(),
            template: args.template.map(Into::into),
            routes: args.routes(),
            controllers: args.controllers(),
            database: args.database(),
            auth: args.auth(),
            package_manager: args.package_manager.map(Into::into),
            deploy: args.deploy.map(|d| d.target()),
        }
    }

    /// Whether any question is still open.
    fn is_complete(&self) -> bool {
        self.name.is_some()
            && self.template.is_some()
            && self.routes.is_some()
            && self.controllers.is_some()
            && self.database.is_some()
            && (self.auth.is_some() || self.database == Some(false))
            && self.package_manager.is_some()
            && self.deploy.is_some()
    }

    /// Ask every open question, one prompt each.
    /// Authentication is only asked about when a database was chosen.
    fn ask(mut self, defaults: &Defaults, prompter: &dyn Prompter, output_root: &Path) -> CliResult<Self> {
        if self.name.is_none() {
            let fs = LocalFilesystem::new();
            let taken = |name: &str| fs.exists(&output_root.join(name));
            self.name = Some(prompter.project_name(DEFAULT_NAME, &taken)?);
        }
        if self.template.is_none() {
            self.template = Some(prompter.template(defaults.template)?);
        }
        if self.routes.is_none() {
            self.routes = Some(prompter.confirm("Would you like to use separate routes?", defaults.routes)?);
        }
        if self.controllers.is_none() {
            self.controllers = Some(prompter.confirm(
                "Would you like to use controllers (MVC pattern)?",
                defaults.controllers,
            )?);
        }
        if self.database.is_none() {
            self.database = Some(prompter.confirm("Would you like to use MongoDB?", defaults.database)?);
        }
        if self.auth.is_none() && self.database == Some(true) {
            self.auth = Some(prompter.confirm(
                "Would you like JWT authentication setup?",
                defaults.auth,
            )?);
        }
        if self.package_manager.is_none() {
            self.package_manager = Some(prompter.package_manager(defaults.package_manager)?);
        }
        if self.deploy.is_none() {
            let default = defaults.deploy.target().is_some();
            let vercel = prompter.confirm("Would you like a Vercel deployment config?", default)?;
            self.deploy = Some(vercel.then_some(DeployTarget::Vercel));
        }
        Ok(self)
    }

    /// Close every open question with its configured default.
    fn build(self, defaults: &Defaults) -> CliResult<ProjectConfig> {
        ProjectConfig::builder(self.name.unwrap_or_else(|| DEFAULT_NAME.to_string()))
            .template(self.template.unwrap_or(defaults.template))
            .routes(self.routes.unwrap_or(defaults.routes))
            .controllers(self.controllers.unwrap_or(defaults.controllers))
            .database(self.database.unwrap_or(defaults.database))
            .auth(self.auth.unwrap_or(defaults.auth))
            .package_manager(self.package_manager.unwrap_or(defaults.package_manager))
            .deploy_target(self.deploy.unwrap_or_else(|| defaults.deploy.target()))
            .build()
            .map_err(|e| CliError::Core(e.into()))
    }

    /// Flags given on the command line win over an answers file.
    fn over(self, base: &ProjectConfig) -> Self {
        Self {
            name: self.name.or_else(|| Some(base.project_name().as_str().to_string())),
            template: self.template.or(Some(base.template())),
            routes: self.routes.or(Some(base.use_routes())),
            controllers: self.controllers.or(Some(base.use_controllers())),
            database: self.database.or(Some(base.use_database())),
            auth: self.auth.or(Some(base.use_auth())),
            package_manager: self.package_manager.or(Some(base.package_manager())),
            deploy: self.deploy.or(Some(base.deploy_target())),
        }
    }
}

/// The resolved config, plus the prompter when questions were asked.
fn resolve_config(
    args: &NewArgs,
    defaults: &Defaults,
    output_root: &Path,
) -> CliResult<(ProjectConfig, Option<Box<dyn Prompter>>)> {
    let draft = Draft::from_args(args);

    if let Some(path) = &args.answers {
        let base = read_answers(path)?;
        return Ok((draft.over(&base).build(defaults)?, None));
    }

    if args.yes || draft.is_complete() {
        return Ok((draft.build(defaults)?, None));
    }

    // A taken name fails now, not after every question.
    if let Some(name) = &draft.name {
        ensure_free(output_root, name)?;
    }

    let prompter = prompts::terminal()?;
    let config = draft.ask(defaults, prompter.as_ref(), output_root)?.build(defaults)?;
    Ok((config, Some(prompter)))
}

fn ensure_free(output_root: &Path, name: &str) -> CliResult<()> {
    let path = output_root.join(name);
    if LocalFilesystem::new().exists(&path) {
        return Err(CliError::Core(ApplicationError::ProjectExists { path }.into()));
    }
    Ok(())
}

/// Load a JSON answers file (`projectName`, `template`, `useRoutes`, ...).
fn read_answers(path: &Path) -> CliResult<ProjectConfig> {
    let text = std::fs::read_to_string(path)
        .with_cli_context(|| format!("Failed to read answers file '{}'", path.display()))?;
    serde_json::from_str(&text).map_err(|e| CliError::InvalidInput {
        message: format!("answers file '{}': {e}", path.display()),
        source: Some(Box::new(e)),
    })
}

// ── UI helpers ────────────────────────────────────────────────────────────────

fn show_configuration(plan: &ProjectPlan, project_dir: &Path, out: &OutputManager) -> CliResult<()> {
    let config = &plan.config;
    let yes_no = |on: bool| if on { "yes" } else { "no" };

    out.header("Configuration")?;
    out.field("Project", config.project_name())?;
    out.field("Template", config.template().label())?;
    out.field("Routes", yes_no(config.use_routes()))?;
    out.field("Controllers", yes_no(config.use_controllers()))?;
    out.field("MongoDB", yes_no(config.use_database()))?;
    out.field("Authentication", yes_no(config.use_auth()))?;
    out.field("Package manager", config.package_manager())?;
    out.field(
        "Deploy",
        config.deploy_target().map_or("none".to_string(), |t| t.to_string()),
    )?;
    out.field("Location", project_dir.display())?;
    out.print("")?;
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DryRun<'a> {
    project_dir: &'a Path,
    config: &'a ProjectConfig,
    files: Vec<String>,
    dependencies: &'a [&'static str],
    dev_dependencies: &'a [&'static str],
    commands: Vec<String>,
}

fn show_dry_run(plan: &ProjectPlan, project_dir: &Path, out: &OutputManager) -> CliResult<()> {
    let commands: Vec<String> = ScaffoldService::install_commands(plan)
        .iter()
        .map(InstallCommand::to_string)
        .collect();

    if out.format() == OutputFormat::Json {
        out.json(&DryRun {
            project_dir,
            config: &plan.config,
            files: plan.tree.files().into_iter().map(|(path, _)| path).collect(),
            dependencies: &plan.facts.dependencies,
            dev_dependencies: &plan.facts.dev_dependencies,
            commands,
        })?;
        return Ok(());
    }

    out.info(&format!(
        "Dry run: would create '{}' at {}",
        plan.config.project_name(),
        project_dir.display(),
    ))?;
    for (path, content) in plan.tree.files() {
        out.detail(&format!("  {path} ({} bytes)", content.len()))?;
    }
    out.list("Would run:", commands)?;
    Ok(())
}

fn next_steps(plan: &ProjectPlan, project_dir: &Path, installed: bool) -> Vec<String> {
    let manager = plan.config.package_manager();
    let mut steps = vec![format!("cd {}", project_dir.display())];
    if !installed {
        steps.push(format!("{} install", manager.program()));
    }
    steps.push("cp .env.example .env".into());
    if plan.config.use_database() {
        steps.push("# set MONGODB_URI in .env and start MongoDB".into());
    }
    steps.push(manager.run_script("dev"));
    steps
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{DeployArg, TemplateArg};
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// Replays yes/no answers and records which questions were asked.
    #[derive(Default)]
    struct Scripted {
        confirms: RefCell<VecDeque<bool>>,
        asked: RefCell<Vec<String>>,
        default_name_taken: RefCell<Option<bool>>,
    }

    impl Scripted {
        fn with_confirms(answers: &[bool]) -> Self {
            Self {
                confirms: RefCell::new(answers.iter().copied().collect()),
                ..Self::default()
            }
        }
    }

    impl Prompter for Scripted {
        fn project_name(&self, default: &str, taken: &dyn Fn(&str) -> bool) -> CliResult<String> {
            self.asked.borrow_mut().push("name".into());
            *self.default_name_taken.borrow_mut() = Some(taken(default));
            Ok(default.to_string())
        }
        fn template(&self, _default: TemplateKind) -> CliResult<TemplateKind> {
            self.asked.borrow_mut().push("template".into());
            Ok(TemplateKind::StaticHtml)
        }
        fn confirm(&self, question: &str, default: bool) -> CliResult<bool> {
            self.asked.borrow_mut().push(question.into());
            Ok(self.confirms.borrow_mut().pop_front().unwrap_or(default))
        }
        fn package_manager(&self, _default: PackageManager) -> CliResult<PackageManager> {
            self.asked.borrow_mut().push("pm".into());
            Ok(PackageManager::Yarn)
        }
    }

    fn defaults() -> Defaults {
        AppConfig::default().defaults
    }

    #[test]
    fn yes_fills_gaps_from_defaults() {
        let args = NewArgs {
            name: Some("shop".into()),
            mongodb: true,
            yes: true,
            ..NewArgs::default()
        };
        let (config, _) = resolve_config(&args, &defaults(), Path::new(".")).unwrap();
        assert_eq!(config.project_name().as_str(), "shop");
        assert!(config.use_database());
        assert!(!config.use_auth());
        assert!(config.use_routes());
        assert_eq!(config.deploy_target(), Some(DeployTarget::Vercel));
    }

    #[test]
    fn yes_without_name_uses_default_name() {
        let args = NewArgs {
            yes: true,
            ..NewArgs::default()
        };
        let (config, _) = resolve_config(&args, &defaults(), Path::new(".")).unwrap();
        assert_eq!(config.project_name().as_str(), DEFAULT_NAME);
    }

    #[test]
    fn invalid_name_is_rejected() {
        let args = NewArgs {
            name: Some("my app".into()),
            yes: true,
            ..NewArgs::default()
        };
        let Err(err) = resolve_config(&args, &defaults(), Path::new(".")) else {
            panic!("expected an error");
        };
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn auth_is_not_asked_without_database() {
        let prompter = Scripted::with_confirms(&[true, true, false]);
        let draft = Draft {
            name: Some("x".into()),
            ..Draft::default()
        }
        .ask(&defaults(), &prompter, Path::new("."))
        .unwrap();

        assert_eq!(draft.database, Some(false));
        assert_eq!(draft.auth, None);
        assert!(
            !prompter
                .asked
                .borrow()
                .iter()
                .any(|q| q.contains("JWT"))
        );
        assert!(!prompter.asked.borrow().contains(&"name".to_string()));
    }

    #[test]
    fn auth_is_asked_after_database() {
        let prompter = Scripted::with_confirms(&[true, false, true, true, false]);
        let config = Draft::default()
            .ask(&defaults(), &prompter, Path::new("."))
            .unwrap()
            .build(&defaults())
            .unwrap();

        assert_eq!(config.template(), TemplateKind::StaticHtml);
        assert!(config.use_routes());
        assert!(!config.use_controllers());
        assert!(config.use_database());
        assert!(config.use_auth());
        assert_eq!(config.package_manager(), PackageManager::Yarn);
        assert_eq!(config.deploy_target(), None);
    }

    #[test]
    fn taken_flag_name_fails_before_any_prompt() {
        let tmp = tempfile::TempDir::new().unwrap();
        std::fs::create_dir(tmp.path().join("shop")).unwrap();
        let args = NewArgs {
            name: Some("shop".into()),
            ..NewArgs::default()
        };
        let Err(err) = resolve_config(&args, &defaults(), tmp.path()) else {
            panic!("expected an error");
        };
        assert!(
            matches!(
                &err,
                CliError::Core(quickejs_core::error::QuickError::Application(ApplicationError::ProjectExists { path }))
                    if *path == tmp.path().join("shop")
            ),
            "{err:?}"
        );
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn name_prompt_knows_which_directories_are_taken() {
        let tmp = tempfile::TempDir::new().unwrap();
        let prompter = Scripted::with_confirms(&[]);
        Draft::default()
            .ask(&defaults(), &prompter, tmp.path())
            .unwrap();
        assert_eq!(*prompter.default_name_taken.borrow(), Some(false));

        std::fs::create_dir(tmp.path().join(DEFAULT_NAME)).unwrap();
        let prompter = Scripted::with_confirms(&[]);
        Draft::default()
            .ask(&defaults(), &prompter, tmp.path())
            .unwrap();
        assert_eq!(*prompter.default_name_taken.borrow(), Some(true));
    }

    #[test]
    fn flags_leave_nothing_to_ask() {
        let args = NewArgs {
            name: Some("x".into()),
            template: Some(TemplateArg::Ejs),
            no_routes: true,
            controllers: true,
            no_mongodb: true,
            package_manager: Some(crate::cli::PackageManagerArg::Npm),
            deploy: Some(DeployArg::None),
            ..NewArgs::default()
        };
        assert!(Draft::from_args(&args).is_complete());
    }

    #[test]
    fn flags_override_answers_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("answers.json");
        std::fs::write(
            &path,
            r#"{ "projectName": "from-file", "template": "html", "useMongoDB": true, "useAuth": true, "packageManager": "pnpm" }"#,
        )
        .unwrap();

        let args = NewArgs {
            name: Some("from-flag".into()),
            no_auth: true,
            answers: Some(path),
            ..NewArgs::default()
        };
        let (config, _) = resolve_config(&args, &defaults(), Path::new(".")).unwrap();
        assert_eq!(config.project_name().as_str(), "from-flag");
        assert_eq!(config.template(), TemplateKind::StaticHtml);
        assert!(config.use_database());
        assert!(!config.use_auth());
        assert_eq!(config.package_manager(), PackageManager::Pnpm);
    }

    #[test]
    fn malformed_answers_file_is_invalid_input() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("answers.json");
        std::fs::write(&path, r#"{ "projectName": "x", "colour": "blue" }"#).unwrap();

        let args = NewArgs {
            answers: Some(path),
            ..NewArgs::default()
        };
        assert!(matches!(
            resolve_config(&args, &defaults(), Path::new(".")),
            Err(CliError::InvalidInput { .. })
        ));
    }

    #[test]
    fn next_steps_mention_install_only_when_skipped() {
        let plan = ProjectPlan::build(
            ProjectConfig::builder("shop")
                .database(true)
                .package_manager(PackageManager::Pnpm)
                .build()
                .unwrap(),
        )
        .unwrap();
        let dir = Path::new("shop");

        let skipped = next_steps(&plan, dir, false);
        assert_eq!(skipped[1], "pnpm install");
        assert_eq!(skipped.last().map(String::as_str), Some("pnpm dev"));
        assert!(skipped.iter().any(|s| s.contains("MONGODB_URI")));

        let installed = next_steps(&plan, dir, true);
        assert!(!installed.iter().any(|s| s == "pnpm install"));
    }
}
