//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use quickejs_core::domain::{DeployTarget, PackageManager, TemplateKind};
use serde::{Deserialize, Serialize};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "quick-ejs",
    bin_name = "quick-ejs",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{26a1} Express + EJS starter projects in one command",
    long_about = "quick-ejs generates a ready-to-run Express starter: views or \
                  static pages, routes, controllers, MongoDB and JWT auth, \
                  then installs its dependencies.",
    after_help = "EXAMPLES:\n\
        \x20 quick-ejs new my-app\n\
        \x20 quick-ejs new shop --mongodb --auth --package-manager pnpm --yes\n\
        \x20 quick-ejs new landing --template html --no-routes --no-controllers -y\n\
        \x20 quick-ejs completions bash > /usr/share/bash-completion/completions/quick-ejs",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new Express project.
    #[command(
        visible_alias = "n",
        about = "Create a new project",
        after_help = "EXAMPLES:\n\
            \x20 quick-ejs new my-app                      # ask for everything else\n\
            \x20 quick-ejs new my-app --yes                # configured defaults\n\
            \x20 quick-ejs new api --mongodb --auth -y     # MongoDB + JWT\n\
            \x20 quick-ejs new my-app --answers answers.json\n\
            \x20 quick-ejs new my-app -y --dry-run         # preview only"
    )]
    New(NewArgs),

    /// Initialise a quick-ejs configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 quick-ejs init           # default location\n\
            \x20 quick-ejs init --force   # overwrite an existing file"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 quick-ejs completions bash > ~/.local/share/bash-completion/completions/quick-ejs\n\
            \x20 quick-ejs completions zsh  > ~/.zfunc/_quick-ejs\n\
            \x20 quick-ejs completions fish > ~/.config/fish/completions/quick-ejs.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the quick-ejs configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 quick-ejs config get defaults.package_manager\n\
            \x20 quick-ejs config list\n\
            \x20 quick-ejs config path"
    )]
    Config(ConfigCommands),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `quick-ejs new`.
///
/// Every feature flag is optional. Unset ones come from `--answers`, then
/// from a prompt, then (with `--yes`) from the configured defaults.
#[derive(Debug, Default, Args)]
pub struct NewArgs {
    /// Project name; also the directory created under `--output`.
    #[arg(value_name = "NAME", help = "Project name (letters, digits, - and _)")]
    pub name: Option<String>,

    /// Page rendering style.
    #[arg(short = 't', long = "template", value_enum, help = "Template engine")]
    pub template: Option<TemplateArg>,

    #[arg(long = "routes", overrides_with = "no_routes", help = "Use separate route files")]
    pub routes: bool,
    #[arg(long = "no-routes", help = "Register handlers in the entry file")]
    pub no_routes: bool,

    #[arg(
        long = "controllers",
        overrides_with = "no_controllers",
        help = "Use controllers (MVC pattern)"
    )]
    pub controllers: bool,
    #[arg(long = "no-controllers", help = "Keep handlers inline")]
    pub no_controllers: bool,

    #[arg(
        long = "mongodb",
        visible_alias = "db",
        overrides_with = "no_mongodb",
        help = "Add MongoDB (mongoose) integration"
    )]
    pub mongodb: bool,
    #[arg(long = "no-mongodb", visible_alias = "no-db", help = "No database")]
    pub no_mongodb: bool,

    /// JWT authentication. Ignored without `--mongodb`.
    #[arg(long = "auth", overrides_with = "no_auth", help = "Add JWT authentication (needs MongoDB)")]
    pub auth: bool,
    #[arg(long = "no-auth", help = "No authentication")]
    pub no_auth: bool,

    #[arg(
        short = 'p',
        long = "package-manager",
        value_enum,
        value_name = "PM",
        help = "Package manager used to install dependencies"
    )]
    pub package_manager: Option<PackageManagerArg>,

    #[arg(long = "deploy", value_enum, value_name = "TARGET", help = "Deployment descriptor to generate")]
    pub deploy: Option<DeployArg>,

    /// JSON file with pre-filled answers (`projectName`, `template`, ...).
    #[arg(long = "answers", value_name = "FILE", help = "Read answers from a JSON file")]
    pub answers: Option<PathBuf>,

    /// Parent directory for the new project.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Output directory (default: current directory)"
    )]
    pub output: Option<PathBuf>,

    /// Skip prompts; unanswered questions take their defaults.
    #[arg(short = 'y', long = "yes", help = "Use defaults instead of prompting")]
    pub yes: bool,

    /// Preview what would be created without writing any files.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,

    #[arg(long = "skip-install", help = "Write the files but do not install dependencies")]
    pub skip_install: bool,
}

/// Collapse a `--x` / `--no-x` pair.
fn toggle(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

impl NewArgs {
    pub fn routes(&self) -> Option<bool> {
        toggle(self.routes, self.no_routes)
    }
    pub fn controllers(&self) -> Option<bool> {
        toggle(self.controllers, self.no_controllers)
    }
    pub fn database(&self) -> Option<bool> {
        toggle(self.mongodb, self.no_mongodb)
    }
    pub fn auth(&self) -> Option<bool> {
        toggle(self.auth, self.no_auth)
    }
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `quick-ejs init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `quick-ejs completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `quick-ejs config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.template`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── value enums ───────────────────────────────────────────────────────────────

/// `--template` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TemplateArg {
    /// EJS views rendered on the server.
    Ejs,
    /// Static HTML served from `public/`.
    Html,
}

impl From<TemplateArg> for TemplateKind {
    fn from(arg: TemplateArg) -> Self {
        match arg {
            TemplateArg::Ejs => TemplateKind::DynamicView,
            TemplateArg::Html => TemplateKind::StaticHtml,
        }
    }
}

/// `--package-manager` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PackageManagerArg {
    Npm,
    Yarn,
    Pnpm,
}

impl From<PackageManagerArg> for PackageManager {
    fn from(arg: PackageManagerArg) -> Self {
        match arg {
            PackageManagerArg::Npm => PackageManager::Npm,
            PackageManagerArg::Yarn => PackageManager::Yarn,
            PackageManagerArg::Pnpm => PackageManager::Pnpm,
        }
    }
}

/// `--deploy` values; also the `defaults.deploy` config key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeployArg {
    /// Write `vercel.json`.
    Vercel,
    /// No deployment descriptor.
    None,
}

impl DeployArg {
    pub fn target(self) -> Option<DeployTarget> {
        match self {
            Self::Vercel => Some(DeployTarget::Vercel),
            Self::None => None,
        }
    }

    pub fn from_target(target: Option<DeployTarget>) -> Self {
        match target {
            Some(DeployTarget::Vercel) => Self::Vercel,
            None => Self::None,
        }
    }
}

impl std::fmt::Display for DeployArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Vercel => write!(f, "vercel"),
            Self::None => write!(f, "none"),
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
