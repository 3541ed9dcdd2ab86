//! Domain value objects: TemplateKind, PackageManager, DeployTarget, ProjectName.
//!
//! # Design
//!
//! Pure value types with no identity. They hold no resolution logic; what a
//! flag *implies* lives in `resolver.rs`.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── TemplateKind ─────────────────────────────────────────────────────────────

/// How the generated server produces its pages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemplateKind {
    /// Server-rendered EJS views under `views/`.
    #[default]
    #[serde(rename = "ejs", alias = "dynamic-view")]
    DynamicView,
    /// A single static `public/index.html`.
    #[serde(rename = "html", alias = "static-html")]
    StaticHtml,
}

impl TemplateKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DynamicView => "ejs",
            Self::StaticHtml => "html",
        }
    }

    /// Human-readable label used by prompts and the generated README.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::DynamicView => "EJS (Dynamic templating)",
            Self::StaticHtml => "HTML (Static files)",
        }
    }

    pub const fn is_dynamic(self) -> bool {
        matches!(self, Self::DynamicView)
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ejs" | "dynamic-view" | "dynamic" => Ok(Self::DynamicView),
            "html" | "static-html" | "static" => Ok(Self::StaticHtml),
            other => Err(DomainError::UnknownTemplate(other.to_string())),
        }
    }
}

// ── PackageManager ────────────────────────────────────────────────────────────

/// Node package manager used for the generated project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    #[default]
    Npm,
    Yarn,
    Pnpm,
}

impl PackageManager {
    pub const ALL: [PackageManager; 3] = [Self::Npm, Self::Yarn, Self::Pnpm];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Yarn => "yarn",
            Self::Pnpm => "pnpm",
        }
    }

    /// Program name to spawn.
    pub const fn program(&self) -> &'static str {
        self.as_str()
    }

    /// Arguments that precede the package names for an install step.
    pub fn install_args(&self, dev: bool) -> &'static [&'static str] {
        match (self, dev) {
            (Self::Npm, false) => &["install"],
            (Self::Npm, true) => &["install", "--save-dev"],
            (Self::Yarn, false) => &["add"],
            (Self::Yarn, true) => &["add", "--dev"],
            (Self::Pnpm, false) => &["add"],
            (Self::Pnpm, true) => &["add", "-D"],
        }
    }

    /// The command a user types to run a package script (`npm run dev`).
    pub fn run_script(&self, script: &str) -> String {
        match self {
            Self::Npm => format!("npm run {script}"),
            Self::Yarn | Self::Pnpm => format!("{} {script}", self.as_str()),
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageManager {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "npm" => Ok(Self::Npm),
            "yarn" => Ok(Self::Yarn),
            "pnpm" => Ok(Self::Pnpm),
            other => Err(DomainError::UnknownPackageManager(other.to_string())),
        }
    }
}

// ── DeployTarget ──────────────────────────────────────────────────────────────

/// Hosting platform a deployment descriptor is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeployTarget {
    Vercel,
}

impl DeployTarget {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Vercel => "vercel",
        }
    }

    /// Local state directory the platform CLI creates; kept out of git.
    pub const fn ignore_entry(&self) -> &'static str {
        match self {
            Self::Vercel => ".vercel",
        }
    }
}

impl fmt::Display for DeployTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeployTarget {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "vercel" => Ok(Self::Vercel),
            other => Err(DomainError::UnknownDeployTarget(other.to_string())),
        }
    }
}

// ── ProjectName ───────────────────────────────────────────────────────────────

/// A project name: non-empty, ASCII letters, digits, `-` and `_` only.
///
/// The name doubles as the output directory and the manifest `name`, so the
/// charset is kept narrow enough to be valid in both.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ProjectName(String);

impl ProjectName {
    pub fn parse(raw: impl Into<String>) -> Result<Self, DomainError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(DomainError::InvalidProjectName {
                name: raw,
                reason: "name cannot be empty".into(),
            });
        }
        if let Some(bad) = raw
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(DomainError::InvalidProjectName {
                reason: format!(
                    "'{bad}' is not allowed; use letters, numbers, hyphens and underscores"
                ),
                name: raw,
            });
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ProjectName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<'de> Deserialize<'de> for ProjectName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(raw).map_err(serde::de::Error::custom)
    }
}
