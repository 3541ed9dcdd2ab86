//! Interactive questions for `quick-ejs new`.
//!
//! The questions are asked through the [`Prompter`] trait so the answer
//! merging in `commands::new` can be tested with scripted answers.

use quickejs_core::domain::{PackageManager, ProjectName, TemplateKind};

use crate::error::{CliError, CliResult};

/// Source of answers for questions the flags left open.
pub trait Prompter {
    /// `taken` reports names whose directory already exists.
    fn project_name(&self, default: &str, taken: &dyn Fn(&str) -> bool) -> CliResult<String>;
    fn template(&self, default: TemplateKind) -> CliResult<TemplateKind>;
    fn confirm(&self, question: &str, default: bool) -> CliResult<bool>;
    fn package_manager(&self, default: PackageManager) -> CliResult<PackageManager>;
}

/// Error text shown when a typed project name is rejected.
pub fn name_problem(input: &str) -> Option<String> {
    ProjectName::parse(input).err().map(|_| {
        "Project name may only include letters, numbers, underscores and hyphens.".to_string()
    })
}

/// The prompter for this build.
pub fn terminal() -> CliResult<Box<dyn Prompter>> {
    #[cfg(feature = "interactive")]
    {
        use std::io::IsTerminal;
        if !std::io::stdin().is_terminal() {
            return Err(CliError::InvalidInput {
                message: "cannot ask questions without a terminal; pass --yes or --answers".into(),
                source: None,
            });
        }
        Ok(Box::new(dialog::DialoguerPrompter::new()))
    }
    #[cfg(not(feature = "interactive"))]
    {
        Err(CliError::FeatureNotAvailable {
            feature: "interactive",
        })
    }
}

#[cfg(feature = "interactive")]
mod dialog {
    use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};
    use quickejs_core::domain::{PackageManager, TemplateKind};

    use super::{Prompter, name_problem};
    use crate::error::{CliError, CliResult};

    const TEMPLATES: [TemplateKind; 2] = [TemplateKind::DynamicView, TemplateKind::StaticHtml];

    pub struct DialoguerPrompter {
        theme: ColorfulTheme,
    }

    impl DialoguerPrompter {
        pub fn new() -> Self {
            Self {
                theme: ColorfulTheme::default(),
            }
        }
    }

    fn prompt_failed(e: dialoguer::Error) -> CliError {
        CliError::IoError {
            message: "prompt failed".into(),
            source: std::io::Error::other(e.to_string()),
        }
    }

    impl Prompter for DialoguerPrompter {
        fn project_name(&self, default: &str, taken: &dyn Fn(&str) -> bool) -> CliResult<String> {
            Input::<String>::with_theme(&self.theme)
                .with_prompt("What is your project named?")
                .default(default.to_string())
                .validate_with(|input: &String| match name_problem(input) {
                    Some(problem) => Err(problem),
                    None if taken(input) => Err(format!("Directory '{input}' already exists.")),
                    None => Ok(()),
                })
                .interact_text()
                .map_err(prompt_failed)
        }

        fn template(&self, default: TemplateKind) -> CliResult<TemplateKind> {
            let labels: Vec<&str> = TEMPLATES.iter().map(|t| t.label()).collect();
            let default_index = TEMPLATES.iter().position(|t| *t == default).unwrap_or(0);
            let index = Select::with_theme(&self.theme)
                .with_prompt("Which template would you like to use?")
                .items(&labels)
                .default(default_index)
                .interact()
                .map_err(prompt_failed)?;
            Ok(TEMPLATES[index])
        }

        fn confirm(&self, question: &str, default: bool) -> CliResult<bool> {
            Confirm::with_theme(&self.theme)
                .with_prompt(question)
                .default(default)
                .interact()
                .map_err(prompt_failed)
        }

        fn package_manager(&self, default: PackageManager) -> CliResult<PackageManager> {
            let names: Vec<&str> = PackageManager::ALL.iter().map(|pm| pm.as_str()).collect();
            let default_index = PackageManager::ALL
                .iter()
                .position(|pm| *pm == default)
                .unwrap_or(0);
            let index = Select::with_theme(&self.theme)
                .with_prompt("Which package manager would you like to use?")
                .items(&names)
                .default(default_index)
                .interact()
                .map_err(prompt_failed)?;
            Ok(PackageManager::ALL[index])
        }
    }
}
