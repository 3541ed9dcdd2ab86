//! Everything the CLI prints to stdout.
//!
//! Messages carry a [`Tone`]; the manager decides whether that tone becomes a
//! coloured glyph, a plain glyph, or nothing at all (`--quiet`). JSON results
//! bypass quiet mode since they are the command's answer.

use std::io::{self, IsTerminal};
use std::time::Duration;

use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Width of the label column in [`OutputManager::field`].
const LABEL_WIDTH: usize = 17;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Plain,
    Success,
    Warning,
    Info,
    Heading,
    Muted,
}

impl Tone {
    fn glyph(self) -> Option<&'static str> {
        match self {
            Self::Success => Some("\u{2713}"),
            Self::Warning => Some("\u{26a0}"),
            Self::Info => Some("\u{2139}"),
            Self::Plain | Self::Heading | Self::Muted => None,
        }
    }

    fn paint(self, text: &str) -> String {
        match self {
            Self::Plain => text.to_owned(),
            Self::Success => text.green().to_string(),
            Self::Warning => text.yellow().to_string(),
            Self::Info => text.blue().to_string(),
            Self::Heading => text.cyan().bold().to_string(),
            Self::Muted => text.dimmed().to_string(),
        }
    }

    fn render(self, msg: &str, color: bool) -> String {
        match (self.glyph(), color) {
            (Some(glyph), true) => format!("{} {}", self.paint(glyph).bold(), self.paint(msg)),
            (Some(glyph), false) => format!("{glyph} {msg}"),
            (None, true) => self.paint(msg),
            (None, false) => msg.to_owned(),
        }
    }
}

/// Manages CLI output based on flags and config.
pub struct OutputManager {
    format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let format = match args.output_format {
            OutputFormat::Auto if io::stdout().is_terminal() => OutputFormat::Human,
            OutputFormat::Auto => OutputFormat::Plain,
            explicit => explicit,
        };

        Self {
            format,
            quiet: args.quiet,
            no_color: args.no_color || config.output.no_color || format != OutputFormat::Human,
            term: Term::stdout(),
        }
    }

    fn emit(&self, tone: Tone, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(&tone.render(msg, !self.no_color))
    }

    pub fn print(&self, msg: &str) -> io::Result<()> {
        self.emit(Tone::Plain, msg)
    }

    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.emit(Tone::Success, msg)
    }

    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.emit(Tone::Warning, msg)
    }

    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.emit(Tone::Info, msg)
    }

    pub fn header(&self, text: &str) -> io::Result<()> {
        self.emit(Tone::Heading, text)
    }

    /// Secondary text such as a file path in a dry-run listing.
    pub fn detail(&self, text: &str) -> io::Result<()> {
        self.emit(Tone::Muted, text)
    }

    /// `  Label:          value` with the labels aligned.
    pub fn field(&self, label: &str, value: impl std::fmt::Display) -> io::Result<()> {
        let label = format!("{label}:");
        self.print(&format!("  {label:<LABEL_WIDTH$}{value}"))
    }

    /// A plain heading followed by indented items.
    pub fn list<I, S>(&self, title: &str, items: I) -> io::Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.print(title)?;
        for item in items {
            self.print(&format!("  {}", item.as_ref()))?;
        }
        Ok(())
    }

    pub fn json<T: Serialize>(&self, value: &T) -> io::Result<()> {
        let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.term.write_line(&text)
    }

    /// Spinner for the install step; hidden unless a human is watching.
    pub fn spinner(&self, msg: impl Into<String>) -> ProgressBar {
        if self.quiet || self.format != OutputFormat::Human {
            return ProgressBar::hidden();
        }
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg} {elapsed:.dim}") {
            spinner.set_style(style);
        }
        spinner.set_message(msg.into());
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    }

    pub fn supports_color(&self) -> bool {
        !self.no_color
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Never [`OutputFormat::Auto`].
    pub fn format(&self) -> OutputFormat {
        self.format
    }
}
