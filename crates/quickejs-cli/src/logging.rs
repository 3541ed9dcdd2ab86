//! Diagnostics on stderr.
//!
//! The generator reports progress through [`crate::output::OutputManager`];
//! tracing is the second channel, silent unless asked for. `quickejs-core`
//! and `quickejs-adapters` emit events and only this module installs a
//! subscriber.
//!
//! Filter precedence: `QUICK_EJS_LOG`, then `RUST_LOG`, then the level implied
//! by `-v`/`--quiet`.

use std::io::IsTerminal as _;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::GlobalArgs;

/// Environment variable holding a filter just for this tool.
pub const LOG_ENV: &str = "QUICK_EJS_LOG";

const TARGETS: [&str; 3] = ["quick_ejs", "quickejs_core", "quickejs_adapters"];

/// How chatty the diagnostics channel is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Quiet,
    Normal,
    /// `-v`: which files and install commands ran.
    Verbose,
    /// `-vv`: per-file writes and resolved package lists.
    Debug,
    Trace,
}

impl Verbosity {
    pub fn from_args(args: &GlobalArgs) -> Self {
        if args.quiet {
            return Self::Quiet;
        }
        match args.verbose {
            0 => Self::Normal,
            1 => Self::Verbose,
            2 => Self::Debug,
            _ => Self::Trace,
        }
    }

    pub fn level(self) -> LevelFilter {
        match self {
            Self::Quiet => LevelFilter::ERROR,
            Self::Normal => LevelFilter::WARN,
            Self::Verbose => LevelFilter::INFO,
            Self::Debug => LevelFilter::DEBUG,
            Self::Trace => LevelFilter::TRACE,
        }
    }

    /// Third-party crates stay at WARN; ours get [`Self::level`].
    fn directives(self) -> String {
        let level = self.level().to_string().to_lowercase();
        std::iter::once("warn".to_string())
            .chain(TARGETS.iter().map(|target| format!("{target}={level}")))
            .collect::<Vec<_>>()
            .join(",")
    }
}

fn env_filter(verbosity: Verbosity) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(verbosity.directives()))
}

/// Install the stderr subscriber. Call once, before any command runs.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let verbosity = Verbosity::from_args(args);
    let ansi = !args.no_color && std::io::stderr().is_terminal();

    // Module targets only help once per-file events show up.
    let fmt_layer = tracing_subscriber::fmt::layer()
        .compact()
        .without_time()
        .with_target(verbosity >= Verbosity::Debug)
        .with_ansi(ansi)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter(verbosity))
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))?;

    Ok(())
}
