//! quick-ejs Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the quick-ejs
//! Express starter generator, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          quickejs-cli (CLI)             │
//! │   (prompts, flags, answers files)       │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │           (ScaffoldService)             │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │   (Driven: Filesystem, Installer)       │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    quickejs-adapters (Infrastructure)   │
//! │ (LocalFilesystem, ProcessInstaller ...) │
//! └─────────────────────────────────────────┘
//!
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │  (ProjectConfig, resolve, compose,      │
//! │   ProjectTree, Fragment catalog)        │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use quickejs_core::domain::{ProjectConfig, compose, resolve};
//!
//! let config = ProjectConfig::builder("my-app")
//!     .database(true)
//!     .auth(true)
//!     .build()
//!     .unwrap();
//!
//! let facts = resolve(&config);
//! let tree = compose(&config, &facts).unwrap();
//! assert!(tree.contains_file("middleware/auth.js"));
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ApplicationError, GenerationReport, InstallStep, ScaffoldService,
        ports::{Filesystem, InstallCommand, PackageInstaller},
    };
    pub use crate::domain::{
        DeployTarget, DerivedFacts, PackageManager, ProjectConfig, ProjectPlan, ProjectTree,
        TemplateKind, compose, resolve,
    };
    pub use crate::error::{Phase, QuickError, QuickResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
