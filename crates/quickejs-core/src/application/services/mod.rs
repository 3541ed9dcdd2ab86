//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! "write a project" and "install its dependencies".

pub mod scaffold_service;

pub use scaffold_service::{GenerationReport, ScaffoldService};
