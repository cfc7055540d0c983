//! sr Core - Core library for the sr serverless front-end
//!
//! This crate provides the core functionality for sr including:
//! - `s.yaml` manifest parsing (FC3 `resources`, legacy FC `services`)
//! - `s` command building and execution
//! - Running instance discovery
//! - The deploy / invoke / instance command flows

pub mod actions;
pub mod command;
pub mod error;
pub mod instances;
pub mod manifest;
pub mod options;
pub mod prompt;
pub mod runner;

#[cfg(test)]
mod testing;

// Re-export commonly used types at crate root
pub use actions::{Actions, Outcome};
pub use command::{Action, ToolCommand};
pub use error::{Error, Result};
pub use instances::InstanceChoice;
pub use manifest::{Manifest, ManifestWarning};
pub use options::{DEFAULT_TEMPLATE, OutputFormat, Options};
pub use prompt::Prompter;
pub use runner::{CommandRunner, SystemRunner};
