//! Error types for sr.
//!
//! Manifest-level failures and unknown resource names are fatal to the
//! process. Listing failures never reach this type: they degrade to an empty
//! instance list instead.

use std::path::PathBuf;

/// Errors raised while resolving a command.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The manifest path does not exist
    #[error("s.yaml file not found at {}", path.display())]
    ManifestNotFound { path: PathBuf },

    /// The manifest could not be read or is not structured YAML
    #[error("failed to read or parse {}: {message}", path.display())]
    ManifestParse { path: PathBuf, message: String },

    /// Only the legacy `services` section is present
    #[error(
        "old FC format detected and no resources section found in {}; please upgrade it to the FC3 format",
        path.display()
    )]
    LegacyManifest { path: PathBuf },

    /// A resource name was given that the manifest does not declare
    #[error("resource \"{name}\" not found in {}", path.display())]
    ResourceNotFound {
        name: String,
        path: PathBuf,
        /// Declared resources resembling `name`
        suggestions: Vec<String>,
    },

    /// `s preview` / `s verify` exited non-zero
    #[error("validation failed using '{command}'")]
    ValidationFailed {
        command: String,
        stdout: String,
        stderr: String,
    },

    /// The external tool could not be spawned at all
    #[error("failed to execute '{command}': {reason:#}")]
    SubprocessExecution {
        command: String,
        reason: anyhow::Error,
    },

    /// A prompt could not be shown or was aborted
    #[error("prompt failed: {0}")]
    Prompt(String),
}

pub type Result<T> = std::result::Result<T, Error>;
