//! Resolved command-line options shared by every command.
//!
//! One [`Options`] value is built per process from the CLI flags and threaded
//! explicitly through the command handlers; nothing here is global.

use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

/// Manifest path `s` reads when no `-t` flag is passed.
pub const DEFAULT_TEMPLATE: &str = "./s.yaml";

/// Name of the external tool on `PATH`.
pub const DEFAULT_TOOL: &str = "s";

/// Environment variable overriding the external tool's program name.
pub const TOOL_ENV: &str = "SR_TOOL";

/// Output format forwarded to `s` with `-o`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Let `s` pick (no flag is passed)
    #[default]
    Default,
    Json,
    Yaml,
    Raw,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Default => "default",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
            OutputFormat::Raw => "raw",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "default" => Ok(OutputFormat::Default),
            "json" => Ok(OutputFormat::Json),
            "yaml" => Ok(OutputFormat::Yaml),
            "raw" => Ok(OutputFormat::Raw),
            other => Err(format!(
                "invalid output format '{}' (expected default, json, yaml or raw)",
                other
            )),
        }
    }
}

/// Manifest validation delegated to `s` before the manifest is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validation {
    Preview,
    Verify,
}

impl Validation {
    /// The `s` subcommand implementing this validation
    pub fn subcommand(self) -> &'static str {
        match self {
            Validation::Preview => "preview",
            Validation::Verify => "verify",
        }
    }
}

/// Options recognized by every sr command.
#[derive(Debug, Clone)]
pub struct Options {
    /// Manifest path (default `./s.yaml`). Passed to `s` as `-t` only when it
    /// differs from the default.
    pub template_path: PathBuf,
    /// Resource to operate on for `instance` commands. Prompted when absent.
    pub resource: Option<String>,
    /// Append `--silent` to executed commands
    pub silent: bool,
    /// Append `-o <format>` to executed commands unless `Default`
    pub output_format: OutputFormat,
    /// Run `s preview` before reading the manifest
    pub preview: bool,
    /// Run `s verify` before reading the manifest (ignored when `preview` is set)
    pub verify: bool,
    /// Program name of the external tool
    pub tool: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            template_path: PathBuf::from(DEFAULT_TEMPLATE),
            resource: None,
            silent: false,
            output_format: OutputFormat::Default,
            preview: false,
            verify: false,
            tool: DEFAULT_TOOL.to_string(),
        }
    }
}

impl Options {
    /// Requested validation, preview taking precedence over verify
    pub fn validation(&self) -> Option<Validation> {
        if self.preview {
            Some(Validation::Preview)
        } else if self.verify {
            Some(Validation::Verify)
        } else {
            None
        }
    }
}

/// Whether `path` names the manifest `s` would read by itself
pub fn is_default_template(path: &Path) -> bool {
    let path = path.to_string_lossy();
    path.strip_prefix("./").unwrap_or(&path) == "s.yaml"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template_spellings() {
        assert!(is_default_template(Path::new("./s.yaml")));
        assert!(is_default_template(Path::new("s.yaml")));
        assert!(!is_default_template(Path::new("./x.yaml")));
        assert!(!is_default_template(Path::new("deploy/s.yaml")));
    }

    #[test]
    fn test_output_format_parsing_is_case_insensitive() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("raw".parse::<OutputFormat>(), Ok(OutputFormat::Raw));
        assert!("table".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_preview_wins_over_verify() {
        let options = Options {
            preview: true,
            verify: true,
            ..Options::default()
        };
        assert_eq!(options.validation(), Some(Validation::Preview));
        assert_eq!(Options::default().validation(), None);
    }
}
