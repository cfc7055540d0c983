//! `s.yaml` manifest parsing
//!
//! Two generations of the Serverless Devs manifest exist: the legacy FC
//! format lists functions under `services`, the FC3 format under
//! `resources`. Only FC3 is supported. The shape is resolved once, when the
//! file is loaded, into a [`Manifest`] variant.

use std::{fmt, path::Path};

use colored::Colorize;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_yaml::{Mapping, Value};

use crate::{
    command::ToolCommand,
    error::{Error, Result},
    options::Options,
    runner::CommandRunner,
};

/// Top-level keys sr cares about. Everything else in the file is left to `s`.
#[derive(Debug, Default, Deserialize)]
struct RawManifest {
    #[serde(default)]
    services: Option<Value>,
    #[serde(default)]
    resources: Option<Mapping>,
}

/// A loaded manifest
#[derive(Debug, Clone, PartialEq)]
pub enum Manifest {
    /// FC3 manifest with a `resources` section
    Current { resources: IndexMap<String, Value> },
    /// FC3 `resources` alongside a legacy `services` section. The services
    /// are not deployable through sr and are reported, then ignored.
    Mixed {
        resources: IndexMap<String, Value>,
        legacy_services: Vec<String>,
    },
    /// Neither section is present
    Empty,
}

/// Non-fatal findings about a manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestWarning {
    /// Legacy `services` were found next to `resources` and are ignored
    LegacyServicesIgnored { services: Vec<String> },
    /// The manifest declares no `resources` section
    NoResources,
}

impl fmt::Display for ManifestWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManifestWarning::LegacyServicesIgnored { services } => {
                write!(
                    f,
                    "Detected old FC format (services section). Please consider upgrading to FC3 (resources section) for full compatibility."
                )?;
                if !services.is_empty() {
                    write!(f, " Ignoring services: {}", services.join(", "))?;
                }
                Ok(())
            }
            ManifestWarning::NoResources => write!(
                f,
                "No resources found in s.yaml file. Make sure the file contains a resources section (FC3 format)."
            ),
        }
    }
}

impl Manifest {
    /// Load and classify the manifest at `path`
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                Error::ManifestNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                Error::ManifestParse {
                    path: path.to_path_buf(),
                    message: err.to_string(),
                }
            }
        })?;
        Self::parse(&content, path)
    }

    /// Classify manifest `content`. `path` is only used in diagnostics.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let parse_error = |message: String| Error::ManifestParse {
            path: path.to_path_buf(),
            message,
        };

        let tree: Value = serde_yaml::from_str(content).map_err(|e| parse_error(e.to_string()))?;
        let raw: RawManifest = match tree {
            // An empty document has no sections at all
            Value::Null => RawManifest::default(),
            Value::Mapping(_) => {
                serde_yaml::from_value(tree).map_err(|e| parse_error(e.to_string()))?
            }
            _ => return Err(parse_error("expected a mapping at the top level".to_string())),
        };

        let resources = raw.resources.map(|mapping| {
            mapping
                .into_iter()
                .filter_map(|(key, value)| scalar_key(&key).map(|name| (name, value)))
                .collect::<IndexMap<_, _>>()
        });

        match (raw.services, resources) {
            (Some(_), None) => Err(Error::LegacyManifest {
                path: path.to_path_buf(),
            }),
            (Some(services), Some(resources)) => Ok(Manifest::Mixed {
                resources,
                legacy_services: mapping_keys(&services),
            }),
            (None, Some(resources)) => Ok(Manifest::Current { resources }),
            (None, None) => Ok(Manifest::Empty),
        }
    }

    /// Resource names in document order
    pub fn resource_names(&self) -> Vec<String> {
        match self {
            Manifest::Current { resources } | Manifest::Mixed { resources, .. } => {
                resources.keys().cloned().collect()
            }
            Manifest::Empty => Vec::new(),
        }
    }

    /// Whether the manifest declares `name` (exact match)
    pub fn contains(&self, name: &str) -> bool {
        match self {
            Manifest::Current { resources } | Manifest::Mixed { resources, .. } => {
                resources.contains_key(name)
            }
            Manifest::Empty => false,
        }
    }

    /// Warnings to surface to the user
    pub fn warnings(&self) -> Vec<ManifestWarning> {
        match self {
            Manifest::Current { .. } => Vec::new(),
            Manifest::Mixed {
                legacy_services, ..
            } => vec![ManifestWarning::LegacyServicesIgnored {
                services: legacy_services.clone(),
            }],
            Manifest::Empty => vec![ManifestWarning::NoResources],
        }
    }
}

/// Scalar mapping keys as the names `s` sees (`123:` is resource "123")
fn scalar_key(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn mapping_keys(value: &Value) -> Vec<String> {
    value
        .as_mapping()
        .map(|mapping| {
            mapping
                .keys()
                .filter_map(scalar_key)
                .collect()
        })
        .unwrap_or_default()
}

/// Run `s preview` / `s verify` against the manifest if `options` asks for it.
///
/// The validation output is captured; on failure it is carried in
/// [`Error::ValidationFailed`] so the caller can show it.
pub fn validate(options: &Options, runner: &impl CommandRunner) -> Result<()> {
    let Some(validation) = options.validation() else {
        return Ok(());
    };

    let command = ToolCommand::validation(options, validation);
    let output = runner
        .output(&command)
        .map_err(|reason| Error::SubprocessExecution {
            command: command.display(),
            reason,
        })?;

    if output.status.success() {
        Ok(())
    } else {
        Err(Error::ValidationFailed {
            command: command.display(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

/// Validate (if requested) and load the manifest, printing its warnings.
pub fn load_manifest(options: &Options, runner: &impl CommandRunner) -> Result<Manifest> {
    validate(options, runner)?;
    let manifest = Manifest::load(&options.template_path)?;
    for warning in manifest.warnings() {
        eprintln!("{} {}", "!".yellow(), warning);
    }
    Ok(manifest)
}

/// Resource names declared in the manifest selected by `options`.
pub fn read_resources(options: &Options, runner: &impl CommandRunner) -> Result<Vec<String>> {
    load_manifest(options, runner).map(|m| m.resource_names())
}
