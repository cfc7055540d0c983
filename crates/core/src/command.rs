//! `s` command builder
//!
//! Provides a builder pattern for constructing Serverless Devs CLI commands,
//! plus the [`Action`]s sr knows how to run against a resource.

use std::path::PathBuf;

use crate::options::{OutputFormat, Options, Validation, is_default_template};

/// Operation performed against a single resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Deploy,
    Invoke,
    InstanceList,
    /// Tail the logs of one instance
    InstanceLog { instance_id: String },
    /// Run a shell command on one instance
    InstanceExec {
        instance_id: String,
        command: String,
    },
}

impl Action {
    /// Arguments following the resource name
    fn args(&self) -> Vec<String> {
        match self {
            Action::Deploy => vec!["deploy".to_string()],
            Action::Invoke => vec!["invoke".to_string()],
            Action::InstanceList => vec!["instance".to_string(), "list".to_string()],
            Action::InstanceLog { instance_id } => vec![
                "logs".to_string(),
                "--tail".to_string(),
                "--instance-id".to_string(),
                instance_id.clone(),
            ],
            Action::InstanceExec {
                instance_id,
                command,
            } => vec![
                "instance".to_string(),
                "exec".to_string(),
                "--instance-id".to_string(),
                instance_id.clone(),
                "-c".to_string(),
                command.clone(),
            ],
        }
    }
}

/// `s` command builder
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    /// Program to execute (normally `s`)
    pub program: String,
    /// Manifest passed with `-t`
    pub template: Option<PathBuf>,
    /// Resource the command targets
    pub resource: Option<String>,
    /// Subcommand and its arguments
    pub args: Vec<String>,
    /// Append `--silent`
    pub silent: bool,
    /// Append `-o <format>`
    pub output_format: Option<OutputFormat>,
}

impl ToolCommand {
    /// Create a new command builder
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    /// The command performing `action` on `resource`, honoring the global flags
    pub fn for_action(options: &Options, resource: &str, action: &Action) -> Self {
        let mut cmd = Self::new(&options.tool)
            .template(options.template_path.clone())
            .resource(resource)
            .args(action.args());
        if options.silent {
            cmd = cmd.silent();
        }
        cmd.output_format(options.output_format)
    }

    /// The read-only, machine-readable instance listing for `resource`
    pub fn instance_listing(options: &Options, resource: &str) -> Self {
        Self::new(&options.tool)
            .template(options.template_path.clone())
            .resource(resource)
            .args(Action::InstanceList.args())
            .silent()
            .output_format(OutputFormat::Json)
    }

    /// `s preview` / `s verify` for the manifest
    pub fn validation(options: &Options, validation: Validation) -> Self {
        Self::new(&options.tool)
            .template(options.template_path.clone())
            .arg(validation.subcommand())
            .silent()
    }

    /// Set the manifest path. The default manifest is never passed explicitly.
    pub fn template(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        self.template = (!is_default_template(&path)).then_some(path);
        self
    }

    /// Set the target resource
    pub fn resource(mut self, name: impl Into<String>) -> Self {
        self.resource = Some(name.into());
        self
    }

    /// Add one argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Add several arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Ask `s` to suppress non-essential output
    pub fn silent(mut self) -> Self {
        self.silent = true;
        self
    }

    /// Set the output format (`Default` passes no flag)
    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = (format != OutputFormat::Default).then_some(format);
        self
    }

    /// Build the argument vector (without the program name)
    pub fn build(&self) -> Vec<String> {
        let mut parts = Vec::new();

        if let Some(template) = &self.template {
            parts.push("-t".to_string());
            parts.push(template.to_string_lossy().to_string());
        }

        if let Some(resource) = &self.resource {
            parts.push(resource.clone());
        }

        parts.extend(self.args.iter().cloned());

        if self.silent {
            parts.push("--silent".to_string());
        }

        if let Some(format) = self.output_format {
            parts.push("-o".to_string());
            parts.push(format.to_string());
        }

        parts
    }

    /// Render the full command line as shown to the user
    pub fn display(&self) -> String {
        std::iter::once(self.program.clone())
            .chain(self.build())
            .map(|part| shell_quote(&part))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl std::fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display())
    }
}

/// Single-quote an argument when the shell would otherwise split or expand it
fn shell_quote(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=@%+,".contains(c));
    if plain {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', "'\\''"))
    }
}
