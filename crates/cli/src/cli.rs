use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sr_core::{
    DEFAULT_TEMPLATE, OutputFormat,
    options::{DEFAULT_TOOL, TOOL_ENV},
};

#[derive(Parser)]
#[command(name = "sr")]
#[command(about = "Interactive front-end for the Serverless Devs `s` tool")]
#[command(version)]
pub struct Cli {
    /// Path to the s.yaml manifest (default: ./s.yaml)
    #[arg(
        short = 't',
        long = "template",
        visible_alias = "config",
        short_alias = 'c',
        value_name = "PATH",
        env = "SR_TEMPLATE",
        default_value = DEFAULT_TEMPLATE,
        global = true
    )]
    pub template: PathBuf,

    /// Run `s preview` on the manifest before anything else
    #[arg(long, global = true, conflicts_with = "verify")]
    pub preview: bool,

    /// Run `s verify` on the manifest before anything else
    #[arg(long, global = true)]
    pub verify: bool,

    /// Pass --silent to the executed command
    #[arg(long, global = true)]
    pub silent: bool,

    /// Output format of the executed command: default, json, yaml or raw
    #[arg(
        short = 'o',
        long = "output-format",
        value_name = "FORMAT",
        default_value = "default",
        global = true
    )]
    pub output_format: OutputFormat,

    /// Program used to run Serverless Devs commands
    #[arg(
        long = "tool",
        value_name = "PROGRAM",
        env = TOOL_ENV,
        default_value = DEFAULT_TOOL,
        hide = true,
        global = true
    )]
    pub tool: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Deploy a resource (prompted if not provided)
    Deploy {
        /// Resource name from s.yaml
        resource: Option<String>,
    },

    /// Invoke a resource (prompted if not provided)
    Invoke {
        /// Resource name from s.yaml
        resource: Option<String>,
    },

    /// Instance operations (prompted if no operation is given)
    #[command(visible_alias = "instances")]
    Instance {
        #[command(subcommand)]
        action: Option<InstanceCommands>,
    },
}

#[derive(Subcommand)]
pub enum InstanceCommands {
    /// List the running instances of a resource
    #[command(visible_alias = "ls")]
    List {
        /// Resource name (prompted if not provided)
        #[arg(short = 'r', long = "resource", value_name = "NAME")]
        resource: Option<String>,
    },
    /// Tail the logs of an instance
    #[command(visible_alias = "logs")]
    Log {
        /// Instance id (picked from the running instances if not provided)
        instance_id: Option<String>,
        /// Resource name (prompted if not provided)
        #[arg(short = 'r', long = "resource", value_name = "NAME")]
        resource: Option<String>,
    },
    /// Run a shell command on an instance
    Exec {
        /// Instance id (picked from the running instances if not provided)
        instance_id: Option<String>,
        /// Resource name (prompted if not provided)
        #[arg(short = 'r', long = "resource", value_name = "NAME")]
        resource: Option<String>,
    },
}
