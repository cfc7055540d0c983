//! sr CLI - interactive front-end for the Serverless Devs `s` tool.
//!
//! sr never deploys or invokes anything itself. It reads `s.yaml` to learn
//! which resources exist, lets the user pick a resource (and a running
//! instance where needed), shows the exact `s` command it is about to run,
//! and runs it with the terminal attached once confirmed.
//!
//! # Commands
//!
//! - `sr deploy [resource]` / `sr invoke [resource]`
//! - `sr instance list | log [id] | exec [id]` (with `-r <resource>`)
//! - `sr` with no subcommand opens a guided menu
//!
//! Manifest parsing, command building and the command flows live in
//! `sr-core`; this crate wires them to clap and a dialoguer terminal.

mod cli;
mod terminal;

use clap::{CommandFactory, Parser, error::ErrorKind};
use cli::{Cli, Commands, InstanceCommands};
use colored::Colorize;
use sr_core::{Actions, Error, Options, Outcome, SystemRunner};
use terminal::TerminalPrompter;

// =============================================================================
// Main Entry Point
// =============================================================================

/// Entry point for the sr CLI.
///
/// Exit codes:
/// - `0`: the command succeeded, was cancelled, or had nothing to act on
/// - `1`: manifest errors, unknown resources, failed validation, or the
///   executed `s` command failed
/// - `2`: invalid command line
fn main() {
    let cli = parse_args();
    let options = resolve_options(&cli);

    let runner = SystemRunner;
    let prompter = TerminalPrompter::default();
    let actions = Actions::new(&options, &runner, &prompter);

    let result = match cli.command {
        None => actions.interactive(),
        Some(Commands::Deploy { resource }) => actions.deploy(resource.as_deref()),
        Some(Commands::Invoke { resource }) => actions.invoke(resource.as_deref()),
        Some(Commands::Instance { action }) => match action {
            None => actions.instance_interactive(),
            Some(InstanceCommands::List { .. }) => actions.instance_list(),
            Some(InstanceCommands::Log { instance_id, .. }) => {
                actions.instance_log(instance_id.as_deref())
            }
            Some(InstanceCommands::Exec { instance_id, .. }) => {
                actions.instance_exec(instance_id.as_deref())
            }
        },
    };

    std::process::exit(exit_code(result));
}

fn exit_code(result: sr_core::Result<Outcome>) -> i32 {
    match result {
        Ok(outcome) => outcome.exit_code(),
        Err(err) => {
            report_error(&err);
            1
        }
    }
}

// =============================================================================
// Argument Handling
// =============================================================================

/// Parse arguments, listing the valid commands when an unknown one is given
fn parse_args() -> Cli {
    Cli::try_parse().unwrap_or_else(|err| {
        if err.kind() != ErrorKind::InvalidSubcommand {
            err.exit();
        }
        let _ = err.print();
        let valid = valid_subcommands(std::env::args().skip(1));
        eprintln!();
        eprintln!("{} {}", "Valid commands:".dimmed(), valid.join(", "));
        std::process::exit(err.exit_code());
    })
}

/// Subcommands available at the deepest command level named in `args`
fn valid_subcommands(args: impl Iterator<Item = String>) -> Vec<String> {
    let mut command = Cli::command();
    for arg in args {
        if let Some(sub) = command.find_subcommand(&arg).cloned() {
            command = sub;
        }
    }
    command
        .get_subcommands()
        .map(|c| c.get_name().to_string())
        .collect()
}

/// Build the options shared by every command flow
fn resolve_options(cli: &Cli) -> Options {
    let resource = match &cli.command {
        Some(Commands::Instance {
            action:
                Some(
                    InstanceCommands::List { resource }
                    | InstanceCommands::Log { resource, .. }
                    | InstanceCommands::Exec { resource, .. },
                ),
        }) => resource.clone(),
        _ => None,
    };

    Options {
        template_path: cli.template.clone(),
        resource,
        silent: cli.silent,
        output_format: cli.output_format,
        preview: cli.preview,
        verify: cli.verify,
        tool: cli.tool.clone(),
    }
}

// =============================================================================
// Diagnostics
// =============================================================================

fn report_error(err: &Error) {
    eprintln!("{} {}", "✘".red(), err);

    match err {
        Error::ManifestParse { .. } => {
            eprintln!("  {}", "Please check the syntax of your s.yaml file.".yellow());
        }
        Error::ValidationFailed { stdout, stderr, .. } => {
            if !stdout.trim().is_empty() {
                eprintln!("  {}", "Stdout:".dimmed());
                eprintln!("{}", stdout.trim_end());
            }
            if !stderr.trim().is_empty() {
                eprintln!("  {}", "Stderr:".dimmed());
                eprintln!("{}", stderr.trim_end());
            }
        }
        Error::ResourceNotFound { suggestions, .. } if !suggestions.is_empty() => {
            eprintln!("  {} {}", "Did you mean:".dimmed(), suggestions.join(", "));
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("sr").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let options = resolve_options(&parse(&["deploy"]));
        assert!(sr_core::options::is_default_template(&options.template_path));
        assert_eq!(options.output_format, sr_core::OutputFormat::Default);
        assert!(!options.silent && !options.preview && !options.verify);
        assert_eq!(options.resource, None);
    }

    #[test]
    fn test_config_alias_and_global_flags() {
        let cli = parse(&["invoke", "api", "-c", "./x.yaml", "--silent", "-o", "JSON"]);
        let options = resolve_options(&cli);
        assert_eq!(options.template_path, std::path::PathBuf::from("./x.yaml"));
        assert!(options.silent);
        assert_eq!(options.output_format, sr_core::OutputFormat::Json);
        assert!(matches!(cli.command, Some(Commands::Invoke { resource: Some(ref r) }) if r == "api"));
    }

    #[test]
    fn test_instance_resource_flag() {
        let cli = parse(&["instance", "log", "c-123", "-r", "api"]);
        assert_eq!(resolve_options(&cli).resource.as_deref(), Some("api"));
        assert!(matches!(
            cli.command,
            Some(Commands::Instance {
                action: Some(InstanceCommands::Log { instance_id: Some(ref id), .. })
            }) if id == "c-123"
        ));
    }

    #[test]
    fn test_preview_conflicts_with_verify() {
        assert!(Cli::try_parse_from(["sr", "--preview", "--verify", "deploy"]).is_err());
    }

    #[test]
    fn test_unknown_subcommands_are_rejected() {
        let err = Cli::try_parse_from(["sr", "destroy"]).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidSubcommand);
        let err = Cli::try_parse_from(["sr", "instance", "kill"]).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidSubcommand);
    }

    #[test]
    fn test_valid_subcommands_per_level() {
        let top = valid_subcommands(["destroy".to_string()].into_iter());
        assert_eq!(top, vec!["deploy", "invoke", "instance"]);

        let instance = valid_subcommands(["instance".to_string(), "kill".to_string()].into_iter());
        assert_eq!(instance, vec!["list", "log", "exec"]);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code(Ok(Outcome::Cancelled)), 0);
        assert_eq!(exit_code(Ok(Outcome::NothingToDo)), 0);
        assert_eq!(
            exit_code(Ok(Outcome::Failed(sr_core::runner::RunStatus::from_code(2)))),
            1
        );
        assert_eq!(
            exit_code(Err(Error::ManifestNotFound {
                path: "./s.yaml".into()
            })),
            1
        );
    }
}
