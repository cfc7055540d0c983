//! Command flows: deploy, invoke and instance operations.
//!
//! Every flow follows the same steps: resolve the resource, resolve the
//! instance when the action needs one, ask for the shell command (exec only),
//! show the final `s` command line and ask for confirmation, then run it with
//! the terminal attached. A step that cannot be resolved ends the flow with
//! [`Outcome::NothingToDo`] before anything is confirmed or executed.

use colored::Colorize;

use crate::{
    command::{Action, ToolCommand},
    error::{Error, Result},
    instances::list_instances,
    manifest::load_manifest,
    options::Options,
    prompt::{Prompter, select_resource, suggest},
    runner::{CommandRunner, RunStatus},
};

/// Shell command offered by default for `instance exec`
pub const DEFAULT_EXEC_COMMAND: &str = "sh";

/// How a flow ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The command ran and exited successfully
    Completed,
    /// The command ran and failed
    Failed(RunStatus),
    /// The user declined the confirmation
    Cancelled,
    /// Nothing to select (no resources or no instances)
    NothingToDo,
}

impl Outcome {
    /// Process exit code for this outcome
    pub fn exit_code(self) -> i32 {
        match self {
            Outcome::Failed(_) => 1,
            Outcome::Completed | Outcome::Cancelled | Outcome::NothingToDo => 0,
        }
    }
}

/// Top-level choices of the guided menu
pub const MENU_ACTIONS: [&str; 3] = ["deploy", "invoke", "instance"];

/// Choices of the guided instance menu
pub const INSTANCE_OPERATIONS: [&str; 3] = ["list", "log", "exec"];

/// Runs command flows for one invocation of sr.
pub struct Actions<'a, R, P> {
    options: &'a Options,
    runner: &'a R,
    prompter: &'a P,
}

impl<'a, R: CommandRunner, P: Prompter> Actions<'a, R, P> {
    pub fn new(options: &'a Options, runner: &'a R, prompter: &'a P) -> Self {
        Self {
            options,
            runner,
            prompter,
        }
    }

    /// `sr deploy [resource]`
    pub fn deploy(&self, resource: Option<&str>) -> Result<Outcome> {
        self.resource_action(resource, "Select a resource to deploy:", Action::Deploy)
    }

    /// `sr invoke [resource]`
    pub fn invoke(&self, resource: Option<&str>) -> Result<Outcome> {
        self.resource_action(resource, "Select a resource to invoke:", Action::Invoke)
    }

    /// `sr instance list`
    pub fn instance_list(&self) -> Result<Outcome> {
        self.resource_action(
            self.options.resource.as_deref(),
            "Select a resource to list instances:",
            Action::InstanceList,
        )
    }

    /// `sr instance log [instance]`
    pub fn instance_log(&self, instance_id: Option<&str>) -> Result<Outcome> {
        let Some(resource) =
            self.resolve_resource(self.options.resource.as_deref(), "Select a resource:")?
        else {
            return Ok(Outcome::NothingToDo);
        };
        let Some(instance_id) = self.resolve_instance(&resource, instance_id)? else {
            return Ok(Outcome::NothingToDo);
        };

        self.confirm_and_run(ToolCommand::for_action(
            self.options,
            &resource,
            &Action::InstanceLog { instance_id },
        ))
    }

    /// `sr instance exec [instance]`
    pub fn instance_exec(&self, instance_id: Option<&str>) -> Result<Outcome> {
        let Some(resource) =
            self.resolve_resource(self.options.resource.as_deref(), "Select a resource:")?
        else {
            return Ok(Outcome::NothingToDo);
        };
        let Some(instance_id) = self.resolve_instance(&resource, instance_id)? else {
            return Ok(Outcome::NothingToDo);
        };

        let answer = self
            .prompter
            .input("Enter command to execute on instance:", DEFAULT_EXEC_COMMAND)?;
        let command = match answer.trim() {
            "" => DEFAULT_EXEC_COMMAND.to_string(),
            trimmed => trimmed.to_string(),
        };

        self.confirm_and_run(ToolCommand::for_action(
            self.options,
            &resource,
            &Action::InstanceExec {
                instance_id,
                command,
            },
        ))
    }

    /// `sr` with no subcommand: pick an action, then follow its flow
    pub fn interactive(&self) -> Result<Outcome> {
        let items: Vec<String> = MENU_ACTIONS.iter().map(|s| s.to_string()).collect();
        let choice = self.prompter.select("Select an action:", &items)?;
        match MENU_ACTIONS.get(choice).copied() {
            Some("deploy") => self.deploy(None),
            Some("invoke") => self.invoke(None),
            Some("instance") => self.instance_interactive(),
            _ => Err(Error::Prompt(format!("invalid menu choice {}", choice))),
        }
    }

    /// `sr instance` with no operation: pick one
    pub fn instance_interactive(&self) -> Result<Outcome> {
        let items: Vec<String> = INSTANCE_OPERATIONS.iter().map(|s| s.to_string()).collect();
        let choice = self.prompter.select("Select instance operation:", &items)?;
        match INSTANCE_OPERATIONS.get(choice).copied() {
            Some("list") => self.instance_list(),
            Some("log") => self.instance_log(None),
            Some("exec") => self.instance_exec(None),
            _ => Err(Error::Prompt(format!("invalid menu choice {}", choice))),
        }
    }

    fn resource_action(
        &self,
        resource: Option<&str>,
        prompt: &str,
        action: Action,
    ) -> Result<Outcome> {
        let Some(resource) = self.resolve_resource(resource, prompt)? else {
            return Ok(Outcome::NothingToDo);
        };
        self.confirm_and_run(ToolCommand::for_action(self.options, &resource, &action))
    }

    /// Use the given resource if the manifest declares it, otherwise ask.
    fn resolve_resource(&self, given: Option<&str>, prompt: &str) -> Result<Option<String>> {
        let manifest = load_manifest(self.options, self.runner)?;
        let resources = manifest.resource_names();

        if let Some(name) = given {
            if manifest.contains(name) {
                return Ok(Some(name.to_string()));
            }
            return Err(Error::ResourceNotFound {
                name: name.to_string(),
                path: self.options.template_path.clone(),
                suggestions: suggest(name, &resources),
            });
        }

        let selected = select_resource(self.prompter, &resources, prompt)?;
        if selected.is_none() {
            self.prompter.note(
                &format!(
                    "No resources available in {}",
                    self.options.template_path.display()
                )
                .yellow()
                .to_string(),
            );
        }
        Ok(selected)
    }

    /// Use the given instance id, otherwise list running instances and ask.
    fn resolve_instance(&self, resource: &str, given: Option<&str>) -> Result<Option<String>> {
        if let Some(id) = given {
            return Ok(Some(id.to_string()));
        }

        let instances = list_instances(resource, self.options, self.runner);
        if instances.is_empty() {
            self.prompter.note(
                &"No instances available. Please deploy and invoke the resource first."
                    .yellow()
                    .to_string(),
            );
            return Ok(None);
        }

        let labels: Vec<String> = instances.iter().map(|i| i.label.clone()).collect();
        let index = self.prompter.select("Select an instance:", &labels)?;
        Ok(instances.get(index).map(|i| i.id.clone()))
    }

    fn confirm_and_run(&self, command: ToolCommand) -> Result<Outcome> {
        let proceed = self
            .prompter
            .confirm(&format!("About to execute: \"{}\". Proceed?", command), true)?;

        if !proceed {
            self.prompter.note(&"Command cancelled.".dimmed().to_string());
            return Ok(Outcome::Cancelled);
        }

        self.prompter
            .note(&format!("{} {}", "Executing:".dimmed(), command));
        let status = match self.runner.status(&command) {
            Ok(status) => status,
            Err(err) => {
                eprintln!("{} Command failed: {:#}", "✘".red(), err);
                return Ok(Outcome::Failed(RunStatus { code: None }));
            }
        };

        if status.success() {
            Ok(Outcome::Completed)
        } else {
            eprintln!("{} Command failed: {}", "✘".red(), status);
            Ok(Outcome::Failed(status))
        }
    }
}
