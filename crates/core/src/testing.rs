//! Test doubles for [`CommandRunner`] and [`Prompter`].

use std::{cell::RefCell, collections::VecDeque};

use crate::{
    command::ToolCommand,
    error::{Error, Result},
    prompt::{Prompter, fuzzy_filter},
    runner::{CommandOutput, CommandRunner, RunStatus},
};

/// Records commands instead of spawning them
#[derive(Default)]
pub struct FakeRunner {
    outputs: RefCell<VecDeque<anyhow::Result<CommandOutput>>>,
    statuses: RefCell<VecDeque<RunStatus>>,
    captured: RefCell<Vec<ToolCommand>>,
    executed: RefCell<Vec<ToolCommand>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the result of the next captured run
    pub fn with_output(self, status: RunStatus, stdout: &str, stderr: &str) -> Self {
        self.outputs.borrow_mut().push_back(Ok(CommandOutput {
            status,
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
        }));
        self
    }

    /// Queue a spawn failure for the next captured run
    pub fn with_spawn_error(self, message: &str) -> Self {
        self.outputs
            .borrow_mut()
            .push_back(Err(anyhow::anyhow!(message.to_string())));
        self
    }

    /// Queue the exit status of the next interactive run
    pub fn with_status(self, status: RunStatus) -> Self {
        self.statuses.borrow_mut().push_back(status);
        self
    }

    /// Commands run with captured output
    pub fn captured(&self) -> Vec<ToolCommand> {
        self.captured.borrow().clone()
    }

    /// Commands run with inherited stdio
    pub fn executed(&self) -> Vec<ToolCommand> {
        self.executed.borrow().clone()
    }
}

impl CommandRunner for FakeRunner {
    fn output(&self, command: &ToolCommand) -> anyhow::Result<CommandOutput> {
        self.captured.borrow_mut().push(command.clone());
        self.outputs.borrow_mut().pop_front().unwrap_or_else(|| {
            Ok(CommandOutput {
                status: RunStatus::from_code(0),
                stdout: String::new(),
                stderr: String::new(),
            })
        })
    }

    fn status(&self, command: &ToolCommand) -> anyhow::Result<RunStatus> {
        self.executed.borrow_mut().push(command.clone());
        Ok(self
            .statuses
            .borrow_mut()
            .pop_front()
            .unwrap_or(RunStatus::from_code(0)))
    }
}

/// One scripted reply
#[derive(Debug, Clone)]
pub enum Answer {
    /// Select the item with this exact text
    Pick(String),
    /// Select by position
    PickIndex(usize),
    /// Type a fuzzy query and accept the best match
    Type(String),
    Confirm(bool),
    Input(String),
}

/// Replays answers in order and records every question asked
pub struct ScriptedPrompter {
    answers: RefCell<VecDeque<Answer>>,
    shown: RefCell<Vec<(String, Vec<String>)>>,
    notes: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: RefCell::new(answers.into_iter().collect()),
            shown: RefCell::new(Vec::new()),
            notes: RefCell::new(Vec::new()),
        }
    }

    /// Prompts shown so far with the items offered (empty for confirm/input)
    pub fn shown(&self) -> Vec<(String, Vec<String>)> {
        self.shown.borrow().clone()
    }

    /// Status lines shown so far
    pub fn notes(&self) -> Vec<String> {
        self.notes.borrow().clone()
    }

    fn next(&self, prompt: &str, items: &[String]) -> Result<Answer> {
        self.shown
            .borrow_mut()
            .push((prompt.to_string(), items.to_vec()));
        self.answers
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| Error::Prompt(format!("no scripted answer for '{}'", prompt)))
    }

    fn pick(&self, prompt: &str, items: &[String]) -> Result<usize> {
        let position = |text: &str| items.iter().position(|item| item == text);
        let index = match self.next(prompt, items)? {
            Answer::Pick(text) => position(text.as_str()),
            Answer::PickIndex(i) => (i < items.len()).then_some(i),
            Answer::Type(query) => fuzzy_filter(&query, items).first().and_then(|s| position(*s)),
            other => return Err(Error::Prompt(format!("unexpected answer {:?}", other))),
        };
        index.ok_or_else(|| Error::Prompt(format!("no matching item for '{}'", prompt)))
    }
}

impl Prompter for ScriptedPrompter {
    fn fuzzy_select(&self, prompt: &str, items: &[String]) -> Result<usize> {
        self.pick(prompt, items)
    }

    fn select(&self, prompt: &str, items: &[String]) -> Result<usize> {
        self.pick(prompt, items)
    }

    fn confirm(&self, prompt: &str, _default: bool) -> Result<bool> {
        match self.next(prompt, &[])? {
            Answer::Confirm(yes) => Ok(yes),
            other => Err(Error::Prompt(format!("unexpected answer {:?}", other))),
        }
    }

    fn input(&self, prompt: &str, _default: &str) -> Result<String> {
        match self.next(prompt, &[])? {
            Answer::Input(text) => Ok(text),
            other => Err(Error::Prompt(format!("unexpected answer {:?}", other))),
        }
    }

    fn note(&self, message: &str) {
        self.notes.borrow_mut().push(message.to_string());
    }
}
