//! Statically registered tasks
//!
//! A [`Registry`] is an ordered list of named handlers built at startup. It
//! drives the same session loop as a Taskfile, without an external runner.

pub mod nameu;

use crate::error::{ConfigError, ExecutionError, ExecutionResult, Result};
use crate::runner::InterruptFlag;
use crate::session::Catalog;
use crate::ui::{Console, Menu};
use std::process::{Command as StdCommand, Stdio};

/// Names starting with this prefix are internal and never listed
pub const RESERVED_PREFIX: char = '_';

/// A task body
pub type Handler = Box<dyn Fn(&dyn Console) -> ExecutionResult<i32>>;

/// One registered task
pub struct RegisteredTask {
    pub name: String,
    pub description: String,
    pub handler: Handler,
}

/// An ordered, immutable set of tasks
pub struct Registry {
    title: String,
    tasks: Vec<RegisteredTask>,
    interrupt: InterruptFlag,
}

impl Registry {
    pub fn new(title: impl Into<String>) -> Self {
        Registry {
            title: title.into(),
            tasks: Vec::new(),
            interrupt: InterruptFlag::new(),
        }
    }

    /// Add a task. A later task with the same name replaces the earlier one
    /// in place.
    pub fn task<F>(mut self, name: &str, description: &str, handler: F) -> Self
    where
        F: Fn(&dyn Console) -> ExecutionResult<i32> + 'static,
    {
        let task = RegisteredTask {
            name: name.to_string(),
            description: description.to_string(),
            handler: Box::new(handler),
        };

        match self.tasks.iter_mut().find(|t| t.name == name) {
            Some(existing) => *existing = task,
            None => self.tasks.push(task),
        }
        self
    }

    /// Flag consulted after each handler to detect Ctrl+C
    pub fn with_interrupt(mut self, interrupt: InterruptFlag) -> Self {
        self.interrupt = interrupt;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Tasks shown to the user, in registration order
    pub fn visible(&self) -> impl Iterator<Item = &RegisteredTask> {
        self.tasks
            .iter()
            .filter(|t| !t.name.starts_with(RESERVED_PREFIX))
    }

    fn find(&self, name: &str) -> Option<&RegisteredTask> {
        self.visible().find(|t| t.name == name)
    }
}

impl Catalog for Registry {
    fn present(&self, _console: &dyn Console) {}

    fn menu(&self) -> Menu {
        Menu::new(
            self.visible()
                .map(|t| (t.name.clone(), Some(t.description.clone()))),
        )
    }

    fn render_menu(&self, menu: &Menu, console: &dyn Console) {
        menu.render_table(&self.title, console);
    }

    fn default_choice(&self, _menu: &Menu) -> usize {
        0
    }

    fn prompt_for(&self, _task: &str) -> Option<String> {
        None
    }

    fn execute(&self, task: &str, _input: &str, console: &dyn Console) -> Result<i32> {
        let registered = self
            .find(task)
            .ok_or_else(|| ConfigError::TaskNotFound(task.to_string()))?;

        self.interrupt.clear();
        let result = (registered.handler)(console);
        if self.interrupt.take() {
            console.warn("Task interrupted by user");
            return Ok(0);
        }

        match result {
            Ok(code) => Ok(code),
            Err(e) => {
                console.error(&e.to_string());
                Ok(1)
            }
        }
    }
}

/// Handler running a command line through the platform shell with
/// inherited stdio
pub fn shell(command_line: &str) -> impl Fn(&dyn Console) -> ExecutionResult<i32> + 'static {
    let command_line = command_line.to_string();
    move |console: &dyn Console| -> ExecutionResult<i32> {
        let (program, flag) = if cfg!(windows) { ("cmd", "/C") } else { ("sh", "-c") };
        console.debug(&format!("{} {} {}", program, flag, command_line));

        let status = StdCommand::new(program)
            .arg(flag)
            .arg(&command_line)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|error| ExecutionError::Spawn {
                program: program.to_string(),
                error,
            })?;

        Ok(status.code().unwrap_or(1))
    }
}
