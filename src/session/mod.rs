//! Interactive selection loop
//!
//! The loop moves through `Selecting -> Collecting -> Executing -> Reporting`
//! and back until the user exits. Cancellation and closed input at a prompt
//! are ordinary transitions; only an error from the catalog ends the loop
//! with a failure status.

pub mod taskfile;

pub use taskfile::TaskfileLauncher;

use crate::error::{ConfigError, Result};
use crate::ui::{collect_input, Console, Menu, PromptOutcome, Prompter};

/// Answer assumed when the user just presses Enter at "run another task?"
pub const CONTINUE_BY_DEFAULT: bool = false;

/// Prompt shown when choosing a task
pub const CHOICE_PROMPT: &str = "Enter a task number";

/// Prompt shown after a task finishes
pub const CONTINUE_PROMPT: &str = "Run another task?";

/// A source of runnable tasks
pub trait Catalog {
    /// Output shown above the menu on every pass
    fn present(&self, console: &dyn Console);

    /// Tasks offered this pass
    fn menu(&self) -> Menu;

    fn render_menu(&self, menu: &Menu, console: &dyn Console) {
        menu.render_list(console);
    }

    /// Menu number pre-filled at the choice prompt
    fn default_choice(&self, menu: &Menu) -> usize {
        if menu.is_empty() {
            0
        } else {
            1
        }
    }

    /// Declared prompt for a task, if any
    fn prompt_for(&self, task: &str) -> Option<String>;

    /// Run a task and return its exit code. Failures the user should simply
    /// see are reported on the console and turned into a non-zero code.
    fn execute(&self, task: &str, input: &str, console: &dyn Console) -> Result<i32>;
}

/// Loop states
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum State {
    Selecting,
    Collecting { task: String },
    Executing { task: String, input: String },
    Reporting { task: String, code: i32 },
    Stopped,
}

/// One interactive session over a catalog
pub struct Session<'a> {
    catalog: &'a dyn Catalog,
    prompter: &'a mut dyn Prompter,
    console: &'a dyn Console,
}

impl<'a> Session<'a> {
    pub fn new(
        catalog: &'a dyn Catalog,
        prompter: &'a mut dyn Prompter,
        console: &'a dyn Console,
    ) -> Self {
        Session {
            catalog,
            prompter,
            console,
        }
    }

    /// Drive the loop to completion and return the process exit code
    pub fn run(&mut self) -> i32 {
        match self.drive() {
            Ok(()) => 0,
            Err(e) => {
                self.console.error(&format!("Task launcher failed: {}", e));
                1
            }
        }
    }

    fn drive(&mut self) -> Result<()> {
        let mut state = State::Selecting;
        loop {
            state = self.step(state)?;
            if state == State::Stopped {
                return Ok(());
            }
        }
    }

    /// Perform one transition
    pub fn step(&mut self, state: State) -> Result<State> {
        match state {
            State::Selecting => self.select(),
            State::Collecting { task } => Ok(self.collect(task)),
            State::Executing { task, input } => self.execute(task, input),
            State::Reporting { task, code } => Ok(self.report(&task, code)),
            State::Stopped => Ok(State::Stopped),
        }
    }

    fn select(&mut self) -> Result<State> {
        self.catalog.present(self.console);

        let menu = self.catalog.menu();
        self.catalog.render_menu(&menu, self.console);

        let default = self.catalog.default_choice(&menu);
        match self.prompter.choose(CHOICE_PROMPT, menu.len(), default) {
            PromptOutcome::Value(0) => {
                self.console.warn("Leaving the task launcher");
                Ok(State::Stopped)
            }
            PromptOutcome::Value(choice) => {
                let entry = menu.get(choice).ok_or(ConfigError::ChoiceOutOfRange {
                    choice,
                    count: menu.len(),
                })?;
                Ok(State::Collecting {
                    task: entry.name.clone(),
                })
            }
            PromptOutcome::Cancelled => {
                self.console.warn("Ctrl+C detected, exiting");
                Ok(State::Stopped)
            }
            PromptOutcome::StreamClosed => {
                self.console.warn("Input closed, exiting");
                Ok(State::Stopped)
            }
        }
    }

    fn collect(&mut self, task: String) -> State {
        let prompt = self.catalog.prompt_for(&task);
        match collect_input(prompt.as_deref(), &mut *self.prompter) {
            PromptOutcome::Value(input) => State::Executing { task, input },
            PromptOutcome::Cancelled => {
                self.console.warn("Input interrupted, skipping this task");
                State::Selecting
            }
            PromptOutcome::StreamClosed => {
                self.console.warn("Input closed, skipping this task");
                State::Selecting
            }
        }
    }

    fn execute(&mut self, task: String, input: String) -> Result<State> {
        self.console.info(&format!("Running task: {}", task));
        let code = self.catalog.execute(&task, &input, self.console)?;
        Ok(State::Reporting { task, code })
    }

    fn report(&mut self, task: &str, code: i32) -> State {
        if code == 0 {
            self.console
                .success(&format!("Task '{}' completed successfully", task));
        } else {
            self.console
                .error(&format!("Task '{}' failed (exit code: {})", task, code));
        }

        match self.prompter.confirm(CONTINUE_PROMPT, CONTINUE_BY_DEFAULT) {
            PromptOutcome::Value(true) => State::Selecting,
            PromptOutcome::Value(false) => State::Stopped,
            PromptOutcome::Cancelled => {
                self.console.warn("Ctrl+C detected, exiting");
                State::Stopped
            }
            PromptOutcome::StreamClosed => {
                self.console.warn("Input closed, exiting");
                State::Stopped
            }
        }
    }
}
