//! External runner invocation
//!
//! This module runs the external task runner in list mode and in run mode.

use crate::config::CLI_ARGS_ENV;
use crate::error::{ExecutionError, ExecutionResult};
use crate::runner::InterruptFlag;
use crate::ui::Console;
use std::env;
use std::path::{Path, PathBuf};
use std::process::{Command as StdCommand, Stdio};

/// Exit code reported when the runner could not be started
pub const SPAWN_FAILURE_CODE: i32 = 1;

/// Invokes the external runner against one Taskfile
#[derive(Debug, Clone)]
pub struct TaskRunner {
    /// Runner binary
    program: String,

    /// Absolute Taskfile path
    taskfile: PathBuf,

    interrupt: InterruptFlag,
}

impl TaskRunner {
    /// Create a runner. A relative Taskfile path is made absolute so it stays
    /// valid once the child's working directory is switched.
    pub fn new(program: impl Into<String>, taskfile: &Path, interrupt: InterruptFlag) -> Self {
        TaskRunner {
            program: program.into(),
            taskfile: absolutize(taskfile),
            interrupt,
        }
    }

    pub fn taskfile(&self) -> &Path {
        &self.taskfile
    }

    /// Directory the runner is started in
    pub fn working_dir(&self) -> PathBuf {
        self.taskfile
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// `<runner> --taskfile <path> --list`
    pub fn list_command(&self) -> StdCommand {
        let mut command = self.base_command();
        command.arg("--list");
        command
    }

    /// `<runner> --taskfile <path> <task> [<input>]`, with `CLI_ARGS=<input>`
    pub fn run_command(&self, task: &str, input: &str) -> StdCommand {
        let mut command = self.base_command();
        command.arg(task);

        if !input.is_empty() {
            command.arg(input);
        }

        command.env(CLI_ARGS_ENV, input);
        command
    }

    /// Capture the runner's own task listing
    pub fn list(&self) -> ExecutionResult<String> {
        let output = self
            .list_command()
            .stdin(Stdio::null())
            .output()
            .map_err(|error| ExecutionError::Spawn {
                program: self.program.clone(),
                error,
            })?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let reason = if stderr.is_empty() {
                format!("exit code {:?}", output.status.code())
            } else {
                stderr
            };
            Err(ExecutionError::ListFailed(reason))
        }
    }

    /// Run a task with inherited stdio and return its exit code.
    ///
    /// Ctrl+C during the run yields 0; a failure to start the runner is
    /// reported and yields [`SPAWN_FAILURE_CODE`].
    pub fn run(&self, task: &str, input: &str, console: &dyn Console) -> i32 {
        let mut command = self.run_command(task, input);
        command
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        console.debug(&format!("{:?}", command));

        self.interrupt.clear();
        let status = command.status();
        let interrupted = self.interrupt.take();

        match status {
            _ if interrupted => {
                console.warn("Task interrupted by user");
                0
            }
            Ok(status) => status.code().unwrap_or(SPAWN_FAILURE_CODE),
            Err(error) => {
                let err = ExecutionError::Spawn {
                    program: self.program.clone(),
                    error,
                };
                console.error(&err.to_string());
                SPAWN_FAILURE_CODE
            }
        }
    }

    fn base_command(&self) -> StdCommand {
        let mut command = StdCommand::new(&self.program);
        command
            .arg("--taskfile")
            .arg(&self.taskfile)
            .current_dir(self.working_dir());
        command
    }
}

fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}
