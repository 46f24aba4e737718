//! Launcher settings read from the environment

use std::env;
use std::path::PathBuf;

/// Environment variable naming the directory of an invoking wrapper script
pub const CALLER_DIR_ENV: &str = "LATA_CALLER_DIR";

/// Environment variable overriding the external runner binary
pub const RUNNER_BIN_ENV: &str = "LATA_TASK_BIN";

/// Environment variable carrying the collected input into the task
pub const CLI_ARGS_ENV: &str = "CLI_ARGS";

/// Runner binary used when nothing overrides it
pub const DEFAULT_RUNNER: &str = "task";

/// Definition file names to search for, most preferred first
pub const TASKFILE_NAMES: &[&str] = &["Taskfile.yml", "Taskfile.yaml"];

/// Launcher configuration
#[derive(Debug, Clone, PartialEq)]
pub struct LauncherSettings {
    /// Caller directory hint
    pub caller_dir: Option<PathBuf>,

    /// External runner binary
    pub runner: String,

    /// Definition file names, in priority order
    pub file_names: Vec<String>,
}

impl LauncherSettings {
    /// Read settings from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read settings through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let caller_dir = lookup(CALLER_DIR_ENV)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let runner = lookup(RUNNER_BIN_ENV)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_RUNNER.to_string());

        LauncherSettings {
            caller_dir,
            runner,
            ..Default::default()
        }
    }
}

impl Default for LauncherSettings {
    fn default() -> Self {
        LauncherSettings {
            caller_dir: None,
            runner: DEFAULT_RUNNER.to_string(),
            file_names: TASKFILE_NAMES.iter().map(|s| s.to_string()).collect(),
        }
    }
}
